use dioxus::logger::tracing;
use dioxus::prelude::*;

use super::logs_dialog::scroll_to_bottom;
use crate::api::normalize::Pod;
use crate::api::stream::{ConnectionState, StreamEvent, StreamKind, StreamSession, StreamSlot};
use crate::api::ApiClient;
use crate::utils::config::DashboardConfig;

const DIALOG_CSS: Asset = asset!("/assets/styling/dialog.css");
const TERMINAL_OUTPUT_ID: &str = "terminal-output";

pub const SHELLS: [&str; 3] = ["/bin/sh", "/bin/bash", "/bin/zsh"];
const QUICK_COMMANDS: [&str; 4] = ["ls -la", "pwd", "ps aux", "clear"];

fn send_command(slot: &StreamSlot, line: String) {
    let slot = slot.clone();
    spawn(async move {
        if let Err(e) = slot.send_line(&line).await {
            tracing::warn!("Failed to send terminal input: {}", e);
        }
    });
}

#[derive(Props, PartialEq, Clone)]
pub struct TerminalDialogProps {
    pod: Pod,
    on_close: EventHandler<()>,
}

#[component]
pub fn TerminalDialog(props: TerminalDialogProps) -> Element {
    let config = use_context::<DashboardConfig>();
    let client = use_context::<ApiClient>();
    let slot = use_hook(StreamSlot::new);

    let mut session = use_signal(|| StreamSession::new(StreamKind::Terminal, config.buffer_limit));
    let mut container = use_signal(|| {
        props
            .pod
            .containers
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_default()
    });
    let mut shell = use_signal(|| SHELLS[0].to_string());
    let mut command = use_signal(String::new);
    let mut pump = use_signal(|| None::<Task>);

    use_drop({
        let slot = slot.clone();
        move || slot.shutdown()
    });

    let (state, locked, error, text) = {
        let current = session.read();
        (
            current.state(),
            current.is_active(),
            current.error().map(str::to_string),
            current.text().to_string(),
        )
    };
    let connected = state == ConnectionState::Connected;
    let connecting = state == ConnectionState::Connecting;

    let connect = {
        let slot = slot.clone();
        let namespace = props.pod.namespace.clone();
        let pod_name = props.pod.name.clone();
        move |_: MouseEvent| {
            let container_name = container();
            if container_name.is_empty() {
                return;
            }
            let url = match client.terminal_url(&namespace, &pod_name, &container_name, &shell()) {
                Ok(url) => url,
                Err(e) => {
                    session.write().apply(StreamEvent::Failed(e.to_string()));
                    return;
                }
            };

            if let Some(task) = pump.write().take() {
                task.cancel();
            }
            {
                let mut current = session.write();
                current.clear();
                current.begin_connect(format!("{}/{}", pod_name, container_name));
            }

            let slot = slot.clone();
            pump.set(Some(spawn(async move {
                let mut events = slot.open(url).await;
                while let Some(event) = events.recv().await {
                    session.write().apply(event);
                    scroll_to_bottom(TERMINAL_OUTPUT_ID);
                }
            })));
        }
    };

    let disconnect = {
        let slot = slot.clone();
        move |_: MouseEvent| {
            let slot = slot.clone();
            spawn(async move {
                slot.close().await;
            });
        }
    };

    let close = {
        let slot = slot.clone();
        move |_: MouseEvent| {
            if let Some(task) = pump.write().take() {
                task.cancel();
            }
            slot.shutdown();
            session.write().reset();
            props.on_close.call(());
        }
    };

    let on_keydown = {
        let slot = slot.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter && connected {
                let line = command();
                command.set(String::new());
                send_command(&slot, line);
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: DIALOG_CSS }
        div { class: "dialog-overlay",
            div { class: "dialog-box stream-dialog",
                div { class: "dialog-header",
                    h3 { "Terminal - {props.pod.name}" }
                    button { class: "btn-icon", title: "Close", onclick: close, "✕" }
                }

                div { class: "stream-controls",
                    label { class: "control-label", "Container:" }
                    select {
                        class: "dialog-select",
                        disabled: locked,
                        onchange: move |evt| container.set(evt.value()),
                        {props.pod.containers.iter().map(|c| rsx! {
                            option {
                                key: "{c.name}",
                                value: "{c.name}",
                                selected: c.name == container(),
                                "{c.name}"
                            }
                        })}
                    }
                    label { class: "control-label", "Shell:" }
                    select {
                        class: "dialog-select narrow",
                        disabled: locked,
                        onchange: move |evt| shell.set(evt.value()),
                        {SHELLS.iter().map(|option| rsx! {
                            option {
                                key: "{option}",
                                value: "{option}",
                                selected: *option == shell(),
                                "{option}"
                            }
                        })}
                    }

                    div { class: "control-actions",
                        if connected {
                            button { class: "btn btn-danger", onclick: disconnect, "Disconnect" }
                        } else {
                            button {
                                class: "btn btn-primary",
                                disabled: connecting || container().is_empty(),
                                onclick: connect,
                                if connecting { "Connecting..." } else { "Connect" }
                            }
                        }
                    }
                }

                {error.map(|error| rsx! {
                    div { class: "error-banner", "{error}" }
                })}

                div { id: TERMINAL_OUTPUT_ID, class: "stream-output terminal",
                    if text.is_empty() {
                        "Terminal ready. Click 'Connect' to start a session."
                    } else {
                        "{text}"
                    }
                }

                if connected {
                    div { class: "terminal-input",
                        span { class: "prompt", "$" }
                        input {
                            r#type: "text",
                            placeholder: "Type command and press Enter...",
                            value: "{command}",
                            autofocus: true,
                            oninput: move |evt| command.set(evt.value()),
                            onkeydown: on_keydown,
                        }
                    }
                    div { class: "quick-commands",
                        span { class: "control-label", "Quick:" }
                        {QUICK_COMMANDS.iter().map(|&quick| {
                            let slot = slot.clone();
                            rsx! {
                                button {
                                    key: "{quick}",
                                    class: "btn btn-secondary btn-small",
                                    onclick: move |_| send_command(&slot, quick.to_string()),
                                    "{quick}"
                                }
                            }
                        })}
                    }
                }
            }
        }
    }
}
