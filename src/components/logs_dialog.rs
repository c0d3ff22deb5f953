use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api::normalize::Pod;
use crate::api::stream::{ConnectionState, StreamEvent, StreamKind, StreamSession, StreamSlot};
use crate::api::ApiClient;
use crate::utils::config::DashboardConfig;
use crate::utils::file_utils;

const DIALOG_CSS: Asset = asset!("/assets/styling/dialog.css");
const LOG_OUTPUT_ID: &str = "log-output";

/// One entry of the dialog's source selector
#[derive(Debug, Clone, PartialEq)]
pub struct LogSource {
    pub label: String,
    pub pod: String,
    /// `None` lets the server pick the container
    pub container: Option<String>,
}

impl LogSource {
    /// Every container of a single pod
    pub fn containers_of(pod: &Pod) -> Vec<LogSource> {
        pod.containers
            .iter()
            .map(|container| LogSource {
                label: container.name.clone(),
                pod: pod.name.clone(),
                container: Some(container.name.clone()),
            })
            .collect()
    }

    /// One entry per pod of a deployment
    pub fn pods(pods: &[Pod]) -> Vec<LogSource> {
        pods.iter()
            .map(|pod| LogSource {
                label: pod.name.clone(),
                pod: pod.name.clone(),
                container: None,
            })
            .collect()
    }

    fn target(&self) -> String {
        match &self.container {
            Some(container) => format!("{}/{}", self.pod, container),
            None => self.pod.clone(),
        }
    }
}

/// Keep a scrolling output element pinned to its end
pub(crate) fn scroll_to_bottom(id: &str) {
    let _ = document::eval(&format!(
        "const el = document.getElementById('{id}'); if (el) {{ el.scrollTop = el.scrollHeight; }}"
    ));
}

#[derive(Props, PartialEq, Clone)]
pub struct LogsDialogProps {
    title: String,
    namespace: String,
    /// Pod or deployment name, used as the download file prefix
    owner: String,
    /// "Container" or "Pod"
    source_label: String,
    sources: Vec<LogSource>,
    on_close: EventHandler<()>,
}

#[component]
pub fn LogsDialog(props: LogsDialogProps) -> Element {
    let config = use_context::<DashboardConfig>();
    let client = use_context::<ApiClient>();
    let slot = use_hook(StreamSlot::new);

    let mut session = use_signal(|| StreamSession::new(StreamKind::Logs, config.buffer_limit));
    let mut selected = use_signal(|| 0usize);
    let mut pump = use_signal(|| None::<Task>);
    let mut notice = use_signal(|| None::<String>);

    use_drop({
        let slot = slot.clone();
        move || slot.shutdown()
    });

    let source = props.sources.get(selected()).cloned();
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
    let line_count = session.read().buffer().line_count();

    let connect = {
        let slot = slot.clone();
        let namespace = props.namespace.clone();
        let source = source.clone();
        move |_: MouseEvent| {
            let Some(source) = source.clone() else {
                return;
            };
            let url = match client.log_stream_url(&namespace, &source.pod, source.container.as_deref()) {
                Ok(url) => url,
                Err(e) => {
                    session.write().apply(StreamEvent::Failed(e.to_string()));
                    return;
                }
            };

            // Events of the previous stream must not reach the new session
            if let Some(task) = pump.write().take() {
                task.cancel();
            }
            {
                let mut current = session.write();
                current.clear();
                current.begin_connect(source.target());
            }

            let slot = slot.clone();
            pump.set(Some(spawn(async move {
                let mut events = slot.open(url).await;
                while let Some(event) = events.recv().await {
                    session.write().apply(event);
                    scroll_to_bottom(LOG_OUTPUT_ID);
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

    let download = {
        let owner = props.owner.clone();
        let label = source.as_ref().map(|s| s.label.clone()).unwrap_or_default();
        move |_: MouseEvent| {
            let name = file_utils::log_download_name(&owner, &label);
            match file_utils::save_download(&name, session.read().text()) {
                Ok(path) => notice.set(Some(format!("Saved to {}", path.display()))),
                Err(e) => {
                    tracing::error!("Failed to save logs to {}: {}", name, e);
                    notice.set(Some(format!("Failed to save logs: {}", e)));
                }
            }
        }
    };

    let indicator_class = if connected { "stream-indicator live" } else { "stream-indicator" };
    let source_name = source.as_ref().map(|s| s.label.clone()).unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: DIALOG_CSS }
        div { class: "dialog-overlay",
            div { class: "dialog-box stream-dialog",
                div { class: "dialog-header",
                    h3 { "{props.title}" }
                    button { class: "btn-icon", title: "Close", onclick: close, "✕" }
                }

                div { class: "stream-controls",
                    label { class: "control-label", "{props.source_label}:" }
                    select {
                        class: "dialog-select",
                        disabled: locked,
                        onchange: move |evt| {
                            selected.set(evt.value().parse().unwrap_or(0));
                            notice.set(None);
                        },
                        {props.sources.iter().enumerate().map(|(index, option)| rsx! {
                            option {
                                key: "{index}",
                                value: "{index}",
                                selected: index == selected(),
                                "{option.label}"
                            }
                        })}
                    }

                    div { class: "control-actions",
                        if connected {
                            button { class: "btn btn-danger", onclick: disconnect, "Stop Streaming" }
                        } else {
                            button {
                                class: "btn btn-primary",
                                disabled: connecting || source.is_none(),
                                onclick: connect,
                                if connecting { "Connecting..." } else { "Start Streaming" }
                            }
                        }
                        button {
                            class: "btn btn-secondary",
                            disabled: text.is_empty(),
                            onclick: move |_| session.write().clear(),
                            "Clear"
                        }
                        button {
                            class: "btn btn-secondary",
                            disabled: text.is_empty(),
                            onclick: download,
                            "Download"
                        }
                    }
                }

                {error.map(|error| rsx! {
                    div { class: "error-banner", "{error}" }
                })}
                {notice().map(|message| rsx! {
                    div { class: "dialog-notice", "{message}" }
                })}

                div { id: LOG_OUTPUT_ID, class: "stream-output logs",
                    if text.is_empty() {
                        "No logs to display. Click 'Start Streaming' to begin watching logs."
                    } else {
                        "{text}"
                    }
                }

                if !text.is_empty() {
                    div { class: "stream-stats",
                        span { "Lines: {line_count}" }
                        span { "Size: {text.len()} bytes" }
                        span { "{props.source_label}: {source_name}" }
                        span { class: "{indicator_class}",
                            if connected { "Streaming" } else { "Disconnected" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::normalize::Container;

    fn pod(name: &str, containers: &[&str]) -> Pod {
        Pod {
            name: name.to_string(),
            namespace: "default".to_string(),
            containers: containers
                .iter()
                .map(|c| Container {
                    name: c.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_container_sources() {
        let sources = LogSource::containers_of(&pod("web-1", &["app", "sidecar"]));
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1].container.as_deref(), Some("sidecar"));
        assert_eq!(sources[1].target(), "web-1/sidecar");
    }

    #[test]
    fn test_pod_sources_leave_container_to_server() {
        let sources = LogSource::pods(&[pod("web-1", &["app"]), pod("web-2", &["app"])]);
        assert_eq!(sources[1].label, "web-2");
        assert_eq!(sources[1].container, None);
        assert_eq!(sources[1].target(), "web-2");
    }
}
