use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api::listing::{found_caption, namespace_options, ListFilter, LoadState};
use crate::api::{ApiClient, Pod};
use crate::components::{
    ErrorPanel, KubeSystemToggle, LoadingPanel, LogSource, LogsDialog, NamespaceSelector, PodDetailPanel, PodTable,
    TerminalDialog,
};
use crate::contexts::SettingsContext;
use crate::utils::config::ALL_NAMESPACES;

const PAGES_CSS: Asset = asset!("/assets/styling/pages.css");

/// Dialog opened from the table or the detail panel
#[derive(Clone, PartialEq)]
enum PodDialog {
    Logs(Pod),
    Terminal(Pod),
}

fn pod_key(pod: &Pod) -> String {
    format!("{}/{}", pod.namespace, pod.name)
}

#[component]
pub fn Pods() -> Element {
    let client = use_context::<ApiClient>();
    let mut settings = use_context::<SettingsContext>();

    let mut selected_namespace = use_signal(|| ALL_NAMESPACES.to_string());
    let mut selected = use_signal(|| None::<Pod>);
    let mut dialog = use_signal(|| None::<PodDialog>);

    let mut pods = use_resource(move || {
        let client = client.clone();
        async move {
            let result = client.list_pods(None).await;
            match &result {
                Ok(list) => tracing::info!("Fetched {} pods", list.len()),
                Err(e) => tracing::error!("Failed to fetch pods: {}", e),
            }
            result
        }
    });

    let hide_kube_system = settings.settings.read().hide_kube_system_pods;
    let state = LoadState::from_result((*pods.read()).as_ref());

    let body = match state {
        LoadState::Loading => rsx! {
            LoadingPanel { title: "Pods", message: "Loading pods..." }
        },
        LoadState::Failed(message) => rsx! {
            div { class: "page-card",
                ErrorPanel { message, on_retry: move |_| pods.restart() }
            }
        },
        LoadState::Ready(list) => {
            let options = namespace_options(&list);
            let visible = ListFilter::new(&selected_namespace(), hide_kube_system).apply(&list);
            let caption = found_caption(visible.len(), "pods");

            rsx! {
                div { class: "page-card",
                    div { class: "page-header",
                        div { class: "header-left",
                            h1 { "Pods" }
                            p { class: "page-description", "Running pods with their status and resource usage" }
                        }
                        div { class: "header-controls",
                            KubeSystemToggle {
                                id: "hide-kube-system-pods",
                                checked: hide_kube_system,
                                on_change: move |hide| settings.update(|s| s.hide_kube_system_pods = hide),
                            }
                            NamespaceSelector {
                                options,
                                selected_namespace: selected_namespace(),
                                on_change: move |ns| selected_namespace.set(ns),
                            }
                            button { class: "btn btn-secondary", onclick: move |_| pods.restart(), "Refresh" }
                        }
                    }
                    PodTable {
                        pods: visible,
                        on_select: move |pod| selected.set(Some(pod)),
                        on_logs: move |pod| dialog.set(Some(PodDialog::Logs(pod))),
                    }
                    p { class: "table-caption", "{caption}" }
                }
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: PAGES_CSS }
        {body}

        {selected().map(|pod| {
            let key = pod_key(&pod);
            rsx! {
                PodDetailPanel {
                    key: "{key}",
                    pod,
                    on_close: move |_| selected.set(None),
                    on_logs: move |pod| {
                        selected.set(None);
                        dialog.set(Some(PodDialog::Logs(pod)));
                    },
                    on_terminal: move |pod| {
                        selected.set(None);
                        dialog.set(Some(PodDialog::Terminal(pod)));
                    },
                }
            }
        })}

        {dialog().map(|open| match open {
            PodDialog::Logs(pod) => rsx! {
                LogsDialog {
                    key: "logs-{pod_key(&pod)}",
                    title: "Pod Logs - {pod.name}",
                    namespace: pod.namespace.clone(),
                    owner: pod.name.clone(),
                    source_label: "Container",
                    sources: LogSource::containers_of(&pod),
                    on_close: move |_| dialog.set(None),
                }
            },
            PodDialog::Terminal(pod) => rsx! {
                TerminalDialog {
                    key: "terminal-{pod_key(&pod)}",
                    pod: pod.clone(),
                    on_close: move |_| dialog.set(None),
                }
            },
        })}
    }
}
