use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api::derive::{label_preview, namespace_status};
use crate::api::listing::{found_caption, LoadState};
use crate::api::{ApiClient, Namespace};
use crate::components::{ErrorPanel, LoadingPanel, PodTable, StatusBadge};
use crate::utils::format_age;

const PAGES_CSS: Asset = asset!("/assets/styling/pages.css");
const DIALOG_CSS: Asset = asset!("/assets/styling/dialog.css");

const LABEL_PREVIEW_LIMIT: usize = 2;

#[component]
pub fn Namespaces() -> Element {
    let client = use_context::<ApiClient>();
    let mut viewing = use_signal(|| None::<String>);

    let mut namespaces = use_resource(move || {
        let client = client.clone();
        async move {
            let result = client.list_namespaces().await;
            if let Err(e) = &result {
                tracing::error!("Failed to fetch namespaces: {}", e);
            }
            result
        }
    });

    let state = LoadState::from_result((*namespaces.read()).as_ref());

    rsx! {
        document::Link { rel: "stylesheet", href: PAGES_CSS }
        {match state {
            LoadState::Loading => rsx! {
                LoadingPanel { title: "Namespaces", message: "Loading namespaces..." }
            },
            LoadState::Failed(message) => rsx! {
                div { class: "page-card",
                    ErrorPanel { message, on_retry: move |_| namespaces.restart() }
                }
            },
            LoadState::Ready(list) => rsx! {
                div { class: "page-card",
                    div { class: "page-header",
                        div { class: "header-left",
                            h1 { "Namespaces" }
                            p { class: "page-description", "Namespaces in the cluster and the pods they contain" }
                        }
                        div { class: "header-controls",
                            button { class: "btn btn-secondary", onclick: move |_| namespaces.restart(), "Refresh" }
                        }
                    }
                    table { class: "resource-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Status" }
                                th { "Labels" }
                                th { "Age" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            {list.iter().map(|namespace| rsx! {
                                NamespaceRow {
                                    key: "{namespace.name}",
                                    namespace: namespace.clone(),
                                    on_view_pods: move |name| viewing.set(Some(name)),
                                }
                            })}
                        }
                    }
                    p { class: "table-caption", {found_caption(list.len(), "namespaces")} }
                }
            },
        }}

        {viewing().map(|name| rsx! {
            NamespacePodsDialog {
                key: "{name}",
                namespace: name.clone(),
                on_close: move |_| viewing.set(None),
            }
        })}
    }
}

#[derive(Props, PartialEq, Clone)]
struct NamespaceRowProps {
    namespace: Namespace,
    on_view_pods: EventHandler<String>,
}

#[component]
fn NamespaceRow(props: NamespaceRowProps) -> Element {
    let namespace = &props.namespace;
    let (labels, hidden) = label_preview(namespace, LABEL_PREVIEW_LIMIT);
    let name = namespace.name.clone();

    rsx! {
        tr {
            td { class: "mono", "{namespace.name}" }
            td { StatusBadge { badge: namespace_status(namespace) } }
            td {
                if labels.is_empty() {
                    span { class: "muted", "No labels" }
                }
                div { class: "chip-row",
                    {labels.iter().map(|label| rsx! {
                        span { key: "{label}", class: "label-chip", "{label}" }
                    })}
                    if hidden > 0 {
                        span { class: "muted", "+{hidden} more" }
                    }
                }
            }
            td { "{format_age(namespace.creation_timestamp.as_deref())}" }
            td {
                button {
                    class: "btn btn-secondary btn-small",
                    onclick: move |_| props.on_view_pods.call(name.clone()),
                    "View Pods"
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct NamespacePodsDialogProps {
    namespace: String,
    on_close: EventHandler<()>,
}

#[component]
fn NamespacePodsDialog(props: NamespacePodsDialogProps) -> Element {
    let client = use_context::<ApiClient>();
    let namespace = props.namespace.clone();

    let pods = use_resource(move || {
        let client = client.clone();
        let namespace = namespace.clone();
        async move {
            let result = client.list_pods(Some(&namespace)).await;
            if let Err(e) = &result {
                tracing::error!("Failed to fetch pods for namespace {}: {}", namespace, e);
            }
            result
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: DIALOG_CSS }
        div { class: "dialog-overlay", onclick: move |_| props.on_close.call(()),
            div { class: "dialog-box wide", onclick: move |evt| evt.stop_propagation(),
                div { class: "dialog-header",
                    div {
                        h3 { "Pods in {props.namespace} namespace" }
                        p { class: "page-description", "All pods running in this namespace" }
                    }
                    button { class: "btn-icon", title: "Close", onclick: move |_| props.on_close.call(()), "✕" }
                }
                {match &*pods.read() {
                    None => rsx! {
                        div { class: "skeleton-group",
                            div { class: "skeleton-line" }
                            div { class: "skeleton-line" }
                        }
                    },
                    Some(Err(e)) => rsx! {
                        ErrorPanel { message: "{e}" }
                    },
                    Some(Ok(list)) => rsx! {
                        PodTable { pods: list.clone(), show_namespace: false }
                        p { class: "table-caption", {found_caption(list.len(), "pods")} }
                    },
                }}
            }
        }
    }
}
