use dioxus::prelude::*;
use k8s_openapi::chrono::Utc;

use super::StatusBadge;
use crate::api::playground::{monitor_badge, DeploymentMonitor};

#[derive(Props, PartialEq, Clone)]
pub struct DeploymentMonitorPanelProps {
    monitor: DeploymentMonitor,
    active: bool,
    on_toggle: EventHandler<()>,
    on_refresh: EventHandler<()>,
    /// (name, namespace)
    on_delete: EventHandler<(String, String)>,
    /// Entry whose delete request is in flight
    #[props(optional)]
    deleting: Option<(String, String)>,
}

#[component]
pub fn DeploymentMonitorPanel(props: DeploymentMonitorPanelProps) -> Element {
    let now = Utc::now();
    let entries = props.monitor.entries();
    let (state_label, state_class) = if props.active {
        ("Active", "status-badge badge-success")
    } else {
        ("Inactive", "status-badge badge-neutral")
    };
    let toggle_label = if props.active { "Pause Monitor" } else { "Start Monitor" };

    rsx! {
        div { class: "page-card deployment-monitor",
            div { class: "page-header",
                div { class: "header-left",
                    h2 { class: "section-title",
                        "Deployment Status Monitor "
                        span { class: "{state_class}", "{state_label}" }
                    }
                    p { class: "page-description", "{entries.len()} deployments being monitored" }
                }
                div { class: "header-controls",
                    button {
                        class: "btn btn-secondary btn-small",
                        onclick: move |_| props.on_toggle.call(()),
                        "{toggle_label}"
                    }
                    button {
                        class: "btn btn-secondary btn-small",
                        title: "Refresh",
                        onclick: move |_| props.on_refresh.call(()),
                        "⟳"
                    }
                }
            }

            if props.monitor.is_empty() {
                p { class: "empty-state", "No deployments created yet. Create a deployment to start monitoring." }
            }

            {entries.iter().map(|entry| {
                let key = (entry.name.clone(), entry.namespace.clone());
                let busy = props.deleting.as_ref() == Some(&key);
                let age = entry.age_label(now);
                rsx! {
                    div { key: "{entry.namespace}/{entry.name}", class: "monitor-entry",
                        div { class: "monitor-header",
                            div {
                                span { class: "mono", "{entry.name}" }
                                span { class: "namespace-tag", "{entry.namespace}" }
                            }
                            div { class: "monitor-actions",
                                StatusBadge { badge: monitor_badge(entry) }
                                button {
                                    class: "btn btn-danger btn-small",
                                    title: "Delete",
                                    disabled: busy,
                                    onclick: move |_| props.on_delete.call(key.clone()),
                                    if busy { "Deleting..." } else { "Delete" }
                                }
                            }
                        }
                        div { class: "monitor-grid",
                            div {
                                div { span { class: "info-label", "Image: " } span { class: "mono", "{entry.image}" } }
                                div { span { class: "info-label", "CPU: " } "{entry.cpu_request}" }
                                div { span { class: "info-label", "Memory: " } "{entry.memory_request}" }
                            }
                            div {
                                div { span { class: "info-label", "Replicas: " } "{entry.ready_replicas}/{entry.replicas}" }
                                div { span { class: "info-label", "Available: " } "{entry.available_replicas}" }
                                div { span { class: "info-label", "Age: " } "{age}" }
                            }
                        }
                        if !entry.conditions.is_empty() {
                            div { class: "chip-row",
                                span { class: "info-label", "Conditions:" }
                                {entry.conditions.iter().map(|condition| {
                                    let chip_class = if condition.is_true() { "label-chip active" } else { "label-chip" };
                                    rsx! {
                                        span { key: "{condition.kind}", class: "{chip_class}", "{condition.kind}" }
                                    }
                                })}
                            }
                        }
                    }
                }
            })}
        }
    }
}
