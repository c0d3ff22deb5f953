use dioxus::prelude::*;

use super::StatusBadge;
use crate::api::derive::{pod_cpu, pod_memory, pod_ready, pod_status, restart_count};
use crate::api::normalize::Pod;
use crate::utils::format_age;

#[derive(Props, PartialEq, Clone)]
pub struct PodTableProps {
    pods: Vec<Pod>,
    #[props(default = true)]
    show_namespace: bool,
    #[props(optional)]
    on_select: Option<EventHandler<Pod>>,
    #[props(optional)]
    on_logs: Option<EventHandler<Pod>>,
}

#[component]
pub fn PodTable(props: PodTableProps) -> Element {
    let show_namespace = props.show_namespace;
    let on_select = props.on_select;
    let on_logs = props.on_logs;

    rsx! {
        table { class: "resource-table",
            thead {
                tr {
                    th { "Name" }
                    if show_namespace {
                        th { "Namespace" }
                    }
                    th { "Status" }
                    th { "Ready" }
                    th { "Restarts" }
                    th { "CPU" }
                    th { "Memory" }
                    th { "Node" }
                    th { "IP" }
                    th { "Age" }
                    if on_logs.is_some() {
                        th { "Actions" }
                    }
                }
            }
            tbody {
                {props.pods.iter().map(|pod| {
                    let restarts = restart_count(pod);
                    let node = pod.node_name.clone().unwrap_or_else(|| "-".to_string());
                    let ip = pod.pod_ip.clone().unwrap_or_else(|| "-".to_string());
                    let row_class = if on_select.is_some() { "clickable" } else { "" };
                    let restart_class = if restarts > 0 { "restarts-warning" } else { "" };
                    let row_pod = pod.clone();
                    let logs_pod = pod.clone();
                    rsx! {
                        tr {
                            key: "{pod.namespace}/{pod.name}",
                            class: "{row_class}",
                            onclick: move |_| {
                                if let Some(handler) = on_select {
                                    handler.call(row_pod.clone());
                                }
                            },
                            td { class: "mono", "{pod.name}" }
                            if show_namespace {
                                td { span { class: "namespace-tag", "{pod.namespace}" } }
                            }
                            td { StatusBadge { badge: pod_status(pod) } }
                            td { StatusBadge { badge: pod_ready(pod) } }
                            td { class: "{restart_class}", "{restarts}" }
                            td { class: "mono", "{pod_cpu(pod)}" }
                            td { class: "mono", "{pod_memory(pod)}" }
                            td { "{node}" }
                            td { class: "mono", "{ip}" }
                            td { "{format_age(pod.creation_timestamp.as_deref())}" }
                            {on_logs.map(|handler| rsx! {
                                td {
                                    button {
                                        class: "btn btn-secondary btn-small",
                                        onclick: move |evt| {
                                            evt.stop_propagation();
                                            handler.call(logs_pod.clone());
                                        },
                                        "Logs"
                                    }
                                }
                            })}
                        }
                    }
                })}
            }
        }
    }
}
