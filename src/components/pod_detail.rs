use dioxus::prelude::*;
use std::collections::BTreeMap;

use super::{ErrorPanel, StatusBadge};
use crate::api::derive::{pod_cpu, pod_memory, pod_status};
use crate::api::normalize::{Container, ContainerPort, Pod, Quantity};
use crate::api::ApiClient;
use crate::utils::format_age;

const DETAIL_CSS: Asset = asset!("/assets/styling/detail.css");

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn quantity(map: &BTreeMap<String, Quantity>, key: &str) -> String {
    map.get(key).map(|q| q.as_str().to_string()).unwrap_or_else(|| "-".to_string())
}

fn port_label(port: &ContainerPort) -> String {
    let number = port.container_port.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
    format!("{}/{}", number, port.protocol.as_deref().unwrap_or("TCP"))
}

#[derive(Props, PartialEq, Clone)]
pub struct PodDetailPanelProps {
    /// Row picked in the list; the panel fetches its own detail record
    pod: Pod,
    on_close: EventHandler<()>,
    on_logs: EventHandler<Pod>,
    on_terminal: EventHandler<Pod>,
}

#[component]
pub fn PodDetailPanel(props: PodDetailPanelProps) -> Element {
    let client = use_context::<ApiClient>();
    let namespace = props.pod.namespace.clone();
    let name = props.pod.name.clone();

    let detail = use_resource(move || {
        let client = client.clone();
        let namespace = namespace.clone();
        let name = name.clone();
        async move { client.pod_detail(&namespace, &name).await }
    });

    // Dialogs prefer the detail record, which carries the full container list
    let current = match &*detail.read() {
        Some(Ok(pod)) => pod.clone(),
        _ => props.pod.clone(),
    };
    let logs_pod = current.clone();
    let terminal_pod = current.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: DETAIL_CSS }
        div { class: "detail-overlay", onclick: move |_| props.on_close.call(()),
            aside { class: "detail-panel", onclick: move |evt| evt.stop_propagation(),
                div { class: "detail-header",
                    div {
                        h2 { "Pod Details" }
                        div { class: "mono", "{props.pod.name}" }
                        div { "in " span { class: "namespace-tag", "{props.pod.namespace}" } " namespace" }
                    }
                    div { class: "detail-actions",
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| props.on_logs.call(logs_pod.clone()),
                            "Logs"
                        }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| props.on_terminal.call(terminal_pod.clone()),
                            "Terminal"
                        }
                        button { class: "btn-icon", title: "Close", onclick: move |_| props.on_close.call(()), "✕" }
                    }
                }

                {match &*detail.read() {
                    None => rsx! {
                        div { class: "skeleton-group",
                            div { class: "skeleton-line" }
                            div { class: "skeleton-line short" }
                        }
                    },
                    Some(Err(e)) => rsx! {
                        ErrorPanel { message: "Failed to load pod details: {e}" }
                    },
                    Some(Ok(pod)) => rsx! {
                        PodDetailBody { pod: pod.clone() }
                    },
                }}
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct PodDetailBodyProps {
    pod: Pod,
}

#[component]
fn PodDetailBody(props: PodDetailBodyProps) -> Element {
    let pod = &props.pod;

    rsx! {
        section { class: "detail-card",
            h3 { "Basic Information" }
            div { class: "info-grid",
                InfoItem { label: "Name", value: pod.name.clone() }
                InfoItem { label: "Namespace", value: pod.namespace.clone() }
                div { class: "info-item",
                    span { class: "info-label", "Status" }
                    StatusBadge { badge: pod_status(pod) }
                }
                InfoItem { label: "Node", value: or_dash(&pod.node_name) }
                InfoItem { label: "Pod IP", value: or_dash(&pod.pod_ip) }
                InfoItem { label: "Host IP", value: or_dash(&pod.host_ip) }
                InfoItem { label: "Age", value: format_age(pod.creation_timestamp.as_deref()) }
                InfoItem { label: "Restart Policy", value: or_dash(&pod.restart_policy) }
                InfoItem { label: "Service Account", value: or_dash(&pod.service_account) }
            }
        }

        {pod.usage.as_ref().map(|usage| {
            let cores = usage.cpu_millicores.unwrap_or(0.0) / 1000.0;
            let gigabytes = usage.memory_bytes.unwrap_or(0.0) / 1_000_000_000.0;
            rsx! {
                section { class: "detail-card",
                    h3 { "Resource Usage" }
                    div { class: "usage-grid",
                        div { class: "usage-figure cpu",
                            span { class: "info-label", "CPU Usage" }
                            strong { "{pod_cpu(pod)}" }
                            small { "{cores:.3} cores" }
                        }
                        div { class: "usage-figure memory",
                            span { class: "info-label", "Memory Usage" }
                            strong { "{pod_memory(pod)}" }
                            small { "{gigabytes:.2} GB" }
                        }
                    }
                }
            }
        })}

        if !pod.containers.is_empty() {
            section { class: "detail-card",
                h3 { "Containers ({pod.containers.len()})" }
                {pod.containers.iter().map(|container| rsx! {
                    ContainerCard { key: "{container.name}", container: container.clone() }
                })}
            }
        }

        if !pod.labels.is_empty() {
            section { class: "detail-card",
                h3 { "Labels ({pod.labels.len()})" }
                div { class: "labels-grid",
                    {pod.labels.iter().map(|(key, value)| rsx! {
                        span { key: "{key}", class: "label-chip", "{key}: {value}" }
                    })}
                }
            }
        }

        section { class: "detail-card",
            h3 { "Network" }
            div { class: "info-grid",
                InfoItem { label: "Pod IP", value: or_dash(&pod.pod_ip) }
                InfoItem { label: "Host IP", value: or_dash(&pod.host_ip) }
            }
            if !pod.ports.is_empty() {
                div { class: "info-item",
                    span { class: "info-label", "Network Ports" }
                    div { class: "chip-row",
                        {pod.ports.iter().enumerate().map(|(index, port)| rsx! {
                            span { key: "{index}", class: "label-chip", "{port_label(port)}" }
                        })}
                    }
                }
            }
        }

        if !pod.conditions.is_empty() {
            section { class: "detail-card",
                h3 { "Pod Conditions" }
                {pod.conditions.iter().map(|condition| {
                    let status_class = if condition.is_true() { "status-badge badge-success" } else { "status-badge badge-neutral" };
                    let transition = condition.last_transition_time.clone().unwrap_or_default();
                    rsx! {
                        div { key: "{condition.kind}", class: "condition-row",
                            div {
                                span { class: "condition-type", "{condition.kind}" }
                                if !transition.is_empty() {
                                    small { "Last transition: {transition}" }
                                }
                            }
                            span { class: "{status_class}", "{condition.status}" }
                        }
                    }
                })}
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct ContainerCardProps {
    container: Container,
}

#[component]
fn ContainerCard(props: ContainerCardProps) -> Element {
    let container = &props.container;
    let (ready_label, ready_class) = if container.ready {
        ("Ready", "status-badge badge-success")
    } else {
        ("Not Ready", "status-badge badge-danger")
    };
    let state = match (&container.state.running, container.waiting_reason()) {
        (Some(running), _) => match &running.started_at {
            Some(started) => format!("Running since {}", started),
            None => "Running".to_string(),
        },
        (None, Some(reason)) => reason.to_string(),
        (None, None) => container.state.label().to_string(),
    };
    let last_state = container.last_terminated.as_ref().map(|terminated| {
        format!(
            "Terminated: {} (Exit: {})",
            terminated.reason.as_deref().unwrap_or("-"),
            terminated.exit_code.map(|code| code.to_string()).unwrap_or_else(|| "-".to_string())
        )
    });
    let requests = &container.resources.requests;
    let limits = &container.resources.limits;
    let (request_cpu, request_memory) = (quantity(requests, "cpu"), quantity(requests, "memory"));
    let (limit_cpu, limit_memory) = (quantity(limits, "cpu"), quantity(limits, "memory"));

    rsx! {
        div { class: "container-card",
            div { class: "container-header",
                h4 { "{container.name}" }
                span { class: "{ready_class}", "{ready_label}" }
            }
            div { class: "info-grid",
                InfoItem { label: "Image", value: container.image.clone() }
                InfoItem { label: "Container ID", value: or_dash(&container.container_id) }
                InfoItem { label: "State", value: state }
                InfoItem { label: "Restart Count", value: container.restart_count.to_string() }
                {last_state.map(|last| rsx! {
                    InfoItem { label: "Last State", value: last }
                })}
            }
            if !container.ports.is_empty() {
                div { class: "chip-row",
                    {container.ports.iter().enumerate().map(|(index, port)| rsx! {
                        span { key: "{index}", class: "label-chip", "{port_label(port)}" }
                    })}
                }
            }
            div { class: "resource-requirements",
                span { class: "info-label", "Resource Requirements" }
                div { class: "requirements-grid",
                    div {
                        strong { "Requests" }
                        div { "CPU: {request_cpu}" }
                        div { "Memory: {request_memory}" }
                    }
                    div {
                        strong { "Limits" }
                        div { "CPU: {limit_cpu}" }
                        div { "Memory: {limit_memory}" }
                    }
                }
            }
            if !container.env.is_empty() {
                div { class: "env-list",
                    span { class: "info-label", "Environment Variables ({container.env.len()})" }
                    {container.env.iter().enumerate().map(|(index, var)| {
                        let value = var.value.clone().unwrap_or_default();
                        rsx! {
                            div { key: "{index}", class: "env-row",
                                span { class: "env-name", "{var.name}" }
                                span { "=" }
                                span { class: "env-value", "{value}" }
                            }
                        }
                    })}
                }
            }
            if !container.volume_mounts.is_empty() {
                div { class: "mount-list",
                    span { class: "info-label", "Volume Mounts ({container.volume_mounts.len()})" }
                    {container.volume_mounts.iter().enumerate().map(|(index, mount)| {
                        let mode = if mount.read_only { "(read-only)" } else { "(read-write)" };
                        rsx! {
                            div { key: "{index}", class: "mount-row",
                                span { class: "mono", "{mount.mount_path}" }
                                span { "{mount.name} {mode}" }
                            }
                        }
                    })}
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct InfoItemProps {
    label: String,
    value: String,
}

#[component]
pub fn InfoItem(props: InfoItemProps) -> Element {
    rsx! {
        div { class: "info-item",
            span { class: "info-label", "{props.label}" }
            span { class: "info-value", "{props.value}" }
        }
    }
}
