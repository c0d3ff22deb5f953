use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api::derive::{
    format_bytes_gb, format_cores, format_memory_gb, node_address, node_cpu_percent, node_memory_percent,
    node_pod_capacity, node_pod_percent, node_ready, node_roles,
};
use crate::api::listing::{found_caption, LoadState};
use crate::api::{ApiClient, Node};
use crate::components::{ErrorPanel, LoadingPanel, StatusBadge, UsageBar};
use crate::utils::format_age;

const PAGES_CSS: Asset = asset!("/assets/styling/pages.css");

fn memory_used_bytes(node: &Node) -> f64 {
    node.metrics
        .as_ref()
        .and_then(|metrics| metrics.usage.as_ref())
        .and_then(|usage| usage.memory.as_ref())
        .map(|memory| memory.bytes)
        .unwrap_or(0.0)
}

#[component]
pub fn Nodes() -> Element {
    let client = use_context::<ApiClient>();

    let mut nodes = use_resource(move || {
        let client = client.clone();
        async move {
            let result = client.list_nodes().await;
            match &result {
                Ok(list) => tracing::info!("Fetched {} nodes", list.len()),
                Err(e) => tracing::error!("Failed to fetch nodes: {}", e),
            }
            result
        }
    });

    let state = LoadState::from_result((*nodes.read()).as_ref());

    rsx! {
        document::Link { rel: "stylesheet", href: PAGES_CSS }
        {match state {
            LoadState::Loading => rsx! {
                LoadingPanel { title: "K3s Nodes", message: "Loading node information..." }
            },
            LoadState::Failed(message) => rsx! {
                div { class: "page-card",
                    ErrorPanel { message, on_retry: move |_| nodes.restart() }
                }
            },
            LoadState::Ready(list) => rsx! {
                div { class: "page-card",
                    div { class: "page-header",
                        div { class: "header-left",
                            h1 { "K3s Nodes" }
                            p { class: "page-description", "Cluster nodes with their resource utilization" }
                        }
                        div { class: "header-controls",
                            button { class: "btn btn-secondary", onclick: move |_| nodes.restart(), "Refresh" }
                        }
                    }
                    table { class: "resource-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "CPU" }
                                th { "Memory" }
                                th { "Pods" }
                                th { "Ready" }
                                th { "Roles" }
                                th { "Internal IP" }
                                th { "External IP" }
                                th { "Version" }
                                th { "Age" }
                            }
                        }
                        tbody {
                            {list.iter().map(|node| rsx! {
                                NodeRow { key: "{node.name}", node: node.clone() }
                            })}
                        }
                    }
                    p { class: "table-caption", {found_caption(list.len(), "nodes")} }
                }
            },
        }}
    }
}

#[derive(Props, PartialEq, Clone)]
struct NodeRowProps {
    node: Node,
}

#[component]
fn NodeRow(props: NodeRowProps) -> Element {
    let node = &props.node;
    let cpu = node.capacity.cpu.clone().unwrap_or_default();
    let memory = node.capacity.memory.clone().unwrap_or_default();
    let internal_ip = node_address(node, "InternalIP");
    let external_ip = node_address(node, "ExternalIP");
    let version = node.kubelet_version.clone().unwrap_or_else(|| "-".to_string());

    let cpu_label = format_cores(&cpu);
    let memory_label = format_memory_gb(&memory);
    let memory_detail = format!("{} used of {}", format_bytes_gb(memory_used_bytes(node)), memory_label);
    let pod_capacity = node_pod_capacity(node);
    let pods_label = format!("{}/{}", node.pods.total, pod_capacity);
    let pods_detail = format!(
        "{} running, {} pending, {} failed, {} succeeded",
        node.pods.running, node.pods.pending, node.pods.failed, node.pods.succeeded
    );

    rsx! {
        tr {
            td { class: "mono", "{node.name}" }
            td { class: "metric-cell",
                UsageBar { label: cpu_label, percent: node_cpu_percent(node), detail: "{cpu} cores capacity" }
            }
            td { class: "metric-cell",
                UsageBar { label: memory_label, percent: node_memory_percent(node), detail: memory_detail }
            }
            td { class: "metric-cell",
                UsageBar { label: pods_label, percent: node_pod_percent(node), detail: pods_detail }
            }
            td { StatusBadge { badge: node_ready(node) } }
            td { "{node_roles(node)}" }
            td { class: "mono", "{internal_ip}" }
            td { class: "mono", "{external_ip}" }
            td { "{version}" }
            td { "{format_age(node.creation_timestamp.as_deref())}" }
        }
    }
}
