use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api::derive::{cluster_connectivity, usage_percent};
use crate::api::listing::found_caption;
use crate::api::models::{ClusterDetail, Health};
use crate::api::{ApiClient, Cluster};
use crate::components::{ErrorPanel, LoadingPanel, StatusBadge, UsageBar};

const PAGES_CSS: Asset = asset!("/assets/styling/pages.css");

#[component]
pub fn Clusters() -> Element {
    let client = use_context::<ApiClient>();

    // List and health load together; either failing fails the page
    let mut overview = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            async move {
                let result = futures::try_join!(client.list_clusters(), client.health());
                if let Err(e) = &result {
                    tracing::error!("Failed to load clusters: {}", e);
                }
                result
            }
        }
    });

    let first_cluster = match &*overview.read() {
        Some(Ok((clusters, _))) => clusters.first().map(|cluster| cluster.name.clone()),
        _ => None,
    };

    rsx! {
        document::Link { rel: "stylesheet", href: PAGES_CSS }
        {match &*overview.read() {
            None => rsx! {
                LoadingPanel { title: "K3s Clusters", message: "Loading cluster information..." }
            },
            Some(Err(e)) => rsx! {
                div { class: "page-card",
                    ErrorPanel { message: "{e}", on_retry: move |_| overview.restart() }
                }
            },
            Some(Ok((clusters, health))) => rsx! {
                {first_cluster.clone().map(|name| rsx! {
                    ClusterDetailSection { key: "{name}", name: name.clone() }
                })}
                ClusterTable {
                    clusters: clusters.clone(),
                    health: health.clone(),
                    on_refresh: move |_| overview.restart(),
                }
            },
        }}
    }
}

#[derive(Props, PartialEq, Clone)]
struct ClusterTableProps {
    clusters: Vec<Cluster>,
    health: Health,
    on_refresh: EventHandler<()>,
}

#[component]
fn ClusterTable(props: ClusterTableProps) -> Element {
    let caption = found_caption(props.clusters.len(), "clusters");

    rsx! {
        div { class: "page-card",
            div { class: "page-header",
                div { class: "header-left",
                    h1 { "K3s Clusters" }
                    p { class: "page-description", "Overview of all available K3s clusters and their status" }
                }
                div { class: "header-controls",
                    button { class: "btn btn-secondary", onclick: move |_| props.on_refresh.call(()), "Refresh" }
                }
            }
            table { class: "resource-table",
                thead {
                    tr {
                        th { "Name" }
                        th { "Origin" }
                        th { "Status" }
                        th { "Kubernetes Version" }
                    }
                }
                tbody {
                    {props.clusters.iter().map(|cluster| {
                        let origin = cluster.origin.clone().unwrap_or_else(|| "-".to_string());
                        let badge = cluster_connectivity(cluster, Some(&props.health)).badge();
                        rsx! {
                            tr { key: "{cluster.name}",
                                td { class: "mono", "{cluster.name}" }
                                td { "{origin}" }
                                td { StatusBadge { badge } }
                                td { "{cluster.version_label()}" }
                            }
                        }
                    })}
                }
            }
            p { class: "table-caption", "{caption}" }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct ClusterDetailSectionProps {
    name: String,
}

#[component]
fn ClusterDetailSection(props: ClusterDetailSectionProps) -> Element {
    let client = use_context::<ApiClient>();
    let name = props.name.clone();

    let detail = use_resource(move || {
        let client = client.clone();
        let name = name.clone();
        async move {
            let result = client.cluster_detail(&name).await;
            if let Err(e) = &result {
                tracing::error!("Failed to fetch cluster detail for {}: {}", name, e);
            }
            result
        }
    });

    rsx! {
        {match &*detail.read() {
            None => rsx! {
                div { class: "stat-grid",
                    for index in 0..3 {
                        div { key: "{index}", class: "stat-card skeleton-group",
                            div { class: "skeleton-line" }
                            div { class: "skeleton-line short" }
                        }
                    }
                }
            },
            Some(Err(e)) => rsx! {
                ErrorPanel { message: "Failed to load cluster details: {e}" }
            },
            Some(Ok(detail)) => rsx! {
                ClusterMetricsCards { detail: detail.clone() }
            },
        }}
    }
}

#[derive(Props, PartialEq, Clone)]
struct ClusterMetricsCardsProps {
    detail: ClusterDetail,
}

#[component]
fn ClusterMetricsCards(props: ClusterMetricsCardsProps) -> Element {
    let metrics = props.detail.metrics.clone().unwrap_or_default();
    let stats = props.detail.stats.clone().unwrap_or_default();
    let usage = metrics.usage.unwrap_or_default();
    let capacity = metrics.capacity.unwrap_or_default();

    let used_cpu = usage.cpu.unwrap_or_default();
    let total_cpu = capacity.cpu.unwrap_or_default();
    let used_memory = usage.memory.unwrap_or_default();
    let total_memory = capacity.memory.unwrap_or_default();

    let cpu_percent = usage_percent(used_cpu.millicores, total_cpu.millicores);
    let memory_percent = usage_percent(used_memory.bytes, total_memory.bytes);
    let cpu_detail = format!("{:.2} / {} cores", used_cpu.cores, total_cpu.cores);
    let memory_detail = format!("{:.1} / {:.1} GB", used_memory.gigabytes, total_memory.gigabytes);

    rsx! {
        div { class: "stat-grid",
            div { class: "stat-card",
                h3 { "Cluster Resources" }
                UsageBar { label: "CPU Usage", percent: cpu_percent, detail: cpu_detail }
                UsageBar { label: "Memory Usage", percent: memory_percent, detail: memory_detail }
            }
            div { class: "stat-card",
                h3 { "Pods" }
                p { class: "stat-value", "{stats.total_pods}" }
                p { class: "stat-subtext", "{stats.running_pods} running, {stats.pending_pods} pending" }
                div { class: "stat-split",
                    span { "Running: {stats.running_pods}" }
                    span { "Failed: {stats.failed_pods}" }
                }
            }
            div { class: "stat-card",
                h3 { "Nodes" }
                p { class: "stat-value", "{stats.total_nodes}" }
                p { class: "stat-subtext", "{stats.ready_nodes} ready" }
            }
        }
    }
}
