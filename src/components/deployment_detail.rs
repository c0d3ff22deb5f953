use dioxus::logger::tracing;
use dioxus::prelude::*;

use super::{ErrorPanel, InfoItem, PodTable, StatusBadge};
use crate::api::derive::deployment_status;
use crate::api::models::{Deployment, TemplateContainer};
use crate::api::normalize::Pod;
use crate::api::ApiClient;
use crate::utils::format_age;

const DETAIL_CSS: Asset = asset!("/assets/styling/detail.css");

fn requirement(container: &TemplateContainer, limits: bool, key: &str) -> String {
    container
        .resources
        .as_ref()
        .and_then(|resources| {
            let section = if limits { &resources.limits } else { &resources.requests };
            section.get(key).cloned()
        })
        .unwrap_or_else(|| "-".to_string())
}

#[derive(Props, PartialEq, Clone)]
pub struct DeploymentDetailPanelProps {
    /// Row picked in the list; detail and pods are fetched separately
    deployment: Deployment,
    on_close: EventHandler<()>,
    on_logs: EventHandler<Vec<Pod>>,
}

#[component]
pub fn DeploymentDetailPanel(props: DeploymentDetailPanelProps) -> Element {
    let client = use_context::<ApiClient>();
    let name = props.deployment.metadata.name.clone();
    let namespace = props.deployment.metadata.namespace.clone().unwrap_or_default();

    let mut detail = use_resource({
        let client = client.clone();
        let name = name.clone();
        let namespace = namespace.clone();
        move || {
            let client = client.clone();
            let name = name.clone();
            let namespace = namespace.clone();
            async move { client.deployment_detail(&namespace, &name).await }
        }
    });

    let mut pods = use_resource({
        let client = client.clone();
        let name = name.clone();
        let namespace = namespace.clone();
        move || {
            let client = client.clone();
            let name = name.clone();
            let namespace = namespace.clone();
            async move { client.deployment_pods(&namespace, &name).await }
        }
    });

    let mut restarting = use_signal(|| false);
    let mut restart_error = use_signal(|| None::<String>);

    let restart = {
        let name = name.clone();
        let namespace = namespace.clone();
        move |_: MouseEvent| {
            let client = client.clone();
            let name = name.clone();
            let namespace = namespace.clone();
            restarting.set(true);
            restart_error.set(None);
            spawn(async move {
                match client.restart_deployment(&namespace, &name).await {
                    Ok(()) => {
                        detail.restart();
                        pods.restart();
                    }
                    Err(e) => {
                        tracing::error!("Failed to restart deployment {}/{}: {}", namespace, name, e);
                        restart_error.set(Some(e.to_string()));
                    }
                }
                restarting.set(false);
            });
        }
    };

    let loaded_pods = match &*pods.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: DETAIL_CSS }
        div { class: "detail-overlay", onclick: move |_| props.on_close.call(()),
            aside { class: "detail-panel", onclick: move |evt| evt.stop_propagation(),
                div { class: "detail-header",
                    div {
                        h2 { "Deployment Details" }
                        div { class: "mono", "{name}" }
                        div { "in " span { class: "namespace-tag", "{namespace}" } " namespace" }
                    }
                    div { class: "detail-actions",
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| props.on_logs.call(loaded_pods.clone()),
                            "Logs"
                        }
                        button {
                            class: "btn btn-secondary",
                            disabled: restarting(),
                            onclick: restart,
                            if restarting() { "Restarting..." } else { "Restart" }
                        }
                        button { class: "btn-icon", title: "Close", onclick: move |_| props.on_close.call(()), "✕" }
                    }
                }

                {restart_error().map(|error| rsx! {
                    ErrorPanel { message: "{error}" }
                })}

                {match &*detail.read() {
                    None => rsx! {
                        div { class: "skeleton-group",
                            div { class: "skeleton-line" }
                            div { class: "skeleton-line short" }
                        }
                    },
                    Some(Err(e)) => rsx! {
                        ErrorPanel { message: "Failed to load deployment details: {e}" }
                    },
                    Some(Ok(deployment)) => rsx! {
                        DeploymentSummary { deployment: deployment.clone() }
                    },
                }}

                section { class: "detail-card",
                    {match &*pods.read() {
                        None => rsx! {
                            h3 { "Pods" }
                            div { class: "skeleton-group", div { class: "skeleton-line" } }
                        },
                        Some(Err(e)) => rsx! {
                            h3 { "Pods" }
                            ErrorPanel { message: "Failed to load pods: {e}" }
                        },
                        Some(Ok(list)) if list.is_empty() => rsx! {
                            h3 { "Pods (0)" }
                            p { class: "empty-state", "No pods found for this deployment" }
                        },
                        Some(Ok(list)) => rsx! {
                            h3 { "Pods ({list.len()})" }
                            PodTable { pods: list.clone(), show_namespace: false }
                        },
                    }}
                }

                {match &*detail.read() {
                    Some(Ok(deployment)) => rsx! {
                        DeploymentExtras { deployment: deployment.clone() }
                    },
                    _ => rsx! {},
                }}
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct DeploymentSummaryProps {
    deployment: Deployment,
}

#[component]
fn DeploymentSummary(props: DeploymentSummaryProps) -> Element {
    let deployment = &props.deployment;
    let strategy = deployment
        .spec
        .strategy
        .as_ref()
        .and_then(|strategy| strategy.kind.clone())
        .unwrap_or_else(|| "RollingUpdate".to_string());
    let replicas = format!(
        "Desired: {} | Ready: {} | Available: {}",
        deployment.replicas(),
        deployment.ready_replicas(),
        deployment.available_replicas()
    );

    rsx! {
        section { class: "detail-card",
            h3 { "Basic Information" }
            div { class: "info-grid",
                InfoItem { label: "Name", value: deployment.metadata.name.clone() }
                InfoItem { label: "Namespace", value: deployment.metadata.namespace.clone().unwrap_or_default() }
                div { class: "info-item",
                    span { class: "info-label", "Status" }
                    StatusBadge { badge: deployment_status(deployment) }
                }
                InfoItem { label: "Replicas", value: replicas }
                InfoItem { label: "Strategy", value: strategy }
                InfoItem { label: "Age", value: format_age(deployment.metadata.creation_timestamp.as_deref()) }
            }
        }
    }
}

#[component]
fn DeploymentExtras(props: DeploymentSummaryProps) -> Element {
    let deployment = &props.deployment;
    let containers = deployment.containers();
    let selector = deployment
        .spec
        .selector
        .as_ref()
        .map(|selector| selector.match_labels.clone())
        .unwrap_or_default();

    rsx! {
        if !containers.is_empty() {
            section { class: "detail-card",
                h3 { "Containers ({containers.len()})" }
                {containers.iter().map(|container| {
                    let image = container.image.clone().unwrap_or_else(|| "-".to_string());
                    let request_cpu = requirement(container, false, "cpu");
                    let request_memory = requirement(container, false, "memory");
                    let limit_cpu = requirement(container, true, "cpu");
                    let limit_memory = requirement(container, true, "memory");
                    rsx! {
                        div { key: "{container.name}", class: "container-card",
                            div { class: "container-header", h4 { "{container.name}" } }
                            div { class: "info-grid",
                                InfoItem { label: "Image", value: image }
                            }
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
                    }
                })}
            }
        }

        if !selector.is_empty() {
            section { class: "detail-card",
                h3 { "Selector" }
                div { class: "labels-grid",
                    {selector.iter().map(|(key, value)| rsx! {
                        span { key: "{key}", class: "label-chip", "{key}: {value}" }
                    })}
                }
            }
        }

        if !deployment.metadata.labels.is_empty() {
            section { class: "detail-card",
                h3 { "Labels ({deployment.metadata.labels.len()})" }
                div { class: "labels-grid",
                    {deployment.metadata.labels.iter().map(|(key, value)| rsx! {
                        span { key: "{key}", class: "label-chip", "{key}: {value}" }
                    })}
                }
            }
        }

        if !deployment.status.conditions.is_empty() {
            section { class: "detail-card",
                h3 { "Deployment Conditions" }
                {deployment.status.conditions.iter().map(|condition| {
                    let status_class = if condition.is_true() { "status-badge badge-success" } else { "status-badge badge-neutral" };
                    let message = condition.message.clone().unwrap_or_default();
                    let transition = condition.last_transition_time.clone().unwrap_or_default();
                    rsx! {
                        div { key: "{condition.kind}", class: "condition-row",
                            div {
                                span { class: "condition-type", "{condition.kind}" }
                                if !message.is_empty() {
                                    small { "{message}" }
                                }
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
