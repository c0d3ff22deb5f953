use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api::derive::{deployment_replicas, deployment_status, deployment_updates};
use crate::api::listing::{
    found_caption, namespace_options, sort_deployments, ListFilter, LoadState, SortDirection, SortField, SortState,
};
use crate::api::normalize::Pod;
use crate::api::{ApiClient, Deployment};
use crate::components::{
    DeploymentDetailPanel, ErrorPanel, KubeSystemToggle, LoadingPanel, LogSource, LogsDialog, NamespaceSelector,
    StatusBadge,
};
use crate::contexts::SettingsContext;
use crate::utils::config::ALL_NAMESPACES;
use crate::utils::format_age;

const PAGES_CSS: Asset = asset!("/assets/styling/pages.css");

/// Deployment whose logs dialog is open, with the pods it was opened over
#[derive(Clone, PartialEq)]
struct LogsTarget {
    deployment: Deployment,
    pods: Vec<Pod>,
}

#[component]
pub fn Deployments() -> Element {
    let client = use_context::<ApiClient>();
    let mut settings = use_context::<SettingsContext>();

    let mut selected_namespace = use_signal(|| ALL_NAMESPACES.to_string());
    // None keeps the API order until a header is clicked
    let mut sort = use_signal(|| None::<SortState>);
    let mut selected = use_signal(|| None::<Deployment>);
    let mut logs_target = use_signal(|| None::<LogsTarget>);

    let mut deployments = use_resource(move || {
        let client = client.clone();
        async move {
            let result = client.list_deployments().await;
            match &result {
                Ok(list) => tracing::info!("Fetched {} deployments", list.len()),
                Err(e) => tracing::error!("Failed to fetch deployments: {}", e),
            }
            result
        }
    });

    let on_sort = move |field: SortField| sort.set(Some(next_sort(sort(), field)));

    let hide_kube_system = settings.settings.read().hide_kube_system_deployments;
    let state = LoadState::from_result((*deployments.read()).as_ref());

    let body = match state {
        LoadState::Loading => rsx! {
            LoadingPanel { title: "Deployments", message: "Loading deployments..." }
        },
        LoadState::Failed(message) => rsx! {
            div { class: "page-card",
                ErrorPanel { message, on_retry: move |_| deployments.restart() }
            }
        },
        LoadState::Ready(list) => {
            let options = namespace_options(&list);
            let mut visible = ListFilter::new(&selected_namespace(), hide_kube_system).apply(&list);
            if let Some(order) = sort() {
                sort_deployments(&mut visible, order);
            }
            let caption = found_caption(visible.len(), "deployments");

            rsx! {
                div { class: "page-card",
                    div { class: "page-header",
                        div { class: "header-left",
                            h1 { "Deployments" }
                            p { class: "page-description", "Deployments across all namespaces" }
                        }
                        div { class: "header-controls",
                            KubeSystemToggle {
                                id: "hide-kube-system-deployments",
                                checked: hide_kube_system,
                                on_change: move |hide| settings.update(|s| s.hide_kube_system_deployments = hide),
                            }
                            NamespaceSelector {
                                options,
                                selected_namespace: selected_namespace(),
                                on_change: move |ns| selected_namespace.set(ns),
                            }
                            button { class: "btn btn-secondary", onclick: move |_| deployments.restart(), "Refresh" }
                        }
                    }
                    table { class: "resource-table",
                        thead {
                            tr {
                                SortHeader { field: SortField::Name, sort: sort(), on_sort }
                                SortHeader { field: SortField::Namespace, sort: sort(), on_sort }
                                th { "Status" }
                                SortHeader { field: SortField::Ready, sort: sort(), on_sort }
                                SortHeader { field: SortField::Replicas, sort: sort(), on_sort }
                                SortHeader { field: SortField::Updated, sort: sort(), on_sort }
                                SortHeader { field: SortField::Available, sort: sort(), on_sort }
                                th { "Containers" }
                                th { "Images" }
                                SortHeader { field: SortField::Age, sort: sort(), on_sort }
                            }
                        }
                        tbody {
                            {visible.iter().map(|deployment| {
                                let namespace = deployment.metadata.namespace.clone().unwrap_or_default();
                                rsx! {
                                    DeploymentRow {
                                        key: "{namespace}/{deployment.metadata.name}",
                                        deployment: deployment.clone(),
                                        on_select: move |deployment| selected.set(Some(deployment)),
                                    }
                                }
                            })}
                        }
                    }
                    p { class: "table-caption", "{caption}" }
                }
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: PAGES_CSS }
        {body}

        {selected().map(|deployment| {
            let key = format!("{}/{}", deployment.metadata.namespace.clone().unwrap_or_default(), deployment.metadata.name);
            let owner = deployment.clone();
            rsx! {
                DeploymentDetailPanel {
                    key: "{key}",
                    deployment,
                    on_close: move |_| selected.set(None),
                    on_logs: move |pods| {
                        selected.set(None);
                        logs_target.set(Some(LogsTarget { deployment: owner.clone(), pods }));
                    },
                }
            }
        })}

        {logs_target().map(|target| {
            let name = target.deployment.metadata.name.clone();
            let namespace = target.deployment.metadata.namespace.clone().unwrap_or_default();
            let key = format!("{}/{}", namespace, name);
            rsx! {
                LogsDialog {
                    key: "{key}",
                    title: "Deployment Logs - {name}",
                    namespace,
                    owner: name.clone(),
                    source_label: "Pod",
                    sources: LogSource::pods(&target.pods),
                    on_close: move |_| logs_target.set(None),
                }
            }
        })}
    }
}

fn next_sort(current: Option<SortState>, field: SortField) -> SortState {
    match current {
        Some(state) => state.toggle(field),
        None => SortState {
            field,
            direction: SortDirection::Ascending,
        },
    }
}

#[derive(Props, PartialEq, Clone)]
struct SortHeaderProps {
    field: SortField,
    sort: Option<SortState>,
    on_sort: EventHandler<SortField>,
}

#[component]
fn SortHeader(props: SortHeaderProps) -> Element {
    let field = props.field;
    let indicator = props.sort.map(|state| state.indicator(field)).unwrap_or("");

    rsx! {
        th { class: "sortable", onclick: move |_| props.on_sort.call(field),
            "{field.label()}{indicator}"
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct DeploymentRowProps {
    deployment: Deployment,
    on_select: EventHandler<Deployment>,
}

#[component]
fn DeploymentRow(props: DeploymentRowProps) -> Element {
    let deployment = &props.deployment;
    let namespace = deployment.metadata.namespace.clone().unwrap_or_default();
    let containers = deployment.containers();
    let images: Vec<String> = containers
        .iter()
        .filter_map(|container| container.image.clone())
        .collect();
    let row = deployment.clone();

    rsx! {
        tr { class: "clickable", onclick: move |_| props.on_select.call(row.clone()),
            td { class: "mono", "{deployment.metadata.name}" }
            td { span { class: "namespace-tag", "{namespace}" } }
            td { StatusBadge { badge: deployment_status(deployment) } }
            td { StatusBadge { badge: deployment_replicas(deployment) } }
            td { "{deployment.replicas()}" }
            td { StatusBadge { badge: deployment_updates(deployment) } }
            td { "{deployment.available_replicas()}" }
            td { "{containers.len()}" }
            td {
                div { class: "image-list",
                    {images.iter().enumerate().map(|(index, image)| rsx! {
                        span { key: "{index}", class: "mono image-name", "{image}" }
                    })}
                }
            }
            td { "{format_age(deployment.metadata.creation_timestamp.as_deref())}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_click_sorts_ascending() {
        let state = next_sort(None, SortField::Ready);
        assert_eq!(state.field, SortField::Ready);
        assert_eq!(state.direction, SortDirection::Ascending);

        let state = next_sort(None, SortField::Name);
        assert_eq!(state.field, SortField::Name);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_second_click_flips_direction() {
        let state = next_sort(Some(next_sort(None, SortField::Age)), SortField::Age);
        assert_eq!(state.direction, SortDirection::Descending);
    }
}
