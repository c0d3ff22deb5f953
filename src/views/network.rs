use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api::derive::{
    ingress_addresses, ingress_backends, ingress_class, ingress_has_tls, ingress_hosts, service_external_address,
    service_ports, service_type, Badge, Tone,
};
use crate::api::listing::{found_caption, LoadState};
use crate::api::{ApiClient, Ingress, Service};
use crate::components::{ErrorPanel, StatusBadge};
use crate::utils::format_age;

const PAGES_CSS: Asset = asset!("/assets/styling/pages.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NetworkTab {
    Services,
    Ingresses,
}

fn service_type_badge(service: &Service) -> Badge {
    let kind = service_type(service);
    let tone = match kind.as_str() {
        "ClusterIP" => Tone::Info,
        "NodePort" => Tone::Success,
        "LoadBalancer" => Tone::Warning,
        _ => Tone::Neutral,
    };
    Badge::new(kind, tone)
}

fn tls_badge(ingress: &Ingress) -> Badge {
    if ingress_has_tls(ingress) {
        Badge::new("TLS", Tone::Success)
    } else {
        Badge::new("No TLS", Tone::Neutral)
    }
}

fn tab_count<T>(state: &LoadState<Vec<T>>) -> String {
    match state {
        LoadState::Ready(items) => format!(" ({})", items.len()),
        _ => String::new(),
    }
}

#[component]
pub fn Network() -> Element {
    let client = use_context::<ApiClient>();
    let mut active_tab = use_signal(|| NetworkTab::Services);

    let mut services = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            async move {
                let result = client.list_services().await;
                if let Err(e) = &result {
                    tracing::error!("Failed to fetch services: {}", e);
                }
                result
            }
        }
    });

    let mut ingresses = use_resource(move || {
        let client = client.clone();
        async move {
            let result = client.list_ingresses().await;
            if let Err(e) = &result {
                tracing::error!("Failed to fetch ingresses: {}", e);
            }
            result
        }
    });

    let services_state = LoadState::from_result((*services.read()).as_ref());
    let ingresses_state = LoadState::from_result((*ingresses.read()).as_ref());
    let services_label = format!("Services{}", tab_count(&services_state));
    let ingresses_label = format!("Ingresses{}", tab_count(&ingresses_state));

    let tab_class = move |tab: NetworkTab| {
        if active_tab() == tab {
            "tab active"
        } else {
            "tab"
        }
    };

    let refresh = move |_: MouseEvent| match active_tab() {
        NetworkTab::Services => services.restart(),
        NetworkTab::Ingresses => ingresses.restart(),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: PAGES_CSS }
        div { class: "page-card",
            div { class: "page-header",
                div { class: "header-left",
                    h1 { "Network" }
                    p { class: "page-description", "Services and ingresses that expose workloads" }
                }
                div { class: "header-controls",
                    button { class: "btn btn-secondary", onclick: refresh, "Refresh" }
                }
            }

            div { class: "tab-bar",
                button {
                    class: tab_class(NetworkTab::Services),
                    onclick: move |_| active_tab.set(NetworkTab::Services),
                    "{services_label}"
                }
                button {
                    class: tab_class(NetworkTab::Ingresses),
                    onclick: move |_| active_tab.set(NetworkTab::Ingresses),
                    "{ingresses_label}"
                }
            }

            {match active_tab() {
                NetworkTab::Services => rsx! {
                    ServicesTable { state: services_state.clone() }
                },
                NetworkTab::Ingresses => rsx! {
                    IngressesTable { state: ingresses_state.clone() }
                },
            }}
        }
    }
}

#[component]
fn TabPlaceholder() -> Element {
    rsx! {
        div { class: "skeleton-group",
            div { class: "skeleton-line" }
            div { class: "skeleton-line" }
            div { class: "skeleton-line short" }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct ServicesTableProps {
    state: LoadState<Vec<Service>>,
}

#[component]
fn ServicesTable(props: ServicesTableProps) -> Element {
    match props.state {
        LoadState::Loading => rsx! { TabPlaceholder {} },
        LoadState::Failed(message) => rsx! { ErrorPanel { message } },
        LoadState::Ready(list) => {
            let caption = found_caption(list.len(), "services");
            rsx! {
                table { class: "resource-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Namespace" }
                            th { "Type" }
                            th { "Cluster IP" }
                            th { "External IP" }
                            th { "Ports" }
                            th { "Age" }
                        }
                    }
                    tbody {
                        {list.iter().map(|service| {
                            let namespace = service.metadata.namespace.clone().unwrap_or_default();
                            let cluster_ip = service.spec.cluster_ip.clone().unwrap_or_else(|| "None".to_string());
                            rsx! {
                                tr { key: "{namespace}/{service.metadata.name}",
                                    td { class: "mono", "{service.metadata.name}" }
                                    td { span { class: "namespace-tag", "{namespace}" } }
                                    td { StatusBadge { badge: service_type_badge(service) } }
                                    td { class: "mono", "{cluster_ip}" }
                                    td { class: "mono", "{service_external_address(service)}" }
                                    td { class: "mono", "{service_ports(service)}" }
                                    td { "{format_age(service.metadata.creation_timestamp.as_deref())}" }
                                }
                            }
                        })}
                    }
                }
                p { class: "table-caption", "{caption}" }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct IngressesTableProps {
    state: LoadState<Vec<Ingress>>,
}

#[component]
fn IngressesTable(props: IngressesTableProps) -> Element {
    match props.state {
        LoadState::Loading => rsx! { TabPlaceholder {} },
        LoadState::Failed(message) => rsx! { ErrorPanel { message } },
        LoadState::Ready(list) => {
            let caption = found_caption(list.len(), "ingresses");
            rsx! {
                table { class: "resource-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Namespace" }
                            th { "Class" }
                            th { "Hosts" }
                            th { "Backend Service" }
                            th { "Address" }
                            th { "TLS" }
                            th { "Age" }
                        }
                    }
                    tbody {
                        {list.iter().map(|ingress| {
                            let namespace = ingress.metadata.namespace.clone().unwrap_or_default();
                            rsx! {
                                tr { key: "{namespace}/{ingress.metadata.name}",
                                    td { class: "mono", "{ingress.metadata.name}" }
                                    td { span { class: "namespace-tag", "{namespace}" } }
                                    td { "{ingress_class(ingress)}" }
                                    td { class: "mono", "{ingress_hosts(ingress)}" }
                                    td { class: "mono", "{ingress_backends(ingress)}" }
                                    td { class: "mono", "{ingress_addresses(ingress)}" }
                                    td { StatusBadge { badge: tls_badge(ingress) } }
                                    td { "{format_age(ingress.metadata.creation_timestamp.as_deref())}" }
                                }
                            }
                        })}
                    }
                }
                p { class: "table-caption", "{caption}" }
            }
        }
    }
}
