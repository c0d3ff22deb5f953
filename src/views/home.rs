use crate::Route;
use dioxus::prelude::*;

const OVERVIEW_CSS: Asset = asset!("/assets/styling/overview.css");

/// Landing page linking to the main areas of the dashboard
#[component]
pub fn Home() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: OVERVIEW_CSS }

        div { class: "overview-container",
            div { class: "overview-header",
                h1 { "K3s Management Dashboard" }
                p { class: "page-description",
                    "Monitor and manage your K3s clusters, nodes, and workloads from a single place"
                }
            }

            // Feature cards
            div { class: "feature-grid",
                FeatureCard {
                    title: "Cluster Overview",
                    description: "Connectivity, health and resource usage for every registered cluster",
                    to: Route::Clusters {},
                    action: "View Clusters",
                }
                FeatureCard {
                    title: "Node Management",
                    description: "Capacity, allocatable resources and readiness of each node",
                    to: Route::Nodes {},
                    action: "View Nodes",
                }
                FeatureCard {
                    title: "Workload Insights",
                    description: "Pods with live logs and an interactive terminal",
                    to: Route::Pods {},
                    action: "View Pods",
                }
            }

            div { class: "resource-section",
                h2 { "Quick Actions" }
                div { class: "quick-actions",
                    Link { to: Route::Playground {}, class: "btn btn-primary", "Create Deployment" }
                    Link { to: Route::Deployments {}, class: "btn btn-secondary", "View Deployments" }
                    Link { to: Route::Pods {}, class: "btn btn-secondary", "View Pods" }
                    Link { to: Route::Nodes {}, class: "btn btn-secondary", "View Nodes" }
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct FeatureCardProps {
    title: String,
    description: String,
    to: Route,
    action: String,
}

#[component]
fn FeatureCard(props: FeatureCardProps) -> Element {
    rsx! {
        div { class: "feature-card",
            h3 { "{props.title}" }
            p { class: "feature-description", "{props.description}" }
            Link { to: props.to.clone(), class: "btn btn-secondary btn-block", "{props.action}" }
        }
    }
}
