use crate::Route;
use dioxus::prelude::*;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

#[component]
pub fn Navbar() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        div { class: "layout-container",
            div {
                id: "sidebar",
                class: "k3s-sidebar",
                div {
                    class: "sidebar-logo",
                    span { class: "logo-mark", "K3s" }
                    span { "K3s Dashboard" }
                }
                nav {
                    class: "sidebar-links",
                    div { class: "nav-group",
                        span { class: "nav-group-title", "CLUSTER" }
                        Link {
                            to: Route::Home {},
                            class: "nav-overview",
                            "Overview"
                        }
                        Link {
                            to: Route::Clusters {},
                            class: "nav-clusters",
                            "Clusters"
                        }
                        Link {
                            to: Route::Nodes {},
                            class: "nav-nodes",
                            "Nodes"
                        }
                        Link {
                            to: Route::Namespaces {},
                            class: "nav-namespaces",
                            "Namespaces"
                        }
                    }
                    div { class: "nav-group",
                        span { class: "nav-group-title", "WORKLOADS" }
                        Link {
                            to: Route::Deployments {},
                            class: "nav-deployments",
                            "Deployments"
                        }
                        Link {
                            to: Route::Pods {},
                            class: "nav-pods",
                            "Pods"
                        }
                    }
                    div { class: "nav-group",
                        span { class: "nav-group-title", "NETWORK" }
                        Link {
                            to: Route::Network {},
                            class: "nav-network",
                            "Services & Ingress"
                        }
                    }
                    div { class: "nav-group",
                        span { class: "nav-group-title", "TOOLS" }
                        Link {
                            to: Route::Playground {},
                            class: "nav-playground",
                            "Playground"
                        }
                    }
                }
            }
            div {
                class: "main-content",
                Outlet::<Route> {}
            }
        }
    }
}
