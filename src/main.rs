use std::path::Path;
use std::sync::Arc;

use dioxus::logger::tracing;
use dioxus::prelude::*;
use dioxus_desktop::{Config, WindowBuilder};
use views::{Clusters, Deployments, Home, Namespaces, Navbar, Network, Nodes, Playground, Pods};

mod api;
mod components;
mod contexts;
mod utils;
mod views;

use api::ApiClient;
use contexts::{load_or_default, JsonFileStore, SettingsContext, SettingsStore};
use utils::config::{self, DashboardConfig};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
        #[route("/")]
        Home {},
        #[route("/clusters")]
        Clusters {},
        #[route("/nodes")]
        Nodes {},
        #[route("/namespaces")]
        Namespaces {},
        #[route("/deployments")]
        Deployments {},
        #[route("/pods")]
        Pods {},
        #[route("/network")]
        Network {},
        #[route("/playground")]
        Playground {},
}

const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

fn main() {
    LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(WindowBuilder::new().with_title("K3s Dashboard")))
        .launch(App);
}

/// Settings store under the home directory, or next to the working directory
/// when no home directory can be resolved
fn settings_store() -> Arc<dyn SettingsStore> {
    match JsonFileStore::in_home_dir() {
        Ok(store) => {
            tracing::debug!("Settings file: {}", store.path().display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("{}, keeping settings in the working directory", e);
            Arc::new(JsonFileStore::new(Path::new(config::SETTINGS_DIR).join(config::SETTINGS_FILE)))
        }
    }
}

#[component]
fn App() -> Element {
    let dashboard_config = use_context_provider(DashboardConfig::from_env);

    // ALWAYS provide the settings context before any conditional rendering
    let store = use_hook(settings_store);
    let settings = use_signal(|| load_or_default(store.as_ref()));
    use_context_provider(|| SettingsContext::new(settings, store.clone()));

    let client = use_hook(|| match ApiClient::new(&dashboard_config) {
        Ok(client) => {
            tracing::info!("Using dashboard API at {}", client.base_url());
            Ok(client)
        }
        Err(e) => {
            tracing::error!("Failed to set up the API client: {}", e);
            Err(e.to_string())
        }
    });

    match client {
        Err(err) => {
            let env_name = config::API_URL_ENV;
            rsx! {
                document::Link { rel: "stylesheet", href: MAIN_CSS }
                div { class: "error-container",
                    div { class: "error-banner", "Failed to connect to the dashboard API: {err}" }
                    div { class: "empty-state",
                        h2 { "No API Connection" }
                        p { "Set {env_name} to the base URL of the cluster-management API and restart." }
                    }
                }
            }
        }
        Ok(client) => rsx! {
            document::Link { rel: "stylesheet", href: MAIN_CSS }
            ApiProvider { client, Router::<Route> {} }
        },
    }
}

/// Shares one API client with every routed page
#[component]
fn ApiProvider(client: ApiClient, children: Element) -> Element {
    use_context_provider(|| client);
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use std::cell::RefCell;

    thread_local! {
        static SEEN_BASE_URL: RefCell<Option<String>> = const { RefCell::new(None) };
    }

    #[component]
    fn ReadsClient() -> Element {
        let client = use_context::<ApiClient>();
        let base = client.base_url().to_string();
        SEEN_BASE_URL.with(|seen| *seen.borrow_mut() = Some(base.clone()));
        rsx! { span { "{base}" } }
    }

    fn provided_root() -> Element {
        let config = DashboardConfig {
            api_url: "http://10.0.0.5:3001".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();
        rsx! {
            ApiProvider { client, ReadsClient {} }
        }
    }

    #[test]
    fn test_provider_shares_client_with_children() {
        let mut dom = VirtualDom::new(provided_root);
        dom.rebuild_in_place();

        SEEN_BASE_URL.with(|seen| assert_eq!(seen.borrow().as_deref(), Some("http://10.0.0.5:3001/")));
    }
}
