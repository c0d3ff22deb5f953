use dioxus::logger::tracing;
use dioxus::prelude::*;
use k8s_openapi::chrono::Utc;

use crate::api::playground::{build_request, DeploymentConfig, DeploymentMonitor};
use crate::api::ApiClient;
use crate::components::{DeploymentForm, DeploymentMonitorPanel, PayloadPreview};
use crate::utils::config::{DashboardConfig, MonitorMode, MONITOR_REFRESH_INTERVAL};

const PLAYGROUND_CSS: Asset = asset!("/assets/styling/playground.css");

/// Offered when the namespace list cannot be loaded
const FALLBACK_NAMESPACES: [&str; 3] = ["default", "kube-system", "playground"];

/// One monitor tick: poll the API for every tracked deployment, or advance
/// the simulated rollout
async fn refresh_monitor(client: &ApiClient, mode: MonitorMode, mut monitor: Signal<DeploymentMonitor>) {
    match mode {
        MonitorMode::Simulate => monitor.write().simulate(Utc::now()),
        MonitorMode::Poll => {
            let tracked: Vec<(String, String)> = monitor
                .peek()
                .entries()
                .iter()
                .map(|entry| (entry.name.clone(), entry.namespace.clone()))
                .collect();

            for (name, namespace) in tracked {
                match client.deployment_detail(&namespace, &name).await {
                    Ok(deployment) => monitor.write().apply_snapshot(&name, &namespace, &deployment),
                    Err(e) => tracing::warn!("Failed to refresh deployment {}/{}: {}", namespace, name, e),
                }
            }
        }
    }
}

#[component]
pub fn Playground() -> Element {
    let client = use_context::<ApiClient>();
    let config = use_context::<DashboardConfig>();
    let mode = config.monitor_mode;

    let mut form = use_signal(DeploymentConfig::default);
    let mut creating = use_signal(|| false);
    let mut create_error = use_signal(|| None::<String>);
    let mut monitor = use_signal(DeploymentMonitor::default);
    let mut monitoring = use_signal(|| false);
    let mut deleting = use_signal(|| None::<(String, String)>);

    let namespaces = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            async move {
                match client.list_namespaces().await {
                    Ok(list) => list.into_iter().map(|namespace| namespace.name).collect::<Vec<_>>(),
                    Err(e) => {
                        tracing::warn!("Failed to fetch namespaces for the playground: {}", e);
                        FALLBACK_NAMESPACES.iter().map(|ns| ns.to_string()).collect()
                    }
                }
            }
        }
    });

    // Toggling monitoring off restarts this resource, which drops the running loop
    let _monitor_loop = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            let active = monitoring();
            async move {
                if !active {
                    return;
                }
                tracing::info!("Deployment monitor started ({:?})", mode);
                loop {
                    tokio::time::sleep(MONITOR_REFRESH_INTERVAL).await;
                    refresh_monitor(&client, mode, monitor).await;
                }
            }
        }
    });

    let create = {
        let client = client.clone();
        move |_: ()| {
            let snapshot = form.peek().clone();
            let request = match build_request(&snapshot) {
                Ok(request) => request,
                Err(e) => {
                    create_error.set(Some(e.to_string()));
                    return;
                }
            };

            creating.set(true);
            create_error.set(None);
            let client = client.clone();
            spawn(async move {
                let name = snapshot.name.trim().to_string();
                match client.create_deployment(&snapshot.namespace, &request).await {
                    Ok(()) => {
                        tracing::info!("Created deployment {}/{}", snapshot.namespace, name);
                        monitor.write().track(&snapshot, Utc::now());
                        monitoring.set(true);
                        form.write().reset_identity();
                    }
                    Err(e) => {
                        tracing::error!("Failed to create deployment {}/{}: {}", snapshot.namespace, name, e);
                        create_error.set(Some(e.to_string()));
                    }
                }
                creating.set(false);
            });
        }
    };

    let refresh = {
        let client = client.clone();
        move |_: ()| {
            let client = client.clone();
            spawn(async move {
                refresh_monitor(&client, mode, monitor).await;
            });
        }
    };

    let delete = move |(name, namespace): (String, String)| {
        let client = client.clone();
        deleting.set(Some((name.clone(), namespace.clone())));
        spawn(async move {
            match client.delete_deployment(&namespace, &name).await {
                Ok(()) => {
                    tracing::info!("Deleted deployment {}/{}", namespace, name);
                    monitor.write().remove(&name, &namespace);
                }
                Err(e) => tracing::error!("Failed to delete deployment {}/{}: {}", namespace, name, e),
            }
            deleting.set(None);
        });
    };

    let namespace_options = namespaces.read().clone().unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: PLAYGROUND_CSS }
        div { class: "playground-container",
            div { class: "page-header",
                div { class: "header-left",
                    h1 { "K3s Playground" }
                    p { class: "page-description",
                        "Test deployment creation, monitor status flow, and experiment with Kubernetes workloads"
                    }
                }
            }

            div { class: "playground-grid",
                DeploymentForm {
                    config: form,
                    namespaces: namespace_options,
                    submitting: creating(),
                    error: create_error(),
                    on_submit: create,
                }
                PayloadPreview { config: form() }
            }

            DeploymentMonitorPanel {
                monitor: monitor(),
                active: monitoring(),
                on_toggle: move |_| monitoring.set(!monitoring()),
                on_refresh: refresh,
                on_delete: delete,
                deleting: deleting(),
            }
        }
    }
}
