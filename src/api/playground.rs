//! Playground: a form model for throwaway deployments, the presets that fill
//! it, the composite create request, and the local rollout monitor.

use k8s_openapi::api::apps::v1::{Deployment as DeploymentManifest, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, PersistentVolumeClaimVolumeSource, PodSpec, PodTemplateSpec, ResourceRequirements,
    Service as ServiceManifest, ServicePort, ServiceSpec, Volume, VolumeMount,
};
use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress as IngressManifest, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, ServiceBackendPort,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use k8s_openapi::chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::derive::{Badge, Tone};
use super::models::{Condition, Deployment};
use crate::contexts::{PlaygroundError, PlaygroundResult};

const PREVIEW_NAME: &str = "my-test-deployment";
const STORAGE_VOLUME: &str = "storage";

pub const SERVICE_TYPES: [&str; 3] = ["ClusterIP", "NodePort", "LoadBalancer"];
pub const PROTOCOLS: [&str; 2] = ["TCP", "UDP"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvVarEntry {
    pub name: String,
    pub value: String,
}

impl EnvVarEntry {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortEntry {
    pub container_port: i32,
    pub protocol: String,
}

impl PortEntry {
    pub fn tcp(container_port: i32) -> Self {
        Self {
            container_port,
            protocol: "TCP".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeConfig {
    pub enabled: bool,
    pub claim_name: String,
    pub mount_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub enabled: bool,
    pub name: String,
    pub service_type: String,
    pub port: i32,
    pub target_port: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngressConfig {
    pub enabled: bool,
    pub name: String,
    pub host: String,
    pub path: String,
    pub class_name: String,
}

/// Everything the playground form edits
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentConfig {
    pub name: String,
    pub namespace: String,
    pub image: String,
    pub cpu_request: String,
    pub memory_request: String,
    pub cpu_limit: String,
    pub memory_limit: String,
    pub replicas: i32,
    pub env_vars: Vec<EnvVarEntry>,
    pub ports: Vec<PortEntry>,
    /// Value of the `app` label; the deployment name is used when empty
    pub app_label: String,
    pub volume: VolumeConfig,
    pub service: ServiceConfig,
    pub ingress: IngressConfig,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            namespace: "default".to_string(),
            image: "nginx:latest".to_string(),
            cpu_request: "100m".to_string(),
            memory_request: "128Mi".to_string(),
            cpu_limit: "200m".to_string(),
            memory_limit: "256Mi".to_string(),
            replicas: 1,
            env_vars: Vec::new(),
            ports: vec![PortEntry::tcp(80)],
            app_label: String::new(),
            volume: VolumeConfig {
                enabled: false,
                claim_name: String::new(),
                mount_path: "/data".to_string(),
            },
            service: ServiceConfig {
                enabled: false,
                name: String::new(),
                service_type: "ClusterIP".to_string(),
                port: 80,
                target_port: 80,
            },
            ingress: IngressConfig {
                enabled: false,
                name: String::new(),
                host: String::new(),
                path: "/".to_string(),
                class_name: "traefik".to_string(),
            },
        }
    }
}

impl DeploymentConfig {
    /// Value used for the `app` label and every selector
    pub fn effective_app_label(&self) -> String {
        if self.app_label.trim().is_empty() {
            self.name.trim().to_string()
        } else {
            self.app_label.trim().to_string()
        }
    }

    /// Submit stays disabled until both are filled in
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty() && !self.image.trim().is_empty()
    }

    pub fn validate(&self) -> PlaygroundResult<()> {
        if self.name.trim().is_empty() {
            return Err(PlaygroundError::MissingName);
        }
        if self.image.trim().is_empty() {
            return Err(PlaygroundError::MissingImage);
        }
        if self.ingress.enabled && !self.service.enabled {
            return Err(PlaygroundError::IngressWithoutService);
        }
        Ok(())
    }

    /// Clear the fields that identify a deployment so the next one can be typed
    pub fn reset_identity(&mut self) {
        self.name.clear();
        self.app_label.clear();
    }
}

/// Ready-made configurations for common test workloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    N8n,
    Waha,
    Excalidraw,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::N8n, Template::Waha, Template::Excalidraw];

    pub fn key(&self) -> &'static str {
        match self {
            Template::N8n => "n8n",
            Template::Waha => "waha",
            Template::Excalidraw => "excalidraw",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Template::N8n => "n8n Workflow",
            Template::Waha => "WAHA WhatsApp API",
            Template::Excalidraw => "Excalidraw",
        }
    }

    /// Every field of the preset except namespace and replica count
    fn preset(&self) -> DeploymentConfig {
        let base = DeploymentConfig::default();
        let (name, app, image, cpu, memory, cpu_limit, memory_limit, port) = match self {
            Template::N8n => ("test-n8n", "n8n", "n8nio/n8n:latest", "500m", "512Mi", "1000m", "1Gi", 5678),
            Template::Waha => ("test-waha", "waha", "devlikeapro/waha:latest", "300m", "256Mi", "500m", "512Mi", 3000),
            Template::Excalidraw => (
                "test-excalidraw",
                "excalidraw",
                "excalidraw/excalidraw:latest",
                "200m",
                "128Mi",
                "400m",
                "256Mi",
                80,
            ),
        };

        let env_vars = match self {
            Template::N8n => vec![
                EnvVarEntry::new("N8N_HOST", "0.0.0.0"),
                EnvVarEntry::new("N8N_PORT", "5678"),
                EnvVarEntry::new("N8N_PROTOCOL", "http"),
            ],
            Template::Waha => vec![
                EnvVarEntry::new("WAHA_PRINT_QR", "true"),
                EnvVarEntry::new("WAHA_LOG_LEVEL", "info"),
            ],
            Template::Excalidraw => Vec::new(),
        };

        let volume = match self {
            Template::N8n => VolumeConfig {
                enabled: true,
                claim_name: "n8n-data".to_string(),
                mount_path: "/home/node/.n8n".to_string(),
            },
            Template::Waha => VolumeConfig {
                enabled: true,
                claim_name: "waha-sessions".to_string(),
                mount_path: "/app/sessions".to_string(),
            },
            Template::Excalidraw => base.volume.clone(),
        };

        DeploymentConfig {
            name: name.to_string(),
            image: image.to_string(),
            cpu_request: cpu.to_string(),
            memory_request: memory.to_string(),
            cpu_limit: cpu_limit.to_string(),
            memory_limit: memory_limit.to_string(),
            env_vars,
            ports: vec![PortEntry::tcp(port)],
            app_label: name.to_string(),
            volume,
            service: ServiceConfig {
                enabled: true,
                name: format!("{}-service", app),
                service_type: "ClusterIP".to_string(),
                port,
                target_port: port,
            },
            ingress: IngressConfig {
                enabled: true,
                name: format!("{}-ingress", app),
                host: format!("{}.local", app),
                path: "/".to_string(),
                class_name: "traefik".to_string(),
            },
            ..base
        }
    }
}

/// Overwrite the form with a preset, keeping namespace and replica count
pub fn apply_template(current: &DeploymentConfig, template: Template) -> DeploymentConfig {
    DeploymentConfig {
        namespace: current.namespace.clone(),
        replicas: current.replicas,
        ..template.preset()
    }
}

/// Body of `POST /api/deployments`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDeploymentRequest {
    pub deployment: DeploymentManifest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceManifest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressManifest>,
}

fn labels(app: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app".to_string(), app.to_string()),
        ("playground-test".to_string(), "true".to_string()),
        ("created-by".to_string(), "k3s-playground".to_string()),
    ])
}

fn quantities(cpu: &str, memory: &str) -> BTreeMap<String, Quantity> {
    BTreeMap::from([
        ("cpu".to_string(), Quantity(cpu.to_string())),
        ("memory".to_string(), Quantity(memory.to_string())),
    ])
}

fn deployment_manifest(config: &DeploymentConfig, name: &str, app: &str) -> DeploymentManifest {
    let labels = labels(app);

    let env: Vec<EnvVar> = config
        .env_vars
        .iter()
        .filter(|var| !var.name.trim().is_empty())
        .map(|var| EnvVar {
            name: var.name.trim().to_string(),
            value: Some(var.value.clone()),
            ..Default::default()
        })
        .collect();

    let ports: Vec<ContainerPort> = config
        .ports
        .iter()
        .filter(|port| port.container_port > 0)
        .map(|port| ContainerPort {
            container_port: port.container_port,
            protocol: Some(port.protocol.clone()),
            ..Default::default()
        })
        .collect();

    let (volume_mounts, volumes) = if config.volume.enabled {
        (
            Some(vec![VolumeMount {
                name: STORAGE_VOLUME.to_string(),
                mount_path: config.volume.mount_path.clone(),
                ..Default::default()
            }]),
            Some(vec![Volume {
                name: STORAGE_VOLUME.to_string(),
                persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                    claim_name: config.volume.claim_name.clone(),
                    ..Default::default()
                }),
                ..Default::default()
            }]),
        )
    } else {
        (None, None)
    };

    let container = Container {
        name: name.to_string(),
        image: Some(config.image.trim().to_string()),
        ports: Some(ports),
        env: Some(env),
        resources: Some(ResourceRequirements {
            requests: Some(quantities(&config.cpu_request, &config.memory_request)),
            limits: Some(quantities(&config.cpu_limit, &config.memory_limit)),
            ..Default::default()
        }),
        volume_mounts,
        ..Default::default()
    };

    DeploymentManifest {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(labels.clone()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(config.replicas),
            selector: LabelSelector {
                match_labels: Some(BTreeMap::from([("app".to_string(), app.to_string())])),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![container],
                    volumes,
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn service_manifest(config: &DeploymentConfig, app: &str) -> ServiceManifest {
    ServiceManifest {
        metadata: ObjectMeta {
            name: Some(config.service.name.trim().to_string()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            type_: Some(config.service.service_type.clone()),
            selector: Some(BTreeMap::from([("app".to_string(), app.to_string())])),
            ports: Some(vec![ServicePort {
                protocol: Some("TCP".to_string()),
                port: config.service.port,
                target_port: Some(IntOrString::Int(config.service.target_port)),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn ingress_manifest(config: &DeploymentConfig) -> IngressManifest {
    IngressManifest {
        metadata: ObjectMeta {
            name: Some(config.ingress.name.trim().to_string()),
            ..Default::default()
        },
        spec: Some(IngressSpec {
            ingress_class_name: Some(config.ingress.class_name.clone()),
            rules: Some(vec![IngressRule {
                host: Some(config.ingress.host.trim().to_string()).filter(|host| !host.is_empty()),
                http: Some(HTTPIngressRuleValue {
                    paths: vec![HTTPIngressPath {
                        path: Some(config.ingress.path.clone()),
                        path_type: "Prefix".to_string(),
                        backend: IngressBackend {
                            service: Some(IngressServiceBackend {
                                name: config.service.name.trim().to_string(),
                                port: Some(ServiceBackendPort {
                                    number: Some(config.service.port),
                                    ..Default::default()
                                }),
                            }),
                            ..Default::default()
                        },
                    }],
                }),
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Build the request without validation; an empty name gets a placeholder.
/// Used for the live preview.
pub fn preview_request(config: &DeploymentConfig) -> CreateDeploymentRequest {
    let name = match config.name.trim() {
        "" => PREVIEW_NAME.to_string(),
        name => name.to_string(),
    };
    let app = config.effective_app_label();
    let app = if app.is_empty() { name.clone() } else { app };

    let with_service = config.service.enabled && !config.service.name.trim().is_empty();
    let with_ingress = with_service && config.ingress.enabled && !config.ingress.name.trim().is_empty();

    CreateDeploymentRequest {
        deployment: deployment_manifest(config, &name, &app),
        service: with_service.then(|| service_manifest(config, &app)),
        ingress: with_ingress.then(|| ingress_manifest(config)),
    }
}

/// Validate the form and build the request to submit
pub fn build_request(config: &DeploymentConfig) -> PlaygroundResult<CreateDeploymentRequest> {
    config.validate()?;
    Ok(preview_request(config))
}

/// Pretty JSON of the request, as shown in the preview panel
pub fn preview_json(config: &DeploymentConfig) -> String {
    serde_json::to_string_pretty(&preview_request(config)).unwrap_or_else(|e| format!("// failed to render: {}", e))
}

/// A deployment created from the playground and watched until it settles
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredDeployment {
    pub name: String,
    pub namespace: String,
    pub image: String,
    pub cpu_request: String,
    pub memory_request: String,
    pub replicas: i64,
    pub ready_replicas: i64,
    pub available_replicas: i64,
    pub conditions: Vec<Condition>,
    pub created_at: DateTime<Utc>,
}

impl MonitoredDeployment {
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let seconds = now.signed_duration_since(self.created_at).num_seconds().max(0);
        if seconds < 60 {
            format!("{}s", seconds)
        } else {
            format!("{}m", seconds / 60)
        }
    }

    fn has_condition(&self, kind: &str) -> bool {
        self.conditions.iter().any(|c| c.kind == kind && c.is_true())
    }
}

/// Ready once every replica is ready and available; Progressing while rolling out
pub fn monitor_badge(entry: &MonitoredDeployment) -> Badge {
    let counts = format!("({}/{})", entry.ready_replicas, entry.replicas);
    if entry.ready_replicas == entry.replicas && entry.has_condition("Available") {
        Badge::new(format!("Ready {}", counts), Tone::Success)
    } else if entry.has_condition("Progressing") {
        Badge::new(format!("Progressing {}", counts), Tone::Warning)
    } else {
        Badge::new(format!("Failed {}", counts), Tone::Danger)
    }
}

/// Deployments created in this session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeploymentMonitor {
    entries: Vec<MonitoredDeployment>,
}

impl DeploymentMonitor {
    pub fn entries(&self) -> &[MonitoredDeployment] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start watching a freshly created deployment
    pub fn track(&mut self, config: &DeploymentConfig, now: DateTime<Utc>) {
        self.entries.push(MonitoredDeployment {
            name: config.name.trim().to_string(),
            namespace: config.namespace.clone(),
            image: config.image.trim().to_string(),
            cpu_request: config.cpu_request.clone(),
            memory_request: config.memory_request.clone(),
            replicas: config.replicas as i64,
            ready_replicas: 0,
            available_replicas: 0,
            conditions: vec![Condition::new("Progressing", "True", "NewReplicaSetCreated")],
            created_at: now,
        });
    }

    /// Drop the entry matching both name and namespace
    pub fn remove(&mut self, name: &str, namespace: &str) {
        self.entries
            .retain(|entry| !(entry.name == name && entry.namespace == namespace));
    }

    /// Replace the status of the `namespace/name` entry with what the API reports
    pub fn apply_snapshot(&mut self, name: &str, namespace: &str, deployment: &Deployment) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == name && entry.namespace == namespace)
        {
            entry.replicas = deployment.spec.replicas.unwrap_or(entry.replicas);
            entry.ready_replicas = deployment.ready_replicas();
            entry.available_replicas = deployment.available_replicas();
            entry.conditions = deployment.status.conditions.clone();
        }
    }

    /// Time-based rollout: nothing ready for 30s, half until a minute, then all
    pub fn simulate(&mut self, now: DateTime<Utc>) {
        for entry in &mut self.entries {
            let age_seconds = now.signed_duration_since(entry.created_at).num_milliseconds() as f64 / 1000.0;

            if age_seconds < 30.0 {
                entry.ready_replicas = 0;
                entry.available_replicas = 0;
                entry.conditions = vec![Condition::new("Progressing", "True", "ReplicaSetUpdated")];
            } else if age_seconds < 60.0 {
                entry.ready_replicas = entry.replicas / 2;
                entry.available_replicas = entry.replicas / 2;
                entry.conditions = vec![Condition::new("Progressing", "True", "ReplicaSetUpdated")];
            } else {
                entry.ready_replicas = entry.replicas;
                entry.available_replicas = entry.replicas;
                entry.conditions = vec![
                    Condition::new("Available", "True", "MinimumReplicasAvailable"),
                    Condition::new("Progressing", "True", "NewReplicaSetAvailable"),
                ];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::chrono::{Duration, TimeZone};
    use serde_json::json;

    fn named(name: &str) -> DeploymentConfig {
        DeploymentConfig {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = DeploymentConfig::default();
        assert_eq!(config.namespace, "default");
        assert_eq!(config.image, "nginx:latest");
        assert_eq!(config.ports, vec![PortEntry::tcp(80)]);
        assert_eq!(config.ingress.class_name, "traefik");
        assert!(!config.can_submit());
    }

    #[test]
    fn test_validation() {
        assert_eq!(DeploymentConfig::default().validate(), Err(PlaygroundError::MissingName));

        let mut config = named("demo");
        config.image = "  ".to_string();
        assert!(!config.can_submit());
        assert_eq!(config.validate(), Err(PlaygroundError::MissingImage));

        let mut config = named("demo");
        config.ingress.enabled = true;
        config.ingress.name = "demo-ingress".to_string();
        assert_eq!(build_request(&config), Err(PlaygroundError::IngressWithoutService));
    }

    #[test]
    fn test_deployment_only_request() {
        let request = build_request(&named("demo")).unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["deployment"]["apiVersion"], "apps/v1");
        assert_eq!(body["deployment"]["kind"], "Deployment");
        assert_eq!(body["deployment"]["metadata"]["labels"]["app"], "demo");
        assert_eq!(body["deployment"]["metadata"]["labels"]["playground-test"], "true");
        assert_eq!(body["deployment"]["metadata"]["labels"]["created-by"], "k3s-playground");
        assert_eq!(body["deployment"]["spec"]["selector"]["matchLabels"], json!({"app": "demo"}));

        let container = &body["deployment"]["spec"]["template"]["spec"]["containers"][0];
        assert_eq!(container["name"], "demo");
        assert_eq!(container["resources"]["requests"]["cpu"], "100m");
        assert_eq!(container["resources"]["limits"]["memory"], "256Mi");
        assert_eq!(container["ports"][0]["containerPort"], 80);
        assert!(container.get("volumeMounts").is_none());

        assert!(body.get("service").is_none());
        assert!(body.get("ingress").is_none());
    }

    #[test]
    fn test_unnamed_service_is_left_out() {
        let mut config = named("demo");
        config.service.enabled = true;

        let request = build_request(&config).unwrap();
        assert!(request.service.is_none());
        assert!(request.ingress.is_none());
    }

    #[test]
    fn test_full_template_request() {
        let config = apply_template(&DeploymentConfig::default(), Template::N8n);
        let body = serde_json::to_value(build_request(&config).unwrap()).unwrap();

        let pod_spec = &body["deployment"]["spec"]["template"]["spec"];
        assert_eq!(pod_spec["volumes"][0]["persistentVolumeClaim"]["claimName"], "n8n-data");
        assert_eq!(pod_spec["containers"][0]["volumeMounts"][0]["mountPath"], "/home/node/.n8n");
        assert_eq!(pod_spec["containers"][0]["env"][1], json!({"name": "N8N_PORT", "value": "5678"}));

        assert_eq!(body["service"]["kind"], "Service");
        assert_eq!(body["service"]["spec"]["selector"]["app"], "test-n8n");
        assert_eq!(
            body["service"]["spec"]["ports"][0],
            json!({"protocol": "TCP", "port": 5678, "targetPort": 5678})
        );

        assert_eq!(body["ingress"]["apiVersion"], "networking.k8s.io/v1");
        assert_eq!(body["ingress"]["spec"]["ingressClassName"], "traefik");
        let rule = &body["ingress"]["spec"]["rules"][0];
        assert_eq!(rule["host"], "n8n.local");
        assert_eq!(rule["http"]["paths"][0]["pathType"], "Prefix");
        assert_eq!(rule["http"]["paths"][0]["backend"]["service"]["name"], "n8n-service");
        assert_eq!(rule["http"]["paths"][0]["backend"]["service"]["port"]["number"], 5678);
    }

    #[test]
    fn test_template_keeps_namespace_and_replicas() {
        let current = DeploymentConfig {
            namespace: "sandbox".to_string(),
            replicas: 3,
            name: "mine".to_string(),
            ..Default::default()
        };

        let waha = apply_template(&current, Template::Waha);
        assert_eq!(waha.namespace, "sandbox");
        assert_eq!(waha.replicas, 3);
        assert_eq!(waha.name, "test-waha");
        assert_eq!(waha.app_label, "test-waha");
        assert_eq!(waha.image, "devlikeapro/waha:latest");
        assert_eq!(waha.volume.claim_name, "waha-sessions");
        assert_eq!(waha.service.name, "waha-service");
        assert_eq!(waha.ingress.host, "waha.local");

        let excalidraw = apply_template(&current, Template::Excalidraw);
        assert!(!excalidraw.volume.enabled);
        assert!(excalidraw.env_vars.is_empty());
        assert_eq!(excalidraw.cpu_limit, "400m");
        assert_eq!(excalidraw.service.port, 80);
    }

    #[test]
    fn test_preview_uses_placeholder_name() {
        let preview = preview_json(&DeploymentConfig::default());
        assert!(preview.contains("\"my-test-deployment\""));
    }

    #[test]
    fn test_monitor_track_and_remove() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let mut monitor = DeploymentMonitor::default();

        let mut config = named("demo");
        config.replicas = 2;
        monitor.track(&config, now);
        config.namespace = "other".to_string();
        monitor.track(&config, now);

        let entry = &monitor.entries()[0];
        assert_eq!(entry.ready_replicas, 0);
        assert_eq!(monitor_badge(entry), Badge::new("Progressing (0/2)", Tone::Warning));

        monitor.remove("demo", "default");
        assert_eq!(monitor.entries().len(), 1);
        assert_eq!(monitor.entries()[0].namespace, "other");
    }

    #[test]
    fn test_simulated_rollout() {
        let created = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let mut monitor = DeploymentMonitor::default();
        let mut config = named("demo");
        config.replicas = 4;
        monitor.track(&config, created);

        monitor.simulate(created + Duration::seconds(10));
        assert_eq!(monitor_badge(&monitor.entries()[0]).label, "Progressing (0/4)");

        monitor.simulate(created + Duration::seconds(45));
        assert_eq!(monitor_badge(&monitor.entries()[0]).label, "Progressing (2/4)");

        monitor.simulate(created + Duration::seconds(90));
        assert_eq!(monitor_badge(&monitor.entries()[0]), Badge::new("Ready (4/4)", Tone::Success));
    }

    #[test]
    fn test_snapshot_replaces_status() {
        let now = Utc::now();
        let mut monitor = DeploymentMonitor::default();
        monitor.track(&named("demo"), now);

        let snapshot: Deployment = serde_json::from_value(json!({
            "metadata": {"name": "demo", "namespace": "default"},
            "spec": {"replicas": 1},
            "status": {
                "readyReplicas": 0,
                "conditions": [{"type": "Progressing", "status": "False", "reason": "ProgressDeadlineExceeded"}]
            }
        }))
        .unwrap();
        monitor.apply_snapshot("demo", "default", &snapshot);

        assert_eq!(monitor_badge(&monitor.entries()[0]), Badge::new("Failed (0/1)", Tone::Danger));
    }

    #[test]
    fn test_age_label() {
        let created = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let mut monitor = DeploymentMonitor::default();
        monitor.track(&named("demo"), created);

        let entry = &monitor.entries()[0];
        assert_eq!(entry.age_label(created + Duration::seconds(42)), "42s");
        assert_eq!(entry.age_label(created + Duration::seconds(150)), "2m");
    }
}
