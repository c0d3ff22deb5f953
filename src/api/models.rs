//! Data contracts for the JSON returned by the cluster-management API.
//!
//! Every field is optional or defaulted: the API omits fields freely and a
//! missing value must never turn into a decode error.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Accepts a JSON string or number and keeps it as text.
/// Quantities and target ports arrive in either form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// `null` decodes like a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{ data }` envelope used by most endpoints
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// `{ success, data }` envelope used by the network endpoints
#[derive(Debug, Deserialize)]
pub struct SuccessEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<Vec<T>>,
}

// Shared Kubernetes-style pieces

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub namespace: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, String>,
    pub creation_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub last_transition_time: Option<String>,
}

impl Condition {
    pub fn new(kind: &str, status: &str, reason: &str) -> Self {
        Self {
            kind: kind.to_string(),
            status: status.to_string(),
            reason: Some(reason.to_string()),
            ..Default::default()
        }
    }

    pub fn is_true(&self) -> bool {
        self.status == "True"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpuFigures {
    pub millicores: f64,
    pub cores: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryFigures {
    pub bytes: f64,
    pub megabytes: f64,
    pub gigabytes: f64,
}

/// CPU and memory amounts, used for both usage and capacity
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResourceFigures {
    pub cpu: Option<CpuFigures>,
    pub memory: Option<MemoryFigures>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UsageMetrics {
    pub usage: Option<ResourceFigures>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadBalancerIngress {
    pub ip: Option<String>,
    pub hostname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadBalancer {
    #[serde(deserialize_with = "null_as_default")]
    pub ingress: Vec<LoadBalancerIngress>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadBalancerStatus {
    pub load_balancer: Option<LoadBalancer>,
}

impl LoadBalancerStatus {
    pub fn ingresses(&self) -> &[LoadBalancerIngress] {
        self.load_balancer
            .as_ref()
            .map(|lb| lb.ingress.as_slice())
            .unwrap_or_default()
    }
}

// Clusters

/// Reported Kubernetes version, either a plain string or the version object
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KubernetesVersion {
    Text(String),
    Detailed {
        #[serde(default, rename = "gitVersion")]
        git_version: Option<String>,
        #[serde(default)]
        major: Option<String>,
        #[serde(default)]
        minor: Option<String>,
    },
}

impl KubernetesVersion {
    pub fn display(&self) -> String {
        match self {
            KubernetesVersion::Text(text) => text.clone(),
            KubernetesVersion::Detailed { git_version: Some(version), .. } => version.clone(),
            KubernetesVersion::Detailed { major: Some(major), minor: Some(minor), .. } => {
                format!("v{}.{}", major, minor)
            }
            KubernetesVersion::Detailed { .. } => "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cluster {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub origin: Option<String>,
    pub context: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_current: bool,
    pub kubernetes_version: Option<KubernetesVersion>,
    pub version: Option<String>,
}

impl Cluster {
    pub fn version_label(&self) -> String {
        self.kubernetes_version
            .as_ref()
            .map(KubernetesVersion::display)
            .or_else(|| self.version.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KubernetesHealth {
    #[serde(deserialize_with = "null_as_default")]
    pub connected: bool,
    pub context: Option<String>,
}

/// Raw `/api/health` body (not wrapped in an envelope)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Health {
    pub status: Option<String>,
    pub kubernetes: Option<KubernetesHealth>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterMetrics {
    pub usage: Option<ResourceFigures>,
    pub capacity: Option<ResourceFigures>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterStats {
    pub running_pods: u64,
    pub pending_pods: u64,
    pub failed_pods: u64,
    pub total_pods: u64,
    pub ready_nodes: u64,
    pub total_nodes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterDetail {
    pub metrics: Option<ClusterMetrics>,
    pub stats: Option<ClusterStats>,
}

// Nodes

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeCapacity {
    #[serde(deserialize_with = "string_or_number")]
    pub cpu: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub memory: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub pods: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeAddress {
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodePods {
    pub total: u64,
    pub running: u64,
    pub pending: u64,
    pub failed: u64,
    pub succeeded: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub capacity: NodeCapacity,
    #[serde(deserialize_with = "null_as_default")]
    pub addresses: Vec<NodeAddress>,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    pub kubelet_version: Option<String>,
    pub status: Option<String>,
    pub metrics: Option<UsageMetrics>,
    #[serde(deserialize_with = "null_as_default")]
    pub pods: NodePods,
    pub creation_timestamp: Option<String>,
}

// Namespaces

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Namespace {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    pub creation_timestamp: Option<String>,
}

// Deployments

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentStrategy {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelSelector {
    #[serde(deserialize_with = "null_as_default")]
    pub match_labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceRequirements {
    #[serde(deserialize_with = "null_as_default")]
    pub requests: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub limits: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateContainer {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub image: Option<String>,
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemplatePodSpec {
    #[serde(deserialize_with = "null_as_default")]
    pub containers: Vec<TemplateContainer>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PodTemplate {
    pub spec: Option<TemplatePodSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentSpec {
    pub replicas: Option<i64>,
    pub strategy: Option<DeploymentStrategy>,
    pub selector: Option<LabelSelector>,
    pub template: Option<PodTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentStatus {
    pub replicas: Option<i64>,
    pub ready_replicas: Option<i64>,
    pub available_replicas: Option<i64>,
    pub updated_replicas: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Deployment {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub spec: DeploymentSpec,
    #[serde(deserialize_with = "null_as_default")]
    pub status: DeploymentStatus,
}

impl Deployment {
    pub fn replicas(&self) -> i64 {
        self.spec.replicas.unwrap_or(0)
    }

    pub fn ready_replicas(&self) -> i64 {
        self.status.ready_replicas.unwrap_or(0)
    }

    pub fn available_replicas(&self) -> i64 {
        self.status.available_replicas.unwrap_or(0)
    }

    pub fn updated_replicas(&self) -> i64 {
        self.status.updated_replicas.unwrap_or(0)
    }

    pub fn containers(&self) -> &[TemplateContainer] {
        self.spec
            .template
            .as_ref()
            .and_then(|template| template.spec.as_ref())
            .map(|spec| spec.containers.as_slice())
            .unwrap_or_default()
    }
}

// Network

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePort {
    pub name: Option<String>,
    pub port: Option<i64>,
    #[serde(deserialize_with = "string_or_number")]
    pub target_port: Option<String>,
    pub protocol: Option<String>,
    pub node_port: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceSpec {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "clusterIP")]
    pub cluster_ip: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<ServicePort>,
    #[serde(rename = "externalIPs")]
    #[serde(deserialize_with = "null_as_default")]
    pub external_ips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub spec: ServiceSpec,
    #[serde(deserialize_with = "null_as_default")]
    pub status: LoadBalancerStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackendPort {
    pub number: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackendService {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub port: Option<BackendPort>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IngressBackend {
    pub service: Option<BackendService>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngressPath {
    pub path: Option<String>,
    pub path_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub backend: IngressBackend,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpIngressRule {
    #[serde(deserialize_with = "null_as_default")]
    pub paths: Vec<IngressPath>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IngressRule {
    pub host: Option<String>,
    pub http: Option<HttpIngressRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngressTls {
    #[serde(deserialize_with = "null_as_default")]
    pub hosts: Vec<String>,
    pub secret_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngressSpec {
    pub ingress_class_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub rules: Vec<IngressRule>,
    #[serde(deserialize_with = "null_as_default")]
    pub tls: Vec<IngressTls>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Ingress {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub spec: IngressSpec,
    #[serde(deserialize_with = "null_as_default")]
    pub status: LoadBalancerStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kubernetes_version_shapes() {
        let text: KubernetesVersion = serde_json::from_value(json!("v1.30.2+k3s1")).unwrap();
        assert_eq!(text.display(), "v1.30.2+k3s1");

        let detailed: KubernetesVersion =
            serde_json::from_value(json!({"gitVersion": "v1.29.4+k3s1", "major": "1", "minor": "29"})).unwrap();
        assert_eq!(detailed.display(), "v1.29.4+k3s1");

        let partial: KubernetesVersion = serde_json::from_value(json!({"major": "1", "minor": "28"})).unwrap();
        assert_eq!(partial.display(), "v1.28");
    }

    #[test]
    fn test_cluster_version_falls_back() {
        let cluster: Cluster = serde_json::from_value(json!({"name": "k3s", "version": "v1.27.1"})).unwrap();
        assert_eq!(cluster.version_label(), "v1.27.1");

        let bare: Cluster = serde_json::from_value(json!({"name": "k3s"})).unwrap();
        assert_eq!(bare.version_label(), "Unknown");
    }

    #[test]
    fn test_node_capacity_accepts_numbers_and_strings() {
        let node: Node = serde_json::from_value(json!({
            "name": "agent-1",
            "capacity": {"cpu": 4, "memory": "16303512Ki", "pods": "110"}
        }))
        .unwrap();

        assert_eq!(node.capacity.cpu.as_deref(), Some("4"));
        assert_eq!(node.capacity.memory.as_deref(), Some("16303512Ki"));
        assert_eq!(node.capacity.pods.as_deref(), Some("110"));
    }

    #[test]
    fn test_deployment_tolerates_missing_fields() {
        let deployment: Deployment = serde_json::from_value(json!({
            "metadata": {"name": "web"},
            "status": {}
        }))
        .unwrap();

        assert_eq!(deployment.metadata.name, "web");
        assert_eq!(deployment.replicas(), 0);
        assert_eq!(deployment.ready_replicas(), 0);
        assert!(deployment.containers().is_empty());
    }

    #[test]
    fn test_service_target_port_can_be_named() {
        let service: Service = serde_json::from_value(json!({
            "metadata": {"name": "web", "namespace": "default"},
            "spec": {"ports": [{"port": 80, "targetPort": "http", "protocol": "TCP"}]}
        }))
        .unwrap();

        assert_eq!(service.spec.ports[0].target_port.as_deref(), Some("http"));
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        let namespaces: Vec<Namespace> = serde_json::from_value(json!([
            {"name": "default", "labels": null},
            {"name": "apps", "labels": {"team": "web"}}
        ]))
        .unwrap();
        assert_eq!(namespaces.len(), 2);
        assert!(namespaces[0].labels.is_empty());
        assert_eq!(namespaces[1].labels.get("team").map(String::as_str), Some("web"));

        let node: Node = serde_json::from_value(json!({
            "name": "agent-2",
            "roles": null,
            "addresses": null,
            "capacity": null,
            "pods": null
        }))
        .unwrap();
        assert!(node.roles.is_empty());
        assert!(node.addresses.is_empty());
        assert_eq!(node.capacity, NodeCapacity::default());
        assert_eq!(node.pods.total, 0);

        let deployment: Deployment = serde_json::from_value(json!({
            "metadata": {"name": "web", "labels": null},
            "status": {"conditions": null}
        }))
        .unwrap();
        assert!(deployment.metadata.labels.is_empty());
        assert!(deployment.status.conditions.is_empty());
    }
}
