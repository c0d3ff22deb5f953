//! Pods arrive in two shapes: a flat record from `/api/pods` and a
//! Kubernetes-style object from `/api/deployments/{name}/pods`. Both are
//! mapped into one canonical [`Pod`] before any page touches them.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::models::{null_as_default, string_or_number, Condition, ObjectMeta, UsageMetrics};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunningState {
    pub started_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaitingState {
    pub reason: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TerminatedState {
    pub reason: Option<String>,
    pub exit_code: Option<i64>,
    pub finished_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContainerState {
    pub running: Option<RunningState>,
    pub waiting: Option<WaitingState>,
    pub terminated: Option<TerminatedState>,
}

impl ContainerState {
    pub fn label(&self) -> &'static str {
        if self.running.is_some() {
            "Running"
        } else if self.waiting.is_some() {
            "Waiting"
        } else if self.terminated.is_some() {
            "Terminated"
        } else {
            "Unknown"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvVar {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeMount {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mount_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub read_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerPort {
    pub name: Option<String>,
    pub container_port: Option<i64>,
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resources {
    #[serde(deserialize_with = "null_as_default")]
    pub requests: BTreeMap<String, Quantity>,
    #[serde(deserialize_with = "null_as_default")]
    pub limits: BTreeMap<String, Quantity>,
}

/// Resource quantity kept as text, whether sent as a string or a number
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Quantity(#[serde(deserialize_with = "string_or_number")] pub Option<String>);

impl Quantity {
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("-")
    }
}

/// Canonical container record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub ready: bool,
    pub restart_count: u32,
    pub state: ContainerState,
    pub last_terminated: Option<TerminatedState>,
    pub resources: Resources,
    pub env: Vec<EnvVar>,
    pub volume_mounts: Vec<VolumeMount>,
    pub ports: Vec<ContainerPort>,
    pub container_id: Option<String>,
}

impl Container {
    pub fn waiting_reason(&self) -> Option<&str> {
        self.state.waiting.as_ref().and_then(|w| w.reason.as_deref())
    }
}

/// Live usage of a pod
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodUsage {
    pub cpu_millicores: Option<f64>,
    pub memory_megabytes: Option<f64>,
    pub memory_bytes: Option<f64>,
}

/// Canonical pod record shared by every page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    pub creation_timestamp: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub phase: Option<String>,
    pub ready: Option<bool>,
    pub conditions: Vec<Condition>,
    pub node_name: Option<String>,
    pub restart_policy: Option<String>,
    pub service_account: Option<String>,
    pub pod_ip: Option<String>,
    pub host_ip: Option<String>,
    pub ports: Vec<ContainerPort>,
    pub usage: Option<PodUsage>,
    pub containers: Vec<Container>,
}

// Flat shape

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FlatContainer {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    image: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    ready: bool,
    restart_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    state: ContainerState,
    last_state: Option<LastState>,
    #[serde(deserialize_with = "null_as_default")]
    resources: Resources,
    #[serde(deserialize_with = "null_as_default")]
    environment: Vec<EnvVar>,
    #[serde(deserialize_with = "null_as_default")]
    env: Vec<EnvVar>,
    #[serde(deserialize_with = "null_as_default")]
    volume_mounts: Vec<VolumeMount>,
    #[serde(deserialize_with = "null_as_default")]
    ports: Vec<ContainerPort>,
    #[serde(rename = "containerID")]
    container_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LastState {
    terminated: Option<TerminatedState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FlatStatus {
    phase: Option<String>,
    ready: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FlatSpec {
    node_name: Option<String>,
    restart_policy: Option<String>,
    service_account: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FlatNetwork {
    #[serde(rename = "podIP")]
    pod_ip: Option<String>,
    #[serde(rename = "hostIP")]
    host_ip: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    ports: Vec<ContainerPort>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlatPod {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    namespace: String,
    creation_timestamp: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    labels: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    status: FlatStatus,
    #[serde(deserialize_with = "null_as_default")]
    spec: FlatSpec,
    #[serde(deserialize_with = "null_as_default")]
    network: FlatNetwork,
    metrics: Option<UsageMetrics>,
    #[serde(deserialize_with = "null_as_default")]
    containers: Vec<FlatContainer>,
}

// Object shape

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SpecContainer {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    image: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    resources: Resources,
    #[serde(deserialize_with = "null_as_default")]
    env: Vec<EnvVar>,
    #[serde(deserialize_with = "null_as_default")]
    volume_mounts: Vec<VolumeMount>,
    #[serde(deserialize_with = "null_as_default")]
    ports: Vec<ContainerPort>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ObjectSpec {
    node_name: Option<String>,
    restart_policy: Option<String>,
    service_account_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    containers: Vec<SpecContainer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ContainerStatus {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    image: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    ready: bool,
    restart_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    state: ContainerState,
    last_state: Option<LastState>,
    #[serde(rename = "containerID")]
    container_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ObjectStatus {
    phase: Option<String>,
    #[serde(rename = "podIP")]
    pod_ip: Option<String>,
    #[serde(rename = "hostIP")]
    host_ip: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    conditions: Vec<Condition>,
    #[serde(deserialize_with = "null_as_default")]
    container_statuses: Vec<ContainerStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectPod {
    metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    spec: ObjectSpec,
    #[serde(default, deserialize_with = "null_as_default")]
    status: ObjectStatus,
}

/// Either pod shape as it arrives on the wire.
/// The object shape is recognised by its `metadata` key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PodRecord {
    Object(Box<ObjectPod>),
    Flat(Box<FlatPod>),
}

impl From<PodRecord> for Pod {
    fn from(record: PodRecord) -> Self {
        normalize_pod(record)
    }
}

/// Map either wire shape into the canonical pod
pub fn normalize_pod(record: PodRecord) -> Pod {
    match record {
        PodRecord::Flat(flat) => from_flat(*flat),
        PodRecord::Object(object) => from_object(*object),
    }
}

pub fn normalize_pods(records: Vec<PodRecord>) -> Vec<Pod> {
    records.into_iter().map(normalize_pod).collect()
}

fn from_flat(pod: FlatPod) -> Pod {
    let usage = pod
        .metrics
        .and_then(|metrics| metrics.usage)
        .map(|usage| PodUsage {
            cpu_millicores: usage.cpu.as_ref().map(|cpu| cpu.millicores),
            memory_megabytes: usage.memory.as_ref().map(|memory| memory.megabytes),
            memory_bytes: usage.memory.as_ref().map(|memory| memory.bytes),
        });

    let containers = pod
        .containers
        .into_iter()
        .map(|c| Container {
            name: c.name,
            image: c.image.unwrap_or_default(),
            ready: c.ready,
            restart_count: c.restart_count,
            state: c.state,
            last_terminated: c.last_state.and_then(|last| last.terminated),
            resources: c.resources,
            env: if c.environment.is_empty() { c.env } else { c.environment },
            volume_mounts: c.volume_mounts,
            ports: c.ports,
            container_id: c.container_id,
        })
        .collect();

    Pod {
        name: pod.name,
        namespace: pod.namespace,
        creation_timestamp: pod.creation_timestamp,
        labels: pod.labels,
        phase: pod.status.phase,
        ready: pod.status.ready,
        conditions: pod.status.conditions,
        node_name: pod.spec.node_name,
        restart_policy: pod.spec.restart_policy,
        service_account: pod.spec.service_account,
        pod_ip: pod.network.pod_ip,
        host_ip: pod.network.host_ip,
        ports: pod.network.ports,
        usage,
        containers,
    }
}

fn from_object(pod: ObjectPod) -> Pod {
    let ObjectPod { metadata, spec, status } = pod;

    let mut statuses = status.container_statuses;
    let mut containers: Vec<Container> = spec
        .containers
        .into_iter()
        .map(|c| {
            let live = statuses
                .iter()
                .position(|s| s.name == c.name)
                .map(|index| statuses.remove(index))
                .unwrap_or_default();

            Container {
                image: c.image.or(live.image).unwrap_or_default(),
                name: c.name,
                ready: live.ready,
                restart_count: live.restart_count,
                state: live.state,
                last_terminated: live.last_state.and_then(|last| last.terminated),
                resources: c.resources,
                env: c.env,
                volume_mounts: c.volume_mounts,
                ports: c.ports,
                container_id: live.container_id,
            }
        })
        .collect();

    // statuses without a matching spec entry still count
    containers.extend(statuses.into_iter().map(|s| Container {
        name: s.name,
        image: s.image.unwrap_or_default(),
        ready: s.ready,
        restart_count: s.restart_count,
        state: s.state,
        last_terminated: s.last_state.and_then(|last| last.terminated),
        container_id: s.container_id,
        ..Default::default()
    }));

    let ready = status
        .conditions
        .iter()
        .find(|condition| condition.kind == "Ready")
        .map(Condition::is_true)
        .or_else(|| (!containers.is_empty()).then(|| containers.iter().all(|c| c.ready)));

    let ports = containers.iter().flat_map(|c| c.ports.clone()).collect();

    Pod {
        name: metadata.name,
        namespace: metadata.namespace.unwrap_or_default(),
        creation_timestamp: metadata.creation_timestamp,
        labels: metadata.labels,
        phase: status.phase,
        ready,
        conditions: status.conditions,
        node_name: spec.node_name,
        restart_policy: spec.restart_policy,
        service_account: spec.service_account_name,
        pod_ip: status.pod_ip,
        host_ip: status.host_ip,
        ports,
        usage: None,
        containers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Pod {
        normalize_pod(serde_json::from_value::<PodRecord>(value).unwrap())
    }

    #[test]
    fn test_flat_shape() {
        let pod = record(json!({
            "name": "web-1",
            "namespace": "default",
            "creationTimestamp": "2024-05-01T10:00:00Z",
            "status": {"phase": "Running", "ready": true},
            "spec": {"nodeName": "server-0", "serviceAccount": "default"},
            "network": {"podIP": "10.42.0.12", "hostIP": "192.168.1.10"},
            "metrics": {"usage": {"cpu": {"millicores": 12, "cores": 0.012}, "memory": {"megabytes": 48, "bytes": 50331648}}},
            "containers": [{
                "name": "nginx",
                "image": "nginx:1.27",
                "ready": true,
                "restartCount": 2,
                "state": {"running": {"startedAt": "2024-05-01T10:00:05Z"}},
                "resources": {"requests": {"cpu": "100m"}, "limits": {"memory": "256Mi"}},
                "environment": [{"name": "MODE", "value": "prod"}],
                "containerID": "containerd://abc"
            }]
        }));

        assert_eq!(pod.name, "web-1");
        assert_eq!(pod.namespace, "default");
        assert_eq!(pod.ready, Some(true));
        assert_eq!(pod.node_name.as_deref(), Some("server-0"));
        assert_eq!(pod.pod_ip.as_deref(), Some("10.42.0.12"));
        assert_eq!(pod.usage.as_ref().and_then(|u| u.cpu_millicores), Some(12.0));

        let container = &pod.containers[0];
        assert_eq!(container.restart_count, 2);
        assert_eq!(container.state.label(), "Running");
        assert_eq!(container.env[0].name, "MODE");
        assert_eq!(container.resources.requests["cpu"].as_str(), "100m");
    }

    #[test]
    fn test_object_shape() {
        let pod = record(json!({
            "metadata": {"name": "api-7d9f", "namespace": "apps", "labels": {"app": "api"}},
            "spec": {
                "nodeName": "agent-1",
                "containers": [{"name": "api", "image": "api:2", "ports": [{"containerPort": 8080, "protocol": "TCP"}]}]
            },
            "status": {
                "phase": "Pending",
                "podIP": "10.42.1.5",
                "containerStatuses": [{
                    "name": "api",
                    "ready": false,
                    "restartCount": 4,
                    "state": {"waiting": {"reason": "CrashLoopBackOff"}},
                    "lastState": {"terminated": {"reason": "Error", "exitCode": 1}}
                }]
            }
        }));

        assert_eq!(pod.name, "api-7d9f");
        assert_eq!(pod.namespace, "apps");
        assert_eq!(pod.ready, Some(false));
        assert_eq!(pod.ports.len(), 1);

        let container = &pod.containers[0];
        assert_eq!(container.image, "api:2");
        assert_eq!(container.restart_count, 4);
        assert_eq!(container.waiting_reason(), Some("CrashLoopBackOff"));
        assert_eq!(container.last_terminated.as_ref().and_then(|t| t.exit_code), Some(1));
    }

    #[test]
    fn test_object_shape_prefers_ready_condition() {
        let pod = record(json!({
            "metadata": {"name": "job", "namespace": "default"},
            "status": {
                "conditions": [{"type": "Ready", "status": "True"}],
                "containerStatuses": [{"name": "main", "ready": false}]
            }
        }));

        assert_eq!(pod.ready, Some(true));
        assert_eq!(pod.containers.len(), 1);
    }

    #[test]
    fn test_sparse_flat_record() {
        let pod = record(json!({"name": "lonely"}));

        assert_eq!(pod.name, "lonely");
        assert_eq!(pod.ready, None);
        assert!(pod.containers.is_empty());
        assert!(pod.usage.is_none());
    }

    #[test]
    fn test_null_fields_do_not_fail_the_list() {
        let records: Vec<PodRecord> = serde_json::from_value(json!([
            {
                "name": "web-1",
                "labels": null,
                "status": {"phase": "Running", "conditions": null},
                "containers": [{"name": "app", "ready": null, "ports": null, "env": null}]
            },
            {"name": "web-2", "containers": null},
            {
                "metadata": {"name": "job", "namespace": "batch"},
                "spec": null,
                "status": {"conditions": null, "containerStatuses": null}
            }
        ]))
        .unwrap();
        let pods = normalize_pods(records);

        assert_eq!(pods.len(), 3);
        assert!(pods[0].labels.is_empty());
        assert_eq!(pods[0].phase.as_deref(), Some("Running"));
        assert_eq!(pods[0].containers.len(), 1);
        assert!(!pods[0].containers[0].ready);
        assert!(pods[1].containers.is_empty());
        assert_eq!(pods[2].name, "job");
        assert!(pods[2].containers.is_empty());
    }
}

