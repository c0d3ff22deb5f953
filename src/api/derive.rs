//! Pure derivations from API records: status badges, ratios, percentages
//! and display strings. Nothing here touches the network or the UI.

use std::collections::BTreeSet;

use super::models::{Cluster, Deployment, Health, Ingress, Namespace, Node, Service};
use super::normalize::Pod;
use crate::utils::config::DEFAULT_POD_CAPACITY;

const NODE_ROLE_PREFIX: &str = "node-role.kubernetes.io/";
const INGRESS_CLASS_ANNOTATION: &str = "kubernetes.io/ingress.class";

/// Colour family of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
    Neutral,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Success => "badge-success",
            Tone::Warning => "badge-warning",
            Tone::Danger => "badge-danger",
            Tone::Info => "badge-info",
            Tone::Neutral => "badge-neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self { label: label.into(), tone }
    }
}

/// `usage / capacity` as a whole percentage; 0 whenever capacity is unusable
pub fn usage_percent(usage: f64, capacity: f64) -> u32 {
    if !capacity.is_finite() || capacity <= 0.0 || !usage.is_finite() || usage <= 0.0 {
        return 0;
    }
    (usage / capacity * 100.0).round() as u32
}

/// Parse a CPU quantity into millicores ("4" cores or "250m")
pub fn parse_cpu_millicores(quantity: &str) -> f64 {
    let quantity = quantity.trim();
    if let Some(milli) = quantity.strip_suffix('m') {
        return milli.parse::<f64>().unwrap_or(0.0);
    }
    quantity.parse::<f64>().map(|cores| cores * 1000.0).unwrap_or(0.0)
}

/// Parse a memory quantity into bytes ("16303512Ki", "2Gi", "512M", "1024")
pub fn parse_memory_bytes(quantity: &str) -> f64 {
    const UNITS: &[(&str, f64)] = &[
        ("Ki", 1024.0),
        ("Mi", 1024.0 * 1024.0),
        ("Gi", 1024.0 * 1024.0 * 1024.0),
        ("Ti", 1024.0 * 1024.0 * 1024.0 * 1024.0),
        ("K", 1e3),
        ("k", 1e3),
        ("M", 1e6),
        ("G", 1e9),
        ("T", 1e12),
    ];

    let quantity = quantity.trim();
    for (suffix, factor) in UNITS {
        if let Some(value) = quantity.strip_suffix(suffix) {
            return value.parse::<f64>().map(|v| v * factor).unwrap_or(0.0);
        }
    }
    quantity.parse::<f64>().unwrap_or(0.0)
}

/// Node memory capacity in bytes; a bare number is a KiB count
pub fn parse_capacity_memory_bytes(quantity: &str) -> f64 {
    let quantity = quantity.trim();
    match quantity.parse::<f64>() {
        Ok(kib) => kib * 1024.0,
        Err(_) => parse_memory_bytes(quantity),
    }
}

/// Drop a trailing ".0" so whole numbers print without decimals
fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

// Pods

/// Pod status badge; a waiting reason wins over the phase for unready pods
pub fn pod_status(pod: &Pod) -> Badge {
    if pod.ready == Some(false) {
        if let Some(reason) = pod.containers.iter().find_map(|c| c.waiting_reason()) {
            return Badge::new(reason, Tone::Danger);
        }
    }

    match pod.phase.as_deref() {
        Some("Running") => Badge::new("Running", Tone::Success),
        Some("Pending") => Badge::new("Pending", Tone::Warning),
        Some(phase @ ("Failed" | "Error")) => Badge::new(phase, Tone::Danger),
        Some("Succeeded") => Badge::new("Succeeded", Tone::Info),
        Some(phase) if !phase.is_empty() => Badge::new(phase, Tone::Neutral),
        _ => Badge::new("Unknown", Tone::Neutral),
    }
}

pub fn ready_containers(pod: &Pod) -> (usize, usize) {
    let ready = pod.containers.iter().filter(|c| c.ready).count();
    (ready, pod.containers.len())
}

/// "ready/total" badge, green only when every container is ready
pub fn pod_ready(pod: &Pod) -> Badge {
    let (ready, total) = ready_containers(pod);
    let tone = if ready == total && total > 0 { Tone::Success } else { Tone::Warning };
    Badge::new(format!("{}/{}", ready, total), tone)
}

pub fn restart_count(pod: &Pod) -> u32 {
    pod.containers.iter().map(|c| c.restart_count).sum()
}

pub fn pod_cpu(pod: &Pod) -> String {
    match pod.usage.as_ref().and_then(|usage| usage.cpu_millicores) {
        Some(millicores) => format!("{}m", plain_number(millicores)),
        None => "0m".to_string(),
    }
}

pub fn pod_memory(pod: &Pod) -> String {
    match pod.usage.as_ref().and_then(|usage| usage.memory_megabytes) {
        Some(megabytes) => format!("{}Mi", plain_number(megabytes)),
        None => "0Mi".to_string(),
    }
}

// Deployments

pub fn deployment_status(deployment: &Deployment) -> Badge {
    let replicas = deployment.replicas();
    let ready = deployment.ready_replicas();
    let available = deployment.available_replicas();

    if replicas > 0 && ready == replicas && available == replicas {
        Badge::new("Available", Tone::Success)
    } else if ready > 0 {
        Badge::new("Progressing", Tone::Warning)
    } else {
        Badge::new("Unavailable", Tone::Danger)
    }
}

pub fn deployment_replicas(deployment: &Deployment) -> Badge {
    let replicas = deployment.replicas();
    let ready = deployment.ready_replicas();
    let tone = if ready == replicas && replicas > 0 { Tone::Success } else { Tone::Warning };
    Badge::new(format!("{}/{}", ready, replicas), tone)
}

pub fn deployment_updates(deployment: &Deployment) -> Badge {
    let replicas = deployment.replicas();
    let updated = deployment.updated_replicas();
    let tone = if updated == replicas { Tone::Success } else { Tone::Info };
    Badge::new(format!("{}/{}", updated, replicas), tone)
}

/// Ready ratio used for sorting; a deployment scaled to zero divides by 1
pub fn ready_ratio(deployment: &Deployment) -> f64 {
    let replicas = deployment.replicas();
    let denominator = if replicas == 0 { 1 } else { replicas };
    deployment.ready_replicas() as f64 / denominator as f64
}

// Nodes

pub fn node_ready(node: &Node) -> Badge {
    if node.status.as_deref() == Some("True") {
        Badge::new("Ready", Tone::Success)
    } else {
        Badge::new("NotReady", Tone::Danger)
    }
}

pub fn node_cpu_capacity_millicores(node: &Node) -> f64 {
    node.capacity.cpu.as_deref().map(parse_cpu_millicores).unwrap_or(0.0)
}

pub fn node_memory_capacity_bytes(node: &Node) -> f64 {
    node.capacity.memory.as_deref().map(parse_capacity_memory_bytes).unwrap_or(0.0)
}

pub fn node_pod_capacity(node: &Node) -> f64 {
    node.capacity
        .pods
        .as_deref()
        .and_then(|pods| pods.trim().parse::<f64>().ok())
        .unwrap_or(DEFAULT_POD_CAPACITY)
}

fn node_usage(node: &Node) -> (f64, f64) {
    let usage = node.metrics.as_ref().and_then(|metrics| metrics.usage.as_ref());
    let cpu = usage.and_then(|u| u.cpu.as_ref()).map(|cpu| cpu.millicores).unwrap_or(0.0);
    let memory = usage.and_then(|u| u.memory.as_ref()).map(|memory| memory.bytes).unwrap_or(0.0);
    (cpu, memory)
}

pub fn node_cpu_percent(node: &Node) -> u32 {
    usage_percent(node_usage(node).0, node_cpu_capacity_millicores(node))
}

pub fn node_memory_percent(node: &Node) -> u32 {
    usage_percent(node_usage(node).1, node_memory_capacity_bytes(node))
}

pub fn node_pod_percent(node: &Node) -> u32 {
    usage_percent(node.pods.total as f64, node_pod_capacity(node))
}

/// Roles without the `node-role.kubernetes.io/` prefix; "agent" when none
pub fn node_roles(node: &Node) -> String {
    let roles: Vec<&str> = node
        .roles
        .iter()
        .map(|role| role.strip_prefix(NODE_ROLE_PREFIX).unwrap_or(role))
        .filter(|role| !role.is_empty())
        .collect();

    if roles.is_empty() {
        "agent".to_string()
    } else {
        roles.join(", ")
    }
}

/// First address of the given type (e.g. "InternalIP"), or "-"
pub fn node_address(node: &Node, kind: &str) -> String {
    node.addresses
        .iter()
        .find(|address| address.kind == kind)
        .map(|address| address.address.clone())
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_cores(cores: &str) -> String {
    format!("{} cores", cores)
}

/// Memory capacity shown as whole gigabytes
pub fn format_memory_gb(quantity: &str) -> String {
    let kib = parse_capacity_memory_bytes(quantity) / 1024.0;
    format!("{} GB", (kib / (1024.0 * 1024.0)).round() as i64)
}

pub fn format_bytes_gb(bytes: f64) -> String {
    format!("{:.1} GB", bytes / (1024.0 * 1024.0 * 1024.0))
}

// Clusters

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Connected,
    Disconnected,
    Unknown,
}

impl Connectivity {
    pub fn badge(&self) -> Badge {
        match self {
            Connectivity::Connected => Badge::new("Connected", Tone::Success),
            Connectivity::Disconnected => Badge::new("Disconnected", Tone::Danger),
            Connectivity::Unknown => Badge::new("Unknown", Tone::Neutral),
        }
    }
}

/// A cluster is connected when it is the health endpoint's active context
pub fn cluster_connectivity(cluster: &Cluster, health: Option<&Health>) -> Connectivity {
    let Some(kubernetes) = health.and_then(|health| health.kubernetes.as_ref()) else {
        return Connectivity::Unknown;
    };

    let is_active = cluster.is_current
        || (cluster.context.is_some() && cluster.context == kubernetes.context);

    if is_active && kubernetes.connected {
        Connectivity::Connected
    } else {
        Connectivity::Disconnected
    }
}

// Namespaces

pub fn namespace_status(namespace: &Namespace) -> Badge {
    match namespace.status.as_deref() {
        Some("Active") => Badge::new("Active", Tone::Success),
        Some("Terminating") => Badge::new("Terminating", Tone::Warning),
        Some(other) if !other.is_empty() => Badge::new(other, Tone::Neutral),
        _ => Badge::new("Unknown", Tone::Neutral),
    }
}

/// First `limit` labels as "key=value" plus how many were left out
pub fn label_preview(namespace: &Namespace, limit: usize) -> (Vec<String>, usize) {
    let shown = namespace
        .labels
        .iter()
        .take(limit)
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    (shown, namespace.labels.len().saturating_sub(limit))
}

// Services

pub fn service_type(service: &Service) -> String {
    service.spec.kind.clone().unwrap_or_else(|| "ClusterIP".to_string())
}

/// Ports as "port:targetPort/protocol", comma separated, or "None"
pub fn service_ports(service: &Service) -> String {
    if service.spec.ports.is_empty() {
        return "None".to_string();
    }

    service
        .spec
        .ports
        .iter()
        .map(|port| {
            let number = port.port.map(|p| p.to_string()).unwrap_or_default();
            let target = port.target_port.clone().unwrap_or_else(|| number.clone());
            let protocol = port.protocol.as_deref().unwrap_or("TCP");
            format!("{}:{}/{}", number, target, protocol)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn service_external_address(service: &Service) -> String {
    if let Some(ip) = service.status.ingresses().first().and_then(|ingress| ingress.ip.clone()) {
        return ip;
    }
    if !service.spec.external_ips.is_empty() {
        return service.spec.external_ips.join(", ");
    }
    if service.spec.kind.as_deref() == Some("NodePort") {
        return "nodes".to_string();
    }
    "None".to_string()
}

// Ingresses

pub fn ingress_hosts(ingress: &Ingress) -> String {
    if ingress.spec.rules.is_empty() {
        return "*".to_string();
    }

    ingress
        .spec
        .rules
        .iter()
        .map(|rule| rule.host.clone().filter(|h| !h.is_empty()).unwrap_or_else(|| "*".to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct backends as "service:port", or "None"
pub fn ingress_backends(ingress: &Ingress) -> String {
    let mut seen = BTreeSet::new();
    let mut backends = Vec::new();

    for path in ingress
        .spec
        .rules
        .iter()
        .filter_map(|rule| rule.http.as_ref())
        .flat_map(|http| http.paths.iter())
    {
        let Some(service) = path.backend.service.as_ref() else {
            continue;
        };
        let port = service
            .port
            .as_ref()
            .and_then(|port| port.number.map(|n| n.to_string()).or_else(|| port.name.clone()))
            .unwrap_or_default();
        let backend = format!("{}:{}", service.name, port);
        if seen.insert(backend.clone()) {
            backends.push(backend);
        }
    }

    if backends.is_empty() {
        "None".to_string()
    } else {
        backends.join(", ")
    }
}

pub fn ingress_addresses(ingress: &Ingress) -> String {
    let addresses: Vec<String> = ingress
        .status
        .ingresses()
        .iter()
        .filter_map(|lb| lb.ip.clone().or_else(|| lb.hostname.clone()))
        .collect();

    if addresses.is_empty() {
        "Pending".to_string()
    } else {
        addresses.join(", ")
    }
}

pub fn ingress_class(ingress: &Ingress) -> String {
    ingress
        .spec
        .ingress_class_name
        .clone()
        .or_else(|| ingress.metadata.annotations.get(INGRESS_CLASS_ANNOTATION).cloned())
        .unwrap_or_else(|| "default".to_string())
}

pub fn ingress_has_tls(ingress: &Ingress) -> bool {
    !ingress.spec.tls.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{KubernetesHealth, ObjectMeta};
    use crate::api::normalize::{Container, ContainerState, PodUsage, WaitingState};
    use serde_json::json;

    fn container(ready: bool, restarts: u32, waiting: Option<&str>) -> Container {
        Container {
            name: "main".to_string(),
            ready,
            restart_count: restarts,
            state: ContainerState {
                waiting: waiting.map(|reason| WaitingState {
                    reason: Some(reason.to_string()),
                    message: None,
                }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn deployment(replicas: i64, ready: i64, available: i64, updated: i64) -> Deployment {
        serde_json::from_value(json!({
            "metadata": {"name": "web", "namespace": "default"},
            "spec": {"replicas": replicas},
            "status": {"readyReplicas": ready, "availableReplicas": available, "updatedReplicas": updated}
        }))
        .unwrap()
    }

    #[test]
    fn test_usage_percent_guards_capacity() {
        assert_eq!(usage_percent(500.0, 0.0), 0);
        assert_eq!(usage_percent(500.0, f64::NAN), 0);
        assert_eq!(usage_percent(f64::INFINITY, 100.0), 0);
        assert_eq!(usage_percent(250.0, 1000.0), 25);
        assert_eq!(usage_percent(1.0, 3.0), 33);
    }

    #[test]
    fn test_parse_quantities() {
        assert_eq!(parse_cpu_millicores("4"), 4000.0);
        assert_eq!(parse_cpu_millicores("250m"), 250.0);
        assert_eq!(parse_cpu_millicores("garbage"), 0.0);
        assert_eq!(parse_memory_bytes("1024Ki"), 1024.0 * 1024.0);
        assert_eq!(parse_memory_bytes("2Gi"), 2.0 * 1024.0 * 1024.0 * 1024.0);
        assert_eq!(parse_memory_bytes("512"), 512.0);
    }

    #[test]
    fn test_waiting_reason_overrides_phase() {
        let pod = Pod {
            phase: Some("Running".to_string()),
            ready: Some(false),
            containers: vec![container(false, 7, Some("CrashLoopBackOff"))],
            ..Default::default()
        };

        assert_eq!(pod_status(&pod), Badge::new("CrashLoopBackOff", Tone::Danger));
        assert_eq!(restart_count(&pod), 7);
    }

    #[test]
    fn test_pod_status_by_phase() {
        let mut pod = Pod { ready: Some(true), ..Default::default() };
        for (phase, tone) in [
            ("Running", Tone::Success),
            ("Pending", Tone::Warning),
            ("Failed", Tone::Danger),
            ("Succeeded", Tone::Info),
            ("Evicted", Tone::Neutral),
        ] {
            pod.phase = Some(phase.to_string());
            assert_eq!(pod_status(&pod), Badge::new(phase, tone));
        }

        pod.phase = None;
        assert_eq!(pod_status(&pod).label, "Unknown");
    }

    #[test]
    fn test_pod_ready_badge() {
        let pod = Pod {
            containers: vec![container(true, 0, None), container(false, 1, None)],
            ..Default::default()
        };
        assert_eq!(pod_ready(&pod), Badge::new("1/2", Tone::Warning));

        let empty = Pod::default();
        assert_eq!(pod_ready(&empty), Badge::new("0/0", Tone::Warning));
    }

    #[test]
    fn test_pod_usage_strings() {
        let mut pod = Pod::default();
        assert_eq!(pod_cpu(&pod), "0m");
        assert_eq!(pod_memory(&pod), "0Mi");

        pod.usage = Some(PodUsage {
            cpu_millicores: Some(12.0),
            memory_megabytes: Some(48.5),
            memory_bytes: None,
        });
        assert_eq!(pod_cpu(&pod), "12m");
        assert_eq!(pod_memory(&pod), "48.5Mi");
    }

    #[test]
    fn test_deployment_badges() {
        assert_eq!(deployment_status(&deployment(3, 3, 3, 3)).label, "Available");
        assert_eq!(deployment_status(&deployment(3, 1, 1, 3)).label, "Progressing");
        assert_eq!(deployment_status(&deployment(3, 0, 0, 0)).label, "Unavailable");
        assert_eq!(deployment_status(&deployment(0, 0, 0, 0)).label, "Unavailable");

        assert_eq!(deployment_replicas(&deployment(3, 2, 2, 3)), Badge::new("2/3", Tone::Warning));
        assert_eq!(deployment_updates(&deployment(3, 2, 2, 3)), Badge::new("3/3", Tone::Success));
    }

    #[test]
    fn test_ready_ratio_with_zero_replicas() {
        assert_eq!(ready_ratio(&deployment(0, 0, 0, 0)), 0.0);
        assert_eq!(ready_ratio(&deployment(4, 2, 2, 4)), 0.5);
    }

    #[test]
    fn test_node_derivations() {
        let node: Node = serde_json::from_value(json!({
            "name": "server-0",
            "capacity": {"cpu": "4", "memory": "8388608Ki", "pods": "110"},
            "addresses": [{"type": "InternalIP", "address": "192.168.1.10"}],
            "roles": ["node-role.kubernetes.io/control-plane", "node-role.kubernetes.io/master"],
            "status": "True",
            "metrics": {"usage": {"cpu": {"millicores": 1000}, "memory": {"bytes": 2147483648u64}}},
            "pods": {"total": 11}
        }))
        .unwrap();

        assert_eq!(node_cpu_percent(&node), 25);
        assert_eq!(node_memory_percent(&node), 25);
        assert_eq!(node_pod_percent(&node), 10);
        assert_eq!(node_roles(&node), "control-plane, master");
        assert_eq!(node_address(&node, "InternalIP"), "192.168.1.10");
        assert_eq!(node_address(&node, "ExternalIP"), "-");
        assert_eq!(node_ready(&node).label, "Ready");
        assert_eq!(format_memory_gb("8388608Ki"), "8 GB");
    }

    #[test]
    fn test_node_numeric_memory_capacity_is_kib() {
        let node: Node = serde_json::from_value(json!({
            "name": "agent-0",
            "capacity": {"cpu": 2, "memory": 8388608, "pods": 110},
            "metrics": {"usage": {"memory": {"bytes": 2147483648u64}}}
        }))
        .unwrap();

        assert_eq!(node_memory_capacity_bytes(&node), 8.0 * 1024.0 * 1024.0 * 1024.0);
        assert_eq!(node_memory_percent(&node), 25);
        assert_eq!(node.capacity.memory.as_deref().map(format_memory_gb).as_deref(), Some("8 GB"));
        assert_eq!(parse_capacity_memory_bytes("2Gi"), 2.0 * 1024.0 * 1024.0 * 1024.0);
    }

    #[test]
    fn test_node_without_capacity() {
        let node: Node = serde_json::from_value(json!({
            "name": "agent-1",
            "metrics": {"usage": {"cpu": {"millicores": 300}}},
            "pods": {"total": 22}
        }))
        .unwrap();

        assert_eq!(node_cpu_percent(&node), 0);
        assert_eq!(node_memory_percent(&node), 0);
        assert_eq!(node_pod_percent(&node), 20);
        assert_eq!(node_roles(&node), "agent");
        assert_eq!(node_ready(&node).label, "NotReady");
    }

    #[test]
    fn test_cluster_connectivity() {
        let cluster = Cluster {
            name: "k3s".to_string(),
            context: Some("default".to_string()),
            ..Default::default()
        };
        let health = Health {
            status: None,
            kubernetes: Some(KubernetesHealth {
                connected: true,
                context: Some("default".to_string()),
            }),
        };

        assert_eq!(cluster_connectivity(&cluster, None), Connectivity::Unknown);
        assert_eq!(cluster_connectivity(&cluster, Some(&health)), Connectivity::Connected);

        let other = Cluster { context: Some("staging".to_string()), ..cluster.clone() };
        assert_eq!(cluster_connectivity(&other, Some(&health)), Connectivity::Disconnected);

        let current = Cluster { is_current: true, ..other };
        assert_eq!(cluster_connectivity(&current, Some(&health)), Connectivity::Connected);
    }

    #[test]
    fn test_namespace_labels_preview() {
        let namespace = Namespace {
            name: "apps".to_string(),
            status: Some("Terminating".to_string()),
            labels: [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            creation_timestamp: None,
        };

        let (shown, more) = label_preview(&namespace, 2);
        assert_eq!(shown, vec!["a=1", "b=2"]);
        assert_eq!(more, 2);
        assert_eq!(namespace_status(&namespace).tone, Tone::Warning);
    }

    #[test]
    fn test_service_display() {
        let service: Service = serde_json::from_value(json!({
            "metadata": {"name": "web", "namespace": "default"},
            "spec": {"type": "NodePort", "ports": [{"port": 80, "targetPort": 8080, "protocol": "TCP"}, {"port": 443}]}
        }))
        .unwrap();

        assert_eq!(service_type(&service), "NodePort");
        assert_eq!(service_ports(&service), "80:8080/TCP, 443:443/TCP");
        assert_eq!(service_external_address(&service), "nodes");

        let balanced: Service = serde_json::from_value(json!({
            "metadata": {"name": "lb"},
            "spec": {"type": "LoadBalancer"},
            "status": {"loadBalancer": {"ingress": [{"ip": "192.168.1.240"}]}}
        }))
        .unwrap();
        assert_eq!(service_external_address(&balanced), "192.168.1.240");
        assert_eq!(service_ports(&balanced), "None");

        let plain = Service { metadata: ObjectMeta::default(), ..Default::default() };
        assert_eq!(service_type(&plain), "ClusterIP");
        assert_eq!(service_external_address(&plain), "None");
    }

    #[test]
    fn test_ingress_display() {
        let ingress: Ingress = serde_json::from_value(json!({
            "metadata": {"name": "web", "annotations": {"kubernetes.io/ingress.class": "nginx"}},
            "spec": {
                "rules": [
                    {"host": "app.local", "http": {"paths": [
                        {"path": "/", "backend": {"service": {"name": "web", "port": {"number": 80}}}},
                        {"path": "/api", "backend": {"service": {"name": "web", "port": {"number": 80}}}}
                    ]}},
                    {"http": {"paths": [{"path": "/", "backend": {"service": {"name": "fallback", "port": {"name": "http"}}}}]}}
                ],
                "tls": [{"hosts": ["app.local"]}]
            },
            "status": {"loadBalancer": {"ingress": [{"hostname": "lb.local"}]}}
        }))
        .unwrap();

        assert_eq!(ingress_hosts(&ingress), "app.local, *");
        assert_eq!(ingress_backends(&ingress), "web:80, fallback:http");
        assert_eq!(ingress_addresses(&ingress), "lb.local");
        assert_eq!(ingress_class(&ingress), "nginx");
        assert!(ingress_has_tls(&ingress));

        let bare = Ingress::default();
        assert_eq!(ingress_hosts(&bare), "*");
        assert_eq!(ingress_backends(&bare), "None");
        assert_eq!(ingress_addresses(&bare), "Pending");
        assert_eq!(ingress_class(&bare), "default");
        assert!(!ingress_has_tls(&bare));
    }
}
