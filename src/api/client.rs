//! HTTP client for the cluster-management API.

use dioxus::logger::tracing;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::models::{
    Cluster, ClusterDetail, DataEnvelope, Deployment, Health, Ingress, Namespace, Node, Service, SuccessEnvelope,
};
use super::normalize::{normalize_pod, normalize_pods, Pod, PodRecord};
use super::playground::CreateDeploymentRequest;
use crate::contexts::{ApiError, ApiResult};
use crate::utils::config::DashboardConfig;

/// Typed access to every endpoint the dashboard consumes.
///
/// One base URL serves every page; WebSocket URLs are derived from it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base: Url,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl ApiClient {
    /// Creates a client for the configured base URL.
    ///
    /// # Errors
    /// Returns `ApiError::InvalidUrl` if the base URL cannot be parsed and
    /// `ApiError::Request` if the HTTP client cannot be built.
    pub fn new(config: &DashboardConfig) -> ApiResult<Self> {
        let base = Url::parse(&config.api_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.api_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| ApiError::Request {
            context: "client setup".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { http_client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base URL extended with path segments and query pairs
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn websocket_endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> ApiResult<Url> {
        let mut url = self.endpoint(segments, query)?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|_| ApiError::InvalidUrl(format!("cannot derive a WebSocket URL from {}", self.base)))?;
        Ok(url)
    }

    /// Sends the request and turns non-success statuses into errors
    async fn send(&self, request: RequestBuilder, context: &str) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Request for {} failed: {}", context, e);
            ApiError::Request {
                context: context.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("API returned {} for {}", status, context);
            return Err(ApiError::Status {
                context: context.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_json<T>(&self, url: Url, context: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(self.http_client.get(url), context).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to decode {}: {}", context, e);
            ApiError::Decode {
                context: context.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// GET a `{ data: [...] }` list; a missing `data` is an empty list
    async fn get_list<T>(&self, url: Url, context: &str) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let envelope: DataEnvelope<Vec<T>> = self.get_json(url, context).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// GET a `{ data: {...} }` object; a missing `data` is an error
    async fn get_object<T>(&self, url: Url, context: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let envelope: DataEnvelope<T> = self.get_json(url, context).await?;
        envelope.data.ok_or_else(|| ApiError::MissingData(context.to_string()))
    }

    /// GET a `{ success, data }` list; `success: false` is an empty list
    async fn get_success_list<T>(&self, url: Url, context: &str) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let envelope: SuccessEnvelope<T> = self.get_json(url, context).await?;
        if !envelope.success {
            tracing::warn!("API reported no success for {}", context);
            return Ok(Vec::new());
        }
        Ok(envelope.data.unwrap_or_default())
    }

    async fn mutate<B>(&self, method: Method, url: Url, body: Option<&B>, context: &str) -> ApiResult<()>
    where
        B: Serialize,
    {
        let mut request = self.http_client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request, context).await?;
        Ok(())
    }

    // Clusters

    pub async fn list_clusters(&self) -> ApiResult<Vec<Cluster>> {
        self.get_list(self.endpoint(&["api", "clusters"], &[])?, "clusters").await
    }

    pub async fn cluster_detail(&self, name: &str) -> ApiResult<ClusterDetail> {
        self.get_object(self.endpoint(&["api", "clusters", name], &[])?, "cluster details")
            .await
    }

    pub async fn health(&self) -> ApiResult<Health> {
        self.get_json(self.endpoint(&["api", "health"], &[])?, "health").await
    }

    // Nodes and namespaces

    pub async fn list_nodes(&self) -> ApiResult<Vec<Node>> {
        self.get_list(self.endpoint(&["api", "nodes"], &[])?, "nodes").await
    }

    pub async fn list_namespaces(&self) -> ApiResult<Vec<Namespace>> {
        self.get_list(self.endpoint(&["api", "namespaces"], &[])?, "namespaces").await
    }

    // Pods

    /// Pods in one namespace, or every namespace when `None`
    pub async fn list_pods(&self, namespace: Option<&str>) -> ApiResult<Vec<Pod>> {
        let query: Vec<(&str, &str)> = namespace.map(|ns| ("namespace", ns)).into_iter().collect();
        let records: Vec<PodRecord> = self.get_list(self.endpoint(&["api", "pods"], &query)?, "pods").await?;
        Ok(normalize_pods(records))
    }

    pub async fn pod_detail(&self, namespace: &str, name: &str) -> ApiResult<Pod> {
        let url = self.endpoint(&["api", "pods", name], &[("namespace", namespace)])?;
        let record: PodRecord = self.get_object(url, "pod details").await?;
        Ok(normalize_pod(record))
    }

    // Deployments

    pub async fn list_deployments(&self) -> ApiResult<Vec<Deployment>> {
        self.get_list(self.endpoint(&["api", "deployments"], &[])?, "deployments").await
    }

    pub async fn deployment_detail(&self, namespace: &str, name: &str) -> ApiResult<Deployment> {
        let url = self.endpoint(&["api", "deployments", name], &[("namespace", namespace)])?;
        self.get_object(url, "deployment details").await
    }

    pub async fn deployment_pods(&self, namespace: &str, name: &str) -> ApiResult<Vec<Pod>> {
        let url = self.endpoint(&["api", "deployments", name, "pods"], &[("namespace", namespace)])?;
        let records: Vec<PodRecord> = self.get_list(url, "deployment pods").await?;
        Ok(normalize_pods(records))
    }

    pub async fn restart_deployment(&self, namespace: &str, name: &str) -> ApiResult<()> {
        let url = self.endpoint(&["api", "deployments", name, "restart"], &[("namespace", namespace)])?;
        tracing::info!("Restarting deployment {}/{}", namespace, name);
        self.mutate(Method::POST, url, None::<&()>, "deployment restart").await
    }

    pub async fn create_deployment(&self, namespace: &str, request: &CreateDeploymentRequest) -> ApiResult<()> {
        let url = self.endpoint(&["api", "deployments"], &[("namespace", namespace)])?;
        tracing::info!("Creating deployment in {}", namespace);
        self.mutate(Method::POST, url, Some(request), "deployment creation").await
    }

    pub async fn delete_deployment(&self, namespace: &str, name: &str) -> ApiResult<()> {
        let url = self.endpoint(&["api", "deployments", name], &[("namespace", namespace)])?;
        tracing::info!("Deleting deployment {}/{}", namespace, name);
        self.mutate(Method::DELETE, url, None::<&()>, "deployment deletion").await
    }

    // Network

    pub async fn list_services(&self) -> ApiResult<Vec<Service>> {
        self.get_success_list(self.endpoint(&["api", "services"], &[])?, "services")
            .await
    }

    pub async fn list_ingresses(&self) -> ApiResult<Vec<Ingress>> {
        self.get_success_list(self.endpoint(&["api", "ingresses"], &[])?, "ingresses")
            .await
    }

    // Streams

    /// Log stream of a pod; the server picks the container when none is given
    pub fn log_stream_url(&self, namespace: &str, pod: &str, container: Option<&str>) -> ApiResult<Url> {
        let query: Vec<(&str, &str)> = container.map(|c| ("containerName", c)).into_iter().collect();
        self.websocket_endpoint(&["api", "namespaces", namespace, "pods", pod, "logs", "stream"], &query)
    }

    pub fn terminal_url(&self, namespace: &str, pod: &str, container: &str, shell: &str) -> ApiResult<Url> {
        self.websocket_endpoint(
            &["api", "namespaces", namespace, "pods", pod, "terminal"],
            &[("containerName", container), ("shell", shell)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::playground::{build_request, DeploymentConfig};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = DashboardConfig {
            api_url: server.uri(),
            ..Default::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = DashboardConfig {
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_websocket_urls() {
        let client = ApiClient::new(&DashboardConfig::default()).unwrap();

        let logs = client.log_stream_url("default", "web-1", Some("nginx")).unwrap();
        assert_eq!(
            logs.as_str(),
            "ws://localhost:4600/api/namespaces/default/pods/web-1/logs/stream?containerName=nginx"
        );

        let deployment_logs = client.log_stream_url("default", "web-1", None).unwrap();
        assert_eq!(
            deployment_logs.as_str(),
            "ws://localhost:4600/api/namespaces/default/pods/web-1/logs/stream"
        );

        let terminal = client.terminal_url("default", "web-1", "nginx", "/bin/sh").unwrap();
        assert_eq!(
            terminal.as_str(),
            "ws://localhost:4600/api/namespaces/default/pods/web-1/terminal?containerName=nginx&shell=%2Fbin%2Fsh"
        );
    }

    #[test]
    fn test_secure_base_uses_wss() {
        let config = DashboardConfig {
            api_url: "https://k3s.example.com/dashboard".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();

        let url = client.log_stream_url("apps", "api 1", Some("main")).unwrap();
        assert_eq!(
            url.as_str(),
            "wss://k3s.example.com/dashboard/api/namespaces/apps/pods/api%201/logs/stream?containerName=main"
        );
    }

    #[tokio::test]
    async fn test_list_pods_normalizes_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pods"))
            .and(query_param("namespace", "default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "name": "web-1",
                    "namespace": "default",
                    "status": {"phase": "Running", "ready": true},
                    "containers": [{"name": "nginx", "ready": true, "restartCount": 1}]
                }]
            })))
            .mount(&server)
            .await;

        let pods = client_for(&server).list_pods(Some("default")).await.unwrap();

        assert_eq!(pods.len(), 1);
        assert_eq!(pods[0].name, "web-1");
        assert_eq!(pods[0].containers[0].restart_count, 1);
    }

    #[tokio::test]
    async fn test_empty_and_missing_data_are_empty_lists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/nodes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/namespaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.list_nodes().await.unwrap().is_empty());
        assert!(client.list_namespaces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/deployments"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).list_deployments().await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                context: "deployments".to_string(),
                status: 500
            }
        );
        assert_eq!(err.to_string(), "Request for deployments failed (HTTP 500)");
    }

    #[tokio::test]
    async fn test_detail_without_data_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/deployments/web"))
            .and(query_param("namespace", "default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
            .mount(&server)
            .await;

        let err = client_for(&server).deployment_detail("default", "web").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingData(_)));
    }

    #[tokio::test]
    async fn test_unsuccessful_network_envelope_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "data": [{"metadata": {"name": "ignored"}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/ingresses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{"metadata": {"name": "web", "namespace": "default"}}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.list_services().await.unwrap().is_empty());
        assert_eq!(client.list_ingresses().await.unwrap()[0].metadata.name, "web");
    }

    #[tokio::test]
    async fn test_cluster_health_and_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "kubernetes": {"connected": true, "context": "default"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/clusters/k3s"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"stats": {"runningPods": 12, "totalNodes": 3, "readyNodes": 3}}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let health = client.health().await.unwrap();
        assert_eq!(health.kubernetes.unwrap().context.as_deref(), Some("default"));

        let detail = client.cluster_detail("k3s").await.unwrap();
        let stats = detail.stats.unwrap();
        assert_eq!(stats.running_pods, 12);
        assert_eq!(stats.ready_nodes, 3);
    }

    #[tokio::test]
    async fn test_deployment_pods_use_object_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/deployments/web/pods"))
            .and(query_param("namespace", "default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "metadata": {"name": "web-5d8c", "namespace": "default"},
                    "status": {"phase": "Running", "containerStatuses": [{"name": "web", "ready": true}]}
                }]
            })))
            .mount(&server)
            .await;

        let pods = client_for(&server).deployment_pods("default", "web").await.unwrap();
        assert_eq!(pods[0].name, "web-5d8c");
        assert_eq!(pods[0].ready, Some(true));
    }

    #[tokio::test]
    async fn test_restart_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/deployments/web/restart"))
            .and(query_param("namespace", "default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/deployments/web"))
            .and(query_param("namespace", "default"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.restart_deployment("default", "web").await.unwrap();

        let err = client.delete_deployment("default", "web").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_create_posts_composite_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/deployments"))
            .and(query_param("namespace", "playground"))
            .and(body_partial_json(json!({
                "deployment": {"kind": "Deployment", "metadata": {"name": "demo"}},
                "service": {"kind": "Service", "metadata": {"name": "demo-svc"}}
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = DeploymentConfig {
            name: "demo".to_string(),
            namespace: "playground".to_string(),
            ..Default::default()
        };
        config.service.enabled = true;
        config.service.name = "demo-svc".to_string();

        let request = build_request(&config).unwrap();
        client_for(&server).create_deployment(&config.namespace, &request).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_api_is_a_request_error() {
        let config = DashboardConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let err = ApiClient::new(&config).unwrap().list_clusters().await.unwrap_err();
        assert!(matches!(err, ApiError::Request { .. }));
    }
}
