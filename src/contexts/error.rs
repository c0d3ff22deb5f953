use thiserror::Error;

/// Errors raised while talking to the cluster-management API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Failed to reach the API for {context}: {message}")]
    Request { context: String, message: String },
    /// The API answered with a non-success status
    #[error("Request for {context} failed (HTTP {status})")]
    Status { context: String, status: u16 },
    /// The response body did not match the expected shape
    #[error("Unexpected response for {context}: {message}")]
    Decode { context: String, message: String },
    /// A detail response carried no `data`
    #[error("No data returned for {0}")]
    MissingData(String),
    /// A URL could not be built from the configured base
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
    /// A log or terminal stream failed
    #[error("Stream error: {0}")]
    Stream(String),
}

/// Errors raised while loading or saving persisted preferences
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid settings file: {0}")]
    Serialization(String),
    #[error("Home directory not found")]
    NoHomeDirectory,
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Serialization(err.to_string())
    }
}

/// Form validation failures in the playground
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaygroundError {
    #[error("Deployment name is required")]
    MissingName,
    #[error("Container image is required")]
    MissingImage,
    #[error("An ingress needs the service to be enabled")]
    IngressWithoutService,
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for settings persistence
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type for playground request building
pub type PlaygroundResult<T> = Result<T, PlaygroundError>;
