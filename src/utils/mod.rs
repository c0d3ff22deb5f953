/// Configuration constants for the application
pub mod config {
    use std::time::Duration;

    /// Base URL of the cluster-management API when nothing else is configured
    pub const DEFAULT_API_URL: &str = "http://localhost:4600";

    /// Environment variable overriding the API base URL
    pub const API_URL_ENV: &str = "K3S_DASHBOARD_API_URL";

    /// Environment variable holding an optional request timeout in seconds
    pub const REQUEST_TIMEOUT_ENV: &str = "K3S_DASHBOARD_REQUEST_TIMEOUT_SECS";

    /// Environment variable overriding the streaming buffer limit in bytes
    pub const BUFFER_BYTES_ENV: &str = "K3S_DASHBOARD_BUFFER_BYTES";

    /// Environment variable selecting how the playground monitor refreshes
    pub const MONITOR_MODE_ENV: &str = "K3S_DASHBOARD_MONITOR";

    /// Directory (under the home directory) holding persisted preferences
    pub const SETTINGS_DIR: &str = ".k3s-dashboard";

    /// File name of the persisted preferences
    pub const SETTINGS_FILE: &str = "settings.json";

    /// System namespace hidden by the "hide kube-system" toggles
    pub const KUBE_SYSTEM_NAMESPACE: &str = "kube-system";

    /// Namespace selector value meaning "no namespace filter"
    pub const ALL_NAMESPACES: &str = "all";

    /// Interval between playground monitor refreshes
    pub const MONITOR_REFRESH_INTERVAL: Duration = Duration::from_secs(3);

    /// Bytes retained by a log or terminal buffer before old text is dropped
    pub const DEFAULT_BUFFER_LIMIT: usize = 1024 * 1024;

    /// Pod capacity assumed for nodes that do not report one
    pub const DEFAULT_POD_CAPACITY: f64 = 110.0;

    /// Characters to replace in file names for safety
    pub const UNSAFE_FILENAME_CHARS: &[char] = &['/', '\\', ':'];

    /// Replacement character for unsafe filename characters
    pub const FILENAME_REPLACEMENT_CHAR: &str = "_";

    /// How the playground monitor refreshes tracked deployments
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum MonitorMode {
        /// Poll the API for each tracked deployment
        #[default]
        Poll,
        /// Advance a time-based simulated rollout without touching the API
        Simulate,
    }

    impl MonitorMode {
        fn parse(value: &str) -> Option<Self> {
            match value.trim().to_ascii_lowercase().as_str() {
                "poll" => Some(MonitorMode::Poll),
                "simulate" => Some(MonitorMode::Simulate),
                _ => None,
            }
        }
    }

    /// Runtime configuration shared by every page
    #[derive(Debug, Clone, PartialEq)]
    pub struct DashboardConfig {
        pub api_url: String,
        pub request_timeout: Option<Duration>,
        pub buffer_limit: usize,
        pub monitor_mode: MonitorMode,
    }

    impl Default for DashboardConfig {
        fn default() -> Self {
            Self {
                api_url: DEFAULT_API_URL.to_string(),
                request_timeout: None,
                buffer_limit: DEFAULT_BUFFER_LIMIT,
                monitor_mode: MonitorMode::default(),
            }
        }
    }

    impl DashboardConfig {
        /// Build the configuration from the process environment
        pub fn from_env() -> Self {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Build the configuration from an arbitrary key lookup.
        /// Unparseable values fall back to the defaults.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
            let defaults = Self::default();

            let api_url = lookup(API_URL_ENV)
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_url);

            let request_timeout = lookup(REQUEST_TIMEOUT_ENV)
                .and_then(|secs| secs.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs);

            let buffer_limit = lookup(BUFFER_BYTES_ENV)
                .and_then(|bytes| bytes.trim().parse::<usize>().ok())
                .filter(|bytes| *bytes > 0)
                .unwrap_or(defaults.buffer_limit);

            let monitor_mode = lookup(MONITOR_MODE_ENV)
                .and_then(|mode| MonitorMode::parse(&mode))
                .unwrap_or(defaults.monitor_mode);

            Self {
                api_url,
                request_timeout,
                buffer_limit,
                monitor_mode,
            }
        }
    }
}

/// Utility functions for file operations
pub mod file_utils {
    use super::config::*;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Path of the persisted preferences file under the home directory
    pub fn settings_file_path() -> Result<PathBuf, std::io::Error> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found"))?;

        Ok(home_dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Sanitize a filename by replacing unsafe characters
    pub fn sanitize_filename(name: &str) -> String {
        name.chars()
            .map(|c| {
                if UNSAFE_FILENAME_CHARS.contains(&c) {
                    FILENAME_REPLACEMENT_CHAR.to_string()
                } else {
                    c.to_string()
                }
            })
            .collect::<String>()
    }

    /// File name used when downloading a log buffer
    pub fn log_download_name(pod: &str, container: &str) -> String {
        sanitize_filename(&format!("{}-{}-logs.txt", pod, container))
    }

    /// Write `content` into `dir`, creating the directory if needed
    pub fn save_text_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf, std::io::Error> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let file_path = dir.join(sanitize_filename(name));
        fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Save a download into the user's download directory (home as fallback)
    pub fn save_download(name: &str, content: &str) -> Result<PathBuf, std::io::Error> {
        let dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "No download directory found"))?;

        save_text_file(&dir, name, content)
    }
}

/// Utility functions for time and age calculations
pub mod time_utils {
    use k8s_openapi::chrono::{DateTime, Utc};

    /// Parse an RFC3339 timestamp into UTC
    pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Age of a resource relative to `now`, as days, hours or minutes
    pub fn format_age_at(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
        let Some(created) = timestamp.and_then(parse_timestamp) else {
            return "-".to_string();
        };

        let age = now.signed_duration_since(created);
        if age.num_days() > 0 {
            format!("{}d", age.num_days())
        } else if age.num_hours() > 0 {
            format!("{}h", age.num_hours())
        } else {
            format!("{}m", age.num_minutes().max(0))
        }
    }

    /// Age of a resource relative to the current time
    pub fn format_age(timestamp: Option<&str>) -> String {
        format_age_at(timestamp, Utc::now())
    }

    /// Milliseconds since the epoch, 0 when missing or unparseable
    pub fn timestamp_millis(timestamp: Option<&str>) -> i64 {
        timestamp
            .and_then(parse_timestamp)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0)
    }
}

pub use time_utils::format_age;
