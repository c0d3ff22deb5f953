//! Shared components used across the dashboard pages. Pages own the data and
//! hand it down; components only render and report user actions back.

mod namespace_selector;
pub use namespace_selector::NamespaceSelector;

mod kube_system_toggle;
pub use kube_system_toggle::KubeSystemToggle;

mod status_badge;
pub use status_badge::StatusBadge;

mod page_state;
pub use page_state::{ErrorPanel, LoadingPanel};

mod usage_bar;
pub use usage_bar::UsageBar;

mod pod_table;
pub use pod_table::PodTable;

mod pod_detail;
pub use pod_detail::{InfoItem, PodDetailPanel};

mod deployment_detail;
pub use deployment_detail::DeploymentDetailPanel;

mod logs_dialog;
pub use logs_dialog::{LogSource, LogsDialog};

mod terminal_dialog;
pub use terminal_dialog::TerminalDialog;

mod deployment_form;
pub use deployment_form::DeploymentForm;

mod payload_preview;
pub use payload_preview::PayloadPreview;

mod deployment_monitor;
pub use deployment_monitor::DeploymentMonitorPanel;
