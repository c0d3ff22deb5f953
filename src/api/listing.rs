//! Client-side list handling: namespace filters, namespace options,
//! deployment sorting and the loading state of a page.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::derive::ready_ratio;
use super::models::{Deployment, Ingress, Service};
use super::normalize::Pod;
use crate::contexts::ApiError;
use crate::utils::config::{ALL_NAMESPACES, KUBE_SYSTEM_NAMESPACE};
use crate::utils::time_utils::timestamp_millis;

/// Anything listed per namespace
pub trait Namespaced {
    fn name(&self) -> &str;
    fn namespace(&self) -> &str;
}

impl Namespaced for Pod {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}

macro_rules! namespaced_by_metadata {
    ($($kind:ty),*) => {
        $(
            impl Namespaced for $kind {
                fn name(&self) -> &str {
                    &self.metadata.name
                }

                fn namespace(&self) -> &str {
                    self.metadata.namespace.as_deref().unwrap_or_default()
                }
            }
        )*
    };
}

namespaced_by_metadata!(Deployment, Service, Ingress);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamespaceFilter {
    #[default]
    All,
    Named(String),
}

impl NamespaceFilter {
    /// Parse the namespace selector value ("all" or a namespace name)
    pub fn from_selection(selection: &str) -> Self {
        if selection.is_empty() || selection == ALL_NAMESPACES {
            NamespaceFilter::All
        } else {
            NamespaceFilter::Named(selection.to_string())
        }
    }

    pub fn selection(&self) -> &str {
        match self {
            NamespaceFilter::All => ALL_NAMESPACES,
            NamespaceFilter::Named(name) => name,
        }
    }
}

/// Namespace equality plus the optional kube-system exclusion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListFilter {
    pub namespace: NamespaceFilter,
    pub hide_kube_system: bool,
}

impl ListFilter {
    pub fn new(selection: &str, hide_kube_system: bool) -> Self {
        Self {
            namespace: NamespaceFilter::from_selection(selection),
            hide_kube_system,
        }
    }

    pub fn matches<T: Namespaced>(&self, item: &T) -> bool {
        let namespace = item.namespace();
        if self.hide_kube_system && namespace == KUBE_SYSTEM_NAMESPACE {
            return false;
        }
        match &self.namespace {
            NamespaceFilter::All => true,
            NamespaceFilter::Named(name) => namespace == name,
        }
    }

    pub fn apply<T: Namespaced + Clone>(&self, items: &[T]) -> Vec<T> {
        items.iter().filter(|item| self.matches(*item)).cloned().collect()
    }
}

/// Selector options: "all" followed by every namespace present, sorted
pub fn namespace_options<T: Namespaced>(items: &[T]) -> Vec<String> {
    let namespaces: BTreeSet<&str> = items
        .iter()
        .map(|item| item.namespace())
        .filter(|namespace| !namespace.is_empty())
        .collect();

    std::iter::once(ALL_NAMESPACES.to_string())
        .chain(namespaces.into_iter().map(str::to_string))
        .collect()
}

/// "N <noun> found" caption shown above each table
pub fn found_caption(count: usize, noun: &str) -> String {
    format!("{} {} found", count, noun)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Namespace,
    Ready,
    Replicas,
    Updated,
    Available,
    Age,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Name,
        SortField::Namespace,
        SortField::Ready,
        SortField::Replicas,
        SortField::Updated,
        SortField::Available,
        SortField::Age,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Namespace => "Namespace",
            SortField::Ready => "Ready",
            SortField::Replicas => "Replicas",
            SortField::Updated => "Updated",
            SortField::Available => "Available",
            SortField::Age => "Age",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Clicking the active column flips direction; another column starts ascending
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            let direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
            Self { field, direction }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }

    /// Arrow shown next to the column header
    pub fn indicator(&self, field: SortField) -> &'static str {
        match (self.field == field, self.direction) {
            (false, _) => "",
            (true, SortDirection::Ascending) => " ↑",
            (true, SortDirection::Descending) => " ↓",
        }
    }
}

fn compare_deployments(a: &Deployment, b: &Deployment, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.metadata.name.cmp(&b.metadata.name),
        SortField::Namespace => a.namespace().cmp(b.namespace()),
        SortField::Ready => ready_ratio(a)
            .partial_cmp(&ready_ratio(b))
            .unwrap_or(Ordering::Equal),
        SortField::Replicas => a.replicas().cmp(&b.replicas()),
        SortField::Updated => a.updated_replicas().cmp(&b.updated_replicas()),
        SortField::Available => a.available_replicas().cmp(&b.available_replicas()),
        SortField::Age => timestamp_millis(a.metadata.creation_timestamp.as_deref())
            .cmp(&timestamp_millis(b.metadata.creation_timestamp.as_deref())),
    }
}

/// Stable sort; rows that compare equal keep their API order
pub fn sort_deployments(deployments: &mut [Deployment], sort: SortState) {
    deployments.sort_by(|a, b| {
        let ordering = compare_deployments(a, b, sort.field);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// What a list page shows. A failure carries no rows.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T: Clone> LoadState<T> {
    pub fn from_result(result: Option<&Result<T, ApiError>>) -> Self {
        match result {
            None => LoadState::Loading,
            Some(Ok(value)) => LoadState::Ready(value.clone()),
            Some(Err(err)) => LoadState::Failed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::derive::pod_ready;
    use crate::api::normalize::Container;
    use serde_json::json;

    fn pod(name: &str, namespace: &str, ready: bool) -> Pod {
        Pod {
            name: name.to_string(),
            namespace: namespace.to_string(),
            ready: Some(ready),
            containers: vec![Container {
                name: "main".to_string(),
                ready,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn deployment(name: &str, namespace: &str, replicas: i64, ready: i64, created: Option<&str>) -> Deployment {
        serde_json::from_value(json!({
            "metadata": {"name": name, "namespace": namespace, "creationTimestamp": created},
            "spec": {"replicas": replicas},
            "status": {"readyReplicas": ready}
        }))
        .unwrap()
    }

    fn names(deployments: &[Deployment]) -> Vec<&str> {
        deployments.iter().map(|d| d.metadata.name.as_str()).collect()
    }

    #[test]
    fn test_hide_kube_system_keeps_other_pods() {
        let pods = vec![pod("a", "kube-system", true), pod("b", "default", false)];

        let visible = ListFilter::new("all", true).apply(&pods);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "b");
        assert_eq!(pod_ready(&visible[0]).label, "0/1");
        assert_eq!(found_caption(visible.len(), "pods"), "1 pods found");
    }

    #[test]
    fn test_namespace_filter() {
        let pods = vec![pod("a", "kube-system", true), pod("b", "default", true), pod("c", "apps", true)];

        let only_apps = ListFilter::new("apps", false).apply(&pods);
        assert_eq!(only_apps.len(), 1);
        assert_eq!(only_apps[0].name, "c");

        // selecting kube-system while hiding it yields nothing
        assert!(ListFilter::new("kube-system", true).apply(&pods).is_empty());
        assert_eq!(ListFilter::new("all", false).apply(&pods).len(), 3);
    }

    #[test]
    fn test_empty_list_caption() {
        let filtered = ListFilter::default().apply::<Pod>(&[]);
        assert_eq!(found_caption(filtered.len(), "deployments"), "0 deployments found");
    }

    #[test]
    fn test_namespace_options() {
        let pods = vec![pod("a", "kube-system", true), pod("b", "default", true), pod("c", "default", true)];
        assert_eq!(namespace_options(&pods), vec!["all", "default", "kube-system"]);
        assert_eq!(namespace_options::<Pod>(&[]), vec!["all"]);
    }

    #[test]
    fn test_namespace_filter_selection_round_trip() {
        assert_eq!(NamespaceFilter::from_selection("all"), NamespaceFilter::All);
        assert_eq!(NamespaceFilter::from_selection(""), NamespaceFilter::All);
        assert_eq!(NamespaceFilter::from_selection("apps").selection(), "apps");
    }

    #[test]
    fn test_sort_toggle() {
        let sort = SortState::default();
        assert_eq!(sort.field, SortField::Name);

        let flipped = sort.toggle(SortField::Name);
        assert_eq!(flipped.direction, SortDirection::Descending);

        let switched = flipped.toggle(SortField::Age);
        assert_eq!(switched, SortState { field: SortField::Age, direction: SortDirection::Ascending });
        assert_eq!(switched.indicator(SortField::Age), " ↑");
        assert_eq!(switched.indicator(SortField::Name), "");
    }

    #[test]
    fn test_sort_by_ready_ratio_with_zero_replicas() {
        let mut deployments = vec![
            deployment("half", "default", 2, 1, None),
            deployment("scaled-down", "default", 0, 0, None),
            deployment("full", "default", 3, 3, None),
        ];

        sort_deployments(&mut deployments, SortState { field: SortField::Ready, direction: SortDirection::Ascending });
        assert_eq!(names(&deployments), vec!["scaled-down", "half", "full"]);

        sort_deployments(&mut deployments, SortState { field: SortField::Ready, direction: SortDirection::Descending });
        assert_eq!(names(&deployments), vec!["full", "half", "scaled-down"]);
    }

    #[test]
    fn test_sort_by_age_treats_missing_as_oldest() {
        let mut deployments = vec![
            deployment("new", "default", 1, 1, Some("2024-05-02T00:00:00Z")),
            deployment("unknown", "default", 1, 1, None),
            deployment("old", "default", 1, 1, Some("2024-05-01T00:00:00Z")),
        ];

        sort_deployments(&mut deployments, SortState { field: SortField::Age, direction: SortDirection::Ascending });
        assert_eq!(names(&deployments), vec!["unknown", "old", "new"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut deployments = vec![
            deployment("b", "apps", 1, 1, None),
            deployment("a", "default", 1, 1, None),
            deployment("c", "apps", 1, 1, None),
        ];

        sort_deployments(&mut deployments, SortState { field: SortField::Namespace, direction: SortDirection::Ascending });
        assert_eq!(names(&deployments), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_load_state_drops_rows_on_error() {
        let failed: Result<Vec<Pod>, ApiError> = Err(ApiError::Status {
            context: "pods".to_string(),
            status: 500,
        });

        assert_eq!(LoadState::from_result(None::<&Result<Vec<Pod>, ApiError>>), LoadState::Loading);
        assert_eq!(
            LoadState::from_result(Some(&failed)),
            LoadState::Failed("Request for pods failed (HTTP 500)".to_string())
        );
    }
}
