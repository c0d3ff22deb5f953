use dioxus::prelude::*;

use crate::api::derive::Badge;

#[derive(Props, PartialEq, Clone)]
pub struct StatusBadgeProps {
    badge: Badge,
}

#[component]
pub fn StatusBadge(props: StatusBadgeProps) -> Element {
    rsx! {
        span { class: "status-badge {props.badge.tone.css_class()}", "{props.badge.label}" }
    }
}
