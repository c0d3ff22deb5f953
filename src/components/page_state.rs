//! Panels shown instead of a page body while it loads or after it failed.

use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct LoadingPanelProps {
    title: String,
    message: String,
}

#[component]
pub fn LoadingPanel(props: LoadingPanelProps) -> Element {
    rsx! {
        div { class: "page-card",
            div { class: "page-header",
                div { class: "header-left",
                    h1 { "{props.title}" }
                    p { class: "page-description", "{props.message}" }
                }
            }
            div { class: "skeleton-group",
                div { class: "skeleton-line" }
                div { class: "skeleton-line" }
                div { class: "skeleton-line short" }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ErrorPanelProps {
    message: String,
    #[props(optional)]
    on_retry: Option<EventHandler<()>>,
}

/// Blocking error; no partial data is shown next to it
#[component]
pub fn ErrorPanel(props: ErrorPanelProps) -> Element {
    rsx! {
        div { class: "error-banner",
            strong { "Error" }
            p { "{props.message}" }
            {props.on_retry.map(|on_retry| rsx! {
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            })}
        }
    }
}
