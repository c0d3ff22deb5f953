use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct UsageBarProps {
    label: String,
    percent: u32,
    detail: String,
}

/// Labelled progress bar; turns amber above 70% and red above 90%
#[component]
pub fn UsageBar(props: UsageBarProps) -> Element {
    let level = match props.percent {
        0..=70 => "low",
        71..=90 => "medium",
        _ => "high",
    };
    let width = props.percent.min(100);

    rsx! {
        div { class: "metric",
            div { class: "metric-header",
                span { class: "metric-label", "{props.label}" }
                span { class: "metric-value", "{props.percent}%" }
            }
            div { class: "progress-bar",
                div { class: "progress-fill {level}", style: "width: {width}%" }
            }
            span { class: "metric-detail", "{props.detail}" }
        }
    }
}
