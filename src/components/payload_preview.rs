use dioxus::prelude::*;

use crate::api::playground::{preview_json, DeploymentConfig};

#[derive(Props, PartialEq, Clone)]
pub struct PayloadPreviewProps {
    config: DeploymentConfig,
}

/// The request body as it would be sent, regenerated on every edit
#[component]
pub fn PayloadPreview(props: PayloadPreviewProps) -> Element {
    let payload = preview_json(&props.config);

    rsx! {
        div { class: "page-card payload-preview",
            h2 { class: "section-title", "Generated API Payload" }
            p { class: "page-description", "Complete payload including deployment, service, and ingress specs" }
            pre { class: "payload-code", "{payload}" }
        }
    }
}
