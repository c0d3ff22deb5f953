use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct KubeSystemToggleProps {
    /// Distinguishes the checkbox when several pages render one
    id: String,
    checked: bool,
    on_change: EventHandler<bool>,
}

#[component]
pub fn KubeSystemToggle(props: KubeSystemToggleProps) -> Element {
    rsx! {
        label { class: "toggle", r#for: "{props.id}",
            input {
                id: "{props.id}",
                r#type: "checkbox",
                checked: props.checked,
                onchange: move |evt| props.on_change.call(evt.checked()),
            }
            span { "Hide kube-system" }
        }
    }
}
