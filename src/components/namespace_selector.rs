use dioxus::prelude::*;

use crate::api::listing::NamespaceFilter;

#[derive(Props, PartialEq, Clone)]
pub struct NamespaceSelectorProps {
    /// "all" followed by the namespaces present in the loaded list
    options: Vec<String>,
    selected_namespace: String,
    on_change: EventHandler<String>,
}

#[component]
pub fn NamespaceSelector(props: NamespaceSelectorProps) -> Element {
    rsx! {
        select {
            class: "namespace-select",
            value: "{props.selected_namespace}",
            onchange: move |evt| {
                props.on_change.call(evt.value());
            },
            {props.options.iter().map(|ns| {
                let label = match NamespaceFilter::from_selection(ns) {
                    NamespaceFilter::All => "All namespaces".to_string(),
                    NamespaceFilter::Named(name) => name,
                };
                rsx! {
                    option {
                        key: "{ns}",
                        value: "{ns}",
                        selected: *ns == props.selected_namespace,
                        "{label}"
                    }
                }
            })}
        }
    }
}
