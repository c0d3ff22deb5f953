use dioxus::prelude::*;

use crate::api::playground::{
    apply_template, DeploymentConfig, EnvVarEntry, PortEntry, Template, PROTOCOLS, SERVICE_TYPES,
};

fn parse_number(value: &str, fallback: i32) -> i32 {
    value.trim().parse().unwrap_or(fallback)
}

#[derive(Props, PartialEq, Clone)]
pub struct DeploymentFormProps {
    config: Signal<DeploymentConfig>,
    /// Namespaces offered in the selector; the current value is always kept
    namespaces: Vec<String>,
    submitting: bool,
    #[props(optional)]
    error: Option<String>,
    on_submit: EventHandler<()>,
}

#[component]
pub fn DeploymentForm(props: DeploymentFormProps) -> Element {
    let mut config = props.config;
    let current = config();

    let mut namespaces = props.namespaces.clone();
    if !namespaces.contains(&current.namespace) {
        namespaces.insert(0, current.namespace.clone());
    }

    let can_submit = current.can_submit() && !props.submitting;
    let app_placeholder = if current.name.trim().is_empty() {
        "my-app".to_string()
    } else {
        current.name.trim().to_string()
    };
    let service_placeholder = format!("{}-service", current.effective_app_label());
    let ingress_placeholder = format!("{}-ingress", current.effective_app_label());

    rsx! {
        div { class: "page-card playground-form",
            h2 { class: "section-title", "Deployment Configuration" }

            div { class: "form-group",
                label { class: "form-label", "Quick Templates" }
                div { class: "template-row",
                    {Template::ALL.iter().map(|&template| rsx! {
                        button {
                            key: "{template.key()}",
                            class: "btn btn-secondary btn-small",
                            onclick: move |_| {
                                let next = apply_template(&config.peek(), template);
                                config.set(next);
                            },
                            "{template.label()}"
                        }
                    })}
                }
            }

            div { class: "form-grid",
                div { class: "form-group",
                    label { class: "form-label", r#for: "name", "Deployment Name" }
                    input {
                        id: "name",
                        class: "form-input",
                        placeholder: "my-test-deployment",
                        value: "{current.name}",
                        oninput: move |evt| config.write().name = evt.value(),
                    }
                }
                div { class: "form-group",
                    label { class: "form-label", r#for: "namespace", "Namespace" }
                    select {
                        id: "namespace",
                        class: "form-input",
                        onchange: move |evt| config.write().namespace = evt.value(),
                        {namespaces.iter().map(|ns| rsx! {
                            option {
                                key: "{ns}",
                                value: "{ns}",
                                selected: *ns == current.namespace,
                                "{ns}"
                            }
                        })}
                    }
                }
            }

            div { class: "form-grid",
                div { class: "form-group",
                    label { class: "form-label", r#for: "image", "Container Image" }
                    input {
                        id: "image",
                        class: "form-input",
                        placeholder: "nginx:latest",
                        value: "{current.image}",
                        oninput: move |evt| config.write().image = evt.value(),
                    }
                }
                div { class: "form-group",
                    label { class: "form-label", r#for: "replicas", "Replicas" }
                    input {
                        id: "replicas",
                        class: "form-input",
                        r#type: "number",
                        min: "1",
                        max: "10",
                        value: "{current.replicas}",
                        oninput: move |evt| {
                            config.write().replicas = parse_number(&evt.value(), 1).clamp(1, 10);
                        },
                    }
                }
            }

            div { class: "form-section",
                label { class: "form-label", "Resource Configuration" }
                div { class: "form-grid four",
                    div { class: "form-group",
                        label { class: "form-hint", "CPU Request" }
                        input {
                            class: "form-input",
                            placeholder: "100m",
                            value: "{current.cpu_request}",
                            oninput: move |evt| config.write().cpu_request = evt.value(),
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-hint", "CPU Limit" }
                        input {
                            class: "form-input",
                            placeholder: "200m",
                            value: "{current.cpu_limit}",
                            oninput: move |evt| config.write().cpu_limit = evt.value(),
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-hint", "Memory Request" }
                        input {
                            class: "form-input",
                            placeholder: "128Mi",
                            value: "{current.memory_request}",
                            oninput: move |evt| config.write().memory_request = evt.value(),
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-hint", "Memory Limit" }
                        input {
                            class: "form-input",
                            placeholder: "256Mi",
                            value: "{current.memory_limit}",
                            oninput: move |evt| config.write().memory_limit = evt.value(),
                        }
                    }
                }
            }

            div { class: "form-section repeatable-section",
                div { class: "section-row",
                    label { class: "form-label", "Environment Variables" }
                    button {
                        class: "btn btn-secondary btn-small",
                        onclick: move |_| config.write().env_vars.push(EnvVarEntry::default()),
                        "+ Add"
                    }
                }
                {current.env_vars.iter().enumerate().map(|(i, var)| rsx! {
                    div { key: "env-{i}", class: "form-row",
                        input {
                            class: "form-input",
                            placeholder: "Name",
                            value: "{var.name}",
                            oninput: move |evt| {
                                if let Some(entry) = config.write().env_vars.get_mut(i) {
                                    entry.name = evt.value();
                                }
                            },
                        }
                        input {
                            class: "form-input",
                            placeholder: "Value",
                            value: "{var.value}",
                            oninput: move |evt| {
                                if let Some(entry) = config.write().env_vars.get_mut(i) {
                                    entry.value = evt.value();
                                }
                            },
                        }
                        button {
                            class: "btn-icon",
                            title: "Remove",
                            onclick: move |_| {
                                let mut current = config.write();
                                if i < current.env_vars.len() {
                                    current.env_vars.remove(i);
                                }
                            },
                            "✕"
                        }
                    }
                })}
            }

            div { class: "form-section repeatable-section",
                div { class: "section-row",
                    label { class: "form-label", "Container Ports" }
                    button {
                        class: "btn btn-secondary btn-small",
                        onclick: move |_| config.write().ports.push(PortEntry::tcp(80)),
                        "+ Add"
                    }
                }
                {current.ports.iter().enumerate().map(|(i, port)| {
                    let protocol = port.protocol.clone();
                    rsx! {
                        div { key: "port-{i}", class: "form-row",
                            input {
                                class: "form-input",
                                r#type: "number",
                                placeholder: "80",
                                value: "{port.container_port}",
                                oninput: move |evt| {
                                    if let Some(entry) = config.write().ports.get_mut(i) {
                                        entry.container_port = parse_number(&evt.value(), 80);
                                    }
                                },
                            }
                            select {
                                class: "form-input",
                                onchange: move |evt| {
                                    if let Some(entry) = config.write().ports.get_mut(i) {
                                        entry.protocol = evt.value();
                                    }
                                },
                                {PROTOCOLS.iter().map(|option| rsx! {
                                    option {
                                        key: "{option}",
                                        value: "{option}",
                                        selected: *option == protocol,
                                        "{option}"
                                    }
                                })}
                            }
                            button {
                                class: "btn-icon",
                                title: "Remove",
                                onclick: move |_| {
                                    let mut current = config.write();
                                    if i < current.ports.len() {
                                        current.ports.remove(i);
                                    }
                                },
                                "✕"
                            }
                        }
                    }
                })}
            }

            div { class: "form-group",
                label { class: "form-label", r#for: "app-label", "App Label" }
                input {
                    id: "app-label",
                    class: "form-input",
                    placeholder: "{app_placeholder}",
                    value: "{current.app_label}",
                    oninput: move |evt| config.write().app_label = evt.value(),
                }
                small { class: "form-hint", "Used for the app selector. Defaults to the deployment name." }
            }

            div { class: "form-section toggle-section",
                label { class: "toggle", r#for: "pvc-toggle",
                    input {
                        id: "pvc-toggle",
                        r#type: "checkbox",
                        checked: current.volume.enabled,
                        onchange: move |evt| config.write().volume.enabled = evt.checked(),
                    }
                    span { "Mount Persistent Volume Claim" }
                }
                if current.volume.enabled {
                    div { class: "form-grid",
                        div { class: "form-group",
                            label { class: "form-hint", "PVC Name" }
                            input {
                                class: "form-input",
                                placeholder: "my-pvc",
                                value: "{current.volume.claim_name}",
                                oninput: move |evt| config.write().volume.claim_name = evt.value(),
                            }
                        }
                        div { class: "form-group",
                            label { class: "form-hint", "Mount Path" }
                            input {
                                class: "form-input",
                                placeholder: "/data",
                                value: "{current.volume.mount_path}",
                                oninput: move |evt| config.write().volume.mount_path = evt.value(),
                            }
                        }
                    }
                }
            }

            div { class: "form-section toggle-section",
                label { class: "toggle", r#for: "service-toggle",
                    input {
                        id: "service-toggle",
                        r#type: "checkbox",
                        checked: current.service.enabled,
                        onchange: move |evt| config.write().service.enabled = evt.checked(),
                    }
                    span { "Create Service" }
                }
                if current.service.enabled {
                    div { class: "form-grid",
                        div { class: "form-group",
                            label { class: "form-hint", "Service Name" }
                            input {
                                class: "form-input",
                                placeholder: "{service_placeholder}",
                                value: "{current.service.name}",
                                oninput: move |evt| config.write().service.name = evt.value(),
                            }
                        }
                        div { class: "form-group",
                            label { class: "form-hint", "Service Type" }
                            select {
                                class: "form-input",
                                onchange: move |evt| config.write().service.service_type = evt.value(),
                                {SERVICE_TYPES.iter().map(|option| rsx! {
                                    option {
                                        key: "{option}",
                                        value: "{option}",
                                        selected: *option == current.service.service_type,
                                        "{option}"
                                    }
                                })}
                            }
                        }
                        div { class: "form-group",
                            label { class: "form-hint", "Port" }
                            input {
                                class: "form-input",
                                r#type: "number",
                                placeholder: "80",
                                value: "{current.service.port}",
                                oninput: move |evt| config.write().service.port = parse_number(&evt.value(), 80),
                            }
                        }
                        div { class: "form-group",
                            label { class: "form-hint", "Target Port" }
                            input {
                                class: "form-input",
                                r#type: "number",
                                placeholder: "80",
                                value: "{current.service.target_port}",
                                oninput: move |evt| config.write().service.target_port = parse_number(&evt.value(), 80),
                            }
                        }
                    }
                }
            }

            div { class: "form-section toggle-section",
                label { class: "toggle", r#for: "ingress-toggle",
                    input {
                        id: "ingress-toggle",
                        r#type: "checkbox",
                        checked: current.ingress.enabled,
                        onchange: move |evt| config.write().ingress.enabled = evt.checked(),
                    }
                    span { "Create Ingress" }
                }
                if current.ingress.enabled && !current.service.enabled {
                    small { class: "form-warning", "An ingress needs the service above to be enabled." }
                }
                if current.ingress.enabled {
                    div { class: "form-grid",
                        div { class: "form-group",
                            label { class: "form-hint", "Ingress Name" }
                            input {
                                class: "form-input",
                                placeholder: "{ingress_placeholder}",
                                value: "{current.ingress.name}",
                                oninput: move |evt| config.write().ingress.name = evt.value(),
                            }
                        }
                        div { class: "form-group",
                            label { class: "form-hint", "Ingress Class" }
                            input {
                                class: "form-input",
                                placeholder: "traefik",
                                value: "{current.ingress.class_name}",
                                oninput: move |evt| config.write().ingress.class_name = evt.value(),
                            }
                        }
                        div { class: "form-group",
                            label { class: "form-hint", "Host" }
                            input {
                                class: "form-input",
                                placeholder: "app.local",
                                value: "{current.ingress.host}",
                                oninput: move |evt| config.write().ingress.host = evt.value(),
                            }
                        }
                        div { class: "form-group",
                            label { class: "form-hint", "Path" }
                            input {
                                class: "form-input",
                                placeholder: "/",
                                value: "{current.ingress.path}",
                                oninput: move |evt| config.write().ingress.path = evt.value(),
                            }
                        }
                    }
                }
            }

            {props.error.clone().map(|error| rsx! {
                div { class: "error-banner", "{error}" }
            })}

            button {
                class: "btn btn-primary btn-block",
                disabled: !can_submit,
                onclick: move |_| props.on_submit.call(()),
                if props.submitting { "Creating Deployment..." } else { "Create Deployment" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_number;

    #[test]
    fn test_parse_number_falls_back() {
        assert_eq!(parse_number(" 8080 ", 80), 8080);
        assert_eq!(parse_number("", 80), 80);
        assert_eq!(parse_number("abc", 1), 1);
    }
}
