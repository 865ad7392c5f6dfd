use dioxus::prelude::*;

/// Headline number with a label, used on the dashboard and analytics pages.
#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default)] hint: Option<String>,
    #[props(default = "blue".to_string())] tone: String,
    #[props(default)] icon: Option<Element>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-card", "data-tone": "{tone}",
            div { class: "stat-card-body",
                p { class: "stat-card-label", "{label}" }
                p { class: "stat-card-value", "{value}" }
                if let Some(hint) = hint {
                    p { class: "stat-card-hint", "{hint}" }
                }
            }
            if let Some(icon) = icon {
                div { class: "stat-card-icon", {icon} }
            }
        }
    }
}
