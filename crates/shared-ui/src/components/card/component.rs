use dioxus::prelude::*;

/// Bordered panel used for forms, tables and charts.
#[component]
pub fn Card(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "card", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
            {children}
        }
    }
}

/// Card header with a title and an optional subtitle.
#[component]
pub fn CardHeader(
    title: String,
    #[props(default)] subtitle: Option<String>,
    #[props(default)] action: Option<Element>,
) -> Element {
    rsx! {
        div { class: "card-header",
            div {
                h3 { class: "card-title", "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "card-description", "{subtitle}" }
                }
            }
            if let Some(action) = action {
                div { class: "card-action", {action} }
            }
        }
    }
}

#[component]
pub fn CardContent(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "card-content", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        div {
            ..merged,
            {children}
        }
    }
}
