use dioxus::prelude::*;

/// Labelled text input with an optional inline error.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] required: bool,
    /// Inline validation message. Empty means valid.
    #[props(default)] error: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "input", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "input-wrapper",
            if !label.is_empty() {
                label { class: "input-label",
                    "{label}"
                    if required {
                        span { class: "input-required", " *" }
                    }
                }
            }
            input {
                r#type: "{input_type}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                required: required,
                "aria-invalid": !error.is_empty(),
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
            if !error.is_empty() {
                p { class: "input-error", "{error}" }
            }
        }
    }
}

/// Multi-line variant of [`Input`].
#[component]
pub fn Textarea(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = 3)] rows: u32,
) -> Element {
    rsx! {
        div { class: "input-wrapper",
            if !label.is_empty() {
                label { class: "input-label", "{label}" }
            }
            textarea {
                class: "input textarea",
                rows: "{rows}",
                value: value,
                placeholder: placeholder,
                oninput: move |evt| on_input.call(evt),
            }
        }
    }
}
