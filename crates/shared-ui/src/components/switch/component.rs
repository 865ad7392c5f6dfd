use dioxus::prelude::*;
use dioxus_primitives::switch as prim;

#[component]
pub fn Switch(mut props: prim::SwitchProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "switch", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Switch { ..props }
    }
}

#[component]
pub fn SwitchThumb(mut props: prim::SwitchThumbProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "switch-thumb", None, false));

    rsx! {
        prim::SwitchThumb { ..props }
    }
}

/// Labelled on/off switch used for permission flags.
#[component]
pub fn ToggleSwitch(
    checked: bool,
    on_change: EventHandler<bool>,
    label: String,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        div { class: "toggle-switch",
            Switch {
                checked: Some(checked),
                disabled: disabled,
                on_checked_change: move |value: bool| on_change.call(value),
                SwitchThumb {}
            }
            span { class: "toggle-switch-label", "{label}" }
        }
    }
}
