use dioxus::prelude::*;
use dioxus_primitives::dialog as prim;

#[component]
pub fn DialogRoot(mut props: prim::DialogRootProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "dialog-overlay", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::DialogRoot { ..props }
    }
}

#[component]
pub fn DialogContent(mut props: prim::DialogContentProps) -> Element {
    if props.class.is_none() {
        props.class = Some("dialog-content".to_string());
    }

    rsx! {
        prim::DialogContent { ..props }
    }
}

#[component]
pub fn DialogTitle(mut props: prim::DialogTitleProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "dialog-title", None, false));

    rsx! {
        prim::DialogTitle { ..props }
    }
}

#[component]
pub fn DialogDescription(mut props: prim::DialogDescriptionProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "dialog-description", None, false));

    rsx! {
        prim::DialogDescription { ..props }
    }
}

/// Titled dialog with a body and a footer row, driven by an `open` flag.
#[component]
pub fn Modal(
    open: bool,
    on_close: EventHandler<()>,
    title: String,
    #[props(default)] footer: Option<Element>,
    children: Element,
) -> Element {
    rsx! {
        DialogRoot {
            open: open,
            on_open_change: move |value: bool| {
                if !value {
                    on_close.call(());
                }
            },
            DialogContent {
                DialogTitle { "{title}" }
                div { class: "dialog-body", {children} }
                if let Some(footer) = footer {
                    div { class: "dialog-footer", {footer} }
                }
            }
        }
    }
}
