use dioxus::prelude::*;

/// One entry in a [`TabBar`].
#[derive(Debug, Clone, PartialEq)]
pub struct TabItem {
    pub value: String,
    pub label: String,
}

impl TabItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Segmented tab strip. The caller owns `active` and renders the panel.
#[component]
pub fn TabBar(tabs: Vec<TabItem>, active: Signal<String>) -> Element {
    let mut active = active;
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "tab-list", role: "tablist",
            for tab in tabs {
                button {
                    key: "{tab.value}",
                    class: "tab-trigger",
                    role: "tab",
                    r#type: "button",
                    "aria-selected": *active.read() == tab.value,
                    "data-state": if *active.read() == tab.value { "active" } else { "inactive" },
                    onclick: {
                        let value = tab.value.clone();
                        move |_| active.set(value.clone())
                    },
                    "{tab.label}"
                }
            }
        }
    }
}
