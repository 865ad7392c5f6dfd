use dioxus::prelude::*;
use shared_types::pagination::Pager;

use crate::components::button::{Button, ButtonSize, ButtonVariant};

/// Previous/next controls over a 1-based page signal.
///
/// Buttons are disabled at the boundaries instead of hidden so the bar
/// keeps its width while paging.
#[component]
pub fn PaginationBar(len: usize, page: Signal<usize>) -> Element {
    let pager = Pager::new(len, page());
    let total_pages = pager.total_pages().max(1);
    let current = pager.page;
    let showing = pager.showing_label();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "pagination",
            span { class: "pagination-info",
                if let Some(label) = showing {
                    "{label}"
                } else {
                    "No results"
                }
            }
            div { class: "pagination-controls",
                Button {
                    variant: ButtonVariant::Outline,
                    size: ButtonSize::Sm,
                    disabled: !pager.can_prev(),
                    onclick: move |_| {
                        let p = page();
                        if p > 1 {
                            page.set(p - 1);
                        }
                    },
                    "Previous"
                }
                span { class: "pagination-page", "Page {current} of {total_pages}" }
                Button {
                    variant: ButtonVariant::Outline,
                    size: ButtonSize::Sm,
                    disabled: !pager.can_next(),
                    onclick: move |_| page.set(page() + 1),
                    "Next"
                }
            }
        }
    }
}
