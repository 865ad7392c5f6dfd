use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdShield;
use dioxus_free_icons::Icon;

use crate::components::button::{Button, ButtonVariant};

/// Placeholder shown in place of a page the user may not open.
#[component]
pub fn AccessDenied(
    #[props(default = "this page".to_string())] page_title: String,
    on_back_home: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "access-denied",
            div { class: "access-denied-icon",
                Icon::<LdShield> { icon: LdShield, width: 32, height: 32 }
            }
            h2 { class: "access-denied-title", "Access Denied" }
            p { class: "access-denied-message",
                "You don't have permission to access {page_title}. Please contact your administrator if you believe you should have access."
            }
            Button {
                variant: ButtonVariant::Primary,
                onclick: move |evt| on_back_home.call(evt),
                "Back to Home"
            }
        }
    }
}
