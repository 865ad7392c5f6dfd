use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdSearch;
use dioxus_free_icons::Icon;

/// Search input with a leading icon. Fires `on_search` on every keystroke.
#[component]
pub fn SearchBar(
    value: String,
    on_search: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-bar",
            div { class: "search-bar-field",
                span { class: "search-bar-icon",
                    Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                }
                input {
                    class: "search-bar-input",
                    r#type: "search",
                    value: value,
                    placeholder: placeholder,
                    oninput: move |evt| on_search.call(evt.value()),
                }
            }
        }
    }
}
