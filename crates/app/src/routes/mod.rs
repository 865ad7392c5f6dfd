pub mod analytics;
pub mod case_entry;
pub mod case_form;
pub mod case_view;
pub mod chat;
pub mod home;
pub mod login;
pub mod not_found;
pub mod register;
pub mod users;

use crate::session::use_session;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdChartBar, LdFileText, LdFolder, LdLayoutDashboard, LdLock, LdMessageSquare, LdScale,
    LdSettings, LdUserCheck, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::{accessible_pages, Page, Role};
use shared_ui::theme::{ThemeMode, ThemeState};
use shared_ui::{AccessDenied, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant};

use analytics::Analytics;
use case_entry::CaseEntry;
use case_view::CaseView;
use chat::Chat;
use home::Home;
use login::Login;
use not_found::NotFound;
use register::Register;
use users::UserList;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login?:redirect")]
    Login { redirect: Option<String> },
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    Home {},
    #[route("/case-entry")]
    CaseEntry {},
    #[route("/case-view")]
    CaseView {},
    #[route("/analytics")]
    Analytics {},
    #[route("/chat")]
    Chat {},
    #[route("/register")]
    Register {},
    #[route("/user-list")]
    UserList {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    pub fn for_page(page: Page) -> Self {
        match page {
            Page::Home => Route::Home {},
            Page::CaseEntry => Route::CaseEntry {},
            Page::CaseView => Route::CaseView {},
            Page::Analytics => Route::Analytics {},
            Page::Chat => Route::Chat {},
            Page::Register => Route::Register {},
            Page::UserList => Route::UserList {},
        }
    }

    /// The gated page behind this route, if any.
    pub fn page(&self) -> Option<Page> {
        match self {
            Route::Home {} => Some(Page::Home),
            Route::CaseEntry {} => Some(Page::CaseEntry),
            Route::CaseView {} => Some(Page::CaseView),
            Route::Analytics {} => Some(Page::Analytics),
            Route::Chat {} => Some(Page::Chat),
            Route::Register {} => Some(Page::Register),
            Route::UserList {} => Some(Page::UserList),
            Route::Login { .. } | Route::NotFound { .. } => None,
        }
    }
}

fn page_icon(page: Page) -> Element {
    match page {
        Page::Home => rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 } },
        Page::CaseEntry => rsx! { Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 } },
        Page::CaseView => rsx! { Icon::<LdFolder> { icon: LdFolder, width: 18, height: 18 } },
        Page::Analytics => rsx! { Icon::<LdChartBar> { icon: LdChartBar, width: 18, height: 18 } },
        Page::Chat => rsx! { Icon::<LdMessageSquare> { icon: LdMessageSquare, width: 18, height: 18 } },
        Page::Register => rsx! { Icon::<LdUserCheck> { icon: LdUserCheck, width: 18, height: 18 } },
        Page::UserList => rsx! { Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 } },
    }
}

/// Auth guard layout: redirects to /login once the session is known to be empty.
///
/// The session is restored from localStorage after hydration, so the first
/// render (and every server render) sees the loading state.
#[component]
fn AuthGuard() -> Element {
    let session = use_session();
    let route: Route = use_route();

    if session.is_loading() {
        return rsx! {
            div { class: "auth-guard-loading",
                p { "Loading..." }
            }
        };
    }

    if !session.is_authenticated() {
        let redirect = route
            .page()
            .filter(|p| *p != Page::Home)
            .map(|p| p.as_str().to_string());
        navigator().replace(Route::Login { redirect });
        return rsx! {
            div { class: "auth-guard-loading",
                p { "Redirecting to login..." }
            }
        };
    }

    rsx! { Outlet::<Route> {} }
}

/// Main app layout with the permission-filtered sidebar.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let mut session = use_session();

    let mut theme_state = use_context_provider(|| ThemeState {
        is_dark: Signal::new(false),
    });

    // Pick up the mode ThemeSeed applied from the cookie.
    use_effect(move || {
        spawn(async move {
            let key = document::eval(
                "return document.documentElement.getAttribute('data-theme') || 'light';",
            )
            .join::<String>()
            .await
            .unwrap_or_default();
            theme_state
                .is_dark
                .set(ThemeMode::from_key(&key) == ThemeMode::Dark);
        });
    });

    let user = session.user();
    let pages = accessible_pages(user.as_ref());
    let active = route.page();
    let allowed = active.is_none_or(|page| session.can_access(page));
    let user_name = session.user_name();
    let is_admin = user.as_ref().is_some_and(|u| u.user_role == Role::Admin);
    let mode = theme_state.mode();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "app-shell",
            aside { class: "sidebar",
                div { class: "sidebar-brand",
                    Icon::<LdScale> { icon: LdScale, width: 22, height: 22 }
                    span { class: "sidebar-brand-name", "CaseDesk" }
                }

                nav { class: "sidebar-nav",
                    for page in pages {
                        Link {
                            key: "{page}",
                            to: Route::for_page(page),
                            class: if active == Some(page) { "sidebar-link active" } else { "sidebar-link" },
                            {page_icon(page)}
                            span { "{page.label()}" }
                        }
                    }
                }

                div { class: "sidebar-footer",
                    div { class: "sidebar-user",
                        span { class: "sidebar-user-name", "{user_name}" }
                        Badge {
                            variant: if is_admin { BadgeVariant::Primary } else { BadgeVariant::Secondary },
                            if is_admin { "Admin" } else { "User" }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Sm,
                        onclick: move |_| theme_state.toggle(),
                        Icon::<LdSettings> { icon: LdSettings, width: 16, height: 16 }
                        "{mode.toggle_label()}"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        size: ButtonSize::Sm,
                        onclick: move |_| {
                            session.logout();
                            tracing::info!("Signed out");
                            navigator().replace(Route::Login { redirect: None });
                        },
                        Icon::<LdLock> { icon: LdLock, width: 16, height: 16 }
                        "Logout"
                    }
                }
            }

            main { class: "app-main",
                if allowed {
                    Outlet::<Route> {}
                } else {
                    AccessDenied {
                        page_title: active.map(|p| p.label()).unwrap_or("this page").to_string(),
                        on_back_home: move |_| {
                            navigator().push(Route::Home {});
                        },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_has_a_route() {
        for page in Page::ALL {
            assert_eq!(Route::for_page(page).page(), Some(page));
        }
    }

    #[test]
    fn route_paths_match_page_names() {
        for page in Page::ALL {
            let path = Route::for_page(page).to_string();
            let expected = if page == Page::Home {
                "/".to_string()
            } else {
                format!("/{}", page.as_str())
            };
            assert_eq!(path, expected);
        }
    }

    #[test]
    fn sidebar_icons_are_distinct() {
        use dioxus_free_icons::icons::ld_icons::{LdBell, LdSearch};

        let icons: Vec<String> = Page::ALL
            .into_iter()
            .map(|page| dioxus_ssr::render_element(page_icon(page)))
            .collect();
        for (i, icon) in icons.iter().enumerate() {
            assert!(!icons[i + 1..].contains(icon), "{:?} shares an icon", Page::ALL[i]);
        }

        let search = dioxus_ssr::render_element(rsx! { Icon::<LdSearch> { icon: LdSearch, width: 18, height: 18 } });
        let bell = dioxus_ssr::render_element(rsx! { Icon::<LdBell> { icon: LdBell, width: 18, height: 18 } });
        assert_ne!(dioxus_ssr::render_element(page_icon(Page::Analytics)), search);
        assert_ne!(dioxus_ssr::render_element(page_icon(Page::Chat)), bell);
    }

    #[test]
    fn login_and_not_found_are_ungated() {
        assert_eq!(Route::Login { redirect: None }.page(), None);
        assert_eq!(Route::NotFound { route: vec![] }.page(), None);
    }
}
