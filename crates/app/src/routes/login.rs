use crate::routes::Route;
use crate::session::use_session;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdScale;
use dioxus_free_icons::Icon;
use shared_types::{resolve_active_page, AppError, Page};
use shared_ui::{Card, CardContent, CardHeader, Input};

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const UNREACHABLE: &str = "Unable to reach the server. Please try again.";

/// Message shown for a failed sign-in.
fn login_error_message(err: &AppError) -> &'static str {
    if err.is_transport() {
        UNREACHABLE
    } else {
        INVALID_CREDENTIALS
    }
}

/// Where to land after signing in. A requested page the user may not open
/// falls back to home.
fn landing_route(requested: Option<&str>, user: Option<&shared_types::UserRecord>) -> Route {
    let page = requested.and_then(Page::from_name).unwrap_or(Page::Home);
    Route::for_page(resolve_active_page(user, page))
}

/// Login page. `redirect` names the page the user was sent away from.
#[component]
pub fn Login(redirect: Option<String>) -> Element {
    let mut session = use_session();
    let mut user_name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let redirect_target = use_signal(move || redirect);

    let go_to_destination = move || {
        let user = session.user();
        let target = landing_route(redirect_target.read().as_deref(), user.as_ref());
        navigator().replace(target);
    };

    use_effect(move || {
        if !session.is_loading() && session.is_authenticated() {
            go_to_destination();
        }
    });

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        let name = user_name().trim().to_string();
        if name.is_empty() || password().is_empty() {
            error_msg.set(Some("Please enter username and password".to_string()));
            return;
        }
        loading.set(true);
        error_msg.set(None);

        match session.login(&name, &password()).await {
            Ok(true) => go_to_destination(),
            Ok(false) => error_msg.set(Some(INVALID_CREDENTIALS.to_string())),
            Err(err) => {
                tracing::warn!(kind = %err.kind, error = %err.message, "Login failed");
                error_msg.set(Some(login_error_message(&err).to_string()));
            }
        }
        loading.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                div { class: "auth-brand",
                    Icon::<LdScale> { icon: LdScale, width: 32, height: 32 }
                    h1 { "CaseDesk" }
                }
                CardHeader {
                    title: "Sign In",
                    subtitle: "Enter your credentials to access the dashboard".to_string(),
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "banner banner-error", "{err}" }
                    }

                    form { class: "auth-form", onsubmit: handle_login,
                        Input {
                            label: "Username",
                            id: "user_name",
                            placeholder: "Enter your username",
                            value: user_name(),
                            on_input: move |e: FormEvent| user_name.set(e.value()),
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            id: "password",
                            placeholder: "Enter your password",
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        button {
                            r#type: "submit",
                            class: "auth-submit button",
                            "data-style": "primary",
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Permissions, Role, UserRecord};

    fn viewer() -> UserRecord {
        UserRecord {
            id: "7".into(),
            user_name: "viewer".into(),
            user_role: Role::User,
            permissions: Permissions {
                case_view: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn transport_failures_get_their_own_message() {
        assert_eq!(login_error_message(&AppError::upstream("refused")), UNREACHABLE);
        assert_eq!(
            login_error_message(&AppError::unauthorized("nope")),
            INVALID_CREDENTIALS
        );
    }

    #[test]
    fn landing_keeps_allowed_pages() {
        let user = viewer();
        assert_eq!(
            landing_route(Some("case-view"), Some(&user)),
            Route::CaseView {}
        );
    }

    #[test]
    fn landing_falls_back_home() {
        let user = viewer();
        assert_eq!(landing_route(Some("user-list"), Some(&user)), Route::Home {});
        assert_eq!(landing_route(Some("nowhere"), Some(&user)), Route::Home {});
        assert_eq!(landing_route(None, Some(&user)), Route::Home {});
    }
}
