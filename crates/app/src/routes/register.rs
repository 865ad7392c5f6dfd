use crate::routes::Route;
use crate::session::server_error;
use dioxus::prelude::*;
use server::api::register_user;
use shared_types::{AppError, Permissions, RegistrationForm, Role};
use shared_ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, FormSelect, Input,
    PageActions, PageHeader, PageTitle, ToggleSwitch,
};
use std::collections::HashMap;
use validator::Validate;

const SUCCESS_MESSAGE: &str = "User registered successfully";
const FAILURE_MESSAGE: &str = "Failed to register user. Please try again.";

/// Check the form locally. Field errors are keyed by form field name.
fn validate_form(form: &RegistrationForm) -> Result<(), AppError> {
    form.validate().map_err(AppError::from)
}

/// Message for a failed registration call.
fn registration_error_message(err: &AppError) -> String {
    if err.is_transport() || err.message.trim().is_empty() {
        FAILURE_MESSAGE.to_string()
    } else {
        err.message.clone()
    }
}

/// The four access toggles, in display order.
pub(crate) fn permission_toggles() -> [(&'static str, fn(&mut Permissions) -> &mut bool); 4] {
    [
        ("Case Entry Access", |p| &mut p.case_entry),
        ("Case View Access", |p| &mut p.case_view),
        ("Analytics Access", |p| &mut p.analytics),
        ("Chat Access", |p| &mut p.chat),
    ]
}

/// Admin page for creating a user account.
#[component]
pub fn Register() -> Element {
    let mut form = use_signal(RegistrationForm::default);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| false);
    let mut registering = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        error_msg.set(None);
        success.set(false);

        let submitted = form();
        if let Err(err) = validate_form(&submitted) {
            error_msg.set(Some(err.first_field_error().to_string()));
            field_errors.set(err.field_errors);
            return;
        }
        field_errors.set(HashMap::new());

        registering.set(true);
        match register_user(submitted).await {
            Ok(message) => {
                tracing::info!(%message, "User registered");
                success.set(true);
                form.set(RegistrationForm::default());
            }
            Err(err) => {
                let err = server_error(&err);
                tracing::error!(kind = %err.kind, error = %err.message, "Registration failed");
                if !err.field_errors.is_empty() {
                    field_errors.set(err.field_errors.clone());
                }
                error_msg.set(Some(registration_error_message(&err)));
            }
        }
        registering.set(false);
    };

    let current = form();
    let mut perms = current.permissions;
    let toggles: Vec<_> = permission_toggles()
        .into_iter()
        .map(|(label, flag)| (label, flag, *flag(&mut perms)))
        .collect();
    let field_error = move |name: &str| field_errors.read().get(name).cloned().unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./users.css") }

        div { class: "page",
            PageHeader {
                PageTitle { subtitle: "Create a new user account".to_string(), "Register New User" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Secondary,
                        size: ButtonSize::Sm,
                        onclick: move |_| { navigator().push(Route::UserList {}); },
                        "Back to Users"
                    }
                }
            }

            Card { class: "user-form-card",
                CardHeader { title: "Account Details" }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "banner banner-error", "{err}" }
                    }
                    if success() {
                        div { class: "banner banner-success", "{SUCCESS_MESSAGE}" }
                    }

                    form { class: "user-form", onsubmit: handle_submit,
                        Input {
                            label: "Username",
                            id: "username",
                            placeholder: "Enter username",
                            value: current.user_name.clone(),
                            error: field_error("user_name"),
                            on_input: move |e: FormEvent| form.write().user_name = e.value(),
                        }
                        Input {
                            label: "Password",
                            id: "password",
                            input_type: "password",
                            placeholder: "Enter password (min. 6 characters)",
                            value: current.password.clone(),
                            error: field_error("password"),
                            on_input: move |e: FormEvent| form.write().password = e.value(),
                        }
                        Input {
                            label: "Confirm Password",
                            id: "confirm_password",
                            input_type: "password",
                            placeholder: "Confirm password",
                            value: current.confirm_password.clone(),
                            error: field_error("confirm_password"),
                            on_input: move |e: FormEvent| form.write().confirm_password = e.value(),
                        }
                        FormSelect {
                            label: "Role",
                            value: current.user_role.as_str().to_string(),
                            onchange: move |e: FormEvent| {
                                form.write().user_role = Role::from_str_or_default(&e.value());
                            },
                            for role in Role::ALL {
                                option { key: "{role.as_str()}", value: "{role.as_str()}", "{role.label()}" }
                            }
                        }

                        fieldset { class: "permission-grid",
                            legend { "Permissions" }
                            for (label, flag, checked) in toggles {
                                ToggleSwitch {
                                    key: "{label}",
                                    label: label,
                                    checked: checked,
                                    on_change: move |value: bool| *flag(&mut form.write().permissions) = value,
                                }
                            }
                        }

                        div { class: "user-form-actions",
                            button {
                                r#type: "submit",
                                class: "button",
                                "data-style": "primary",
                                disabled: registering(),
                                if registering() { "Registering..." } else { "Register User" }
                            }
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
    use pretty_assertions::assert_eq;

    fn form(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            user_name: "clerk".into(),
            password: password.into(),
            confirm_password: confirm.into(),
            ..Default::default()
        }
    }

    #[test]
    fn short_password_is_rejected_locally() {
        let err = validate_form(&form("abc", "abc")).unwrap_err();
        assert_eq!(
            err.field_errors.get("password").map(String::as_str),
            Some("Password must be at least 6 characters long")
        );
    }

    #[test]
    fn mismatched_confirmation_is_rejected_locally() {
        let err = validate_form(&form("abcdef", "abcdeg")).unwrap_err();
        assert_eq!(
            err.field_errors.get("confirm_password").map(String::as_str),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate_form(&form("abcdef", "abcdef")).is_ok());
    }

    #[test]
    fn backend_message_is_shown_when_present() {
        assert_eq!(
            registration_error_message(&AppError::bad_request("User already exists")),
            "User already exists"
        );
        assert_eq!(
            registration_error_message(&AppError::upstream("refused")),
            FAILURE_MESSAGE
        );
    }

    #[test]
    fn toggles_write_their_own_flag() {
        let mut perms = Permissions::default();
        for (label, flag) in permission_toggles() {
            if label == "Analytics Access" {
                *flag(&mut perms) = true;
            }
        }
        assert_eq!(
            perms,
            Permissions {
                analytics: true,
                ..Default::default()
            }
        );
    }
}
