use crate::routes::register::permission_toggles;
use crate::routes::Route;
use crate::session::{server_error, use_session};
use dioxus::prelude::*;
use server::api::{delete_user, list_users, update_user};
use shared_types::{can_manage, filter_users, AppError, Role, UserRecord, UserUpdate};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent,
    ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableHeader,
    DataTableMessage, DataTableRow, FormSelect, Input, Modal, PageActions, PageHeader, PageTitle,
    SearchBar, ToastOptions, ToggleSwitch,
};
use validator::Validate;

const LOAD_FAILED: &str = "Failed to load users. Please try again.";
const UPDATE_FAILED: &str = "Failed to update user. Please try again.";
const DELETE_FAILED: &str = "Failed to delete user. Please try again.";

/// Build the update request for `target`. A blank password leaves it unchanged.
fn build_update(
    target: &UserRecord,
    edited: &UserRecord,
    new_password: &str,
    updated_by: &str,
) -> Result<UserUpdate, AppError> {
    let update = UserUpdate {
        id: target.id.clone(),
        user_name: target.user_name.clone(),
        user_role: edited.user_role,
        permissions: edited.permissions,
        updated_by: updated_by.to_string(),
        password: (!new_password.is_empty()).then(|| new_password.to_string()),
    };
    update.validate()?;
    Ok(update)
}

fn empty_message(term: &str) -> &'static str {
    if term.trim().is_empty() {
        "No users found in the system."
    } else {
        "No users match your search criteria."
    }
}

fn role_variant(role: Role) -> BadgeVariant {
    match role {
        Role::Admin => BadgeVariant::Primary,
        Role::User => BadgeVariant::Secondary,
    }
}

/// Admin user management: search, edit, delete.
#[component]
pub fn UserList() -> Element {
    let session = use_session();
    let toast = use_toast();
    let mut resource = use_resource(list_users);
    let mut users = use_signal(Vec::<UserRecord>::new);
    let mut search = use_signal(String::new);
    let mut editing = use_signal(|| Option::<UserRecord>::None);
    let mut deleting = use_signal(|| Option::<UserRecord>::None);
    let mut busy = use_signal(|| false);

    use_effect(move || {
        if let Some(Ok(list)) = &*resource.read() {
            users.set(list.clone());
        }
    });

    let load_error = match &*resource.read() {
        Some(Err(err)) => {
            let err = server_error(err);
            tracing::error!(kind = %err.kind, error = %err.message, "Failed to load users");
            true
        }
        _ => false,
    };
    let loading = resource.read().is_none();
    let actor = session.user();

    let handle_update = move |update: UserUpdate| {
        spawn(async move {
            busy.set(true);
            match update_user(update.clone()).await {
                Ok(()) => {
                    if let Some(user) = users.write().iter_mut().find(|u| u.id == update.id) {
                        user.apply_update(&update);
                    }
                    tracing::info!(id = %update.id, "User updated");
                    toast.success("User updated successfully!".to_string(), ToastOptions::new());
                    editing.set(None);
                }
                Err(err) => {
                    let err = server_error(&err);
                    tracing::error!(kind = %err.kind, error = %err.message, "Failed to update user");
                    toast.error(UPDATE_FAILED.to_string(), ToastOptions::new());
                }
            }
            busy.set(false);
        });
    };

    let handle_delete = move |_: MouseEvent| {
        let Some(target) = deleting() else {
            return;
        };
        spawn(async move {
            busy.set(true);
            match delete_user(target.id.clone()).await {
                Ok(()) => {
                    users.write().retain(|u| u.id != target.id);
                    tracing::info!(id = %target.id, "User deleted");
                    toast.success("User deleted successfully".to_string(), ToastOptions::new());
                }
                Err(err) => {
                    let err = server_error(&err);
                    tracing::error!(kind = %err.kind, error = %err.message, "Failed to delete user");
                    toast.error(DELETE_FAILED.to_string(), ToastOptions::new());
                }
            }
            deleting.set(None);
            busy.set(false);
        });
    };

    let all = users();
    let term = search();
    let visible = filter_users(&all, &term);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./users.css") }

        div { class: "page",
            PageHeader {
                PageTitle { subtitle: "View and manage user accounts".to_string(), "User Management" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Secondary,
                        size: ButtonSize::Sm,
                        onclick: move |_| resource.restart(),
                        "Refresh"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        size: ButtonSize::Sm,
                        onclick: move |_| { navigator().push(Route::Register {}); },
                        "Add User"
                    }
                }
            }

            Card {
                CardContent {
                    SearchBar {
                        value: term.clone(),
                        placeholder: "Search users by name or role...",
                        on_search: move |value: String| search.set(value),
                    }

                    if load_error {
                        div { class: "banner banner-error", "{LOAD_FAILED}" }
                    }

                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Username" }
                            DataTableColumn { "Role" }
                            DataTableColumn { "Permissions" }
                            DataTableColumn { "Actions" }
                        }
                        DataTableBody {
                            if loading {
                                DataTableMessage { colspan: 4, "Loading users..." }
                            } else if visible.is_empty() {
                                DataTableMessage { colspan: 4, "{empty_message(&term)}" }
                            }
                            for user in visible.iter().map(|u| (*u).clone()) {
                                UserRow {
                                    key: "{user.id}",
                                    is_self: actor.as_ref().is_some_and(|a| a.id == user.id),
                                    manageable: can_manage(actor.as_ref(), &user),
                                    on_edit: move |u: UserRecord| editing.set(Some(u)),
                                    on_delete: move |u: UserRecord| deleting.set(Some(u)),
                                    user,
                                }
                            }
                        }
                    }
                }
            }

            if let Some(target) = editing() {
                Modal {
                    open: true,
                    title: "Edit User",
                    on_close: move |_| editing.set(None),
                    EditUserForm {
                        key: "{target.id}",
                        target,
                        updated_by: session.user_name(),
                        busy: busy(),
                        on_submit: handle_update,
                        on_cancel: move |_| editing.set(None),
                    }
                }
            }

            ConfirmDialog {
                open: deleting().is_some(),
                title: "Delete User",
                description: "Are you sure you want to delete this user? This action cannot be undone.",
                busy: busy(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn UserRow(
    user: UserRecord,
    is_self: bool,
    manageable: bool,
    on_edit: EventHandler<UserRecord>,
    on_delete: EventHandler<UserRecord>,
) -> Element {
    let granted = user.permissions.granted_labels().join(", ");
    let name = if user.user_name.is_empty() {
        "Unknown".to_string()
    } else {
        user.user_name.clone()
    };
    let edit_target = user.clone();
    let delete_target = user.clone();

    rsx! {
        DataTableRow {
            DataTableCell {
                "{name}"
                if is_self {
                    span { class: "muted", " (You)" }
                }
            }
            DataTableCell {
                Badge { variant: role_variant(user.user_role), "{user.user_role.label()}" }
            }
            DataTableCell {
                if granted.is_empty() {
                    span { class: "muted", "None" }
                } else {
                    "{granted}"
                }
            }
            DataTableCell {
                if manageable {
                    div { class: "row-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            size: ButtonSize::Sm,
                            onclick: move |_| on_edit.call(edit_target.clone()),
                            "Edit"
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            size: ButtonSize::Sm,
                            onclick: move |_| on_delete.call(delete_target.clone()),
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn EditUserForm(
    target: UserRecord,
    updated_by: String,
    busy: bool,
    on_submit: EventHandler<UserUpdate>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut edited = use_signal(|| target.clone());
    let mut password = use_signal(String::new);
    let mut password_error = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match build_update(&target, &edited.read(), &password(), &updated_by) {
            Ok(update) => {
                password_error.set(String::new());
                on_submit.call(update);
            }
            Err(err) => password_error.set(err.first_field_error().to_string()),
        }
    };

    let current = edited();
    let mut perms = current.permissions;
    let toggles: Vec<_> = permission_toggles()
        .into_iter()
        .map(|(label, flag)| (label, flag, *flag(&mut perms)))
        .collect();

    rsx! {
        form { class: "user-form", onsubmit: handle_submit,
            Input {
                label: "Username",
                value: current.user_name.clone(),
                disabled: true,
            }
            FormSelect {
                label: "Role",
                value: current.user_role.as_str().to_string(),
                onchange: move |e: FormEvent| {
                    edited.write().user_role = Role::from_str_or_default(&e.value());
                },
                for role in Role::ALL {
                    option { key: "{role.as_str()}", value: "{role.as_str()}", "{role.label()}" }
                }
            }
            Input {
                label: "New Password (optional)",
                input_type: "password",
                placeholder: "Enter new password or leave blank",
                value: password(),
                error: password_error(),
                on_input: move |e: FormEvent| password.set(e.value()),
            }

            fieldset { class: "permission-grid",
                legend { "User Permissions" }
                for (label, flag, checked) in toggles {
                    ToggleSwitch {
                        key: "{label}",
                        label: label,
                        checked: checked,
                        on_change: move |value: bool| *flag(&mut edited.write().permissions) = value,
                    }
                }
            }

            div { class: "user-form-actions",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    r#type: "submit",
                    class: "button",
                    "data-style": "primary",
                    disabled: busy,
                    if busy { "Updating..." } else { "Update User" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::Permissions;

    fn user(id: &str, role: Role) -> UserRecord {
        UserRecord {
            id: id.into(),
            user_name: format!("user{id}"),
            user_role: role,
            permissions: Permissions::default(),
        }
    }

    #[test]
    fn blank_password_is_left_out() {
        let target = user("2", Role::User);
        let edited = UserRecord {
            user_role: Role::Admin,
            ..target.clone()
        };
        let update = build_update(&target, &edited, "", "admin").unwrap();
        assert_eq!(update.password, None);
        assert_eq!(update.user_role, Role::Admin);
        assert_eq!(update.updated_by, "admin");
    }

    #[test]
    fn short_password_is_rejected() {
        let target = user("2", Role::User);
        let err = build_update(&target, &target, "abc", "admin").unwrap_err();
        assert_eq!(
            err.first_field_error(),
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn long_password_is_sent() {
        let target = user("2", Role::User);
        let update = build_update(&target, &target, "secret1", "admin").unwrap();
        assert_eq!(update.password.as_deref(), Some("secret1"));
    }

    #[test]
    fn update_keeps_the_target_identity() {
        let target = user("2", Role::User);
        let edited = UserRecord {
            id: "9".into(),
            user_name: "renamed".into(),
            ..target.clone()
        };
        let update = build_update(&target, &edited, "", "admin").unwrap();
        assert_eq!(update.id, "2");
        assert_eq!(update.user_name, "user2");
    }

    #[test]
    fn empty_state_depends_on_search() {
        assert_eq!(empty_message(""), "No users found in the system.");
        assert_eq!(empty_message("zed"), "No users match your search criteria.");
    }
}
