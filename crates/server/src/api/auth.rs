use dioxus::prelude::*;
use shared_types::{LoginResponse, RegistrationForm, UserRecord, UserUpdate};

/// Check credentials against the backend.
///
/// A wrong password surfaces as an `Unauthorized` error or as a response
/// without the success message; the session store treats both as failure.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(user_name: String, password: String) -> Result<LoginResponse, ServerFnError> {
    use crate::backend::backend;
    use shared_types::{AuthBackend, LoginRequest};

    let request = LoginRequest { user_name, password };
    backend()
        .login(&request)
        .await
        .map_err(crate::api::backend_error)
}

/// Validate the registration form and create the user.
#[cfg_attr(feature = "server", tracing::instrument(skip(form), fields(user = %form.user_name)))]
#[server]
pub async fn register_user(form: RegistrationForm) -> Result<String, ServerFnError> {
    use crate::backend::{backend, CaseBackend};
    use crate::error_convert::{AppErrorExt, ValidateRequest};

    form.validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    let message = backend()
        .register(&form.into_new_user())
        .await
        .map_err(crate::api::backend_error)?;
    tracing::info!("User registered");
    Ok(message)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_users() -> Result<Vec<UserRecord>, ServerFnError> {
    use crate::backend::{backend, CaseBackend};

    backend()
        .list_users()
        .await
        .map_err(crate::api::backend_error)
}

/// Apply a role, permission or password change. The optional password is
/// length-checked before the backend sees it.
#[cfg_attr(feature = "server", tracing::instrument(skip(update), fields(id = %update.id, updated_by = %update.updated_by)))]
#[server]
pub async fn update_user(update: UserUpdate) -> Result<(), ServerFnError> {
    use crate::backend::{backend, CaseBackend};
    use crate::error_convert::{AppErrorExt, ValidateRequest};

    update
        .validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    backend()
        .update_user(&update)
        .await
        .map_err(crate::api::backend_error)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_user(id: String) -> Result<(), ServerFnError> {
    use crate::backend::{backend, CaseBackend};

    backend()
        .delete_user(&id)
        .await
        .map_err(crate::api::backend_error)?;
    tracing::info!(id = %id, "User deleted");
    Ok(())
}
