use dioxus::prelude::ServerFnError;
use serde_json::Value;
use shared_types::wire::error_message;
use shared_types::AppError;

/// Convert a transport-level reqwest failure into an AppError.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_decode() {
        return AppError::upstream(format!("Backend returned an unreadable body: {err}"));
    }
    AppError::upstream(format!("Backend request failed: {err}"))
}

/// Map a non-2xx backend status and its parsed body onto an AppError.
///
/// The backend's own `message` (or `error`) field wins over the generic text.
pub fn status_to_app_error(status: u16, body: &Value) -> AppError {
    let backend_message = error_message(body);
    let message = |fallback: &str| backend_message.clone().unwrap_or_else(|| fallback.to_string());
    match status {
        400 | 422 => AppError::bad_request(message("The backend rejected the request")),
        401 => AppError::unauthorized(message("Invalid username or password")),
        403 => AppError::forbidden(message("Not allowed")),
        404 => AppError::not_found(message("Resource not found")),
        _ => AppError::upstream(message(&format!("Backend responded with status {status}"))),
    }
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
