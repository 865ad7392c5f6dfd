use dioxus::prelude::*;
use shared_types::FeatureFlags;

#[cfg(feature = "server")]
use shared_types::AppError;

mod auth;
pub use auth::*;

mod cases;
pub use cases::*;

/// Log a failed backend call and wrap it for the client.
#[cfg(feature = "server")]
pub(crate) fn backend_error(err: AppError) -> ServerFnError {
    use crate::error_convert::AppErrorExt;

    if err.is_transport() {
        tracing::error!(kind = %err.kind, error = %err.message, "Backend unavailable");
    } else {
        tracing::warn!(kind = %err.kind, error = %err.message, "Backend rejected request");
    }
    err.into_server_fn_error()
}

/// Flags from `config.toml`, for gating client features.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}
