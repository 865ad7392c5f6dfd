use dioxus::prelude::*;
use shared_types::{CaseDraft, CaseRecord, ChartDatum, ExportFile, ExportFormat};

/// The full case list. Filtering and paging happen in the browser.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_cases() -> Result<Vec<CaseRecord>, ServerFnError> {
    use crate::backend::{backend, CaseBackend};

    backend()
        .list_cases()
        .await
        .map_err(crate::api::backend_error)
}

/// Submit a new case. `None` means the backend accepted it without echoing
/// the stored record.
#[cfg_attr(feature = "server", tracing::instrument(skip(draft)))]
#[server]
pub async fn create_case(draft: CaseDraft) -> Result<Option<CaseRecord>, ServerFnError> {
    use crate::backend::{backend, CaseBackend};

    let created = backend()
        .create_case(&draft)
        .await
        .map_err(crate::api::backend_error)?;
    tracing::info!(id = ?created.as_ref().map(|c| c.id.as_str()), "Case created");
    Ok(created)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(draft)))]
#[server]
pub async fn update_case(id: String, draft: CaseDraft) -> Result<CaseRecord, ServerFnError> {
    use crate::backend::{backend, CaseBackend};

    backend()
        .update_case(&id, &draft)
        .await
        .map_err(crate::api::backend_error)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_case(id: String) -> Result<(), ServerFnError> {
    use crate::backend::{backend, CaseBackend};

    backend()
        .delete_case(&id)
        .await
        .map_err(crate::api::backend_error)
}

/// Pre-aggregated counts for the dashboard pie.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn crime_type_counts() -> Result<Vec<ChartDatum>, ServerFnError> {
    use crate::backend::{backend, CaseBackend};

    backend()
        .crime_type_counts()
        .await
        .map_err(crate::api::backend_error)
}

/// Total reported by the backend, if it reports one.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn case_count() -> Result<Option<u64>, ServerFnError> {
    use crate::backend::{backend, CaseBackend};

    backend()
        .case_count()
        .await
        .map_err(crate::api::backend_error)
}

/// Render the given (already filtered) cases for download.
#[cfg_attr(feature = "server", tracing::instrument(skip(cases), fields(count = cases.len())))]
#[server]
pub async fn export_cases(
    format: ExportFormat,
    cases: Vec<CaseRecord>,
) -> Result<ExportFile, ServerFnError> {
    use crate::error_convert::AppErrorExt;

    crate::export::render(format, &cases, chrono::Utc::now())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Export failed");
            e.into_server_fn_error()
        })
}
