//! PDF and spreadsheet exports of the filtered case list.

pub mod pdf;
pub mod xlsx;

use base64::Engine;
use chrono::{DateTime, Utc};
use shared_types::{AppError, CaseRecord, ExportFile, ExportFormat};

/// Render `cases` in the requested format, base64-encoded for the browser.
#[tracing::instrument(skip(cases, now), fields(count = cases.len()))]
pub async fn render(
    format: ExportFormat,
    cases: &[CaseRecord],
    now: DateTime<Utc>,
) -> Result<ExportFile, AppError> {
    let bytes = match format {
        ExportFormat::Pdf => pdf::render_report(cases, now).await?,
        ExportFormat::Spreadsheet => xlsx::render_workbook(cases)?,
    };
    tracing::info!(size = bytes.len(), "Export rendered");
    Ok(ExportFile {
        filename: format.filename(),
        mime: format.mime().to_string(),
        base64: base64::engine::general_purpose::STANDARD.encode(bytes),
    })
}
