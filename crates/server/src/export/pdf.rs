use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Utc};
use ecow::EcoVec;
use shared_types::export::{report_row, PDF_COLUMNS, REPORT_TITLE};
use shared_types::format::today_human;
use shared_types::{AppError, CaseRecord};
use typst::diag::{FileError, FileResult, SourceDiagnostic};
use typst::foundations::{Bytes, Datetime};
use typst::layout::PagedDocument;
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};

/// Escape a value for use inside a Typst string literal.
pub fn escape_typst(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
}

/// Typst array literal of string literals. One-element arrays keep the
/// trailing comma so they are not read as parenthesized expressions.
fn string_array(items: &[String]) -> String {
    if items.is_empty() {
        return "()".to_string();
    }
    let quoted: Vec<String> = items
        .iter()
        .map(|s| format!("\"{}\"", escape_typst(s)))
        .collect();
    format!("({},)", quoted.join(", "))
}

/// Build the report source by prepending `#let` bindings to `case-report.typ`.
pub fn build_report_source(cases: &[CaseRecord], generated_on: &str) -> String {
    let columns: Vec<String> = PDF_COLUMNS.iter().map(|(label, _)| label.to_string()).collect();
    let rows: Vec<String> = cases
        .iter()
        .map(|case| string_array(&report_row(case)))
        .collect();
    let rows = if rows.is_empty() {
        "()".to_string()
    } else {
        format!("(\n  {},\n)", rows.join(",\n  "))
    };

    let bindings = format!(
        r##"#let title = "{title}"
#let generated_on = "{generated_on}"
#let total = {total}
#let columns = {columns}
#let rows = {rows}

"##,
        title = escape_typst(REPORT_TITLE),
        generated_on = escape_typst(generated_on),
        total = cases.len(),
        columns = string_array(&columns),
    );

    let template = include_str!("../../../../templates/case-report.typ");
    format!("{bindings}{template}")
}

/// Render the landscape case report for `cases`.
pub async fn render_report(cases: &[CaseRecord], now: DateTime<Utc>) -> Result<Vec<u8>, AppError> {
    let source = build_report_source(cases, &today_human(now));
    compile_typst(&source).await
}

// Fonts and the standard library are loaded once and shared by every render.

static FONTS: LazyLock<Vec<Font>> = LazyLock::new(|| {
    typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data)))
        .collect()
});

static FONT_BOOK: LazyLock<LazyHash<FontBook>> =
    LazyLock::new(|| LazyHash::new(FontBook::from_fonts(FONTS.iter())));

static LIBRARY: LazyLock<LazyHash<Library>> = LazyLock::new(|| LazyHash::new(Library::default()));

/// Single-file world: the generated source is the only file it can read.
struct ReportWorld {
    source: Source,
}

impl ReportWorld {
    fn new(source_text: &str) -> Self {
        Self {
            source: Source::detached(source_text),
        }
    }
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &LIBRARY
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &FONT_BOOK
    }

    fn main(&self) -> FileId {
        self.source.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.source.id() {
            Ok(self.source.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rooted_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rooted_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        let naive = match offset {
            Some(hours) => {
                let tz = chrono::FixedOffset::east_opt((hours as i32) * 3600)?;
                now.with_timezone(&tz).naive_local()
            }
            None => now.naive_utc(),
        };
        Datetime::from_ymd(naive.year(), naive.month() as u8, naive.day() as u8)
    }
}

/// Compile Typst source into PDF bytes on a blocking thread.
pub async fn compile_typst(source: &str) -> Result<Vec<u8>, AppError> {
    let source = source.to_owned();

    tokio::task::spawn_blocking(move || compile_typst_sync(&source))
        .await
        .map_err(|e| AppError::internal(format!("Typst task panicked: {e}")))?
}

fn compile_typst_sync(source: &str) -> Result<Vec<u8>, AppError> {
    let world = ReportWorld::new(source);

    let warned = typst::compile::<PagedDocument>(&world);
    let document = warned
        .output
        .map_err(|diagnostics| format_diagnostics("Typst compilation failed", &diagnostics))?;

    typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default())
        .map_err(|diagnostics| format_diagnostics("PDF export failed", &diagnostics))
}

fn format_diagnostics(prefix: &str, diagnostics: &EcoVec<SourceDiagnostic>) -> AppError {
    let msgs: Vec<String> = diagnostics.iter().map(|d| d.message.to_string()).collect();
    AppError::internal(format!("{prefix}: {}", msgs.join("; ")))
}
