use serde::{Deserialize, Serialize};
use std::fmt;

use crate::case::{CaseField, CaseRecord};
use crate::format::format_optional_date;

pub const REPORT_TITLE: &str = "Crime Cases Report";
pub const SPREADSHEET_SHEET_NAME: &str = "Cases";
pub const EXPORT_BASENAME: &str = "cases-export";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Pdf,
    Spreadsheet,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Spreadsheet => "xlsx",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn filename(&self) -> String {
        format!("{}.{}", EXPORT_BASENAME, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => f.write_str("PDF"),
            ExportFormat::Spreadsheet => f.write_str("Excel"),
        }
    }
}

/// A rendered export, base64-encoded for transport to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFile {
    pub filename: String,
    pub mime: String,
    pub base64: String,
}

impl ExportFile {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

/// Columns of the PDF report table.
pub const PDF_COLUMNS: [(&str, CaseField); 9] = [
    ("CR No", CaseField::CrNo),
    ("Accused Name", CaseField::AccusedName),
    ("Crime Type", CaseField::CrimeType),
    ("Year", CaseField::Year),
    ("District", CaseField::District),
    ("Police Station", CaseField::PoliceStation),
    ("Gender", CaseField::AccusedGender),
    ("Age", CaseField::AccusedAge),
    ("Section of Law", CaseField::SectionOfLaw),
];

/// Spreadsheet header, source field and column width in characters.
pub const SPREADSHEET_COLUMNS: [(&str, CaseField, u16); 14] = [
    ("CR Number", CaseField::CrNo, 12),
    ("District", CaseField::District, 12),
    ("Police Station", CaseField::PoliceStation, 15),
    ("Section of Law", CaseField::SectionOfLaw, 15),
    ("Crime Type", CaseField::CrimeType, 15),
    ("Year", CaseField::Year, 8),
    ("Accused Name", CaseField::AccusedName, 20),
    ("Nick Name", CaseField::AccusedNickName, 15),
    ("Gender", CaseField::AccusedGender, 8),
    ("Guardian", CaseField::Guardian, 20),
    ("Age", CaseField::AccusedAge, 6),
    ("Address", CaseField::AccusedAddress, 30),
    ("Created Date", CaseField::CreatedAt, 12),
    ("Updated Date", CaseField::UpdatedAt, 12),
];

/// Cell text for an exported field. Timestamps are humanized.
pub fn export_cell(case: &CaseRecord, field: CaseField) -> String {
    match field {
        CaseField::CreatedAt => format_optional_date(case.created_at.as_deref()),
        CaseField::UpdatedAt => format_optional_date(case.updated_at.as_deref()),
        other => case.field_text(other),
    }
}

pub fn report_row(case: &CaseRecord) -> Vec<String> {
    PDF_COLUMNS
        .iter()
        .map(|(_, field)| export_cell(case, *field))
        .collect()
}

pub fn spreadsheet_row(case: &CaseRecord) -> Vec<String> {
    SPREADSHEET_COLUMNS
        .iter()
        .map(|(_, field, _)| export_cell(case, *field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::Gender;
    use pretty_assertions::assert_eq;

    fn case() -> CaseRecord {
        CaseRecord {
            id: "1".into(),
            cr_no: Some("CR20240007".into()),
            district: Some("Pune".into()),
            accused_name: Some("Amit Patel".into()),
            accused_gender: Some(Gender::Male),
            accused_age: Some(34),
            year: Some(2024),
            created_at: Some("2024-02-03T10:00:00Z".into()),
            ..Default::default()
        }
    }

    #[test]
    fn spreadsheet_layout() {
        let widths: Vec<u16> = SPREADSHEET_COLUMNS.iter().map(|c| c.2).collect();
        assert_eq!(widths, vec![12, 12, 15, 15, 15, 8, 20, 15, 8, 20, 6, 30, 12, 12]);
        assert_eq!(SPREADSHEET_COLUMNS[0].0, "CR Number");
        assert_eq!(SPREADSHEET_COLUMNS[13].0, "Updated Date");
    }

    #[test]
    fn report_row_follows_pdf_columns() {
        assert_eq!(
            report_row(&case()),
            vec!["CR20240007", "Amit Patel", "", "2024", "Pune", "", "Male", "34", ""]
        );
    }

    #[test]
    fn spreadsheet_row_humanizes_dates() {
        let row = spreadsheet_row(&case());
        assert_eq!(row.len(), 14);
        assert_eq!(row[12], "Feb 3, 2024");
        assert_eq!(row[13], "");
    }

    #[test]
    fn filenames_and_data_url() {
        assert_eq!(ExportFormat::Pdf.filename(), "cases-export.pdf");
        assert_eq!(ExportFormat::Spreadsheet.filename(), "cases-export.xlsx");
        let file = ExportFile {
            filename: "x.pdf".into(),
            mime: ExportFormat::Pdf.mime().into(),
            base64: "QUJD".into(),
        };
        assert_eq!(file.data_url(), "data:application/pdf;base64,QUJD");
    }
}
