use rust_xlsxwriter::{Format, Workbook, XlsxError};
use shared_types::export::{export_cell, SPREADSHEET_COLUMNS, SPREADSHEET_SHEET_NAME};
use shared_types::{AppError, CaseField, CaseRecord};

/// Render the one-sheet workbook for `cases`.
pub fn render_workbook(cases: &[CaseRecord]) -> Result<Vec<u8>, AppError> {
    build_workbook(cases)
        .map_err(|e| AppError::internal(format!("Spreadsheet export failed: {e}")))
}

fn is_numeric(field: CaseField) -> bool {
    matches!(field, CaseField::Year | CaseField::AccusedAge)
}

fn build_workbook(cases: &[CaseRecord]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SPREADSHEET_SHEET_NAME)?;

    for (col, (label, _, width)) in SPREADSHEET_COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *label, &header)?;
        sheet.set_column_width(col, *width)?;
    }

    for (index, case) in cases.iter().enumerate() {
        let row = (index + 1) as u32;
        for (col, (_, field, _)) in SPREADSHEET_COLUMNS.iter().enumerate() {
            let col = col as u16;
            let text = export_cell(case, *field);
            match text.parse::<f64>() {
                Ok(n) if is_numeric(*field) => {
                    sheet.write_number(row, col, n)?;
                }
                _ => {
                    sheet.write_string(row, col, text)?;
                }
            }
        }
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_is_a_zip_container() {
        let cases = vec![CaseRecord {
            id: "1".into(),
            cr_no: Some("CR20240001".into()),
            year: Some(2024),
            accused_age: Some(30),
            ..Default::default()
        }];
        let bytes = render_workbook(&cases).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_list_still_has_a_header_sheet() {
        let bytes = render_workbook(&[]).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn only_year_and_age_are_numeric() {
        assert!(is_numeric(CaseField::Year));
        assert!(is_numeric(CaseField::AccusedAge));
        assert!(!is_numeric(CaseField::CrNo));
    }
}
