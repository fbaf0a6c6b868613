//! # `trialfeed-sheets`: Report Spreadsheet Writer
//!
//! Writes extracted rows to a single-sheet XLSX workbook: a bold, centred
//! header row, a named table covering header and data with banded rows and
//! columns, and columns sized to their longest value.

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, FormatAlign, Table, TableColumn, TableStyle, Workbook, XlsxError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use trialfeed::{format_report_date, ExtractedRow};

/// Name of the only worksheet in the report.
pub const SHEET_NAME: &str = "Clinical Trials Data";

/// Display name of the table spanning the report data.
pub const TABLE_NAME: &str = "ClinicalTrialsTable";

/// Extra characters added to each column's longest value.
pub const COLUMN_PADDING: usize = 2;

const COLUMN_COUNT: usize = ExtractedRow::HEADERS.len();

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to build spreadsheet: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("Failed to prepare output directory '{}': {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Public Helper Functions ---

/// The report file name for `date`: `clinical_trials_data_<YYYY-MM-DD>.xlsx`.
pub fn output_file_name(date: NaiveDate) -> String {
    format!("clinical_trials_data_{}.xlsx", format_report_date(date))
}

/// Width of each column: the longest cell in it, header included, plus
/// [`COLUMN_PADDING`]. Lengths are counted in characters.
pub fn column_widths(rows: &[ExtractedRow]) -> [usize; COLUMN_COUNT] {
    let mut widths = ExtractedRow::HEADERS.map(|header| header.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths.map(|w| w + COLUMN_PADDING)
}

/// Builds the report workbook in memory.
pub fn build_workbook(rows: &[ExtractedRow]) -> Result<Workbook, SheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let columns: Vec<TableColumn> = ExtractedRow::HEADERS
        .iter()
        .map(|header| {
            TableColumn::new()
                .set_header(*header)
                .set_header_format(header_format.clone())
        })
        .collect();

    // The header row is written by the table from its column definitions.
    for (i, row) in rows.iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            sheet.write_string(row_num, col as u16, *cell)?;
        }
    }

    let table = Table::new()
        .set_name(TABLE_NAME)
        .set_style(TableStyle::Medium9)
        .set_first_column(false)
        .set_banded_rows(true)
        .set_banded_columns(true)
        .set_columns(&columns);

    // A table needs at least one data row; an empty report keeps a blank one.
    let last_row = rows.len().max(1) as u32;
    sheet.add_table(0, 0, last_row, (COLUMN_COUNT - 1) as u16, &table)?;

    for (col, width) in column_widths(rows).iter().enumerate() {
        sheet.set_column_width(col as u16, *width as f64)?;
    }

    Ok(workbook)
}

/// Writes the report for `date` into `output_dir` and returns the file path.
pub fn write_report(
    rows: &[ExtractedRow],
    date: NaiveDate,
    output_dir: &Path,
) -> Result<PathBuf, SheetError> {
    std::fs::create_dir_all(output_dir).map_err(|source| SheetError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(output_file_name(date));
    let mut workbook = build_workbook(rows)?;
    workbook.save(&path)?;

    info!("Wrote {} rows to '{}'.", rows.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialfeed::constants::PLACEHOLDER;

    #[test]
    fn test_output_file_name_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        assert_eq!(output_file_name(date), "clinical_trials_data_2024-07-14.xlsx");
    }

    #[test]
    fn test_column_widths_header_only() {
        // "Brief Title", "Lead Sponsor", "Contact Name", "Contact Phone", "Contact Email"
        assert_eq!(column_widths(&[]), [13, 14, 14, 15, 15]);
    }

    #[test]
    fn test_column_widths_follow_longest_cell() {
        let long_title = "A Randomized, Double-Blind, Placebo-Controlled Study of Something";
        let rows = vec![
            ExtractedRow::without_contact(long_title, "Acme"),
            ExtractedRow {
                brief_title: "Short".to_string(),
                lead_sponsor: "National Institute of Long Names".to_string(),
                contact_name: "Dr. Ö".to_string(),
                contact_phone: PLACEHOLDER.to_string(),
                contact_email: "someone.with.a.long.address@example.org".to_string(),
            },
        ];

        let widths = column_widths(&rows);

        assert_eq!(widths[0], long_title.chars().count() + 2);
        assert_eq!(widths[1], "National Institute of Long Names".len() + 2);
        assert_eq!(widths[2], "Contact Name".len() + 2);
        assert_eq!(widths[3], "Contact Phone".len() + 2);
        assert_eq!(widths[4], "someone.with.a.long.address@example.org".len() + 2);
    }
}
