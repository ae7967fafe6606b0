use digest_logging::digest_warn;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::Table;

/// Longest string a spreadsheet cell can hold.
const MAX_CELL_CHARS: usize = 32_767;

/// Sheet dimensions; tables beyond them are rejected at extraction.
pub(crate) const MAX_SHEET_COLUMNS: usize = 16_384;
pub(crate) const MAX_SHEET_ROWS: usize = 1_048_576;

/// One sheet per table named `Table_<id>`; a detected header row is written in bold.
pub fn build_workbook(tables: &[Table]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for table in tables {
        let sheet = workbook.add_worksheet();
        sheet.set_name(table.sheet_name())?;

        let mut next_row = 0usize;
        if let Some(header) = &table.header {
            write_row(sheet, next_row, header, Some(&header_format))?;
            next_row += 1;
        }
        for row in &table.rows {
            write_row(sheet, next_row, row, None)?;
            next_row += 1;
        }
    }

    workbook.save_to_buffer()
}

fn write_row(
    sheet: &mut Worksheet,
    row: usize,
    values: &[String],
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    let row = u32::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)?;
    for (col, value) in values.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        let col = u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
        let value = fit_cell(value);
        match format {
            Some(format) => sheet.write_string_with_format(row, col, value, format)?,
            None => sheet.write_string(row, col, value)?,
        };
    }
    Ok(())
}

fn fit_cell(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            digest_warn!(
                "Truncating spreadsheet cell of {} chars to {}",
                value.chars().count(),
                MAX_CELL_CHARS
            );
            &value[..cut]
        }
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::{build_workbook, fit_cell, MAX_CELL_CHARS};
    use crate::Table;

    #[test]
    fn long_cells_are_cut_at_the_format_limit() {
        let long = "é".repeat(MAX_CELL_CHARS + 10);
        assert_eq!(fit_cell(&long).chars().count(), MAX_CELL_CHARS);
        assert_eq!(fit_cell("short"), "short");
    }

    #[test]
    fn workbook_bytes_are_a_zip_container() {
        let tables = vec![Table {
            id: 2,
            header: Some(vec!["A".into(), "B".into()]),
            rows: vec![vec!["1".into(), String::new()]],
        }];
        let bytes = build_workbook(&tables).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
