//! FILENAME: persistence/src/xlsx_writer.rs

use crate::ExportError;
use records::{Column, FieldValue, Record};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use std::path::Path;

/// Default name of the exported artifact.
pub const DEFAULT_EXPORT_FILENAME: &str = "class_data.xlsx";

/// Number format applied to currency columns in the exported sheet.
const CURRENCY_NUM_FORMAT: &str = "$#,##0.00";

/// Writes `data` to an XLSX workbook at `path`: one worksheet, a header row
/// of column labels, then one row per record carrying only the given
/// columns' values in column order.
///
/// The caller decides which sequence to export; the table hands over the
/// currently filtered and sorted member records together with the visible
/// column set, so the artifact matches what the user sees.
pub fn export_xlsx(data: &[Record], columns: &[Column], path: &Path) -> Result<(), ExportError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name("Sheet1")?;

    let header_format = Format::new().set_bold();
    let currency_format = Format::new().set_num_format(CURRENCY_NUM_FORMAT);

    // Header row
    for (col, column) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, &column.label, &header_format)?;
    }

    // Data rows
    for (row, record) in data.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, column) in columns.iter().enumerate() {
            let col = col as u16;
            match record.get(&column.key) {
                Some(FieldValue::Number(n)) => {
                    if column.currency {
                        worksheet.write_number_with_format(row, col, *n, &currency_format)?;
                    } else {
                        worksheet.write_number(row, col, *n)?;
                    }
                }
                Some(FieldValue::Text(s)) => {
                    worksheet.write_string(row, col, s)?;
                }
                Some(FieldValue::Boolean(b)) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                Some(FieldValue::Empty) | None => {}
            }
        }
    }

    xlsx.save(path)?;
    Ok(())
}
