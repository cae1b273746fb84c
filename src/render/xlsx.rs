//! XLSX export of table frames.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use super::TableFrame;
use crate::error::{Error, Result};

/// Sheet written when there are no tables to export.
const PLACEHOLDER_SHEET: &str = "Sheet1";

impl From<XlsxError> for Error {
    fn from(err: XlsxError) -> Self {
        Error::Export(err.to_string())
    }
}

/// Write table frames to an XLSX file, one sheet per frame named
/// `Table_0`, `Table_1`, ...
///
/// A workbook with no frames still gets one empty `Sheet1`.
pub fn write_xlsx<P: AsRef<Path>>(frames: &[TableFrame], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = build_workbook(frames)?;
    workbook.save(path)?;
    log::debug!(
        "Wrote {} sheets to {}",
        frames.len().max(1),
        path.display()
    );
    Ok(())
}

fn build_workbook(frames: &[TableFrame]) -> Result<Workbook> {
    let mut workbook = Workbook::new();

    if frames.is_empty() {
        workbook.add_worksheet().set_name(PLACEHOLDER_SHEET)?;
    }
    for (k, frame) in frames.iter().enumerate() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(format!("Table_{}", k))?;
        write_frame(worksheet, frame)?;
    }

    Ok(workbook)
}

/// Lay out a frame: a header row of column labels after an empty corner
/// cell, then one row per table row led by its row label.
fn write_frame(worksheet: &mut Worksheet, frame: &TableFrame) -> Result<()> {
    for (i, &label) in frame.column_labels.iter().enumerate() {
        worksheet.write_number(0, sheet_column(i + 1)?, f64::from(label))?;
    }

    for (r, (&label, cells)) in frame.row_labels.iter().zip(&frame.cells).enumerate() {
        let row = sheet_row(r + 1)?;
        worksheet.write_number(row, 0, f64::from(label))?;
        for (c, cell) in cells.iter().enumerate() {
            if let Some(text) = cell {
                worksheet.write_string(row, sheet_column(c + 1)?, text)?;
            }
        }
    }
    Ok(())
}

fn sheet_column(index: usize) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| Error::Export(format!("column index {} exceeds the sheet limit", index)))
}

fn sheet_row(index: usize) -> Result<u32> {
    u32::try_from(index)
        .map_err(|_| Error::Export(format!("row index {} exceeds the sheet limit", index)))
}
