// ============================================================
// SPREADSHEET LOADER
// ============================================================
// Read the first worksheet of an Excel/OpenDocument workbook

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::tabular::{normalize_headers, CellValue, Dataset};

#[derive(Debug, Clone, Default)]
pub struct SpreadsheetLoader;

impl SpreadsheetLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse workbook bytes (xlsx, xlsm, xlsb, xls, ods)
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Dataset> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| AppError::ParseError(format!("Failed to open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
            .map_err(|e| AppError::ParseError(format!("Failed to read worksheet: {}", e)))?;

        Self::range_to_dataset(&range)
    }

    /// First row of the used range is the header; fully empty rows are skipped
    fn range_to_dataset(range: &Range<Data>) -> Result<Dataset> {
        let mut rows = range.rows();

        let header = rows
            .next()
            .ok_or_else(|| AppError::ParseError("Worksheet is empty".to_string()))?;

        let mut dataset = Dataset::new(normalize_headers(header.iter().map(header_text)));

        for row in rows {
            let cells: Vec<CellValue> = row.iter().map(cell_value).collect();
            if cells.iter().all(CellValue::is_null) {
                continue;
            }
            dataset.push_row(cells)?;
        }

        debug!(
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Parsed worksheet"
        );

        Ok(dataset)
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => cell_value(other).to_item_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(v) => CellValue::Float(*v),
        Data::Int(v) => CellValue::Int(*v),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        // Serial date/time cells
        other => other
            .as_datetime()
            .map(|dt| CellValue::String(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or_else(|| CellValue::String(other.to_string())),
    }
}
