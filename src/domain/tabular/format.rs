// ============================================================
// TABULAR FORMAT
// ============================================================
// Declared format of an uploaded file, chosen from its extension

use crate::domain::error::{AppError, Result};

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    /// Comma-separated text
    Csv,

    /// Excel or OpenDocument workbook
    Spreadsheet,
}

impl TabularFormat {
    /// Pick the format from a file name's extension (case-insensitive)
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if extension == "csv" {
            Ok(TabularFormat::Csv)
        } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            Ok(TabularFormat::Spreadsheet)
        } else {
            Err(AppError::InvalidInput(format!(
                "Unsupported file type for {}: expected .csv, .xlsx or .xls",
                file_name
            )))
        }
    }
}
