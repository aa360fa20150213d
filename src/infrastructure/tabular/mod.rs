// ============================================================
// TABULAR INFRASTRUCTURE LAYER
// ============================================================
// Turn uploaded bytes into a Dataset

mod csv_loader;
mod spreadsheet_loader;

pub use csv_loader::{CsvLoader, NA_VALUES};
pub use spreadsheet_loader::SpreadsheetLoader;

use crate::domain::error::Result;
use crate::domain::tabular::{Dataset, TabularFormat};

/// Loads a file in its declared format. Never falls back to another format.
#[derive(Debug, Clone, Default)]
pub struct TabularLoader {
    csv: CsvLoader,
    spreadsheet: SpreadsheetLoader,
}

impl TabularLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_csv_loader(mut self, csv: CsvLoader) -> Self {
        self.csv = csv;
        self
    }

    pub fn load(&self, bytes: &[u8], format: TabularFormat) -> Result<Dataset> {
        match format {
            TabularFormat::Csv => self.csv.parse_bytes(bytes),
            TabularFormat::Spreadsheet => self.spreadsheet.parse_bytes(bytes),
        }
    }
}
