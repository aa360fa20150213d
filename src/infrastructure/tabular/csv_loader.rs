// ============================================================
// CSV LOADER
// ============================================================
// Decode and parse CSV bytes into a Dataset

use csv::{ReaderBuilder, Trim};
use encoding_rs::{Encoding, WINDOWS_1252};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::tabular::{normalize_headers, CellValue, Dataset};

/// Cell texts read as missing values
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// CSV loader with encoding detection
#[derive(Debug, Clone)]
pub struct CsvLoader {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether NA tokens become nulls (default: true)
    detect_na: bool,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            detect_na: true,
        }
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Keep NA tokens as literal text
    pub fn with_na_detection(mut self, detect_na: bool) -> Self {
        self.detect_na = detect_na;
        self
    }

    /// Parse raw CSV bytes. The first record is the header.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Dataset> {
        let content = Self::decode(bytes)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::None)
            .flexible(true) // short rows are padded below
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        if headers.is_empty() {
            return Err(AppError::ParseError(
                "No columns to parse from file".to_string(),
            ));
        }

        let width = headers.len();
        let mut dataset = Dataset::new(normalize_headers(headers.iter()));

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if record.len() > width {
                let line = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(index as u64 + 2);
                return Err(AppError::ParseError(format!(
                    "Expected {} fields in line {}, saw {}",
                    width,
                    line,
                    record.len()
                )));
            }

            let mut cells: Vec<CellValue> = record.iter().map(|field| self.cell(field)).collect();
            cells.resize(width, CellValue::Null);
            dataset.push_row(cells)?;
        }

        debug!(
            rows = dataset.len(),
            columns = width,
            "Parsed CSV content"
        );

        Ok(dataset)
    }

    fn cell(&self, field: &str) -> CellValue {
        if self.detect_na && NA_VALUES.contains(&field) {
            CellValue::Null
        } else {
            CellValue::String(field.to_string())
        }
    }

    /// A byte-order mark wins; otherwise UTF-8, then Windows-1252
    fn decode(bytes: &[u8]) -> Result<String> {
        if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
            let (content, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
            if had_errors {
                return Err(AppError::ParseError(format!(
                    "File is not valid {}",
                    encoding.name()
                )));
            }
            return Ok(content.into_owned());
        }

        match std::str::from_utf8(bytes) {
            Ok(content) => Ok(content.to_string()),
            Err(_) => {
                debug!("CSV is not UTF-8, decoding as Windows-1252");
                let (content, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                Ok(content.into_owned())
            }
        }
    }
}
