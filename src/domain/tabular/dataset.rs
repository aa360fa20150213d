// ============================================================
// DATASET
// ============================================================
// Rectangular table: one shared column list, rows of cells

use std::collections::{HashMap, HashSet};

use super::CellValue;
use crate::domain::error::{AppError, Result};

/// Rows sharing one column set, in file order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Create an empty dataset with the given header
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a dataset from a header and rows, checking every row's width
    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut dataset = Self::new(columns);
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    /// Append a row. Its width must match the header.
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(AppError::InvalidInput(format!(
                "Row {} has {} cells but the table has {} columns",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows as column-name/value views
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.rows.iter().map(move |cells| Record {
            columns: &self.columns,
            cells,
        })
    }
}

/// Borrowed view of one row
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl<'a> Record<'a> {
    /// Column/value pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a CellValue)> + 'a {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }
}

/// Make header names usable as item keys.
///
/// Blank names become `Unnamed: <index>` and repeated names get a `.<n>`
/// suffix (`A`, `A.1`, `A.2`), so no column is dropped when rows are keyed
/// by name.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::new();

    for (idx, name) in raw.into_iter().enumerate() {
        let name: String = name.into();
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name
        };

        let mut candidate = base.clone();
        while seen.contains(&candidate) {
            let n = suffixes.entry(base.clone()).or_insert(0);
            *n += 1;
            candidate = format!("{}.{}", base, n);
        }

        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut dataset = Dataset::new(columns(&["a", "b"]));
        dataset
            .push_row(vec![CellValue::from("1"), CellValue::Null])
            .unwrap();

        let err = dataset.push_row(vec![CellValue::from("x")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_records_pair_columns_with_cells() {
        let dataset = Dataset::with_rows(
            columns(&["Question", "Answer"]),
            vec![vec!["Hello".into(), "World".into()]],
        )
        .unwrap();

        let record = dataset.records().next().unwrap();
        let pairs: Vec<(&str, &CellValue)> = record.iter().collect();
        assert_eq!(pairs[0].0, "Question");
        assert_eq!(pairs[1].1, &CellValue::from("World"));
    }

    #[test]
    fn test_normalize_headers_mangles_duplicates() {
        let headers = normalize_headers(vec!["A", "B", "A", "A"]);
        assert_eq!(headers, columns(&["A", "B", "A.1", "A.2"]));
    }

    #[test]
    fn test_normalize_headers_skips_taken_suffix() {
        let headers = normalize_headers(vec!["A", "A.1", "A"]);
        assert_eq!(headers, columns(&["A", "A.1", "A.2"]));
    }

    #[test]
    fn test_normalize_headers_names_blank_columns() {
        let headers = normalize_headers(vec!["id", "", "  "]);
        assert_eq!(headers, columns(&["id", "Unnamed: 1", "Unnamed: 2"]));
    }
}
