// ============================================================
// TABULAR DOMAIN LAYER
// ============================================================
// Core types for uploaded tables
// No I/O, no async, no external dependencies

mod cell_value;
mod dataset;
mod format;

pub use cell_value::CellValue;
pub use dataset::{normalize_headers, Dataset, Record};
pub use format::TabularFormat;
