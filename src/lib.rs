pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use application::{build_upload_payload, extract_table_name};
pub use domain::error::{AppError, Result};
