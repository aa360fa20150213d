pub mod use_cases;

pub use use_cases::payload_builder::{build_upload_payload, validate_table_name};
pub use use_cases::table_name::extract_table_name;
pub use use_cases::upload_table::{PreparedUpload, UploadTableUseCase, PREVIEW_ROWS};
