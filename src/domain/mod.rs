pub mod error;
pub mod kb_config;
pub mod kb_payload;

// Uploaded table types
pub mod tabular;
