pub mod payload_builder;
pub mod table_name;
pub mod upload_table;
