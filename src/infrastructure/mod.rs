pub mod config;
pub mod kb_clients;
pub mod tabular;
