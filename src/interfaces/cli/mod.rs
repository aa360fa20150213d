//! Command line front end: `preview`, `upload` and `serve`.

mod args;
mod commands;
mod summary;

pub use args::{Cli, Command, PreviewArgs, ServeArgs, TableArgs, UploadArgs};
pub use commands::{delimiter_byte, run_preview, run_serve, run_upload};
pub use summary::{print_preview, preview_table};
