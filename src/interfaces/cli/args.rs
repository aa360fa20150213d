//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "kb-table-upload",
    version,
    about = "Upload a CSV or spreadsheet table to a Voiceflow knowledge base",
    long_about = "Upload a CSV or spreadsheet table to a Voiceflow knowledge base.\n\n\
                  Every row becomes one item; choose which columns are searchable\n\
                  and which are kept as metadata."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Settings file (default: ./kb-upload.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the upload payload and show a preview without sending it.
    Preview(PreviewArgs),

    /// Build the upload payload and send it to the knowledge base.
    Upload(UploadArgs),

    /// Serve the local HTTP API.
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// CSV or spreadsheet file (.csv, .xlsx, .xls).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Table name (default: file name without its extension).
    #[arg(long = "table-name", value_name = "NAME")]
    pub table_name: Option<String>,

    /// Column used for search. Repeat or separate with commas.
    #[arg(long = "searchable", value_name = "FIELD", value_delimiter = ',')]
    pub searchable: Vec<String>,

    /// Column kept as metadata. Repeat or separate with commas.
    #[arg(long = "metadata", value_name = "FIELD", value_delimiter = ',')]
    pub metadata: Vec<String>,

    /// CSV delimiter.
    #[arg(long = "delimiter", default_value_t = ',')]
    pub delimiter: char,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Write the request JSON to this path.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long = "host", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long = "port", default_value_t = 3001)]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_field_lists() {
        let cli = Cli::parse_from([
            "kb-table-upload",
            "preview",
            "faq.csv",
            "--searchable",
            "Question,Title",
            "--metadata",
            "Answer",
            "--metadata",
            "Url",
        ]);

        match cli.command {
            Command::Preview(args) => {
                assert_eq!(args.table.searchable, vec!["Question", "Title"]);
                assert_eq!(args.table.metadata, vec!["Answer", "Url"]);
                assert_eq!(args.table.delimiter, ',');
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["kb-table-upload", "serve", "--port", "8080", "-vv"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Serve(args) => assert_eq!(args.port, 8080),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
