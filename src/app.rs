use std::sync::Arc;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::application::UploadTableUseCase;
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::kb_clients::{KnowledgeBaseClient, VoiceflowClient};
use crate::infrastructure::tabular::{CsvLoader, TabularLoader};
use crate::interfaces::cli::{
    delimiter_byte, run_preview, run_serve, run_upload, Cli, Command, TableArgs,
};

/// `RUST_LOG` wins over the verbosity flags
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    let config_service = match &cli.config {
        Some(path) => ConfigService::from_file(path)?,
        None => ConfigService::new(),
    };

    match cli.command {
        Command::Preview(args) => {
            let use_case = UploadTableUseCase::new(loader(&args.table)?);
            run_preview(&args, &use_case).await?;
        }
        Command::Upload(args) => {
            // Refuse to start without a key, before reading the file
            let client = knowledge_base_client(&config_service)?;
            let use_case = UploadTableUseCase::new(loader(&args.table)?).with_client(client);
            run_upload(&args, &use_case).await?;
        }
        Command::Serve(args) => {
            let mut use_case = UploadTableUseCase::new(TabularLoader::new());
            match knowledge_base_client(&config_service) {
                Ok(client) => use_case = use_case.with_client(client),
                Err(err) => warn!(error = %err, "Uploads are disabled; only payload previews are served"),
            }
            run_serve(&args, use_case).await?;
        }
    }

    Ok(())
}

fn loader(args: &TableArgs) -> Result<TabularLoader> {
    let csv = CsvLoader::new().with_delimiter(delimiter_byte(args.delimiter)?);
    Ok(TabularLoader::new().with_csv_loader(csv))
}

fn knowledge_base_client(
    config_service: &ConfigService,
) -> Result<Arc<dyn KnowledgeBaseClient + Send + Sync>> {
    let config = config_service.knowledge_base_config()?;
    Ok(Arc::new(VoiceflowClient::new(config)?))
}
