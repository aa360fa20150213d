use std::path::Path;

use tracing::info;

use super::args::{PreviewArgs, ServeArgs, TableArgs, UploadArgs};
use super::summary::print_preview;
use crate::application::{PreparedUpload, UploadTableUseCase};
use crate::domain::error::{AppError, Result};
use crate::domain::kb_payload::{SchemaSelection, UploadReceipt};
use crate::interfaces::http::{start_server, HttpState};

/// Build the request and show it; nothing is sent.
pub async fn run_preview(args: &PreviewArgs, use_case: &UploadTableUseCase) -> Result<PreparedUpload> {
    let prepared = prepare_from_file(&args.table, use_case).await?;
    print_preview(&prepared.preview);

    if let Some(output) = &args.output {
        let json = serde_json::to_string_pretty(&prepared.request)
            .map_err(|e| AppError::Internal(format!("Failed to serialize payload: {}", e)))?;
        tokio::fs::write(output, json).await?;
        println!("Payload written to {}", output.display());
    }

    Ok(prepared)
}

/// Build the request, show it, then send it.
pub async fn run_upload(args: &UploadArgs, use_case: &UploadTableUseCase) -> Result<UploadReceipt> {
    let prepared = prepare_from_file(&args.table, use_case).await?;
    print_preview(&prepared.preview);

    let receipt = use_case.upload(&prepared.request).await?;
    println!("Upload successful! Your data is now being processed by Voiceflow");
    Ok(receipt)
}

pub async fn run_serve(args: &ServeArgs, use_case: UploadTableUseCase) -> Result<()> {
    let state = HttpState {
        upload_use_case: std::sync::Arc::new(use_case),
    };
    start_server(state, &args.host, args.port)?.await?;
    Ok(())
}

async fn prepare_from_file(args: &TableArgs, use_case: &UploadTableUseCase) -> Result<PreparedUpload> {
    let name = file_name(&args.file)?;
    let bytes = tokio::fs::read(&args.file)
        .await
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", args.file.display(), e)))?;
    info!(file = %name, bytes = bytes.len(), "Read input file");

    let schema = SchemaSelection::new(args.searchable.clone(), args.metadata.clone());
    use_case.prepare(name, &bytes, args.table_name.as_deref(), &schema)
}

/// The final path component; table names never include directories
fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::InvalidInput(format!("Not a file path: {}", path.display())))
}

/// CSV delimiter from the `--delimiter` flag
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            AppError::InvalidInput(format!("Delimiter must be one ASCII character: {:?}", delimiter))
        })
}
