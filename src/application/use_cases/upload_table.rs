use std::sync::Arc;

use tracing::{info, warn};

use super::payload_builder::{build_upload_payload, validate_table_name};
use super::table_name::extract_table_name;
use crate::domain::error::{AppError, Result};
use crate::domain::kb_payload::{SchemaSelection, UploadPreview, UploadReceipt, UploadRequest};
use crate::domain::tabular::TabularFormat;
use crate::infrastructure::kb_clients::KnowledgeBaseClient;
use crate::infrastructure::tabular::TabularLoader;

/// Rows shown in a preview
pub const PREVIEW_ROWS: usize = 3;

/// A built request plus the summary shown before it is sent
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    pub request: UploadRequest,
    pub preview: UploadPreview,
}

/// Two explicit steps: `prepare` builds the request from a file, `upload`
/// sends a request. Nothing is kept between them.
pub struct UploadTableUseCase {
    loader: TabularLoader,
    kb_client: Option<Arc<dyn KnowledgeBaseClient + Send + Sync>>,
}

impl UploadTableUseCase {
    pub fn new(loader: TabularLoader) -> Self {
        Self {
            loader,
            kb_client: None,
        }
    }

    pub fn with_client(mut self, kb_client: Arc<dyn KnowledgeBaseClient + Send + Sync>) -> Self {
        self.kb_client = Some(kb_client);
        self
    }

    pub fn can_upload(&self) -> bool {
        self.kb_client.is_some()
    }

    /// Load the file, name the table and build the request.
    ///
    /// `table_name` overrides the name derived from `file_name`.
    pub fn prepare(
        &self,
        file_name: &str,
        bytes: &[u8],
        table_name: Option<&str>,
        schema: &SchemaSelection,
    ) -> Result<PreparedUpload> {
        let format = TabularFormat::from_file_name(file_name)?;
        let dataset = self.loader.load(bytes, format)?;

        let table_name = match table_name {
            Some(name) => name.to_string(),
            None => extract_table_name(file_name),
        };

        for field in schema
            .searchable_fields
            .iter()
            .chain(schema.metadata_fields.iter())
        {
            if !dataset.columns().contains(field) {
                warn!(field = %field, "Selected field is not a column of the uploaded table");
            }
        }

        let payload = build_upload_payload(
            &dataset,
            &table_name,
            &schema.searchable_fields,
            &schema.metadata_fields,
        )?;

        info!(
            table = %payload.name,
            rows = payload.items.len(),
            columns = dataset.columns().len(),
            "Built upload payload"
        );

        let preview = UploadPreview {
            table_name: payload.name.clone(),
            total_rows: payload.items.len(),
            columns: dataset.columns().to_vec(),
            sample: payload.items.iter().take(PREVIEW_ROWS).cloned().collect(),
        };

        Ok(PreparedUpload {
            request: UploadRequest::from(payload),
            preview,
        })
    }

    /// Send a prepared request. No retries: any failure ends the attempt.
    ///
    /// Requests may come straight from an HTTP client, so the table name is
    /// checked again before anything is sent.
    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt> {
        validate_table_name(&request.data.name)?;

        let kb_client = self.kb_client.as_ref().ok_or_else(|| {
            AppError::ConfigError("Missing VOICEFLOW_API_KEY in .env file".to_string())
        })?;

        info!(
            table = %request.data.name,
            rows = request.data.items.len(),
            "Uploading table to knowledge base"
        );

        match kb_client.upload_table(request).await {
            Ok(receipt) => {
                info!(status = receipt.status, "Upload accepted");
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "Upload failed");
                Err(err)
            }
        }
    }
}
