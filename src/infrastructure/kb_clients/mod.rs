pub mod voiceflow;

use crate::domain::error::Result;
use crate::domain::kb_payload::{UploadReceipt, UploadRequest};
use async_trait::async_trait;

pub use voiceflow::VoiceflowClient;

/// Remote store that accepts a whole table document in one request
#[async_trait]
pub trait KnowledgeBaseClient {
    async fn upload_table(&self, request: &UploadRequest) -> Result<UploadReceipt>;
}
