pub const DEFAULT_UPLOAD_URL: &str = "https://api.voiceflow.com/v1/knowledge-base/docs/upload/table";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything the knowledge-base client needs to reach the upload endpoint
#[derive(Clone)]
pub struct KnowledgeBaseConfig {
    pub api_key: String,
    pub upload_url: String,
    pub overwrite: bool,
    pub timeout_secs: u64,
}

impl KnowledgeBaseConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            overwrite: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.upload_url = upload_url.into();
        self
    }
}

// The API key stays out of logs and panics.
impl std::fmt::Debug for KnowledgeBaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeBaseConfig")
            .field("api_key", &"***")
            .field("upload_url", &self.upload_url)
            .field("overwrite", &self.overwrite)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
