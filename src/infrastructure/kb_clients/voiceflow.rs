use super::KnowledgeBaseClient;
use crate::domain::error::{AppError, Result};
use crate::domain::kb_config::KnowledgeBaseConfig;
use crate::domain::kb_payload::{UploadReceipt, UploadRequest};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

pub struct VoiceflowClient {
    client: reqwest::Client,
    config: KnowledgeBaseConfig,
}

impl VoiceflowClient {
    pub fn new(config: KnowledgeBaseConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Upload URL with the `overwrite` query flag
    fn upload_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.config.upload_url).map_err(|e| {
            AppError::ConfigError(format!(
                "Invalid upload URL {}: {}",
                self.config.upload_url, e
            ))
        })?;

        url.query_pairs_mut()
            .append_pair("overwrite", if self.config.overwrite { "true" } else { "false" });

        Ok(url)
    }
}

#[async_trait]
impl KnowledgeBaseClient for VoiceflowClient {
    async fn upload_table(&self, request: &UploadRequest) -> Result<UploadReceipt> {
        let url = self.upload_url()?;

        // Voiceflow expects the raw key, not a Bearer token
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::TransportError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(UploadReceipt {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kb_payload::{Item, SchemaSelection, UploadPayload};
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Captured {
        query: String,
        authorization: String,
        content_type: String,
        accept: String,
        body: serde_json::Value,
    }

    type Capture = Arc<Mutex<Vec<Captured>>>;

    async fn record(
        req: HttpRequest,
        body: web::Json<serde_json::Value>,
        capture: web::Data<Capture>,
        status: web::Data<u16>,
    ) -> HttpResponse {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        capture.lock().unwrap().push(Captured {
            query: req.query_string().to_string(),
            authorization: header("authorization"),
            content_type: header("content-type"),
            accept: header("accept"),
            body: body.into_inner(),
        });

        let status = actix_web::http::StatusCode::from_u16(*status.get_ref()).unwrap();
        HttpResponse::build(status).body(r#"{"data":{"documentID":"doc-1"}}"#)
    }

    /// Local stand-in for the upload endpoint; returns its base URL
    fn spawn_endpoint(status: u16) -> (String, Capture, actix_web::dev::ServerHandle) {
        let capture: Capture = Arc::new(Mutex::new(Vec::new()));
        let data = web::Data::new(capture.clone());
        let status = web::Data::new(status);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .app_data(status.clone())
                .route("/v1/knowledge-base/docs/upload/table", web::post().to(record))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        (
            format!("http://{}/v1/knowledge-base/docs/upload/table", addr),
            capture,
            handle,
        )
    }

    fn request() -> UploadRequest {
        let mut item = Item::new();
        item.insert("Question".to_string(), "Hello".to_string());
        item.insert("Answer".to_string(), "World".to_string());
        UploadRequest::from(UploadPayload {
            schema: SchemaSelection::new(vec!["Question".into()], vec!["Answer".into()]),
            name: "my_table".to_string(),
            items: vec![item],
        })
    }

    #[actix_web::test]
    async fn test_upload_sends_raw_key_and_exact_body() {
        let (url, capture, handle) = spawn_endpoint(200);
        let client =
            VoiceflowClient::new(KnowledgeBaseConfig::new("VF.DM.secret").with_upload_url(url))
                .unwrap();

        let receipt = client.upload_table(&request()).await.unwrap();
        handle.stop(true).await;

        assert_eq!(receipt.status, 200);
        assert!(receipt.body.contains("doc-1"));

        let captured = capture.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let sent = &captured[0];
        assert_eq!(sent.query, "overwrite=true");
        assert_eq!(sent.authorization, "VF.DM.secret");
        assert_eq!(sent.content_type, "application/json");
        assert_eq!(sent.accept, "application/json");
        assert_eq!(sent.body, serde_json::to_value(request()).unwrap());
    }

    #[actix_web::test]
    async fn test_overwrite_flag_follows_config() {
        let (url, capture, handle) = spawn_endpoint(200);
        let mut config = KnowledgeBaseConfig::new("key").with_upload_url(url);
        config.overwrite = false;

        VoiceflowClient::new(config)
            .unwrap()
            .upload_table(&request())
            .await
            .unwrap();
        handle.stop(true).await;

        assert_eq!(capture.lock().unwrap()[0].query, "overwrite=false");
    }

    #[actix_web::test]
    async fn test_non_success_status_is_rejection_with_body() {
        let (url, _capture, handle) = spawn_endpoint(401);
        let client =
            VoiceflowClient::new(KnowledgeBaseConfig::new("bad").with_upload_url(url)).unwrap();

        let err = client.upload_table(&request()).await.unwrap_err();
        handle.stop(true).await;

        assert_eq!(
            err,
            AppError::UploadRejected {
                status: 401,
                body: r#"{"data":{"documentID":"doc-1"}}"#.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = KnowledgeBaseConfig::new("key")
            .with_upload_url(format!("http://127.0.0.1:{}/upload", port));

        let err = VoiceflowClient::new(config)
            .unwrap()
            .upload_table(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TransportError(_)));
    }

    #[tokio::test]
    async fn test_invalid_url_is_config_error() {
        let config = KnowledgeBaseConfig::new("key").with_upload_url("not a url");
        let err = VoiceflowClient::new(config)
            .unwrap()
            .upload_table(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
