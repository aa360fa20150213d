use crate::application::UploadTableUseCase;
use crate::domain::error::AppError;
use crate::domain::kb_payload::{SchemaSelection, UploadPreview, UploadRequest};
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Largest accepted JSON body (base64 file content included)
pub const MAX_BODY_BYTES: usize = 200 * 1024 * 1024;

pub struct HttpState {
    pub upload_use_case: Arc<UploadTableUseCase>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadRequest {
    pub file_name: String,
    /// File bytes, base64 encoded
    pub content: String,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub searchable_fields: Vec<String>,
    #[serde(default)]
    pub metadata_fields: Vec<String>,
}

#[derive(Serialize)]
pub struct PayloadResponse {
    pub preview: UploadPreview,
    pub request: UploadRequest,
}

#[post("/payload")]
async fn build_payload(
    data: web::Data<HttpState>,
    req: web::Json<PayloadRequest>,
) -> impl Responder {
    let req = req.into_inner();
    info!(file = %req.file_name, "Building upload payload");

    let bytes = match STANDARD.decode(req.content.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            return error_response(&AppError::InvalidInput(format!(
                "File content is not valid base64: {}",
                e
            )))
        }
    };

    let schema = SchemaSelection::new(req.searchable_fields, req.metadata_fields);
    match data.upload_use_case.prepare(
        &req.file_name,
        &bytes,
        req.table_name.as_deref(),
        &schema,
    ) {
        Ok(prepared) => HttpResponse::Ok().json(PayloadResponse {
            preview: prepared.preview,
            request: prepared.request,
        }),
        Err(e) => {
            error!(file = %req.file_name, error = %e, "Failed to build payload");
            error_response(&e)
        }
    }
}

#[post("/upload")]
async fn upload(data: web::Data<HttpState>, req: web::Json<UploadRequest>) -> impl Responder {
    match data.upload_use_case.upload(&req).await {
        Ok(receipt) => HttpResponse::Ok().json(receipt),
        Err(e) => error_response(&e),
    }
}

#[get("/health")]
async fn health(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "uploadEnabled": data.upload_use_case.can_upload(),
    }))
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        AppError::InvalidInput(_) | AppError::ParseError(_) => {
            HttpResponse::BadRequest().json(body)
        }
        AppError::UploadRejected { .. } | AppError::TransportError(_) => {
            HttpResponse::BadGateway().json(body)
        }
        AppError::ConfigError(_) => HttpResponse::ServiceUnavailable().json(body),
        AppError::Internal(_) | AppError::IoError(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Routes under `/api`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(MAX_BODY_BYTES))
        .service(
            web::scope("/api")
                .service(build_payload)
                .service(upload)
                .service(health),
        );
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    info!(host = %host, port = port, "HTTP API listening");
    Ok(server)
}
