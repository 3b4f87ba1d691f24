use std::time::Instant;

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::UploadError;
use crate::extract;
use crate::state::AppState;
use crate::upload;

/// Body of a successful `POST /upload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", web::post().to(upload_pdf))
        .route("/health", web::get().to(health));
}

/// Accept a multipart PDF upload and return its text.
pub async fn upload_pdf(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, UploadError> {
    let received = if upload::is_multipart(req.headers()) {
        upload::receive_pdf(payload, &state.scratch, state.max_upload_bytes).await
    } else {
        Err(UploadError::MissingFilePart)
    };

    let upload = match received {
        Ok(upload) => upload,
        Err(e) => {
            if e.is_client_error() {
                warn!("Rejected upload: {}", e);
            }
            return Err(e);
        }
    };

    let path = upload.scratch.path().to_path_buf();
    let started = Instant::now();
    let extracted = web::block(move || extract::extract_file(&path))
        .await
        .map_err(|e| UploadError::Extraction(format!("extraction task failed: {e}")))??;

    info!(
        filename = %upload.filename,
        bytes = upload.size,
        pages = extracted.pages,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Extracted text from upload"
    );

    // Remove the scratch file before answering.
    drop(upload);

    Ok(HttpResponse::Ok().json(ExtractResponse {
        text: extracted.text,
    }))
}

pub async fn health() -> impl Responder {
    "OK"
}
