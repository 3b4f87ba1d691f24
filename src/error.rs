//! Error types for the upload service

use actix_multipart::MultipartError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file part")]
    MissingFilePart,

    #[error("No selected file")]
    EmptyFilename,

    #[error("Invalid file type")]
    InvalidFileType,

    #[error("Invalid file name")]
    UnsafeFilename,

    #[error("Upload exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("Malformed multipart payload: {0}")]
    Multipart(String),

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// True for errors caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Message placed in the `error` field of the response body.
    pub fn public_message(&self) -> &'static str {
        match self {
            UploadError::MissingFilePart => "No file part",
            UploadError::EmptyFilename => "No selected file",
            UploadError::InvalidFileType => "Invalid file type",
            UploadError::UnsafeFilename => "Invalid file name",
            UploadError::TooLarge { .. } => "File too large",
            UploadError::Multipart(_) => "Malformed upload",
            UploadError::Extraction(_) => "Failed to extract text from PDF",
            UploadError::Io(_) => "Internal server error",
        }
    }
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        UploadError::Multipart(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::MissingFilePart
            | UploadError::EmptyFilename
            | UploadError::InvalidFileType
            | UploadError::UnsafeFilename
            | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::Extraction(_) | UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            UploadError::Extraction(detail) => tracing::error!("Extraction error: {}", detail),
            UploadError::Io(e) => tracing::error!("I/O error: {}", e),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.public_message(),
        })
    }
}
