use actix_multipart::{Field, Multipart};
use actix_web::http::header::{HeaderMap, CONTENT_TYPE};
use futures_util::stream::StreamExt as _;
use tokio::io::AsyncWriteExt;

use crate::error::UploadError;
use crate::storage::{ScratchDir, ScratchFile};

/// Form field that carries the document.
pub const FILE_FIELD: &str = "file";

/// Required filename suffix. Compared case-sensitively.
pub const PDF_SUFFIX: &str = ".pdf";

/// A validated upload sitting in scratch storage.
#[derive(Debug)]
pub struct UploadedPdf {
    /// Filename as sent by the client. Used for logging only.
    pub filename: String,
    pub scratch: ScratchFile,
    pub size: u64,
}

/// Check a client-supplied filename.
///
/// Checks run in order: non-empty, `.pdf` suffix, then path safety.
pub fn validate_filename(name: &str) -> Result<(), UploadError> {
    if name.is_empty() {
        return Err(UploadError::EmptyFilename);
    }
    if !name.ends_with(PDF_SUFFIX) {
        return Err(UploadError::InvalidFileType);
    }
    if !is_path_safe(name) {
        return Err(UploadError::UnsafeFilename);
    }
    Ok(())
}

fn is_path_safe(name: &str) -> bool {
    !name.contains(&['/', '\\', '\0'][..]) && !name.contains("..")
}

/// True when the request declares a `multipart/*` body. Anything else
/// cannot carry a file part.
pub fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/"))
        .unwrap_or(false)
}

/// Walk the multipart stream and store the first `file` part.
///
/// A `file` part without a `filename` parameter is a plain form value and
/// does not count. Every other part is drained and ignored.
pub async fn receive_pdf(
    mut payload: Multipart,
    scratch_dir: &ScratchDir,
    limit: u64,
) -> Result<UploadedPdf, UploadError> {
    let mut upload: Option<UploadedPdf> = None;

    while let Some(field) = payload.next().await {
        let mut field = field?;

        let filename = {
            let cd = field.content_disposition();
            match (cd.get_name(), cd.get_filename()) {
                (Some(FILE_FIELD), Some(filename)) if upload.is_none() => {
                    Some(filename.to_owned())
                }
                _ => None,
            }
        };

        let Some(filename) = filename else {
            drain(&mut field).await?;
            continue;
        };

        if let Err(e) = validate_filename(&filename) {
            discard_rest(&mut payload, &mut field, limit).await;
            return Err(e);
        }

        let scratch = scratch_dir.scratch_file();
        let size = write_field(&mut field, &scratch, limit).await?;
        tracing::debug!(
            "Stored upload {:?} ({} bytes) at {}",
            filename,
            size,
            scratch.path().display()
        );

        upload = Some(UploadedPdf {
            filename,
            scratch,
            size,
        });
    }

    upload.ok_or(UploadError::MissingFilePart)
}

async fn write_field(
    field: &mut Field,
    scratch: &ScratchFile,
    limit: u64,
) -> Result<u64, UploadError> {
    let mut file = scratch.create().await?;
    let mut written: u64 = 0;

    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        written += chunk.len() as u64;
        if written > limit {
            return Err(UploadError::TooLarge { limit });
        }
        file.write_all(&chunk).await?;
    }

    // Extraction reads the file from another thread.
    file.flush().await?;
    Ok(written)
}

async fn drain(field: &mut Field) -> Result<(), UploadError> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}

/// Read and throw away what is left of a rejected upload, at most `limit`
/// bytes, so the client receives the error response instead of a reset
/// connection. Stream errors end the discard silently.
async fn discard_rest(payload: &mut Multipart, field: &mut Field, limit: u64) {
    let mut seen: u64 = 0;
    if !discard_field(field, limit, &mut seen).await {
        return;
    }
    while let Some(Ok(mut next)) = payload.next().await {
        if !discard_field(&mut next, limit, &mut seen).await {
            return;
        }
    }
}

async fn discard_field(field: &mut Field, limit: u64, seen: &mut u64) -> bool {
    while let Some(chunk) = field.next().await {
        let Ok(chunk) = chunk else {
            return false;
        };
        *seen += chunk.len() as u64;
        if *seen > limit {
            return false;
        }
    }
    true
}
