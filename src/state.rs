use crate::storage::ScratchDir;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub scratch: ScratchDir,
    /// Largest accepted upload in bytes
    pub max_upload_bytes: u64,
}

impl AppState {
    pub fn new(scratch: ScratchDir, max_upload_bytes: u64) -> Self {
        Self {
            scratch,
            max_upload_bytes,
        }
    }
}
