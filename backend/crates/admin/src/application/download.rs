//! Download File Use Case
//!
//! Serves a stored upload back to the administrator. Both path components
//! are validated before the file store is asked for anything.

use std::sync::Arc;

use contest::domain::repository::FileStore;
use contest::domain::value_objects::StoredFile;
use platform::filename::{extension, sanitize_filename};

use crate::application::config::AdminConfig;
use crate::error::{AdminError, AdminResult};

/// Opened upload, read by the caller as it is sent
#[derive(Debug)]
pub struct DownloadedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub stored: StoredFile,
}

pub struct DownloadFileUseCase<F>
where
    F: FileStore,
{
    file_store: Arc<F>,
    config: Arc<AdminConfig>,
}

impl<F> DownloadFileUseCase<F>
where
    F: FileStore,
{
    pub fn new(file_store: Arc<F>, config: Arc<AdminConfig>) -> Self {
        Self { file_store, config }
    }

    pub async fn execute(&self, raw_code: &str, filename: &str) -> AdminResult<DownloadedFile> {
        let code = self
            .config
            .code_format
            .parse(raw_code)
            .ok_or(AdminError::InvalidPath)?;

        if filename.is_empty() || sanitize_filename(filename) != filename {
            return Err(AdminError::InvalidPath);
        }

        let stored = self
            .file_store
            .open(&code, filename)
            .await?
            .ok_or(AdminError::FileNotFound)?;

        tracing::info!(code = %code, filename, bytes = stored.len, "Admin downloaded file");

        Ok(DownloadedFile {
            filename: filename.to_string(),
            content_type: content_type_for(filename),
            stored,
        })
    }
}

fn content_type_for(filename: &str) -> &'static str {
    match extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
