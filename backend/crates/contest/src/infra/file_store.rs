//! On-disk file store
//!
//! Layout: `<root>/<access code>/<stored filename>`. Every path component
//! must already be in sanitised form, and reads are checked against the
//! canonical root so a symlink cannot lead outside it.
//!
//! Staged uploads live next to their final name as
//! `.<stored filename>.<token>.part`. The leading dot keeps them out of any
//! name `sanitize_filename` can produce.

use std::io::ErrorKind;
use std::path::PathBuf;

use platform::filename::sanitize_filename;
use tokio::fs;
use uuid::Uuid;

use crate::domain::repository::FileStore;
use crate::domain::value_objects::{AccessCode, StagedFile, StoredFile};
use crate::error::{ContestError, ContestResult};

#[derive(Debug, Clone)]
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, code: &AccessCode, filename: &str) -> ContestResult<PathBuf> {
        let is_safe = |component: &str| !component.is_empty() && sanitize_filename(component) == component;
        if !is_safe(code.as_str()) || !is_safe(filename) {
            return Err(ContestError::InvalidFilename);
        }
        Ok(self.root.join(code.as_str()).join(filename))
    }

    fn staging_path(&self, staged: &StagedFile) -> ContestResult<PathBuf> {
        let final_path = self.path_for(&staged.code, &staged.filename)?;
        Ok(final_path.with_file_name(format!(
            ".{}.{}.part",
            staged.filename,
            staged.token.simple()
        )))
    }
}

impl FileStore for DiskFileStore {
    async fn stage(&self, code: &AccessCode, filename: &str, bytes: &[u8]) -> ContestResult<StagedFile> {
        let staged = StagedFile {
            code: code.clone(),
            filename: filename.to_string(),
            token: Uuid::new_v4(),
        };
        let path = self.staging_path(&staged)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }
        fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Staged upload");
        Ok(staged)
    }

    async fn promote(&self, staged: &StagedFile) -> ContestResult<()> {
        let from = self.staging_path(staged)?;
        let to = self.path_for(&staged.code, &staged.filename)?;
        fs::rename(&from, &to).await?;

        tracing::debug!(path = %to.display(), "Stored upload");
        Ok(())
    }

    async fn discard(&self, staged: &StagedFile) -> ContestResult<()> {
        let path = self.staging_path(staged)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn open(&self, code: &AccessCode, filename: &str) -> ContestResult<Option<StoredFile>> {
        let path = self.path_for(code, filename)?;

        let (root, path) = match (fs::canonicalize(&self.root).await, fs::canonicalize(&path).await) {
            (Ok(root), Ok(path)) => (root, path),
            (Err(e), _) | (_, Err(e)) if e.kind() == ErrorKind::NotFound => return Ok(None),
            (Err(e), _) | (_, Err(e)) => return Err(e.into()),
        };
        if !path.starts_with(&root) {
            tracing::warn!(path = %path.display(), "Resolved upload path escapes root");
            return Err(ContestError::InvalidFilename);
        }

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let len = file.metadata().await?.len();

        Ok(Some(StoredFile { file, len }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CodeFormat;
    use tokio::io::AsyncReadExt;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("contest-files-{}", uuid::Uuid::new_v4()))
    }

    fn code() -> AccessCode {
        CodeFormat::default().parse("CARN2-ABCDEFGH").unwrap()
    }

    async fn read(store: &DiskFileStore, filename: &str) -> Option<Vec<u8>> {
        let mut stored = store.open(&code(), filename).await.unwrap()?;
        let mut bytes = Vec::new();
        stored.file.read_to_end(&mut bytes).await.unwrap();
        assert_eq!(stored.len, bytes.len() as u64);
        Some(bytes)
    }

    fn dir_entries(root: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(root.join("CARN2-ABCDEFGH"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_staged_file_is_invisible_until_promoted() {
        let root = temp_root();
        let store = DiskFileStore::new(&root);

        let staged = store.stage(&code(), "proyecto_a.pdf", b"%PDF-1.7").await.unwrap();
        assert_eq!(read(&store, "proyecto_a.pdf").await, None);

        store.promote(&staged).await.unwrap();
        assert_eq!(read(&store, "proyecto_a.pdf").await.as_deref(), Some(&b"%PDF-1.7"[..]));
        assert_eq!(dir_entries(&root), vec!["proyecto_a.pdf"]);

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_discard_keeps_previous_file() {
        let root = temp_root();
        let store = DiskFileStore::new(&root);

        let first = store.stage(&code(), "proyecto_a.pdf", b"first").await.unwrap();
        store.promote(&first).await.unwrap();

        let second = store.stage(&code(), "proyecto_a.pdf", b"second").await.unwrap();
        store.discard(&second).await.unwrap();
        store.discard(&second).await.unwrap();

        assert_eq!(read(&store, "proyecto_a.pdf").await.as_deref(), Some(&b"first"[..]));
        assert_eq!(dir_entries(&root), vec!["proyecto_a.pdf"]);

        let third = store.stage(&code(), "proyecto_a.pdf", b"third").await.unwrap();
        store.promote(&third).await.unwrap();
        assert_eq!(read(&store, "proyecto_a.pdf").await.as_deref(), Some(&b"third"[..]));

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_rejects_unsanitized_names() {
        let store = DiskFileStore::new(temp_root());

        for name in ["../escape.pdf", "a/b.pdf", "", ".hidden", "con espacio.pdf"] {
            assert!(
                matches!(store.stage(&code(), name, b"x").await, Err(ContestError::InvalidFilename)),
                "{name:?} should be rejected"
            );
            assert!(matches!(store.open(&code(), name).await, Err(ContestError::InvalidFilename)));
        }
    }

    #[tokio::test]
    async fn test_open_missing_root_is_none() {
        let store = DiskFileStore::new(temp_root());
        assert!(store.open(&code(), "proyecto_a.pdf").await.unwrap().is_none());
    }
}
