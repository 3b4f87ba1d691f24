//! Scratch storage for uploaded PDFs.
//!
//! Every upload gets its own file named by a fresh v4 UUID inside the
//! uploads directory. The client's filename never reaches the filesystem.
//! A [`ScratchFile`] removes its file when dropped, so cleanup happens on
//! every exit path of a request.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use uuid::Uuid;

/// The uploads directory shared by all requests.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// Open the uploads directory, creating it (and any parents) if absent.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Reserve a unique path for one upload. Nothing is written until
    /// [`ScratchFile::create`] is called.
    pub fn scratch_file(&self) -> ScratchFile {
        ScratchFile {
            path: self.root.join(format!("{}.pdf", Uuid::new_v4())),
        }
    }
}

/// A request-scoped temporary file, deleted on drop.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Create the file for writing. Fails if something already exists at
    /// the path.
    pub async fn create(&self) -> io::Result<File> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed scratch file {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Failed to remove scratch file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn create_makes_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("a").join("uploads");

        let dir = ScratchDir::create(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(dir.path(), root.as_path());
    }

    #[test]
    fn scratch_paths_are_unique_and_inside_root() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ScratchDir::create(tmp.path()).unwrap();

        let a = dir.scratch_file();
        let b = dir.scratch_file();

        assert_ne!(a.path(), b.path());
        assert_eq!(a.path().parent(), Some(tmp.path()));
        assert_eq!(a.path().extension().and_then(|e| e.to_str()), Some("pdf"));
    }

    #[tokio::test]
    async fn file_is_removed_on_drop() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ScratchDir::create(tmp.path()).unwrap();

        let scratch = dir.scratch_file();
        let path = scratch.path().to_path_buf();
        let mut file = scratch.create().await.unwrap();
        file.write_all(b"%PDF-1.5").await.unwrap();
        file.flush().await.unwrap();
        drop(file);
        assert!(path.exists());

        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn dropping_an_unwritten_reservation_is_quiet() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ScratchDir::create(tmp.path()).unwrap();

        drop(dir.scratch_file());

        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn create_refuses_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ScratchDir::create(tmp.path()).unwrap();
        let scratch = dir.scratch_file();

        let _first = scratch.create().await.unwrap();
        let second = scratch.create().await;

        assert_eq!(second.unwrap_err().kind(), io::ErrorKind::AlreadyExists);
    }
}
