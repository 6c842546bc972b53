use super::backend::StorageBackend;
use super::document;
use crate::error::{HomesteadError, Result};
use crate::model::Collection;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores the collection in a single YAML file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(HomesteadError::StorageWrite)?;
        }
        Ok(())
    }

    fn tmp_path(&self, dir: &Path) -> PathBuf {
        let stem = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("customers");
        dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()))
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Collection> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "customer file missing, starting empty");
                return Ok(Collection::default());
            }
            Err(e) => return Err(HomesteadError::StorageRead(e)),
        };
        let collection = document::parse(&text)?;
        tracing::debug!(
            path = %self.path.display(),
            records = collection.len(),
            "loaded customer file"
        );
        Ok(collection)
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        let content = document::render(collection)?;

        // Atomic write
        let tmp_path = self.tmp_path(&dir);
        if let Err(e) = fs::write(&tmp_path, content) {
            let _ = fs::remove_file(&tmp_path);
            return Err(HomesteadError::StorageWrite(e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(HomesteadError::StorageWrite(e));
        }

        tracing::debug!(
            path = %self.path.display(),
            records = collection.len(),
            "saved customer file"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
