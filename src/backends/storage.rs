use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{DataLocation, Storage};
use crate::error::AppResult;

/// Filesystem storage under a configured root directory, one subdirectory
/// per [`super::DataKind`].
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, location: &DataLocation) -> PathBuf {
        self.root.join(location.kind.dir()).join(&location.name)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn store(&self, location: &DataLocation, data: &[u8]) -> AppResult<()> {
        let path = self.path_for(location);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Write to a sibling temp file first so readers never see a torn file.
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "stored");
        Ok(())
    }

    async fn provide(&self, location: &DataLocation) -> AppResult<Option<Vec<u8>>> {
        let path = self.path_for(location);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn has(&self, location: &DataLocation) -> bool {
        let path = self.path_for(location);
        path_exists(&path).await
    }
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
