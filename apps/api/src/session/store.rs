use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::session::state::STATE_KEY;

/// Holds the single serialized session record.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<String>>;
    async fn save(&self, record: &str) -> Result<()>;
}

/// Stores the record as `<dir>/postCraftAIState.json`, replacing it atomically on save.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STATE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }

    async fn save(&self, record: &str) -> Result<()> {
        let path = self.path.clone();
        let record = record.to_owned();

        tokio::task::spawn_blocking(move || write_atomically(&path, &record))
            .await
            .context("State writer task panicked")??;

        debug!("Saved session state to {}", self.path.display());
        Ok(())
    }
}

/// Writes to a temp file in the target directory, then renames over the target.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create state directory {}", dir.display()))?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
