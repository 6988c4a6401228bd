//! Where rendered artifacts end up.
//!
//! The pipeline only talks to the `OutputSink` trait; production runs use
//! `FsSink`, tests and dry runs use `MemorySink`.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{MemoError, Result};

/// Receives one fully rendered artifact at a time, keyed by the digital
/// object id and the file name inside that object's folder.
pub trait OutputSink: Send + Sync {
    fn write_artifact(&self, object_id: &str, file_name: &str, contents: &[u8]) -> Result<()>;
}

/// Writes every digital object into its own folder below the output root.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Removes leftovers from previous runs. `README.md` and directories
    /// with "material" in their name hold manually curated content and are
    /// kept.
    pub fn clear_root(&self) -> Result<()> {
        if !self.root.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if path.is_dir() {
                if name.contains("material") {
                    debug!("Keeping {}", path.display());
                    continue;
                }
                fs::remove_dir_all(&path)?;
                debug!("Removed directory {}", path.display());
            } else if name != "README.md" {
                fs::remove_file(&path)?;
                debug!("Removed file {}", path.display());
            }
        }
        Ok(())
    }
}

impl OutputSink for FsSink {
    fn write_artifact(&self, object_id: &str, file_name: &str, contents: &[u8]) -> Result<()> {
        let folder = self.root.join(object_id);
        fs::create_dir_all(&folder).map_err(|source| MemoError::Render {
            object_id: object_id.to_string(),
            file_name: file_name.to_string(),
            source,
        })?;

        let path = folder.join(file_name);
        fs::write(&path, contents).map_err(|source| MemoError::Render {
            object_id: object_id.to_string(),
            file_name: file_name.to_string(),
            source,
        })?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Collects artifacts in memory, preserving write order per object.
#[derive(Default)]
pub struct MemorySink {
    artifacts: Mutex<BTreeMap<String, Vec<(String, Vec<u8>)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_ids(&self) -> Vec<String> {
        self.artifacts.lock().unwrap().keys().cloned().collect()
    }

    pub fn file_names(&self, object_id: &str) -> Vec<String> {
        self.artifacts
            .lock()
            .unwrap()
            .get(object_id)
            .map(|files| files.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn artifact(&self, object_id: &str, file_name: &str) -> Option<Vec<u8>> {
        self.artifacts
            .lock()
            .unwrap()
            .get(object_id)?
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, contents)| contents.clone())
    }
}

impl OutputSink for MemorySink {
    fn write_artifact(&self, object_id: &str, file_name: &str, contents: &[u8]) -> Result<()> {
        self.artifacts
            .lock()
            .unwrap()
            .entry(object_id.to_string())
            .or_default()
            .push((file_name.to_string(), contents.to_vec()));
        Ok(())
    }
}
