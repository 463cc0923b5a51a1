//! On-disk JSON cache of fetched award rows and movie payloads
//!
//! The cache is one JSON document with two lists. Saving always replaces the
//! whole file (temp file + rename), so `load` after any number of saves sees
//! exactly the last document written.

use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Cached payloads for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Raw positional award rows
    #[serde(default)]
    pub awards_data: Vec<Value>,
    /// Raw MovieSource payloads, deduplicated
    #[serde(default)]
    pub movies_data: Vec<Value>,
}

impl CacheEntry {
    /// A cache holding award rows is complete for the run
    pub fn is_populated(&self) -> bool {
        !self.awards_data.is_empty()
    }

    /// Replace each list with the incoming one when the incoming list is non-empty
    pub fn merge(&mut self, incoming: CacheEntry) {
        if !incoming.awards_data.is_empty() {
            self.awards_data = incoming.awards_data;
        }
        if !incoming.movies_data.is_empty() {
            self.movies_data = incoming.movies_data;
        }
    }
}

/// File-backed cache store
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache, treating a missing or corrupt file as empty
    pub fn load(&self) -> CacheEntry {
        match self.try_load() {
            Ok(entry) => {
                info!(
                    path = %self.path.display(),
                    awards = entry.awards_data.len(),
                    movies = entry.movies_data.len(),
                    "Loaded cache"
                );
                entry
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cache unusable, starting empty");
                CacheEntry::default()
            }
        }
    }

    /// Load the cache, reporting why it could not be used
    pub fn try_load(&self) -> PipelineResult<CacheEntry> {
        if !self.path.exists() {
            return Err(PipelineError::CacheCorrupt("cache file does not exist".to_string()));
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| PipelineError::CacheCorrupt(format!("read failed: {}", e)))?;
        serde_json::from_str(&content)
            .map_err(|e| PipelineError::CacheCorrupt(format!("invalid JSON: {}", e)))
    }

    /// Overwrite the cache file with `entry`
    pub fn save(&self, entry: &CacheEntry) -> PipelineResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!(
            path = %self.path.display(),
            awards = entry.awards_data.len(),
            movies = entry.movies_data.len(),
            "Saved cache"
        );
        Ok(())
    }

    /// Delete the cache file so the next run fetches everything again
    pub fn clear(&self) -> PipelineResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Cache cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
