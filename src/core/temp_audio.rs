//! # Temporary audio files
//!
//! File-backed delivery writes each request's audio to its own temporary file
//! and streams it from disk. [`TempAudioFile`] owns that file for exactly one
//! request and removes it exactly once:
//!
//! - explicitly, through [`TempAudioFile::release`] (e.g. when the response
//!   stream reaches its end), or
//! - implicitly on drop (errors, client disconnects, cancelled futures).
//!
//! Releasing twice is a no-op, and a file that is already gone counts as
//! released. Cleanup failures are logged and counted, never returned to the
//! HTTP caller.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use serde::Serialize;
use tempfile::TempPath;
use tracing::{debug, warn};

const FILE_PREFIX: &str = "speech-";
const FILE_SUFFIX: &str = ".mp3";

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Failed to create temporary audio file: {0}")]
    Create(#[source] io::Error),

    #[error("Failed to remove temporary audio file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Temporary file task failed: {0}")]
    Task(String),
}

#[derive(Debug, Default)]
struct ResourceCounters {
    created: AtomicU64,
    released: AtomicU64,
    release_failures: AtomicU64,
}

/// Point-in-time view of the store's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResourceStats {
    pub created: u64,
    pub released: u64,
    pub release_failures: u64,
}

impl ResourceStats {
    /// Files created but not yet released
    pub fn outstanding(&self) -> u64 {
        self.created.saturating_sub(self.released)
    }
}

/// Creates uniquely named temporary audio files in one directory
#[derive(Debug, Clone)]
pub struct TempAudioStore {
    dir: PathBuf,
    counters: Arc<ResourceCounters>,
}

impl TempAudioStore {
    /// Uses `dir`, or the OS temp directory when `None`. The directory is
    /// created if missing.
    pub fn new(dir: Option<PathBuf>) -> Result<Self, ResourceError> {
        let dir = dir.unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&dir).map_err(ResourceError::Create)?;
        Ok(Self {
            dir,
            counters: Arc::new(ResourceCounters::default()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to a fresh file with a random name
    pub async fn persist(&self, bytes: Bytes) -> Result<TempAudioFile, ResourceError> {
        let dir = self.dir.clone();
        let len = bytes.len() as u64;

        let temp_path = tokio::task::spawn_blocking(move || -> io::Result<TempPath> {
            let mut file = tempfile::Builder::new()
                .prefix(FILE_PREFIX)
                .suffix(FILE_SUFFIX)
                .tempfile_in(&dir)?;
            file.write_all(&bytes)?;
            file.flush()?;
            Ok(file.into_temp_path())
        })
        .await
        .map_err(|e| ResourceError::Task(e.to_string()))?
        .map_err(ResourceError::Create)?;

        self.counters.created.fetch_add(1, Ordering::SeqCst);
        let path = temp_path.to_path_buf();
        debug!(path = %path.display(), bytes = len, "Created temporary audio file");

        Ok(TempAudioFile {
            temp_path: Some(temp_path),
            path,
            len,
            counters: self.counters.clone(),
        })
    }

    pub fn stats(&self) -> ResourceStats {
        ResourceStats {
            created: self.counters.created.load(Ordering::SeqCst),
            released: self.counters.released.load(Ordering::SeqCst),
            release_failures: self.counters.release_failures.load(Ordering::SeqCst),
        }
    }
}

/// One request's temporary audio file; removed on release or drop
#[derive(Debug)]
pub struct TempAudioFile {
    temp_path: Option<TempPath>,
    path: PathBuf,
    len: u64,
    counters: Arc<ResourceCounters>,
}

impl TempAudioFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove the file. Returns `Ok(false)` when it was already released.
    pub fn release(&mut self) -> Result<bool, ResourceError> {
        let Some(temp_path) = self.temp_path.take() else {
            return Ok(false);
        };
        self.counters.released.fetch_add(1, Ordering::SeqCst);

        // Single unlink, run in place: this is reached from `poll_next` and
        // `Drop`, neither of which can await a blocking task.
        match temp_path.close() {
            Ok(()) => {
                debug!(path = %self.path.display(), "Released temporary audio file");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
            Err(source) => {
                self.counters.release_failures.fetch_add(1, Ordering::SeqCst);
                Err(ResourceError::Remove {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// [`release`](Self::release), logging instead of returning failures
    pub fn release_quietly(&mut self) {
        if let Err(e) = self.release() {
            warn!("{e}");
        }
    }
}

impl Drop for TempAudioFile {
    fn drop(&mut self) {
        self.release_quietly();
    }
}
