//! Read-through cache for pipeline stages.
//!
//! Each stage's raw output is persisted once and then reused on every later
//! run. Entries never expire: delete the backing file to force a refetch.
//! A failed fetch stores nothing, so the next run retries that stage.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

use crate::error::PipelineError;

/// A cached pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKey {
    /// Candidate routes inside the home bounding box.
    Routes,
    /// Stops served by the selected route.
    Stops,
    /// Businesses found near every stop.
    Pois,
}

impl StageKey {
    /// All stages, in pipeline order.
    pub const ALL: [StageKey; 3] = [StageKey::Routes, StageKey::Stops, StageKey::Pois];

    /// Stable name of the stage, used as the persistence key.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKey::Routes => "routes",
            StageKey::Stops => "stops",
            StageKey::Pois => "pois",
        }
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value persistence behind [`StageCache`].
pub trait CacheStore {
    /// Load a stage's content, or `None` if it was never stored.
    fn load(&self, key: StageKey) -> Result<Option<String>, PipelineError>;

    /// Persist a stage's content as a whole value.
    fn store(&self, key: StageKey, content: &str) -> Result<(), PipelineError>;
}

/// Stores each stage as `{dir}/{stage}.json`.
#[derive(Debug, Clone)]
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: StageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CacheStore for DiskStore {
    fn load(&self, key: StageKey) -> Result<Option<String>, PipelineError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PipelineError::Cache {
                message: format!("failed to read {}: {e}", path.display()),
            }),
        }
    }

    fn store(&self, key: StageKey, content: &str) -> Result<(), PipelineError> {
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| PipelineError::Cache {
                message: format!("failed to create cache directory: {e}"),
            })?;
        }

        // Write beside the target and rename, so readers see either no entry
        // or a complete one.
        let path = self.path_for(key);
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", key.as_str(), std::process::id()));

        std::fs::write(&tmp, content).map_err(|e| PipelineError::Cache {
            message: format!("failed to write {}: {e}", tmp.display()),
        })?;

        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            PipelineError::Cache {
                message: format!("failed to move cache entry into {}: {e}", path.display()),
            }
        })
    }
}

/// In-memory store, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StageKey, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries(entries: impl IntoIterator<Item = (StageKey, String)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }

    /// Whether `key` has been stored.
    pub fn contains(&self, key: StageKey) -> bool {
        self.lock().contains_key(&key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<StageKey, String>> {
        // A poisoned map is still a valid map.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CacheStore for MemoryStore {
    fn load(&self, key: StageKey) -> Result<Option<String>, PipelineError> {
        Ok(self.lock().get(&key).cloned())
    }

    fn store(&self, key: StageKey, content: &str) -> Result<(), PipelineError> {
        self.lock().insert(key, content.to_string());
        Ok(())
    }
}

/// Read-through cache wrapping a [`CacheStore`].
#[derive(Debug)]
pub struct StageCache<S> {
    store: S,
}

impl<S: CacheStore> StageCache<S> {
    /// Create a cache over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Return the stored content for `key`, or run `fetch`, persist its
    /// result verbatim and return it.
    ///
    /// Errors from `fetch` propagate without storing anything.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: StageKey,
        fetch: F,
    ) -> Result<String, PipelineError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, PipelineError>>,
    {
        if let Some(content) = self.store.load(key)? {
            info!(stage = %key, "using cached stage");
            return Ok(content);
        }

        info!(stage = %key, "fetching stage from providers");
        let content = fetch().await?;
        self.store.store(key, &content)?;

        Ok(content)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
