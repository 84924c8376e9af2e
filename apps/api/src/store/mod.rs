//! PersistentStore — typed JSON values over a pluggable key-value medium.
//!
//! The medium is a `KvBackend` (memory, one-file-per-key directory, or Redis).
//! Reads never fail: absent, unreadable and malformed values all come back as `None`
//! so startup can fall back to defaults. A failed write switches the store to
//! in-memory-only mode for the rest of the session.

pub mod backends;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

use crate::errors::AppError;

pub use backends::{FileBackend, MemoryBackend, RedisBackend};

pub const JOBS_KEY: &str = "jobAppAllJobs";
pub const PROFILE_KEY: &str = "jobAppUserProfile";
pub const FAVORITES_KEY: &str = "jobAppFavorites";
/// Identifier high-water mark, so deleted ids are not reissued after a restart.
pub const JOB_SEQUENCE_KEY: &str = "jobAppJobSequence";

/// Raw string key-value medium underneath the store.
#[async_trait]
pub trait KvBackend: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

pub struct PersistentStore {
    backend: Arc<dyn KvBackend>,
    degraded: AtomicBool,
}

impl PersistentStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            backend,
            degraded: AtomicBool::new(false),
        }
    }

    /// True once a write has failed; from then on nothing reaches the backend.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored value for '{key}'");
                return None;
            }
            Err(e) => {
                warn!("Could not read '{key}' from storage, using defaults: {e:#}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored value for '{key}' is malformed, using defaults: {e}");
                None
            }
        }
    }

    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        if self.is_degraded() {
            return Err(AppError::PersistenceUnavailable(format!(
                "store is in-memory only, '{key}' not written"
            )));
        }
        let raw = serde_json::to_string(value).map_err(|e| AppError::Internal(e.into()))?;
        self.backend
            .set(key, &raw)
            .await
            .map_err(|e| AppError::PersistenceUnavailable(format!("writing '{key}': {e:#}")))
    }

    /// Saves `value`, absorbing a write failure by switching to in-memory-only mode.
    ///
    /// Callers mutate their in-memory state first and then commit; the session keeps
    /// running on the in-memory copy when storage goes away.
    pub async fn commit<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if self.is_degraded() {
            debug!("Skipping write of '{key}': store is in-memory only");
            return;
        }
        if let Err(e) = self.save(key, value).await {
            error!("{e}; continuing with in-memory state for this session");
            self.degraded.store(true, Ordering::Relaxed);
        }
    }
}
