// Cache store for the projects list.
// Handles JSON serialization, TTL checking, and purging of stale or unreadable entries.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::projects::Project;

use super::storage::Storage;

/// Storage key holding the serialized projects entry.
pub const CACHE_KEY: &str = "projects-cache";

/// Default freshness window: 1 hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T, cached_at: DateTime<Utc>) -> Self {
        Self { data, cached_at }
    }

    /// Check if this entry is older than `ttl` at `now`.
    /// Timestamps from the future count as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let elapsed = now
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed > ttl
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        !self.is_expired_at(now, ttl)
    }
}

/// Advisory cache of the last enriched projects list.
///
/// Nothing here fails: storage or parse problems are logged and turn into
/// a miss, so a broken cache only ever costs a network round trip.
#[derive(Clone)]
pub struct ProjectsCache {
    storage: Arc<dyn Storage>,
    ttl: Duration,
}

impl ProjectsCache {
    pub fn new(storage: Arc<dyn Storage>, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the stored list if it is still fresh.
    pub fn read(&self) -> Option<Vec<Project>> {
        self.read_at(Utc::now())
    }

    pub fn read_at(&self, now: DateTime<Utc>) -> Option<Vec<Project>> {
        let raw = match self.storage.get(CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("projects cache unreadable: {}", e);
                return None;
            }
        };

        let entry: CachedData<Vec<Project>> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("discarding corrupt projects cache: {}", e);
                self.clear();
                return None;
            }
        };

        if entry.is_expired_at(now, self.ttl) {
            tracing::debug!(cached_at = %entry.cached_at, "projects cache expired");
            self.clear();
            return None;
        }

        Some(entry.data)
    }

    /// Store `projects` stamped with the current time, replacing any prior entry.
    pub fn write(&self, projects: &[Project]) {
        self.write_at(projects, Utc::now());
    }

    pub fn write_at(&self, projects: &[Project], now: DateTime<Utc>) {
        let entry = CachedData::new(projects, now);
        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("could not serialize projects cache: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(CACHE_KEY, &json) {
            tracing::warn!("could not write projects cache: {}", e);
        }
    }

    /// Remove any stored entry.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(CACHE_KEY) {
            tracing::warn!("could not clear projects cache: {}", e);
        }
    }
}
