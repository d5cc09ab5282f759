// Cache module for persisted local state.
// Stores the last enriched projects list and UI preferences between runs.

pub mod paths;
pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, NoopStorage, Storage, default_storage};
pub use store::{CACHE_KEY, CachedData, DEFAULT_TTL, ProjectsCache};
