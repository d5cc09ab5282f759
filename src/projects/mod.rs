// Projects module.
// The showcase model plus the fetch, enrich, and cache pipeline that produces it.

pub mod model;
pub mod service;

pub use model::{Project, map_repository, sort_newest_first};
pub use service::{
    FetchOptions, LISTING_ERROR, ProjectsService, ProjectsSnapshot, SnapshotSource,
};
