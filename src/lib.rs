//! folio - browse a GitHub account's public projects.
//!
//! The core is [`projects::ProjectsService`]: it lists an account's
//! repositories, drops forks and archived ones, publishes a cheap list right
//! away, then enriches every entry with its language breakdown and publishes
//! again. The enriched list is cached locally for an hour.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod projects;
pub mod state;
pub mod ui;
