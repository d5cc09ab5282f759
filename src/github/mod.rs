// GitHub API module.
// Provides the client and types for the repository listing and language endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use endpoints::LISTING_SORT;
pub use types::{LanguageBreakdown, RateLimit, RemoteRepository};
