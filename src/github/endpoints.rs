// GitHub API endpoint functions.
// Typed methods for the two endpoints the projects view consumes.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{LanguageBreakdown, RemoteRepository};

/// Listing order requested from the API. Creation time matches the order
/// projects are displayed in.
pub const LISTING_SORT: &str = "created";

impl GitHubClient {
    /// Get public repositories owned by `account`, newest first.
    pub async fn list_user_repos(
        &self,
        account: &str,
        per_page: u32,
    ) -> Result<Vec<RemoteRepository>> {
        let params = [
            ("sort", LISTING_SORT),
            ("per_page", &per_page.to_string()),
        ];
        let response = self
            .get_with_params(&format!("/users/{}/repos", account), &params)
            .await?;
        let repos: Vec<RemoteRepository> = response.json().await?;
        Ok(repos)
    }

    /// Get the language breakdown for one repository.
    pub async fn get_repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBreakdown> {
        let response = self
            .get(&format!("/repos/{}/{}/languages", owner, repo))
            .await?;
        let breakdown: LanguageBreakdown = response.json().await?;
        Ok(breakdown)
    }
}
