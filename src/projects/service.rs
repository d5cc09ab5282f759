// Projects pipeline.
// Fetches the repository listing, enriches it with language breakdowns, and
// publishes each stage as a whole snapshot while keeping the local cache current.

use std::sync::{Arc, Mutex, PoisonError};

use futures::stream::{self, StreamExt};
use tokio::sync::{OnceCell, watch};

use crate::cache::ProjectsCache;
use crate::error::{FolioError, Result};
use crate::github::{GitHubClient, LanguageBreakdown, RateLimit, RemoteRepository};

use super::model::{Project, map_repository, sort_newest_first};

/// Shown when the listing request fails.
pub const LISTING_ERROR: &str = "Could not load projects from GitHub.";

/// Where the projects in a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotSource {
    #[default]
    Pending,
    Cache,
    Listing,
    Enriched,
}

impl SnapshotSource {
    pub fn display(&self) -> &'static str {
        match self {
            SnapshotSource::Pending => "pending",
            SnapshotSource::Cache => "cached",
            SnapshotSource::Listing => "basic",
            SnapshotSource::Enriched => "enriched",
        }
    }
}

/// Everything the presentation layer needs: the list, a loading flag, and an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsSnapshot {
    pub projects: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
    pub source: SnapshotSource,
}

impl ProjectsSnapshot {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn failed() -> Self {
        Self {
            error: Some(LISTING_ERROR.to_string()),
            ..Self::default()
        }
    }

    pub fn ready(projects: Vec<Project>, source: SnapshotSource) -> Self {
        Self {
            projects,
            loading: false,
            error: None,
            source,
        }
    }
}

/// Which account to showcase and how hard to hit the API doing it.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub account: String,
    pub per_page: u32,
    pub max_concurrent_requests: usize,
}

type Listing = Arc<Vec<RemoteRepository>>;

/// Loads the projects list for one account.
///
/// The filtered repository listing is memoized: concurrent callers share a
/// single in-flight request and later callers reuse its result until
/// [`invalidate`](Self::invalidate). Failed listings are not remembered.
pub struct ProjectsService {
    client: GitHubClient,
    cache: ProjectsCache,
    options: FetchOptions,
    listing: Mutex<Arc<OnceCell<Listing>>>,
}

impl ProjectsService {
    pub fn new(client: GitHubClient, cache: ProjectsCache, options: FetchOptions) -> Self {
        Self {
            client,
            cache,
            options,
            listing: Mutex::new(Arc::new(OnceCell::new())),
        }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    pub fn cache(&self) -> &ProjectsCache {
        &self.cache
    }

    pub fn rate_limit(&self) -> RateLimit {
        self.client.rate_limit()
    }

    fn listing_handle(&self) -> Arc<OnceCell<Listing>> {
        self.listing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget the memoized listing so the next call hits the API again.
    pub fn invalidate(&self) {
        *self.listing.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(OnceCell::new());
    }

    /// Showcased repositories (no forks, no archived) for the account.
    pub async fn repositories(&self) -> Result<Listing> {
        let handle = self.listing_handle();
        handle
            .get_or_try_init(|| async {
                let repos = self
                    .client
                    .list_user_repos(&self.options.account, self.options.per_page)
                    .await?;
                let total = repos.len();
                let showcased: Vec<RemoteRepository> = repos
                    .into_iter()
                    .filter(RemoteRepository::is_showcased)
                    .collect();
                tracing::info!(
                    account = %self.options.account,
                    total,
                    showcased = showcased.len(),
                    "fetched repository listing"
                );
                Ok::<_, FolioError>(Arc::new(showcased))
            })
            .await
            .cloned()
    }

    /// Repository fetcher: the listing mapped with no language data, newest first.
    pub async fn fetch_listing(&self) -> Result<(Listing, Vec<Project>)> {
        let repos = self.repositories().await?;
        let empty = LanguageBreakdown::default();
        let mut projects: Vec<Project> = repos
            .iter()
            .map(|repo| map_repository(repo, &empty))
            .collect();
        sort_newest_first(&mut projects);
        Ok((repos, projects))
    }

    /// Language enricher: fetch every breakdown (at most `max_concurrent_requests`
    /// at a time), then re-map the whole list once all have settled.
    ///
    /// A failed request degrades that repository to its primary language.
    pub async fn enrich(&self, repos: &[RemoteRepository]) -> Vec<Project> {
        let account = self.options.account.as_str();
        let client = &self.client;
        // Futures own their repo name so the stream carries no borrow of `repos`
        // and the whole load stays `Send`.
        let requests: Vec<_> = repos
            .iter()
            .map(|repo| {
                let name = repo.name.clone();
                async move {
                    match client.get_repo_languages(account, &name).await {
                        Ok(breakdown) => breakdown,
                        Err(e) => {
                            tracing::debug!(repo = %name, "language breakdown unavailable: {}", e);
                            LanguageBreakdown::default()
                        }
                    }
                }
            })
            .collect();
        let breakdowns: Vec<LanguageBreakdown> = stream::iter(requests)
            .buffered(self.options.max_concurrent_requests.max(1))
            .collect()
            .await;

        let mut projects: Vec<Project> = repos
            .iter()
            .zip(&breakdowns)
            .map(|(repo, breakdown)| map_repository(repo, breakdown))
            .collect();
        sort_newest_first(&mut projects);
        projects
    }

    /// Run the whole pipeline, publishing each stage into `tx`.
    ///
    /// Publishes at most three snapshots (loading, basic, enriched), or a
    /// single one on a cache hit. Returns the last snapshot published.
    pub async fn load(&self, tx: &watch::Sender<ProjectsSnapshot>) -> ProjectsSnapshot {
        if let Some(projects) = self.cache.read() {
            tracing::info!(count = projects.len(), "serving projects from cache");
            return publish(tx, ProjectsSnapshot::ready(projects, SnapshotSource::Cache));
        }

        publish(tx, ProjectsSnapshot::loading());

        let (repos, basic) = match self.fetch_listing().await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!("repository listing failed: {}", e);
                return publish(tx, ProjectsSnapshot::failed());
            }
        };
        publish(tx, ProjectsSnapshot::ready(basic, SnapshotSource::Listing));

        let enriched = self.enrich(&repos).await;
        tracing::info!(count = enriched.len(), "projects enriched");
        self.cache.write(&enriched);
        publish(tx, ProjectsSnapshot::ready(enriched, SnapshotSource::Enriched))
    }

    /// Like [`load`](Self::load) but ignores both the local cache and the
    /// memoized listing.
    pub async fn load_fresh(&self, tx: &watch::Sender<ProjectsSnapshot>) -> ProjectsSnapshot {
        self.cache.clear();
        self.invalidate();
        self.load(tx).await
    }

    /// Listing only, no enrichment and no cache: one request total.
    pub async fn load_basic(&self) -> ProjectsSnapshot {
        match self.fetch_listing().await {
            Ok((_, projects)) => ProjectsSnapshot::ready(projects, SnapshotSource::Listing),
            Err(e) => {
                tracing::warn!("repository listing failed: {}", e);
                ProjectsSnapshot::failed()
            }
        }
    }
}

fn publish(tx: &watch::Sender<ProjectsSnapshot>, snapshot: ProjectsSnapshot) -> ProjectsSnapshot {
    tx.send_replace(snapshot.clone());
    snapshot
}
