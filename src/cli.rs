//! Command-line interface definition for folio.

use clap::{Parser, Subcommand};

use crate::github::GITHUB_API_BASE;

/// Browse a GitHub account's public projects
#[derive(Parser, Debug, Clone)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Account whose repositories are showcased
    #[arg(long, env = "FOLIO_ACCOUNT", default_value = "TheAbyssSage")]
    pub account: String,

    /// Repositories requested from the listing endpoint (1-100)
    #[arg(long, env = "FOLIO_PER_PAGE", default_value_t = 50)]
    pub per_page: u32,

    /// Language requests allowed in flight at once
    #[arg(long = "max-concurrent", env = "FOLIO_MAX_CONCURRENT", default_value_t = 8)]
    pub max_concurrent_requests: usize,

    /// Seconds a cached projects list stays fresh
    #[arg(long, env = "FOLIO_CACHE_TTL_SECS", default_value_t = 3600)]
    pub cache_ttl_secs: u64,

    /// GitHub API base URL
    #[arg(long, env = "FOLIO_API_BASE", default_value = GITHUB_API_BASE)]
    pub api_base: String,

    /// Optional token; raises the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Hide star counts
    #[arg(long)]
    pub no_stars: bool,

    /// Hide last-push times
    #[arg(long)]
    pub no_updated: bool,

    /// Never read or write the local cache
    #[arg(long)]
    pub no_cache: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute (defaults to `browse`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse projects in the terminal UI
    Browse,

    /// Print projects to stdout
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Skip per-repository language requests
        #[arg(long)]
        basic: bool,
    },

    /// Remove the cached projects list
    ClearCache,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse)
    }
}
