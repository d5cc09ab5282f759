// Runtime configuration.
// Collects CLI flags and environment into one validated value.

use std::time::Duration;

use crate::cli::{Cli, Commands};
use crate::error::{FolioError, Result};
use crate::projects::FetchOptions;
use crate::state::DisplayOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub account: String,
    pub per_page: u32,
    pub max_concurrent_requests: usize,
    pub cache_ttl: Duration,
    pub api_base: String,
    pub token: Option<String>,
    pub use_cache: bool,
    pub display: DisplayOptions,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            account: cli.account.trim().to_string(),
            per_page: cli.per_page,
            max_concurrent_requests: cli.max_concurrent_requests,
            cache_ttl: Duration::from_secs(cli.cache_ttl_secs),
            api_base: cli.api_base.clone(),
            token: cli.token.clone().filter(|t| !t.trim().is_empty()),
            use_cache: !cli.no_cache,
            display: DisplayOptions {
                show_stars: !cli.no_stars,
                show_updated: !cli.no_updated,
            },
            verbose: cli.verbose,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.account.is_empty() {
            return Err(FolioError::Config("account must not be empty".to_string()));
        }
        if !(1..=100).contains(&self.per_page) {
            return Err(FolioError::Config(format!(
                "per-page must be between 1 and 100, got {}",
                self.per_page
            )));
        }
        if self.max_concurrent_requests == 0 {
            return Err(FolioError::Config(
                "max-concurrent must be at least 1".to_string(),
            ));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(FolioError::Config(format!(
                "api-base must be an http(s) URL, got {}",
                self.api_base
            )));
        }
        Ok(())
    }

    /// Whether `command` should talk to the on-disk cache. `clear-cache` always
    /// does, otherwise `--no-cache` would make it a silent no-op.
    pub fn persists_cache(&self, command: &Commands) -> bool {
        self.use_cache || *command == Commands::ClearCache
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            account: self.account.clone(),
            per_page: self.per_page,
            max_concurrent_requests: self.max_concurrent_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["folio"];
        argv.extend_from_slice(args);
        Config::from_cli(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = config(&["--account", "octocat"]);
        config.validate().unwrap();
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert!(config.use_cache);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(config(&["--account", "a", "--per-page", "0"]).validate().is_err());
        assert!(config(&["--account", "a", "--per-page", "101"]).validate().is_err());
        assert!(config(&["--account", "a", "--max-concurrent", "0"]).validate().is_err());
        assert!(config(&["--account", "  "]).validate().is_err());
        assert!(config(&["--account", "a", "--api-base", "ftp://x"]).validate().is_err());
    }

    #[test]
    fn test_display_flags() {
        let config = config(&["--account", "a", "--no-stars"]);
        assert!(!config.display.show_stars);
        assert!(config.display.show_updated);
    }

    #[test]
    fn test_blank_token_ignored() {
        let config = config(&["--account", "a", "--token", " "]);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_clear_cache_ignores_no_cache() {
        let no_cache = config(&["--account", "a", "--no-cache"]);
        assert!(no_cache.persists_cache(&Commands::ClearCache));
        assert!(!no_cache.persists_cache(&Commands::Browse));
        assert!(!no_cache.persists_cache(&Commands::List {
            json: false,
            basic: false
        }));

        let config = config(&["--account", "a"]);
        assert!(config.persists_cache(&Commands::Browse));
    }

    #[test]
    fn test_fetch_options() {
        let options = config(&["--account", "a", "--per-page", "10"]).fetch_options();
        assert_eq!(options.account, "a");
        assert_eq!(options.per_page, 10);
    }
}
