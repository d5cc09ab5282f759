//! folio - browse a GitHub account's public projects.

use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use folio::app::App;
use folio::cache::{self, ProjectsCache, Storage, default_storage};
use folio::cli::{Cli, Commands};
use folio::config::Config;
use folio::github::GitHubClient;
use folio::projects::{ProjectsService, ProjectsSnapshot};
use folio::state::ProjectsTabState;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let command = cli.command();
    let config = Config::from_cli(&cli);

    init_tracing(config.verbose, command == Commands::Browse);
    config.validate()?;

    let storage = default_storage(config.persists_cache(&command));
    let runtime = Runtime::new().context("failed to start async runtime")?;

    match command {
        Commands::ClearCache => {
            ProjectsCache::new(storage, config.cache_ttl).clear();
            println!("Projects cache cleared");
            Ok(())
        }
        Commands::List { json, basic } => {
            let service = build_service(&config, storage)?;
            runtime.block_on(list(&service, json, basic))
        }
        Commands::Browse => {
            if !io::stdout().is_terminal() {
                return Err(anyhow!("browse needs a terminal; try `folio list`"));
            }
            let service = build_service(&config, storage.clone())?;
            let state = ProjectsTabState::new(storage, config.display);
            let mut app = App::new(Arc::new(service), state, runtime.handle().clone());

            let mut terminal = ratatui::init();
            let result = app.run(&mut terminal);
            ratatui::restore();
            result.context("terminal UI failed")
        }
    }
}

fn build_service(config: &Config, storage: Arc<dyn Storage>) -> Result<ProjectsService> {
    let client = GitHubClient::new(&config.api_base, config.token.as_deref())?;
    Ok(ProjectsService::new(
        client,
        ProjectsCache::new(storage, config.cache_ttl),
        config.fetch_options(),
    ))
}

async fn list(service: &ProjectsService, json: bool, basic: bool) -> Result<()> {
    let snapshot = if basic {
        service.load_basic().await
    } else {
        let (tx, _rx) = watch::channel(ProjectsSnapshot::default());
        service.load(&tx).await
    };

    if let Some(error) = snapshot.error {
        return Err(anyhow!(error));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.projects)?);
        return Ok(());
    }

    for project in &snapshot.projects {
        let stars = project
            .stars
            .map(|s| format!("★ {}", s))
            .unwrap_or_default();
        println!(
            "{}  {:<32}  {:<40}  {}",
            project.date.format("%Y-%m-%d"),
            project.title,
            project.stack,
            stars
        );
    }
    tracing::info!(
        count = snapshot.projects.len(),
        source = snapshot.source.display(),
        "listed projects"
    );
    Ok(())
}

/// Log to stderr, or to a file while the terminal UI owns the screen.
fn init_tracing(verbose: bool, to_file: bool) {
    let default_filter = if verbose { "folio=debug" } else { "folio=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let log_file = if to_file {
        cache::paths::log_path().and_then(|path| {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).ok()?;
            }
            OpenOptions::new().create(true).append(true).open(path).ok()
        })
    } else {
        None
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    match log_file {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None if to_file => {
            // No log file and the UI owns the terminal: drop logs.
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}
