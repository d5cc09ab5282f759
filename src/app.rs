// App state and main event loop.
// Drives the terminal UI, starts pipeline loads, and applies published snapshots.

use std::io;
use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::sync::watch;

use crate::github::RateLimit;
use crate::projects::{ProjectsService, ProjectsSnapshot};
use crate::state::ProjectsTabState;
use crate::ui;

/// Main application state.
pub struct App {
    /// Account being showcased (for the header).
    pub account: String,
    /// Projects view state.
    pub projects: ProjectsTabState,
    /// Latest API rate limit seen by the client.
    pub rate_limit: RateLimit,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    service: Arc<ProjectsService>,
    runtime: Handle,
    publisher: Arc<watch::Sender<ProjectsSnapshot>>,
    snapshots: watch::Receiver<ProjectsSnapshot>,
    load_task: Option<JoinHandle<ProjectsSnapshot>>,
}

impl App {
    pub fn new(service: Arc<ProjectsService>, projects: ProjectsTabState, runtime: Handle) -> Self {
        let (publisher, snapshots) = watch::channel(ProjectsSnapshot::default());
        Self {
            account: service.options().account.clone(),
            projects,
            rate_limit: RateLimit::default(),
            show_help: false,
            should_quit: false,
            service,
            runtime,
            publisher: Arc::new(publisher),
            snapshots,
            load_task: None,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.start_load(false);
        while !self.should_quit {
            self.sync_snapshot();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Whether a pipeline run is still publishing, enrichment included.
    pub fn load_in_flight(&self) -> bool {
        self.load_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Kick off the pipeline in the background. `fresh` bypasses every cache.
    ///
    /// Only one run publishes at a time; while one is in flight this does nothing.
    pub fn start_load(&mut self, fresh: bool) {
        if self.load_in_flight() {
            tracing::debug!("load already in flight, ignoring");
            return;
        }
        let service = self.service.clone();
        let publisher = self.publisher.clone();
        self.load_task = Some(self.runtime.spawn(async move {
            if fresh {
                service.load_fresh(&publisher).await
            } else {
                service.load(&publisher).await
            }
        }));
    }

    /// Apply the latest published snapshot, if it changed since the last frame.
    pub fn sync_snapshot(&mut self) {
        if !self.snapshots.has_changed().unwrap_or(false) {
            return;
        }
        let snapshot = self.snapshots.borrow_and_update().clone();
        self.projects.apply(&snapshot);
        self.rate_limit = self.service.rate_limit();
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.projects.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.projects.select_prev(),
            KeyCode::Char('v') => {
                let mode = self.projects.toggle_view_mode();
                tracing::debug!(mode = mode.as_str(), "view mode toggled");
            }
            KeyCode::Char('r') => {
                if !self.load_in_flight() {
                    tracing::info!("refreshing projects");
                    self.start_load(true);
                }
            }
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }
}
