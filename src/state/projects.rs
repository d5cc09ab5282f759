// Projects tab state.
// Mirrors the latest pipeline snapshot and tracks selection and the view-mode preference.

use std::sync::Arc;

use ratatui::widgets::ListState;

use crate::cache::Storage;
use crate::projects::{Project, ProjectsSnapshot, SnapshotSource};

/// Storage key for the persisted view mode.
pub const VIEW_MODE_KEY: &str = "projects-view-mode";

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// How each project is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One line per project.
    #[default]
    Compact,
    /// Multi-line cards with description and tags.
    Detailed,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Compact => ViewMode::Detailed,
            ViewMode::Detailed => ViewMode::Compact,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Compact => "compact",
            ViewMode::Detailed => "detailed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "compact" => Some(ViewMode::Compact),
            "detailed" => Some(ViewMode::Detailed),
            _ => None,
        }
    }
}

/// Optional project fields the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_stars: bool,
    pub show_updated: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_stars: true,
            show_updated: true,
        }
    }
}

pub struct ProjectsTabState {
    pub data: LoadingState<Vec<Project>>,
    pub source: SnapshotSource,
    pub list_state: ListState,
    pub view_mode: ViewMode,
    pub display: DisplayOptions,
    storage: Arc<dyn Storage>,
}

impl ProjectsTabState {
    /// Create state, restoring the view mode saved in `storage`.
    pub fn new(storage: Arc<dyn Storage>, display: DisplayOptions) -> Self {
        let view_mode = match storage.get(VIEW_MODE_KEY) {
            Ok(Some(value)) => ViewMode::parse(&value).unwrap_or_default(),
            Ok(None) => ViewMode::default(),
            Err(e) => {
                tracing::warn!("could not read view mode preference: {}", e);
                ViewMode::default()
            }
        };

        Self {
            data: LoadingState::Idle,
            source: SnapshotSource::Pending,
            list_state: ListState::default(),
            view_mode,
            display,
            storage,
        }
    }

    /// Replace the displayed data with a new snapshot.
    pub fn apply(&mut self, snapshot: &ProjectsSnapshot) {
        self.source = snapshot.source;

        if let Some(error) = &snapshot.error {
            self.data = LoadingState::Error(error.clone());
            self.list_state.select(None);
            return;
        }
        if snapshot.loading {
            self.data = LoadingState::Loading;
            return;
        }

        let len = snapshot.projects.len();
        self.data = LoadingState::Loaded(snapshot.projects.clone());
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn projects(&self) -> &[Project] {
        self.data.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Select the next project, staying on the last one.
    pub fn select_next(&mut self) {
        let len = self.projects().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous project, staying on the first one.
    pub fn select_prev(&mut self) {
        if self.projects().is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects().get(self.list_state.selected()?)
    }

    /// Flip between compact and detailed layouts and remember the choice.
    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggle();
        if let Err(e) = self.storage.set(VIEW_MODE_KEY, self.view_mode.as_str()) {
            tracing::warn!("could not save view mode preference: {}", e);
        }
        self.view_mode
    }
}
