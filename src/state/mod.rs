// State management module.
// Holds presentation state for the projects view.

pub mod projects;

pub use projects::{DisplayOptions, LoadingState, ProjectsTabState, VIEW_MODE_KEY, ViewMode};
