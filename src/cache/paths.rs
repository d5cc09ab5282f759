// Cache path utilities.
// Resolves where persisted entries and the log file live on disk.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the log file written while the terminal UI owns the screen.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("folio.log"))
}

/// Path of the file backing a storage key inside `dir`.
pub fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            _ => c,
        })
        .collect()
}
