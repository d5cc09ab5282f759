// GitHub API response types.
// Defines structs for deserializing the repository listing and language endpoints.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Repository as returned by `GET /users/{account}/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRepository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub created_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    pub stargazers_count: Option<u64>,
    pub size: Option<u64>,
}

impl RemoteRepository {
    /// Forks and archived repositories are never shown.
    pub fn is_showcased(&self) -> bool {
        !self.fork && !self.archived
    }
}

/// Language name to byte count, as returned by `GET /repos/{owner}/{repo}/languages`.
///
/// Entries keep the order the API sent them in, stably re-sorted by byte
/// count so the dominant language always comes first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBreakdown(Vec<(String, u64)>);

impl LanguageBreakdown {
    pub fn new(mut entries: Vec<(String, u64)>) -> Self {
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Language names, largest first.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn bytes(&self, language: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, bytes)| *bytes)
    }
}

impl<'de> Deserialize<'de> for LanguageBreakdown {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = LanguageBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language names to byte counts")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, bytes)) = map.next_entry::<String, u64>()? {
                    entries.push((name, bytes));
                }
                Ok(LanguageBreakdown::new(entries))
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_repository() {
        let json = r#"{
            "name": "my-cool-app",
            "description": null,
            "html_url": "https://github.com/someone/my-cool-app",
            "homepage": "",
            "created_at": "2024-01-01T00:00:00Z",
            "pushed_at": "2024-03-05T12:00:00Z",
            "language": "Go",
            "fork": false,
            "archived": false,
            "topics": ["cli", "tool"],
            "stargazers_count": 7,
            "size": 120,
            "visibility": "public"
        }"#;

        let repo: RemoteRepository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "my-cool-app");
        assert!(repo.description.is_none());
        assert_eq!(repo.language.as_deref(), Some("Go"));
        assert_eq!(repo.topics, vec!["cli", "tool"]);
        assert_eq!(repo.stargazers_count, Some(7));
        assert!(repo.updated_at.is_none());
        assert!(repo.is_showcased());
    }

    #[test]
    fn test_missing_topics_default_empty() {
        let json = r#"{
            "name": "bare",
            "description": "x",
            "html_url": "https://github.com/someone/bare",
            "homepage": null,
            "created_at": "2023-06-01T00:00:00Z",
            "pushed_at": null,
            "language": null,
            "fork": true,
            "archived": false
        }"#;

        let repo: RemoteRepository = serde_json::from_str(json).unwrap();
        assert!(repo.topics.is_empty());
        assert!(!repo.is_showcased());
    }

    #[test]
    fn test_breakdown_sorted_by_bytes() {
        let breakdown: LanguageBreakdown =
            serde_json::from_str(r#"{"Shell": 100, "Rust": 5000, "Go": 900}"#).unwrap();
        let langs: Vec<&str> = breakdown.languages().collect();
        assert_eq!(langs, vec!["Rust", "Go", "Shell"]);
        assert_eq!(breakdown.bytes("Go"), Some(900));
        assert_eq!(breakdown.bytes("C"), None);
    }

    #[test]
    fn test_breakdown_ties_keep_response_order() {
        let breakdown: LanguageBreakdown =
            serde_json::from_str(r#"{"Zig": 10, "Ada": 10}"#).unwrap();
        let langs: Vec<&str> = breakdown.languages().collect();
        assert_eq!(langs, vec!["Zig", "Ada"]);
    }

    #[test]
    fn test_empty_breakdown() {
        let breakdown: LanguageBreakdown = serde_json::from_str("{}").unwrap();
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.len(), 0);
    }
}
