// Project model and the repository-to-project transform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{LanguageBreakdown, RemoteRepository};

pub const PROJECT_KIND: &str = "GitHub repository";
pub const PROJECT_FOCUS: &str = "Learning by building & iterating";
pub const NO_DESCRIPTION: &str = "No description added yet.";
pub const MIXED_STACK: &str = "Mixed stack";
pub const STACK_SEPARATOR: &str = " · ";

const MAX_LANGUAGE_TAGS: usize = 3;
const MAX_TOPIC_TAGS: usize = 3;

/// A repository as shown in the projects view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Creation time; the list is ordered by this, newest first.
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub stack: String,
    pub focus: String,
    pub github_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Build a `Project` from a repository and its (possibly empty) language breakdown.
pub fn map_repository(repo: &RemoteRepository, languages: &LanguageBreakdown) -> Project {
    let stack = if languages.is_empty() {
        non_blank(repo.language.as_deref())
            .unwrap_or(MIXED_STACK)
            .to_string()
    } else {
        languages.languages().collect::<Vec<_>>().join(STACK_SEPARATOR)
    };

    let tags = languages
        .languages()
        .take(MAX_LANGUAGE_TAGS)
        .chain(repo.topics.iter().map(String::as_str).take(MAX_TOPIC_TAGS))
        .filter(|tag| !tag.trim().is_empty())
        .map(str::to_string)
        .collect();

    Project {
        title: repo.name.replace(['-', '_'], " "),
        description: non_blank(repo.description.as_deref())
            .unwrap_or(NO_DESCRIPTION)
            .to_string(),
        date: repo.created_at,
        kind: PROJECT_KIND.to_string(),
        stack,
        focus: PROJECT_FOCUS.to_string(),
        github_url: repo.html_url.clone(),
        live_url: non_blank(repo.homepage.as_deref()).map(str::to_string),
        tags,
        stars: repo.stargazers_count,
        updated_at: repo.pushed_at.or(repo.updated_at),
        size: repo.size,
        language: repo.language.clone(),
    }
}

/// Newest first by creation date. Stable, so equal dates keep listing order.
pub fn sort_newest_first(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.date.cmp(&a.date));
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::test_support::repo;

    fn breakdown(entries: &[(&str, u64)]) -> LanguageBreakdown {
        LanguageBreakdown::new(
            entries
                .iter()
                .map(|(name, bytes)| (name.to_string(), *bytes))
                .collect(),
        )
    }

    #[test]
    fn test_maps_enriched_repository() {
        let mut r = repo("my-cool-app", "2024-01-01T00:00:00Z");
        r.language = Some("Go".to_string());
        r.topics = vec!["cli".to_string(), "tool".to_string()];

        let project = map_repository(&r, &breakdown(&[("Go", 900), ("Shell", 100)]));

        assert_eq!(project.title, "my cool app");
        assert_eq!(project.stack, "Go · Shell");
        assert_eq!(project.tags, vec!["Go", "Shell", "cli", "tool"]);
        assert_eq!(project.kind, PROJECT_KIND);
        assert_eq!(project.focus, PROJECT_FOCUS);
        assert_eq!(project.github_url, "https://github.com/someone/my-cool-app");
    }

    #[test]
    fn test_stack_falls_back_to_primary_language() {
        let mut r = repo("lonely", "2024-01-01T00:00:00Z");
        r.language = Some("Rust".to_string());

        let project = map_repository(&r, &LanguageBreakdown::default());
        assert_eq!(project.stack, "Rust");
        assert!(project.tags.is_empty());
    }

    #[test]
    fn test_stack_mixed_without_any_language() {
        let r = repo("mystery", "2024-01-01T00:00:00Z");
        let project = map_repository(&r, &LanguageBreakdown::default());
        assert_eq!(project.stack, MIXED_STACK);
    }

    #[test]
    fn test_tags_capped_at_six() {
        let mut r = repo("busy", "2024-01-01T00:00:00Z");
        r.topics = ["a", "b", "c", "d", "e"].iter().map(|t| t.to_string()).collect();
        let langs = breakdown(&[("Rust", 50), ("C", 40), ("Go", 30), ("Zig", 20), ("Lua", 10)]);

        let project = map_repository(&r, &langs);
        assert_eq!(project.tags, vec!["Rust", "C", "Go", "a", "b", "c"]);
        assert!(project.tags.len() <= 6);
    }

    #[test]
    fn test_blank_topics_dropped() {
        let mut r = repo("gaps", "2024-01-01T00:00:00Z");
        r.topics = vec!["".to_string(), "web".to_string()];
        let project = map_repository(&r, &LanguageBreakdown::default());
        assert_eq!(project.tags, vec!["web"]);
    }

    #[test]
    fn test_description_and_homepage_fallbacks() {
        let mut r = repo("site", "2024-01-01T00:00:00Z");
        r.homepage = Some("".to_string());
        let project = map_repository(&r, &LanguageBreakdown::default());
        assert_eq!(project.description, NO_DESCRIPTION);
        assert_eq!(project.live_url, None);

        r.description = Some("  ".to_string());
        let project = map_repository(&r, &LanguageBreakdown::default());
        assert_eq!(project.description, NO_DESCRIPTION);

        r.description = Some("A site".to_string());
        r.homepage = Some("https://example.com".to_string());
        let project = map_repository(&r, &LanguageBreakdown::default());
        assert_eq!(project.description, "A site");
        assert_eq!(project.live_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_underscores_become_spaces() {
        let r = repo("snake_case-name", "2024-01-01T00:00:00Z");
        let project = map_repository(&r, &LanguageBreakdown::default());
        assert_eq!(project.title, "snake case name");
    }

    #[test]
    fn test_optional_fields_carried() {
        let mut r = repo("stats", "2024-01-01T00:00:00Z");
        r.stargazers_count = Some(12);
        r.size = Some(300);
        r.language = Some("TypeScript".to_string());
        r.pushed_at = Some("2024-06-01T00:00:00Z".parse().unwrap());

        let project = map_repository(&r, &LanguageBreakdown::default());
        assert_eq!(project.stars, Some(12));
        assert_eq!(project.size, Some(300));
        assert_eq!(project.language.as_deref(), Some("TypeScript"));
        assert_eq!(project.updated_at, r.pushed_at);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut projects: Vec<Project> = [
            ("old", "2020-01-01T00:00:00Z"),
            ("new", "2024-01-01T00:00:00Z"),
            ("mid", "2022-01-01T00:00:00Z"),
        ]
        .iter()
        .map(|(name, created)| map_repository(&repo(name, created), &LanguageBreakdown::default()))
        .collect();

        sort_newest_first(&mut projects);
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_serializes_type_field() {
        let project = map_repository(
            &repo("json", "2024-01-01T00:00:00Z"),
            &LanguageBreakdown::default(),
        );
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["type"], PROJECT_KIND);
        assert_eq!(value["githubUrl"], "https://github.com/someone/json");
        assert!(value.get("liveUrl").is_none());
    }
}
