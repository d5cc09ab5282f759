// Projects list rendering.
// Compact and detailed layouts plus loading, error, and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::projects::Project;
use crate::state::{DisplayOptions, LoadingState, ProjectsTabState, ViewMode};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Trailing stars / last-push spans, per display options.
fn meta_spans(project: &Project, display: DisplayOptions) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if display.show_stars {
        if let Some(stars) = project.stars {
            spans.push(Span::styled(
                format!("  ★ {}", stars),
                Style::default().fg(Color::Yellow),
            ));
        }
    }
    if display.show_updated {
        if let Some(updated) = &project.updated_at {
            spans.push(Span::styled(
                format!("  pushed {}", format_relative_time(updated)),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    spans
}

fn compact_item(project: &Project, display: DisplayOptions) -> ListItem<'static> {
    let mut spans = vec![
        Span::styled(project.title.clone(), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("  {}", project.date.format("%Y-%m-%d")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!("  {}", project.stack)),
    ];
    spans.extend(meta_spans(project, display));
    ListItem::new(Line::from(spans))
}

fn detailed_item(project: &Project, display: DisplayOptions) -> ListItem<'static> {
    let mut heading = vec![
        Span::styled(
            project.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} · {}", project.kind, project.date.format("%b %Y")),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    heading.extend(meta_spans(project, display));

    let mut lines = vec![
        Line::from(heading),
        Line::from(format!("  {}", project.description)),
        Line::from(vec![
            Span::styled("  Stack: ", Style::default().fg(Color::DarkGray)),
            Span::raw(project.stack.clone()),
        ]),
    ];

    if !project.tags.is_empty() {
        let mut tags = vec![Span::raw("  ")];
        for tag in &project.tags {
            tags.push(Span::styled(
                format!("#{} ", tag),
                Style::default().fg(Color::Magenta),
            ));
        }
        lines.push(Line::from(tags));
    }

    let mut links = vec![Span::styled(
        format!("  {}", project.github_url),
        Style::default().fg(Color::Blue),
    )];
    if let Some(live) = &project.live_url {
        links.push(Span::styled(
            format!("  live: {}", live),
            Style::default().fg(Color::Green),
        ));
    }
    lines.push(Line::from(links));
    lines.push(Line::from(""));

    ListItem::new(lines)
}

/// Render the projects list in the current view mode.
pub fn render_projects_list(frame: &mut Frame, state: &mut ProjectsTabState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Projects ");

    let items: Vec<ListItem> = match &state.data {
        LoadingState::Idle => return render_empty(frame, area, "Waiting for projects"),
        LoadingState::Loading => return render_loading(frame, area, "Loading projects"),
        LoadingState::Error(e) => return render_error(frame, area, e),
        LoadingState::Loaded(projects) if projects.is_empty() => {
            return render_empty(frame, area, "No projects found");
        }
        LoadingState::Loaded(projects) => projects
            .iter()
            .map(|project| match state.view_mode {
                ViewMode::Compact => compact_item(project, state.display),
                ViewMode::Detailed => detailed_item(project, state.display),
            })
            .collect(),
    };

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, &mut state.list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::minutes(5))),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::hours(3))),
            "3h ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::days(2))),
            "2d ago"
        );
    }
}
