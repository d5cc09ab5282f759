// UI module for rendering the TUI.
// Lays out the header, projects list, status bar, and help overlay.

mod header;
mod list;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Projects
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    header::draw_header(frame, app, chunks[0]);
    list::render_projects_list(frame, &mut app.projects, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the status bar with keybinding hints and rate limit.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
        Span::raw("  v "),
        Span::styled("View", Style::default().fg(Color::DarkGray)),
        Span::raw("  r "),
        Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
        Span::raw("  ? "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];

    // Rate limit info once a response has reported it
    let rate = &app.rate_limit;
    if rate.limit > 0 {
        let rate_color = if rate.remaining < 10 {
            Color::Red
        } else if rate.remaining < 30 {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        hints.push(Span::styled(
            format!("  API: {}/{}", rate.remaining, rate.limit),
            Style::default().fg(rate_color),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = area.width.min(44);
    let popup_height = area.height.min(12);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("  ↑/↓ or j/k    ", "Navigate projects"),
        key("  v             ", "Compact / detailed view"),
        key("  r             ", "Refresh from GitHub"),
        key("  ?             ", "Show/hide this help"),
        key("  q / Esc       ", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::backend::TestBackend;
    use tokio::runtime::Handle;

    use super::*;
    use crate::cache::{DEFAULT_TTL, MemoryStorage, ProjectsCache};
    use crate::github::GitHubClient;
    use crate::projects::test_support::sample_project;
    use crate::projects::{FetchOptions, ProjectsService, ProjectsSnapshot, SnapshotSource};
    use crate::state::{DisplayOptions, ProjectsTabState};

    fn app() -> App {
        let storage = Arc::new(MemoryStorage::new());
        let service = ProjectsService::new(
            GitHubClient::new("http://127.0.0.1:9", None).unwrap(),
            ProjectsCache::new(storage.clone(), DEFAULT_TTL),
            FetchOptions {
                account: "someone".to_string(),
                per_page: 50,
                max_concurrent_requests: 4,
            },
        );
        let state = ProjectsTabState::new(storage, DisplayOptions::default());
        App::new(Arc::new(service), state, Handle::current())
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_renders_projects_in_both_modes() {
        let mut app = app();
        app.projects.apply(&ProjectsSnapshot::ready(
            vec![sample_project("first-app")],
            SnapshotSource::Enriched,
        ));

        let compact = render(&mut app);
        assert!(compact.contains("first app"));
        assert!(compact.contains("Projects by someone"));

        app.projects.toggle_view_mode();
        let detailed = render(&mut app);
        assert!(detailed.contains("About first-app"));
        assert!(detailed.contains("Stack: Rust"));
    }

    #[tokio::test]
    async fn test_header_row_shows_account_and_source() {
        let mut app = app();
        app.projects.apply(&ProjectsSnapshot::ready(
            vec![sample_project("one"), sample_project("two")],
            SnapshotSource::Cache,
        ));

        let text = render(&mut app);
        let first_row: String = text.chars().take(100).collect();
        assert!(first_row.contains("folio"));
        assert!(first_row.contains("Projects by someone"));
        assert!(first_row.contains("2 projects"));
        assert!(first_row.contains("cached"));
        assert!(first_row.contains("compact"));
    }

    #[tokio::test]
    async fn test_renders_error_and_help() {
        let mut app = app();
        app.projects.apply(&ProjectsSnapshot::failed());
        app.show_help = true;

        let text = render(&mut app);
        assert!(text.contains("Could not load projects from GitHub."));
        assert!(text.contains("Keyboard Shortcuts"));
    }
}
