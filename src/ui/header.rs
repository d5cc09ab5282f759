// Header rendering.
// Shows the account being showcased, where the list came from, and the view mode.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::projects::SnapshotSource;

/// Draw the header bar at the top of the screen.
pub fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.projects;

    let source_style = match state.source {
        SnapshotSource::Enriched => Style::default().fg(Color::Green),
        SnapshotSource::Cache => Style::default().fg(Color::Blue),
        SnapshotSource::Listing => Style::default().fg(Color::Yellow),
        SnapshotSource::Pending => Style::default().fg(Color::DarkGray),
    };

    let line = Line::from(vec![
        Span::styled(
            " folio ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("Projects by {}", app.account),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(format!("{} projects", state.projects().len()), Style::default()),
        Span::raw(" │ "),
        Span::styled(state.source.display(), source_style),
        Span::raw(" │ "),
        Span::styled(state.view_mode.as_str(), Style::default().fg(Color::DarkGray)),
    ]);

    // One text row plus the bottom border; a block title would take the text row.
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}
