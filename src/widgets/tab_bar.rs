use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, ConnectionStatus, View};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let mut left_spans: Vec<Span> = vec![
        Span::styled(
            " p9s ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(
            "Runs",
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if app.view == View::RunDetail {
        if let Some(run) = &app.selected_run {
            left_spans.push(Span::styled(" > ", Style::default().fg(theme::TEXT_MUTED)));
            left_spans.push(Span::styled(
                run.name.as_str(),
                Style::default().fg(theme::TEXT_DIM),
            ));
        }
    }

    // Active search indicator
    if let Some(ref query) = app.search_query {
        left_spans.push(Span::styled("  /", Style::default().fg(theme::GREEN)));
        left_spans.push(Span::styled(
            query.as_str(),
            Style::default().fg(theme::TEXT),
        ));
    }

    let mut right_spans: Vec<Span> = Vec::new();

    let connection_indicator = match &app.connection_status {
        ConnectionStatus::Connected => {
            Span::styled("● Connected", Style::default().fg(theme::GREEN))
        }
        ConnectionStatus::Connecting => {
            Span::styled("◌ Connecting...", Style::default().fg(theme::YELLOW))
        }
        ConnectionStatus::Disconnected => {
            Span::styled("○ Disconnected", Style::default().fg(theme::TEXT_MUTED))
        }
        ConnectionStatus::Error(msg) => {
            Span::styled(format!("✗ {}", msg), Style::default().fg(theme::RED))
        }
    };
    right_spans.push(connection_indicator);

    if let Some(ref team) = app.team_id {
        right_spans.push(Span::styled(
            format!("  team:{}", team),
            Style::default().fg(theme::ACCENT),
        ));
    }

    if !app.polling_enabled {
        right_spans.push(Span::styled(
            "  ⏸ paused",
            Style::default().fg(theme::YELLOW),
        ));
    } else if app.error_count > 0 {
        right_spans.push(Span::styled(
            format!("  ↻ backoff {}s", app.polling_interval.as_secs()),
            Style::default().fg(theme::YELLOW),
        ));
    } else {
        right_spans.push(Span::styled(
            "  ↻ polling",
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    if let Some(count) = app.total_count {
        right_spans.push(Span::styled(
            format!("  [{} runs]", count),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    right_spans.push(Span::raw(" "));

    // Calculate widths and fill gap with spaces
    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let total_width = area.width as usize;
    let gap = total_width.saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(gap)));
    spans.extend(right_spans);

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}
