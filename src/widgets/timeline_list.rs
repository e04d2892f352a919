use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use super::format_time;
use crate::app::App;
use crate::theme;
use crate::timeline::{presenter, SortDirection};

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    if app.timeline.data().is_none() {
        let loading = Paragraph::new(if app.timeline.is_loading() {
            " Resolving timeline..."
        } else {
            " No timeline loaded"
        })
        .style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(loading, area);
        return;
    }

    let events = app.visible_timeline(SortDirection::NewestFirst);
    let total = app.resolved_event_count();
    let gaps = presenter::since_previous(&events, SortDirection::NewestFirst);

    let layout = Layout::vertical([
        Constraint::Length(1), // count line
        Constraint::Fill(1),   // table
    ])
    .split(area);

    let count_line = Line::from(vec![
        Span::styled(
            format!(" Showing {} of {} events", events.len(), total),
            Style::default().fg(theme::TEXT_DIM),
        ),
        Span::styled("  f", Style::default().fg(theme::ACCENT)),
        Span::styled(":filter  ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled("x", Style::default().fg(theme::ACCENT)),
        Span::styled(":remove", Style::default().fg(theme::TEXT_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(count_line), layout[0]);

    if events.is_empty() {
        let empty = Paragraph::new(" No events match the current filter")
            .style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(empty, layout[1]);
        return;
    }

    let header = Row::new(vec![
        Cell::from(" When"),
        Cell::from("Gap"),
        Cell::from(""),
        Cell::from("Event"),
    ])
    .style(
        Style::default()
            .fg(theme::CYAN)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let rows: Vec<Row> = events
        .iter()
        .zip(gaps.iter())
        .map(|(resolved, gap)| {
            let deleted = presenter::status_post_deleted(resolved);
            let headline = presenter::headline(resolved);

            let title = if deleted {
                format!("{} (deleted)", headline.title)
            } else {
                headline.title
            };
            let title_style = if deleted {
                Style::default()
                    .fg(theme::TEXT_MUTED)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(theme::TEXT)
            };
            let mut event_spans = vec![Span::styled(title, title_style)];
            if let Some(detail) = headline.detail {
                event_spans.push(Span::styled(
                    format!("  {}", detail),
                    Style::default().fg(theme::TEXT_DIM),
                ));
            }

            let gap_text = gap
                .map(|millis| format!("+{}", presenter::format_duration(millis)))
                .unwrap_or_default();

            Row::new(vec![
                Cell::from(format!(" {}", format_time(resolved.event.event_at))),
                Cell::from(gap_text).style(Style::default().fg(theme::TEXT_DIM)),
                Cell::from(resolved.event.event_type.symbol())
                    .style(Style::default().fg(theme::ACCENT)),
                Cell::from(Line::from(event_spans)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(18),
        Constraint::Length(9),
        Constraint::Length(2),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE))
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, layout[1], &mut app.timeline_table_state);
}
