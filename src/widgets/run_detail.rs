use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::{format_time, timeline_list};
use crate::app::{App, DETAIL_TABS, TAB_RETROSPECTIVE, TAB_SUMMARY, TAB_TIMELINE};
use crate::domain::PlaybookRun;
use crate::theme;
use crate::timeline::{presenter, SortDirection};

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    if app.selected_run.is_none() {
        let loading =
            Paragraph::new(" Loading run...").style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(loading, area);
        return;
    }

    let layout = Layout::vertical([
        Constraint::Length(1), // tab bar
        Constraint::Fill(1),   // content
    ])
    .split(area);

    let mut tab_spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, tab) in DETAIL_TABS.iter().enumerate() {
        let style = if i == app.detail_tab {
            Style::default()
                .fg(theme::CYAN)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        tab_spans.push(Span::styled(format!(" {} ", tab), style));
        tab_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(tab_spans)), layout[0]);

    match app.detail_tab {
        TAB_SUMMARY => {
            if let Some(run) = app.selected_run.as_ref() {
                render_summary(run, frame, layout[1], app.detail_scroll);
            }
        }
        TAB_TIMELINE => timeline_list::render(app, frame, layout[1]),
        TAB_RETROSPECTIVE => render_retrospective(app, frame, layout[1]),
        _ => {}
    }
}

fn render_summary(run: &PlaybookRun, frame: &mut Frame, area: Rect, scroll: u16) {
    let ended = if run.end_at > 0 {
        format_time(run.end_at)
    } else {
        "-".to_string()
    };
    let last_update = if run.last_status_update_at > 0 {
        format_time(run.last_status_update_at)
    } else {
        "-".to_string()
    };

    let mut lines = vec![
        field_line("Name", &run.name),
        field_line("Status", run.current_status.as_str()),
        field_line("Owner", &run.owner_user_id),
        field_line("Channel", &run.channel_id),
        field_line("Started", &format_time(run.create_at)),
        field_line("Ended", &ended),
        field_line("Last Status Update", &last_update),
        field_line("Participants", &run.participant_ids.len().to_string()),
        field_line("Timeline Events", &run.timeline_events.len().to_string()),
    ];

    if !run.summary.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Summary:",
            Style::default()
                .fg(theme::CYAN)
                .add_modifier(Modifier::BOLD),
        )));
        for line in run.summary.lines() {
            lines.push(Line::from(format!("   {}", line)));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Retrospective text followed by the run's timeline oldest-first, the order
/// a written report reads in.
fn render_retrospective(app: &App, frame: &mut Frame, area: Rect) {
    let Some(run) = app.selected_run.as_ref() else {
        return;
    };
    let mut lines = vec![];

    if run.retrospective_was_canceled {
        lines.push(Line::from(Span::styled(
            " Retrospective canceled",
            Style::default().fg(theme::YELLOW),
        )));
    } else if run.retrospective_published_at > 0 {
        lines.push(Line::from(Span::styled(
            format!(
                " Published {}",
                format_time(run.retrospective_published_at)
            ),
            Style::default().fg(theme::GREEN),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            " Not published yet",
            Style::default().fg(theme::TEXT_DIM),
        )));
    }
    lines.push(Line::from(""));

    if run.retrospective.is_empty() {
        lines.push(Line::from(Span::styled(
            " (no retrospective text)",
            Style::default().fg(theme::TEXT_MUTED),
        )));
    } else {
        for line in run.retrospective.lines() {
            lines.push(Line::from(format!(" {}", line)));
        }
    }

    let events = app.visible_timeline(SortDirection::OldestFirst);
    if !events.is_empty() {
        let gaps = presenter::since_previous(&events, SortDirection::OldestFirst);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Timeline:",
            Style::default()
                .fg(theme::CYAN)
                .add_modifier(Modifier::BOLD),
        )));
        for (resolved, gap) in events.iter().zip(gaps.iter()) {
            let headline = presenter::headline(resolved);
            let gap_text = gap
                .map(|millis| format!(" (+{})", presenter::format_duration(millis)))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(
                    format!("   {} ", format_time(resolved.event.event_at)),
                    Style::default().fg(theme::TEXT_DIM),
                ),
                Span::styled(headline.title, Style::default().fg(theme::TEXT)),
                Span::styled(gap_text, Style::default().fg(theme::TEXT_MUTED)),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn field_line<'a>(label: &'a str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!(" {:<20}", label),
            Style::default().fg(theme::TEXT_DIM),
        ),
        Span::styled(value.to_string(), Style::default().fg(theme::TEXT)),
    ])
}
