use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::input::commands::matching_commands;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let (prefix, style) = match app.input_mode {
        InputMode::Command => (":", Style::default().fg(theme::YELLOW)),
        InputMode::Search => ("/", Style::default().fg(theme::GREEN)),
        _ => return,
    };

    let mut spans = vec![
        Span::styled(prefix, style),
        Span::styled(&app.input_buffer, Style::default().fg(theme::TEXT)),
    ];

    // Ghost completion text for command mode
    if app.input_mode == InputMode::Command
        && !app.input_buffer.is_empty()
        && !app.input_buffer.contains(' ')
    {
        let input_cmd = app.input_buffer.split_whitespace().next().unwrap_or("");
        let matches = matching_commands(input_cmd);
        if let Some(cmd) = matches.first() {
            let ghost = if cmd.name.starts_with(input_cmd) && cmd.name.len() > input_cmd.len() {
                &cmd.name[input_cmd.len()..]
            } else {
                ""
            };
            if !ghost.is_empty() {
                spans.push(Span::styled(ghost, Style::default().fg(theme::TEXT_MUTED)));
            }
        }
    }

    spans.push(Span::styled("_", Style::default().fg(theme::TEXT_MUTED)));

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}

pub fn render_suggestions(app: &App, frame: &mut Frame, area: Rect) {
    if app.input_mode != InputMode::Command {
        return;
    }

    let input_cmd = app.input_buffer.split_whitespace().next().unwrap_or("");
    if input_cmd.is_empty() {
        // Show all commands when input is empty
        let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default())];
        for cmd in crate::input::commands::COMMANDS {
            spans.push(Span::styled(
                format!(":{}", cmd.name),
                Style::default().fg(theme::CYAN),
            ));
            spans.push(Span::styled(
                format!(" {} ", cmd.description),
                Style::default().fg(theme::TEXT_MUTED),
            ));
            spans.push(Span::styled(" | ", Style::default().fg(theme::TEXT_MUTED)));
        }
        spans.pop(); // remove trailing separator
        let line = Line::from(spans);
        let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_BAR));
        frame.render_widget(widget, area);
        return;
    }

    // No suggestions once a full command plus arguments is typed
    if app.input_buffer.contains(' ') {
        let widget = Paragraph::new("").style(Style::default().bg(theme::BG_BAR));
        frame.render_widget(widget, area);
        return;
    }

    let matches = matching_commands(input_cmd);
    if matches.is_empty() {
        let widget = Paragraph::new(Line::from(Span::styled(
            " No matching commands",
            Style::default().fg(theme::TEXT_MUTED),
        )))
        .style(Style::default().bg(theme::BG_BAR));
        frame.render_widget(widget, area);
        return;
    }

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default())];
    for (i, cmd) in matches.iter().enumerate() {
        let cmd_style = if i == 0 {
            Style::default().fg(theme::CYAN)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        spans.push(Span::styled(format!(":{}", cmd.name), cmd_style));
        for alias in cmd.aliases {
            spans.push(Span::styled(
                format!("|{}", alias),
                Style::default().fg(theme::TEXT_MUTED),
            ));
        }
        spans.push(Span::styled(
            format!(" {} ", cmd.description),
            Style::default().fg(theme::TEXT_DIM),
        ));
        if i < matches.len() - 1 {
            spans.push(Span::styled("  ", Style::default()));
        }
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}
