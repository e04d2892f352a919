use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode, View, TAB_TIMELINE};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Command => vec![hint("Esc", "cancel"), hint("Enter", "execute")],
        InputMode::Search => vec![hint("Esc", "cancel"), hint("Enter", "apply")],
        InputMode::PendingG => vec![hint("g", "top")],
        InputMode::Normal => match app.view {
            View::RunList => vec![
                hint("j/k", "nav"),
                hint("Enter", "open"),
                hint("/", "search"),
                hint(":", "cmd"),
                hint("?", "help"),
                hint("q", "quit"),
            ],
            View::RunDetail => {
                let mut hints = vec![
                    hint("h/l", "tabs"),
                    hint("j/k", "nav"),
                    hint("Esc", "back"),
                    hint("e", "export"),
                ];
                if app.detail_tab == TAB_TIMELINE {
                    hints.insert(2, hint("f", "filter"));
                    hints.insert(3, hint("x", "remove"));
                }
                hints.push(hint("?", "help"));
                hints
            }
        },
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            key.as_str(),
            Style::default().fg(theme::ACCENT),
        ));
        spans.push(Span::styled(
            format!(":{}", desc),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}

fn hint(key: &str, desc: &str) -> (String, String) {
    (key.to_string(), desc.to_string())
}
