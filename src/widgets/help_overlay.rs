use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::app::View;
use crate::theme;

pub fn render(view: &View, frame: &mut Frame, area: Rect) {
    let mut lines = vec![];

    let is_list = *view == View::RunList;
    let is_detail = *view == View::RunDetail;

    lines.push(Line::from(""));
    lines.push(section("Navigation"));
    lines.push(binding("j / k / Up / Down", "Navigate up/down"));
    lines.push(binding("gg / G", "Go to top / bottom"));
    lines.push(binding("Ctrl+D / Ctrl+U", "Page down / up"));
    if is_list {
        lines.push(binding("Enter", "Open run"));
        lines.push(binding("/ (slash)", "Search runs"));
    }
    if is_detail {
        lines.push(binding("h / l / Tab", "Switch detail tabs"));
        lines.push(binding("Esc", "Back to run list"));
    }

    if is_detail {
        lines.push(Line::from(""));
        lines.push(section("Timeline"));
        lines.push(binding("f", "Filter events by type"));
        lines.push(binding("x", "Remove selected event"));
        lines.push(binding("e", "Channel export link"));
    }

    lines.push(Line::from(""));
    lines.push(section("Commands"));
    lines.push(binding(": (colon)", "Command mode"));
    lines.push(binding(":team <id>", "Scope run list to a team"));
    lines.push(binding(":export", "Show the channel export link"));
    lines.push(binding(":q", "Quit"));

    lines.push(Line::from(""));
    lines.push(section("General"));
    lines.push(binding("Ctrl+R", "Refresh"));
    lines.push(binding("p", "Pause/resume polling"));
    lines.push(binding("?", "Toggle this help"));

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));
    let modal_area = centered_rect(60, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Help (? to close) ");

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal_area);
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("    {:<22}", key),
            Style::default().fg(theme::YELLOW),
        ),
        Span::styled(desc, Style::default().fg(theme::TEXT)),
    ])
}
