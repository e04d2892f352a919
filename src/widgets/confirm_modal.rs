use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect;
use crate::app::ConfirmAction;
use crate::theme;

pub fn render(action: &ConfirmAction, frame: &mut Frame, area: Rect) {
    let message = match action {
        ConfirmAction::RemoveTimelineEvent { title, .. } => {
            format!("Remove \"{}\" from the timeline?", title)
        }
    };

    let modal_area = centered_rect(50, 7, area);

    frame.render_widget(Clear, modal_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y/Enter", Style::default().fg(theme::GREEN)),
            Span::raw(" confirm  "),
            Span::styled("n/Esc", Style::default().fg(theme::RED)),
            Span::raw(" cancel"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::YELLOW))
        .title(" Confirm ");

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal_area);
}
