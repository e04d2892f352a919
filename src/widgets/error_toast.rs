use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let toast_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(2),
        width: area.width,
        height: 1,
    };

    if let Some((ref msg, _)) = app.last_error {
        let line = Line::from(vec![
            Span::styled(" ERROR ", Style::default().fg(Color::White).bg(theme::RED)),
            Span::styled(format!(" {}", msg), Style::default().fg(theme::RED)),
        ]);
        frame.render_widget(Paragraph::new(line), toast_area);
        return;
    }

    if let Some((ref msg, _)) = app.last_notice {
        let line = Line::from(vec![
            Span::styled(" » ", Style::default().fg(theme::GREEN)),
            Span::styled(msg.as_str(), Style::default().fg(theme::TEXT)),
        ]);
        frame.render_widget(Paragraph::new(line), toast_area);
    }
}
