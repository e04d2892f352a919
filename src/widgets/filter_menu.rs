use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table};
use ratatui::Frame;

use super::centered_rect;
use crate::app::App;
use crate::theme;
use crate::timeline::FilterOption;

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let filter = app.current_filter();

    let height = (FilterOption::ALL.len() as u16 + 3).min(area.height.saturating_sub(4));
    let modal_area = centered_rect(40, height, area);
    frame.render_widget(Clear, modal_area);

    let rows: Vec<Row> = FilterOption::ALL
        .iter()
        .map(|option| {
            let checked = if filter.selected(*option) { "[x]" } else { "[ ]" };
            // Individual options are inert while "All events" is on.
            let style = if filter.all && *option != FilterOption::All {
                Style::default().fg(theme::TEXT_MUTED)
            } else {
                Style::default().fg(theme::TEXT)
            };
            Row::new(vec![Cell::from(format!(" {} {}", checked, option.label())).style(style)])
        })
        .collect();

    let widths = [Constraint::Fill(1)];

    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(" Timeline Filter (Space to toggle, Esc to close) "),
        )
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, modal_area, &mut app.filter_menu_state);
}
