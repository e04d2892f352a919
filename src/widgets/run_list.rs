use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::format_time;
use crate::app::App;
use crate::domain::RunStatus;
use crate::theme;

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let runs = match app.runs.data() {
        Some(runs) => runs,
        None => {
            let loading = ratatui::widgets::Paragraph::new(if app.runs.is_loading() {
                " Loading runs..."
            } else {
                " No runs loaded"
            })
            .style(Style::default().fg(theme::TEXT_DIM));
            frame.render_widget(loading, area);
            return;
        }
    };

    let header = Row::new(vec![
        Cell::from(" Status"),
        Cell::from("Name"),
        Cell::from("Owner"),
        Cell::from("Started"),
        Cell::from("Last Update"),
    ])
    .style(
        Style::default()
            .fg(theme::CYAN)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let rows: Vec<Row> = runs
        .iter()
        .map(|run| {
            let status_style = status_color(run.current_status);
            Row::new(vec![
                Cell::from(format!(
                    " {} {}",
                    run.current_status.symbol(),
                    run.current_status.as_str()
                ))
                .style(status_style),
                Cell::from(run.name.as_str()),
                Cell::from(run.owner_user_id.as_str()),
                Cell::from(format_time(run.create_at)),
                Cell::from(if run.last_status_update_at > 0 {
                    format_time(run.last_status_update_at)
                } else {
                    "-".to_string()
                }),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Percentage(35),
        Constraint::Percentage(20),
        Constraint::Length(17),
        Constraint::Length(17),
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

    frame.render_stateful_widget(table, area, &mut app.run_table_state);
}

fn status_color(status: RunStatus) -> Style {
    match status {
        RunStatus::InProgress => Style::default().fg(theme::GREEN),
        RunStatus::Finished => Style::default().fg(theme::BLUE),
    }
}
