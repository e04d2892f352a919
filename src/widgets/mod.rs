pub mod command_input;
pub mod confirm_modal;
pub mod error_toast;
pub mod filter_menu;
pub mod footer;
pub mod help_overlay;
pub mod run_detail;
pub mod run_list;
pub mod tab_bar;
pub mod timeline_list;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub(crate) fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}

pub(crate) fn format_time(epoch_millis: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(epoch_millis) {
        Some(dt) => dt
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "-".to_string(),
    }
}
