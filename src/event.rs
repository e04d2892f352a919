use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::app::{InputMode, Overlay, View, TAB_TIMELINE};

pub struct RawEventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

impl RawEventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    event = reader.next() => {
                        match event {
                            Some(Ok(Event::Key(key))) => {
                                if tx.send(AppEvent::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Some(Ok(_)) => {}
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Map a key event to an action based on current app state. The confirm and
/// filter-menu overlays need app state to resolve and are handled in the
/// main loop before this runs.
pub fn key_to_action(
    key: KeyEvent,
    view: &View,
    detail_tab: usize,
    input_mode: &InputMode,
    overlay: &Overlay,
    input_buffer: &str,
) -> Option<Action> {
    match overlay {
        Overlay::Help => {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    Some(Action::ToggleHelp)
                }
                _ => None,
            };
        }
        Overlay::Confirm(_) | Overlay::FilterMenu => {
            return match key.code {
                KeyCode::Esc => Some(Action::CloseOverlay),
                _ => None,
            };
        }
        Overlay::None => {}
    }

    match input_mode {
        InputMode::Command => {
            return match key.code {
                KeyCode::Esc => Some(Action::CloseOverlay),
                KeyCode::Enter => Some(Action::SubmitCommandInput(input_buffer.to_string())),
                KeyCode::Tab => {
                    // Tab completion: fill with first matching command
                    let input_cmd = input_buffer.split_whitespace().next().unwrap_or("");
                    let matches = crate::input::commands::matching_commands(input_cmd);
                    if let Some(cmd) = matches.first() {
                        let completed = format!("{} ", cmd.name);
                        Some(Action::UpdateInputBuffer(completed))
                    } else {
                        None
                    }
                }
                KeyCode::Backspace => {
                    let mut buf = input_buffer.to_string();
                    buf.pop();
                    Some(Action::UpdateInputBuffer(buf))
                }
                KeyCode::Char(c) => {
                    let mut buf = input_buffer.to_string();
                    buf.push(c);
                    Some(Action::UpdateInputBuffer(buf))
                }
                _ => None,
            };
        }
        InputMode::Search => {
            return match key.code {
                KeyCode::Esc => Some(Action::CloseOverlay),
                KeyCode::Enter => Some(Action::SubmitSearch(input_buffer.to_string())),
                KeyCode::Backspace => {
                    let mut buf = input_buffer.to_string();
                    buf.pop();
                    Some(Action::UpdateInputBuffer(buf))
                }
                KeyCode::Char(c) => {
                    let mut buf = input_buffer.to_string();
                    buf.push(c);
                    Some(Action::UpdateInputBuffer(buf))
                }
                _ => None,
            };
        }
        InputMode::PendingG => {
            return match key.code {
                KeyCode::Char('g') => Some(Action::NavigateTop),
                _ => Some(Action::Back), // Cancel the pending chord
            };
        }
        InputMode::Normal => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('d') => Some(Action::PageDown),
            KeyCode::Char('u') => Some(Action::PageUp),
            _ => None,
        };
    }

    match key.code {
        // Global
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(':') => Some(Action::OpenCommandInput),
        KeyCode::Char('/') if *view == View::RunList => Some(Action::OpenSearch),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::NavigateDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::NavigateUp),
        KeyCode::Char('g') => Some(Action::EnterPendingG),
        KeyCode::Char('G') => Some(Action::NavigateBottom),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::BackTab => Some(Action::PrevTab),

        KeyCode::Char('l') if *view == View::RunDetail => Some(Action::NextTab),
        KeyCode::Char('h') if *view == View::RunDetail => Some(Action::PrevTab),
        KeyCode::Char('f') if *view == View::RunDetail && detail_tab == TAB_TIMELINE => {
            Some(Action::OpenFilterMenu)
        }
        KeyCode::Char('x') if *view == View::RunDetail && detail_tab == TAB_TIMELINE => {
            Some(Action::RequestRemoveEvent)
        }
        KeyCode::Char('e') if *view == View::RunDetail => Some(Action::ExportChannel),
        KeyCode::Char('p') => Some(Action::TogglePolling),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn filter_key_only_applies_on_timeline_tab() {
        let action = key_to_action(
            key('f'),
            &View::RunDetail,
            TAB_TIMELINE,
            &InputMode::Normal,
            &Overlay::None,
            "",
        );
        assert!(matches!(action, Some(Action::OpenFilterMenu)));

        let action = key_to_action(
            key('f'),
            &View::RunDetail,
            0,
            &InputMode::Normal,
            &Overlay::None,
            "",
        );
        assert!(action.is_none());

        let action = key_to_action(
            key('f'),
            &View::RunList,
            0,
            &InputMode::Normal,
            &Overlay::None,
            "",
        );
        assert!(action.is_none());
    }

    #[test]
    fn command_mode_keys_edit_the_buffer() {
        let action = key_to_action(
            key('r'),
            &View::RunList,
            0,
            &InputMode::Command,
            &Overlay::None,
            "",
        );
        assert!(matches!(action, Some(Action::UpdateInputBuffer(buf)) if buf == "r"));

        let action = key_to_action(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            &View::RunList,
            0,
            &InputMode::Command,
            &Overlay::None,
            "runs",
        );
        assert!(matches!(action, Some(Action::SubmitCommandInput(cmd)) if cmd == "runs"));
    }
}
