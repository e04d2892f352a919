use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::widgets::TableState;

use crate::action::Action;
use crate::domain::*;
use crate::timeline::{
    filter::is_visible, presenter, FilterOption, ResolvedEvent, SortDirection, TimelineFilter,
};

pub const DETAIL_TABS: &[&str] = &["Summary", "Timeline", "Retrospective"];

pub const TAB_SUMMARY: usize = 0;
pub const TAB_TIMELINE: usize = 1;
pub const TAB_RETROSPECTIVE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    RunList,
    RunDetail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    Search,
    PendingG,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    FilterMenu,
    Confirm(ConfirmAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    RemoveTimelineEvent {
        run_id: String,
        event_id: String,
        title: String,
    },
}

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    NotLoaded,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error(String),
}

#[derive(Debug, Clone)]
pub enum Effect {
    LoadRuns,
    LoadMoreRuns,
    LoadRun(String),
    LoadRunByChannel(String),
    ResolveTimeline {
        run: Box<PlaybookRun>,
        generation: u64,
    },
    RemoveTimelineEvent {
        run_id: String,
        event_id: String,
    },
    ExportChannel(String),
    Quit,
}

pub struct App {
    // View state
    pub view: View,
    pub input_mode: InputMode,
    pub overlay: Overlay,

    // Connection
    pub team_id: Option<String>,
    pub name_display: NameDisplay,
    pub connection_status: ConnectionStatus,

    // Run list
    pub runs: LoadState<Vec<PlaybookRun>>,
    pub total_count: Option<u64>,
    pub has_more: bool,
    pub page: u64,
    pub run_table_state: TableState,
    pub loading_more: bool,

    // Run detail
    pub selected_run: Option<PlaybookRun>,
    pub detail_tab: usize,
    pub detail_scroll: u16,

    // Timeline
    pub timeline: LoadState<Vec<ResolvedEvent>>,
    pub timeline_table_state: TableState,
    /// Monotonic batch counter. Bumped every time a resolve is requested;
    /// a `TimelineResolved` carrying an older generation is a stale batch
    /// and gets discarded.
    pub timeline_generation: u64,
    pub filters_by_channel: HashMap<String, TimelineFilter>,
    pub filter_menu_state: TableState,

    // Input
    pub input_buffer: String,
    pub search_query: Option<String>,

    // Polling
    pub polling_enabled: bool,
    pub polling_interval: Duration,
    pub base_polling_interval: Duration,
    pub last_refresh: Option<Instant>,
    pub error_count: u32,

    // App
    pub should_quit: bool,
    pub last_error: Option<(String, Instant)>,
    pub last_notice: Option<(String, Instant)>,
    pub page_size: u64,
}

impl App {
    pub fn new(team_id: Option<String>, name_display: NameDisplay) -> Self {
        Self {
            view: View::RunList,
            input_mode: InputMode::Normal,
            overlay: Overlay::None,

            team_id,
            name_display,
            connection_status: ConnectionStatus::Connecting,

            runs: LoadState::NotLoaded,
            total_count: None,
            has_more: false,
            page: 0,
            run_table_state: TableState::default(),
            loading_more: false,

            selected_run: None,
            detail_tab: TAB_SUMMARY,
            detail_scroll: 0,

            timeline: LoadState::NotLoaded,
            timeline_table_state: TableState::default(),
            timeline_generation: 0,
            filters_by_channel: HashMap::new(),
            filter_menu_state: TableState::default(),

            input_buffer: String::new(),
            search_query: None,

            polling_enabled: true,
            polling_interval: Duration::from_secs(3),
            base_polling_interval: Duration::from_secs(3),
            last_refresh: None,
            error_count: 0,

            should_quit: false,
            last_error: None,
            last_notice: None,
            page_size: 50,
        }
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        // Clear stale toasts
        if let Some((_, at)) = &self.last_error {
            if at.elapsed() > Duration::from_secs(5) {
                self.last_error = None;
            }
        }
        if let Some((_, at)) = &self.last_notice {
            if at.elapsed() > Duration::from_secs(8) {
                self.last_notice = None;
            }
        }

        match action {
            // Navigation
            Action::NavigateUp => {
                self.navigate_up();
                vec![]
            }
            Action::NavigateDown => {
                self.navigate_down();
                self.maybe_load_more()
            }
            Action::NavigateTop => {
                self.input_mode = InputMode::Normal;
                self.navigate_top();
                vec![]
            }
            Action::NavigateBottom => {
                self.navigate_bottom();
                self.maybe_load_more()
            }
            Action::PageUp => {
                if self.scrolls_detail_body() {
                    self.detail_scroll =
                        self.detail_scroll.saturating_sub(self.page_height() as u16);
                } else {
                    for _ in 0..self.page_height() {
                        self.navigate_up();
                    }
                }
                vec![]
            }
            Action::PageDown => {
                if self.scrolls_detail_body() {
                    self.detail_scroll =
                        self.detail_scroll.saturating_add(self.page_height() as u16);
                } else {
                    for _ in 0..self.page_height() {
                        self.navigate_down();
                    }
                }
                self.maybe_load_more()
            }
            Action::Select => self.handle_select(),
            Action::Back => self.handle_back(),

            // Vim chord
            Action::EnterPendingG => {
                self.input_mode = InputMode::PendingG;
                vec![]
            }

            // UI
            Action::OpenCommandInput => {
                self.input_mode = InputMode::Command;
                self.input_buffer.clear();
                vec![]
            }
            Action::OpenSearch => {
                self.input_mode = InputMode::Search;
                self.input_buffer = self.search_query.clone().unwrap_or_default();
                vec![]
            }
            Action::CloseOverlay => {
                if self.overlay != Overlay::None {
                    self.overlay = Overlay::None;
                } else if self.input_mode != InputMode::Normal {
                    self.input_mode = InputMode::Normal;
                    self.input_buffer.clear();
                }
                vec![]
            }
            Action::SubmitCommandInput(cmd) => {
                self.input_mode = InputMode::Normal;
                let effects = self.execute_command(&cmd);
                self.input_buffer.clear();
                effects
            }
            Action::UpdateInputBuffer(buf) => {
                self.input_buffer = buf;
                vec![]
            }
            Action::SubmitSearch(query) => {
                self.input_mode = InputMode::Normal;
                self.search_query = if query.is_empty() { None } else { Some(query) };
                self.input_buffer.clear();
                self.page = 0;
                self.run_table_state = TableState::default();
                vec![Effect::LoadRuns]
            }
            Action::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
                vec![]
            }

            // Detail tabs
            Action::NextTab => {
                if self.view == View::RunDetail {
                    self.detail_tab = (self.detail_tab + 1) % DETAIL_TABS.len();
                    self.detail_scroll = 0;
                }
                vec![]
            }
            Action::PrevTab => {
                if self.view == View::RunDetail {
                    self.detail_tab = if self.detail_tab == 0 {
                        DETAIL_TABS.len() - 1
                    } else {
                        self.detail_tab - 1
                    };
                    self.detail_scroll = 0;
                }
                vec![]
            }

            // Timeline
            Action::OpenFilterMenu => {
                if self.view == View::RunDetail && self.detail_tab == TAB_TIMELINE {
                    self.overlay = Overlay::FilterMenu;
                    if self.filter_menu_state.selected().is_none() {
                        self.filter_menu_state.select_first();
                    }
                }
                vec![]
            }
            Action::ToggleFilterOption(option) => {
                self.toggle_filter_option(option);
                vec![]
            }
            Action::RequestRemoveEvent => {
                self.request_remove_event();
                vec![]
            }
            Action::ExportChannel => {
                if let Some(run) = &self.selected_run {
                    return vec![Effect::ExportChannel(run.channel_id.clone())];
                }
                self.last_error = Some(("no run selected".to_string(), Instant::now()));
                vec![]
            }

            // Data responses
            Action::RunsLoaded(page) => {
                self.total_count = Some(page.total_count);
                self.has_more = page.has_more;
                self.runs = LoadState::Loaded(page.items);
                self.loading_more = false;
                self.connection_status = ConnectionStatus::Connected;
                self.reset_backoff();
                self.last_refresh = Some(Instant::now());
                if self.run_table_state.selected().is_none() {
                    self.run_table_state.select_first();
                }
                vec![]
            }
            Action::MoreRunsLoaded(page) => {
                if let LoadState::Loaded(ref mut existing) = self.runs {
                    existing.extend(page.items);
                }
                self.has_more = page.has_more;
                self.total_count = Some(page.total_count);
                self.loading_more = false;
                self.connection_status = ConnectionStatus::Connected;
                self.reset_backoff();
                vec![]
            }
            Action::RunLoaded(run) => {
                self.connection_status = ConnectionStatus::Connected;
                self.reset_backoff();
                self.last_refresh = Some(Instant::now());
                self.timeline_generation += 1;
                self.timeline = LoadState::Loading;
                let generation = self.timeline_generation;
                self.selected_run = Some(*run.clone());
                vec![Effect::ResolveTimeline { run, generation }]
            }
            Action::TimelineResolved { generation, events } => {
                if generation != self.timeline_generation {
                    // A newer run view superseded this batch.
                    return vec![];
                }
                self.timeline = LoadState::Loaded(events);
                if self.timeline_table_state.selected().is_none() {
                    self.timeline_table_state.select_first();
                }
                vec![]
            }
            Action::EventRemoved => {
                if let Some(run) = &self.selected_run {
                    return vec![Effect::LoadRun(run.id.clone())];
                }
                vec![]
            }

            // App control
            Action::Refresh => self.refresh_current_view(),
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            Action::Tick => {
                if self.polling_enabled {
                    let should_poll = self
                        .last_refresh
                        .map(|t| t.elapsed() >= self.polling_interval)
                        .unwrap_or(true);
                    if should_poll {
                        return self.refresh_current_view();
                    }
                }
                vec![]
            }
            Action::Error(msg) => {
                self.last_error = Some((msg.clone(), Instant::now()));
                self.error_count += 1;
                self.apply_backoff();
                if self.connection_status == ConnectionStatus::Connected {
                    self.connection_status = ConnectionStatus::Error(msg);
                }
                vec![]
            }
            Action::Notice(msg) => {
                self.last_notice = Some((msg, Instant::now()));
                vec![]
            }
            Action::ClearError => {
                self.last_error = None;
                self.last_notice = None;
                vec![]
            }
            Action::TogglePolling => {
                self.polling_enabled = !self.polling_enabled;
                vec![]
            }
        }
    }

    /// The filter for the selected run's channel. Channels that were never
    /// touched get the default filter.
    pub fn current_filter(&self) -> TimelineFilter {
        self.selected_run
            .as_ref()
            .and_then(|run| self.filters_by_channel.get(&run.channel_id))
            .copied()
            .unwrap_or_default()
    }

    /// The resolved timeline, filtered and ordered for display. Derived on
    /// demand so a filter change takes effect on the next frame without a
    /// re-resolve.
    pub fn visible_timeline(&self, direction: SortDirection) -> Vec<ResolvedEvent> {
        let filter = self.current_filter();
        let mut events: Vec<ResolvedEvent> = self
            .timeline
            .data()
            .map(|events| {
                events
                    .iter()
                    .filter(|resolved| is_visible(resolved.event.event_type, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        presenter::sort_events(&mut events, direction);
        events
    }

    pub fn resolved_event_count(&self) -> usize {
        self.timeline.data().map(|events| events.len()).unwrap_or(0)
    }

    fn toggle_filter_option(&mut self, option: FilterOption) {
        let Some(run) = &self.selected_run else {
            return;
        };
        let filter = self
            .filters_by_channel
            .entry(run.channel_id.clone())
            .or_default();
        filter.toggle(option);
        self.clamp_timeline_selection();
    }

    fn clamp_timeline_selection(&mut self) {
        let len = self.visible_timeline(SortDirection::NewestFirst).len();
        match self.timeline_table_state.selected() {
            Some(_) if len == 0 => self.timeline_table_state.select(None),
            Some(idx) if idx >= len => self.timeline_table_state.select(Some(len - 1)),
            None if len > 0 => self.timeline_table_state.select_first(),
            _ => {}
        }
    }

    fn request_remove_event(&mut self) {
        if self.view != View::RunDetail || self.detail_tab != TAB_TIMELINE {
            return;
        }
        let Some(run_id) = self.selected_run.as_ref().map(|run| run.id.clone()) else {
            return;
        };
        let events = self.visible_timeline(SortDirection::NewestFirst);
        let Some(resolved) = self
            .timeline_table_state
            .selected()
            .and_then(|idx| events.get(idx))
        else {
            self.last_error = Some(("no event selected".to_string(), Instant::now()));
            return;
        };
        self.overlay = Overlay::Confirm(ConfirmAction::RemoveTimelineEvent {
            run_id,
            event_id: resolved.event.id.clone(),
            title: presenter::headline(resolved).title,
        });
    }

    /// Resolves the pending confirm overlay affirmatively.
    pub fn confirm_pending(&mut self) -> Vec<Effect> {
        let overlay = std::mem::replace(&mut self.overlay, Overlay::None);
        match overlay {
            Overlay::Confirm(ConfirmAction::RemoveTimelineEvent {
                run_id, event_id, ..
            }) => {
                vec![Effect::RemoveTimelineEvent { run_id, event_id }]
            }
            other => {
                self.overlay = other;
                vec![]
            }
        }
    }

    fn handle_select(&mut self) -> Vec<Effect> {
        if self.view != View::RunList {
            return vec![];
        }
        let Some(run_id) = self
            .runs
            .data()
            .zip(self.run_table_state.selected())
            .and_then(|(runs, idx)| runs.get(idx))
            .map(|run| run.id.clone())
        else {
            return vec![];
        };
        self.view = View::RunDetail;
        self.detail_tab = TAB_SUMMARY;
        self.detail_scroll = 0;
        self.timeline = LoadState::Loading;
        self.timeline_table_state = TableState::default();
        vec![Effect::LoadRun(run_id)]
    }

    fn handle_back(&mut self) -> Vec<Effect> {
        self.input_mode = InputMode::Normal;
        if self.view == View::RunDetail {
            self.view = View::RunList;
            self.selected_run = None;
            self.timeline = LoadState::NotLoaded;
            self.timeline_table_state = TableState::default();
        }
        vec![]
    }

    fn execute_command(&mut self, cmd: &str) -> Vec<Effect> {
        let parts: Vec<&str> = cmd.trim().splitn(2, ' ').collect();
        let command = parts[0].to_lowercase();
        let args = parts.get(1).map(|s| s.trim());

        match command.as_str() {
            "runs" | "r" => {
                self.view = View::RunList;
                self.selected_run = None;
                vec![Effect::LoadRuns]
            }
            "filter" | "f" => {
                if self.view == View::RunDetail {
                    self.detail_tab = TAB_TIMELINE;
                    self.overlay = Overlay::FilterMenu;
                    if self.filter_menu_state.selected().is_none() {
                        self.filter_menu_state.select_first();
                    }
                } else {
                    self.last_error =
                        Some(("filter needs an open run".to_string(), Instant::now()));
                }
                vec![]
            }
            "export" | "exp" => {
                if let Some(run) = &self.selected_run {
                    vec![Effect::ExportChannel(run.channel_id.clone())]
                } else {
                    self.last_error = Some(("no run selected".to_string(), Instant::now()));
                    vec![]
                }
            }
            "channel" | "ch" => {
                if let Some(channel_id) = args {
                    self.view = View::RunDetail;
                    self.detail_tab = TAB_SUMMARY;
                    self.detail_scroll = 0;
                    self.timeline = LoadState::Loading;
                    self.timeline_table_state = TableState::default();
                    vec![Effect::LoadRunByChannel(channel_id.to_string())]
                } else {
                    self.last_error =
                        Some(("usage: :channel <channel-id>".to_string(), Instant::now()));
                    vec![]
                }
            }
            "team" => {
                if let Some(team_id) = args {
                    self.team_id = Some(team_id.to_string());
                    self.view = View::RunList;
                    self.selected_run = None;
                    self.runs = LoadState::NotLoaded;
                    self.run_table_state = TableState::default();
                    self.page = 0;
                    vec![Effect::LoadRuns]
                } else {
                    self.last_error =
                        Some(("usage: :team <team-id>".to_string(), Instant::now()));
                    vec![]
                }
            }
            "quit" | "q" => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            "help" | "h" => {
                self.overlay = Overlay::Help;
                vec![]
            }
            _ => {
                self.last_error = Some((format!("unknown command: {}", command), Instant::now()));
                vec![]
            }
        }
    }

    fn refresh_current_view(&mut self) -> Vec<Effect> {
        match self.view {
            View::RunList => vec![Effect::LoadRuns],
            View::RunDetail => {
                if let Some(run) = &self.selected_run {
                    vec![Effect::LoadRun(run.id.clone())]
                } else {
                    vec![]
                }
            }
        }
    }

    fn navigate_up(&mut self) {
        match self.view {
            View::RunList => self.run_table_state.select_previous(),
            View::RunDetail if self.detail_tab == TAB_TIMELINE => {
                self.timeline_table_state.select_previous();
            }
            View::RunDetail => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
        }
    }

    fn navigate_down(&mut self) {
        match self.view {
            View::RunList => {
                if self.runs.data().map(|r| r.len()).unwrap_or(0) > 0 {
                    self.run_table_state.select_next();
                }
            }
            View::RunDetail if self.detail_tab == TAB_TIMELINE => {
                if !self.visible_timeline(SortDirection::NewestFirst).is_empty() {
                    self.timeline_table_state.select_next();
                }
            }
            View::RunDetail => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
        }
    }

    fn navigate_top(&mut self) {
        match self.view {
            View::RunList => self.run_table_state.select_first(),
            View::RunDetail if self.detail_tab == TAB_TIMELINE => {
                self.timeline_table_state.select_first();
            }
            View::RunDetail => self.detail_scroll = 0,
        }
    }

    fn navigate_bottom(&mut self) {
        match self.view {
            View::RunList => self.run_table_state.select_last(),
            View::RunDetail if self.detail_tab == TAB_TIMELINE => {
                self.timeline_table_state.select_last();
            }
            View::RunDetail => self.detail_scroll = u16::MAX,
        }
    }

    fn scrolls_detail_body(&self) -> bool {
        self.view == View::RunDetail && self.detail_tab != TAB_TIMELINE
    }

    fn reset_backoff(&mut self) {
        self.error_count = 0;
        self.polling_interval = self.base_polling_interval;
    }

    fn apply_backoff(&mut self) {
        let multiplier = 2u64.pow(self.error_count.min(5));
        let backoff_secs = self.base_polling_interval.as_secs() * multiplier;
        self.polling_interval = Duration::from_secs(backoff_secs.min(60));
    }

    fn maybe_load_more(&mut self) -> Vec<Effect> {
        if self.view != View::RunList || self.loading_more || !self.has_more {
            return vec![];
        }
        if let Some(runs) = self.runs.data() {
            if let Some(selected) = self.run_table_state.selected() {
                if selected + 5 >= runs.len() {
                    self.loading_more = true;
                    self.page += 1;
                    return vec![Effect::LoadMoreRuns];
                }
            }
        }
        vec![]
    }

    fn page_height(&self) -> usize {
        20 // approximate; could be made dynamic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TimelineEvent, TimelineEventType};

    fn run(id: &str, channel_id: &str) -> PlaybookRun {
        PlaybookRun {
            id: id.to_string(),
            name: format!("run {id}"),
            summary: String::new(),
            owner_user_id: "owner".to_string(),
            team_id: "team".to_string(),
            channel_id: channel_id.to_string(),
            create_at: 0,
            end_at: 0,
            current_status: RunStatus::InProgress,
            last_status_update_at: 0,
            participant_ids: vec![],
            status_posts: vec![],
            timeline_events: vec![],
            retrospective: String::new(),
            retrospective_published_at: 0,
            retrospective_was_canceled: false,
        }
    }

    fn resolved(id: &str, event_at: i64, event_type: TimelineEventType) -> ResolvedEvent {
        ResolvedEvent {
            event: TimelineEvent {
                id: id.to_string(),
                playbook_run_id: String::new(),
                create_at: event_at,
                delete_at: 0,
                event_at,
                event_type,
                summary: String::new(),
                details: String::new(),
                post_id: String::new(),
                subject_user_id: "u1".to_string(),
                creator_user_id: String::new(),
            },
            subject_display_name: "alice".to_string(),
            status_delete_at: 0,
        }
    }

    fn app_with_open_run() -> App {
        let mut app = App::new(None, NameDisplay::Username);
        let effects = app.update(Action::RunLoaded(Box::new(run("r1", "c1"))));
        assert!(matches!(
            effects.as_slice(),
            [Effect::ResolveTimeline { generation: 1, .. }]
        ));
        app.view = View::RunDetail;
        app.detail_tab = TAB_TIMELINE;
        app
    }

    #[test]
    fn selecting_a_run_loads_it() {
        let mut app = App::new(None, NameDisplay::Username);
        app.update(Action::RunsLoaded(RunListPage {
            total_count: 1,
            page_count: 1,
            has_more: false,
            items: vec![run("r1", "c1")],
        }));

        let effects = app.update(Action::Select);
        assert!(matches!(app.view, View::RunDetail));
        assert!(app.timeline.is_loading());
        assert!(matches!(effects.as_slice(), [Effect::LoadRun(id)] if id == "r1"));
    }

    #[test]
    fn run_loaded_requests_timeline_resolve_with_fresh_generation() {
        let mut app = App::new(None, NameDisplay::Username);

        let first = app.update(Action::RunLoaded(Box::new(run("r1", "c1"))));
        assert!(matches!(
            first.as_slice(),
            [Effect::ResolveTimeline { generation: 1, .. }]
        ));

        let second = app.update(Action::RunLoaded(Box::new(run("r2", "c2"))));
        assert!(matches!(
            second.as_slice(),
            [Effect::ResolveTimeline { generation: 2, .. }]
        ));
    }

    #[test]
    fn stale_timeline_batches_are_discarded() {
        let mut app = app_with_open_run();
        app.update(Action::RunLoaded(Box::new(run("r2", "c2"))));
        assert_eq!(app.timeline_generation, 2);

        // Late reply from the first resolve.
        app.update(Action::TimelineResolved {
            generation: 1,
            events: vec![resolved("old", 100, TimelineEventType::StatusUpdated)],
        });
        assert!(app.timeline.data().is_none());

        app.update(Action::TimelineResolved {
            generation: 2,
            events: vec![resolved("new", 200, TimelineEventType::StatusUpdated)],
        });
        let events = app.timeline.data().expect("current batch kept");
        assert_eq!(events[0].event.id, "new");
    }

    #[test]
    fn filter_changes_apply_without_a_new_resolve() {
        let mut app = app_with_open_run();
        app.update(Action::TimelineResolved {
            generation: 1,
            events: vec![
                resolved("e1", 300, TimelineEventType::StatusUpdated),
                resolved("e2", 200, TimelineEventType::OwnerChanged),
            ],
        });

        assert_eq!(app.visible_timeline(SortDirection::NewestFirst).len(), 2);

        app.update(Action::ToggleFilterOption(FilterOption::OwnerChanged));
        let visible = app.visible_timeline(SortDirection::NewestFirst);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].event.id, "e1");
        // Underlying resolved set is untouched.
        assert_eq!(app.resolved_event_count(), 2);
    }

    #[test]
    fn filters_persist_per_channel() {
        let mut app = app_with_open_run();
        app.update(Action::ToggleFilterOption(FilterOption::OwnerChanged));
        assert!(!app.current_filter().owner_changed);

        // Another channel starts from the default filter.
        app.update(Action::RunLoaded(Box::new(run("r2", "c2"))));
        assert!(app.current_filter().owner_changed);

        // Coming back to the first channel restores its filter.
        app.update(Action::RunLoaded(Box::new(run("r1", "c1"))));
        assert!(!app.current_filter().owner_changed);
    }

    #[test]
    fn visible_timeline_orders_by_direction() {
        let mut app = app_with_open_run();
        app.update(Action::TimelineResolved {
            generation: 1,
            events: vec![
                resolved("e1", 100, TimelineEventType::StatusUpdated),
                resolved("e2", 300, TimelineEventType::StatusUpdated),
            ],
        });

        let newest: Vec<String> = app
            .visible_timeline(SortDirection::NewestFirst)
            .iter()
            .map(|r| r.event.id.clone())
            .collect();
        assert_eq!(newest, vec!["e2", "e1"]);

        let oldest: Vec<String> = app
            .visible_timeline(SortDirection::OldestFirst)
            .iter()
            .map(|r| r.event.id.clone())
            .collect();
        assert_eq!(oldest, vec!["e1", "e2"]);
    }

    #[test]
    fn remove_event_asks_for_confirmation_then_emits_effect() {
        let mut app = app_with_open_run();
        app.update(Action::TimelineResolved {
            generation: 1,
            events: vec![resolved("e1", 100, TimelineEventType::StatusUpdated)],
        });

        app.update(Action::RequestRemoveEvent);
        assert!(matches!(
            app.overlay,
            Overlay::Confirm(ConfirmAction::RemoveTimelineEvent { .. })
        ));

        let effects = app.confirm_pending();
        assert_eq!(app.overlay, Overlay::None);
        assert!(matches!(
            effects.as_slice(),
            [Effect::RemoveTimelineEvent { run_id, event_id }]
                if run_id == "r1" && event_id == "e1"
        ));
    }

    #[test]
    fn event_removed_reloads_the_run() {
        let mut app = app_with_open_run();
        let effects = app.update(Action::EventRemoved);
        assert!(matches!(effects.as_slice(), [Effect::LoadRun(id)] if id == "r1"));
    }

    #[test]
    fn errors_back_off_polling_and_success_resets() {
        let mut app = App::new(None, NameDisplay::Username);
        let base = app.base_polling_interval;

        app.update(Action::Error("boom".to_string()));
        app.update(Action::Error("boom".to_string()));
        assert!(app.polling_interval > base);

        app.update(Action::RunsLoaded(RunListPage {
            total_count: 0,
            page_count: 0,
            has_more: false,
            items: vec![],
        }));
        assert_eq!(app.polling_interval, base);
        assert_eq!(app.error_count, 0);
    }

    #[test]
    fn scrolling_near_the_end_loads_the_next_page() {
        let mut app = App::new(None, NameDisplay::Username);
        let items: Vec<PlaybookRun> = (0..10).map(|i| run(&format!("r{i}"), "c")).collect();
        app.update(Action::RunsLoaded(RunListPage {
            total_count: 100,
            page_count: 1,
            has_more: true,
            items,
        }));

        app.run_table_state.select(Some(7));
        let effects = app.update(Action::NavigateDown);
        assert!(matches!(effects.as_slice(), [Effect::LoadMoreRuns]));
        assert!(app.loading_more);
        assert_eq!(app.page, 1);
    }

    #[test]
    fn export_command_uses_selected_runs_channel() {
        let mut app = app_with_open_run();
        let effects = app.update(Action::SubmitCommandInput("export".to_string()));
        assert!(matches!(
            effects.as_slice(),
            [Effect::ExportChannel(channel)] if channel == "c1"
        ));
    }
}
