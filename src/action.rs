use crate::domain::*;
use crate::timeline::{FilterOption, ResolvedEvent};

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateUp,
    NavigateDown,
    NavigateTop,
    NavigateBottom,
    PageUp,
    PageDown,
    Select,
    Back,

    // Vim chord
    EnterPendingG,

    // UI
    OpenCommandInput,
    OpenSearch,
    CloseOverlay,
    SubmitCommandInput(String),
    UpdateInputBuffer(String),
    SubmitSearch(String),
    ToggleHelp,

    // Detail tabs
    NextTab,
    PrevTab,

    // Timeline
    OpenFilterMenu,
    ToggleFilterOption(FilterOption),
    RequestRemoveEvent,
    ExportChannel,

    // Data responses
    RunsLoaded(RunListPage),
    MoreRunsLoaded(RunListPage),
    RunLoaded(Box<PlaybookRun>),
    TimelineResolved {
        generation: u64,
        events: Vec<ResolvedEvent>,
    },
    EventRemoved,

    // App control
    Refresh,
    Quit,
    Tick,
    Error(String),
    Notice(String),
    ClearError,
    TogglePolling,
}
