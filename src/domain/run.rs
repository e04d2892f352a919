use serde::Deserialize;

use super::timeline::{StatusPost, TimelineEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RunStatus {
    InProgress,
    Finished,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "InProgress",
            Self::Finished => "Finished",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::InProgress => "●",
            Self::Finished => "✓",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_status() -> RunStatus {
    RunStatus::InProgress
}

/// A checklist-driven workflow instance executed in a chat channel. Owns the
/// timeline events and status posts the aggregator consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybookRun {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub owner_user_id: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub end_at: i64,
    #[serde(default = "default_status")]
    pub current_status: RunStatus,
    #[serde(default)]
    pub last_status_update_at: i64,
    #[serde(default)]
    pub participant_ids: Vec<String>,
    #[serde(default)]
    pub status_posts: Vec<StatusPost>,
    #[serde(default)]
    pub timeline_events: Vec<TimelineEvent>,
    #[serde(default)]
    pub retrospective: String,
    #[serde(default)]
    pub retrospective_published_at: i64,
    #[serde(default)]
    pub retrospective_was_canceled: bool,
}

/// One page of the run list endpoint, with the pre-paging total.
#[derive(Debug, Clone, Deserialize)]
pub struct RunListPage {
    pub total_count: u64,
    #[serde(default)]
    pub page_count: u64,
    #[serde(default)]
    pub has_more: bool,
    pub items: Vec<PlaybookRun>,
}
