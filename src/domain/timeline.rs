use serde::Deserialize;

/// Closed set of timeline event categories. The wire value for run creation
/// is `incident_created` for historical reasons; newer servers also emit
/// `run_created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum TimelineEventType {
    RunCreated,
    RunFinished,
    RunRestored,
    StatusUpdated,
    OwnerChanged,
    TaskStateModified,
    AssigneeChanged,
    RanSlashCommand,
    EventFromPost,
    UserJoinedLeft,
    PublishedRetrospective,
    CanceledRetrospective,
    /// Event types introduced by newer servers that this client does not
    /// know about. Never visible unless the filter's `all` flag is set.
    Unknown,
}

impl From<String> for TimelineEventType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl TimelineEventType {
    pub fn parse(value: &str) -> Self {
        match value {
            "incident_created" | "run_created" => Self::RunCreated,
            "run_finished" => Self::RunFinished,
            "run_restored" => Self::RunRestored,
            "status_updated" => Self::StatusUpdated,
            "owner_changed" | "commander_changed" => Self::OwnerChanged,
            "task_state_modified" => Self::TaskStateModified,
            "assignee_changed" => Self::AssigneeChanged,
            "ran_slash_command" => Self::RanSlashCommand,
            "event_from_post" => Self::EventFromPost,
            "user_joined_left" => Self::UserJoinedLeft,
            "published_retrospective" => Self::PublishedRetrospective,
            "canceled_retrospective" => Self::CanceledRetrospective,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RunCreated => "incident_created",
            Self::RunFinished => "run_finished",
            Self::RunRestored => "run_restored",
            Self::StatusUpdated => "status_updated",
            Self::OwnerChanged => "owner_changed",
            Self::TaskStateModified => "task_state_modified",
            Self::AssigneeChanged => "assignee_changed",
            Self::RanSlashCommand => "ran_slash_command",
            Self::EventFromPost => "event_from_post",
            Self::UserJoinedLeft => "user_joined_left",
            Self::PublishedRetrospective => "published_retrospective",
            Self::CanceledRetrospective => "canceled_retrospective",
            Self::Unknown => "unknown",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::RunCreated | Self::RunFinished | Self::RunRestored => "⚑",
            Self::StatusUpdated => "▣",
            Self::OwnerChanged => "✎",
            Self::TaskStateModified => "☰",
            Self::AssigneeChanged => "✎",
            Self::RanSlashCommand => "/",
            Self::EventFromPost => "✉",
            Self::UserJoinedLeft => "◉",
            Self::PublishedRetrospective => "✓",
            Self::CanceledRetrospective => "⊘",
            Self::Unknown => "?",
        }
    }
}

impl std::fmt::Display for TimelineEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A discrete, timestamped record of something notable that happened during
/// a run. `event_at` is immutable server-side; all timestamps are epoch
/// milliseconds as delivered on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    #[serde(default)]
    pub playbook_run_id: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub delete_at: i64,
    pub event_at: i64,
    pub event_type: TimelineEventType,
    #[serde(default)]
    pub summary: String,
    /// Optional serialized payload; `user_joined_left` carries a JSON object
    /// with a `title` field here.
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub post_id: String,
    #[serde(default)]
    pub subject_user_id: String,
    #[serde(default)]
    pub creator_user_id: String,
}

/// A chat message posted to broadcast a status update; may later be deleted,
/// in which case `delete_at` is the deletion timestamp (0 otherwise).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPost {
    pub id: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub delete_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_and_aliases() {
        assert_eq!(
            TimelineEventType::parse("incident_created"),
            TimelineEventType::RunCreated
        );
        assert_eq!(
            TimelineEventType::parse("run_created"),
            TimelineEventType::RunCreated
        );
        assert_eq!(
            TimelineEventType::parse("commander_changed"),
            TimelineEventType::OwnerChanged
        );
        assert_eq!(
            TimelineEventType::parse("status_update_snoozed"),
            TimelineEventType::Unknown
        );
    }

    #[test]
    fn deserializes_event_with_unknown_type() {
        let event: TimelineEvent = serde_json::from_str(
            r#"{"id":"e1","event_at":100,"event_type":"something_new","subject_user_id":"u1"}"#,
        )
        .expect("deserialize");
        assert_eq!(event.event_type, TimelineEventType::Unknown);
        assert_eq!(event.event_at, 100);
        assert!(event.post_id.is_empty());
    }
}
