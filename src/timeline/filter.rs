use crate::domain::TimelineEventType;

/// Per-channel visibility configuration for the timeline: one flag per
/// event-type bucket plus an `all` override. While `all` is set the
/// individual flags are stored but ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineFilter {
    pub all: bool,
    pub owner_changed: bool,
    pub status_updated: bool,
    pub task_state_modified: bool,
    pub assignee_changed: bool,
    pub ran_slash_command: bool,
    pub event_from_post: bool,
    pub user_joined_left: bool,
    pub published_retrospective: bool,
    pub canceled_retrospective: bool,
}

impl Default for TimelineFilter {
    fn default() -> Self {
        Self {
            all: false,
            owner_changed: true,
            status_updated: true,
            task_state_modified: true,
            assignee_changed: true,
            ran_slash_command: true,
            event_from_post: true,
            user_joined_left: true,
            published_retrospective: true,
            canceled_retrospective: true,
        }
    }
}

/// One togglable entry in the filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOption {
    All,
    OwnerChanged,
    StatusUpdated,
    TaskStateModified,
    AssigneeChanged,
    RanSlashCommand,
    EventFromPost,
    UserJoinedLeft,
    PublishedRetrospective,
    CanceledRetrospective,
}

impl FilterOption {
    pub const ALL: &'static [FilterOption] = &[
        Self::All,
        Self::OwnerChanged,
        Self::StatusUpdated,
        Self::EventFromPost,
        Self::TaskStateModified,
        Self::AssigneeChanged,
        Self::RanSlashCommand,
        Self::UserJoinedLeft,
        Self::PublishedRetrospective,
        Self::CanceledRetrospective,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All events",
            Self::OwnerChanged => "Role changes",
            Self::StatusUpdated => "Status updates",
            Self::EventFromPost => "Saved messages",
            Self::TaskStateModified => "Task state changes",
            Self::AssigneeChanged => "Task assignments",
            Self::RanSlashCommand => "Slash commands",
            Self::UserJoinedLeft => "Joins and leaves",
            Self::PublishedRetrospective => "Retrospective published",
            Self::CanceledRetrospective => "Retrospective canceled",
        }
    }
}

impl TimelineFilter {
    pub fn selected(&self, option: FilterOption) -> bool {
        match option {
            FilterOption::All => self.all,
            FilterOption::OwnerChanged => self.owner_changed,
            FilterOption::StatusUpdated => self.status_updated,
            FilterOption::TaskStateModified => self.task_state_modified,
            FilterOption::AssigneeChanged => self.assignee_changed,
            FilterOption::RanSlashCommand => self.ran_slash_command,
            FilterOption::EventFromPost => self.event_from_post,
            FilterOption::UserJoinedLeft => self.user_joined_left,
            FilterOption::PublishedRetrospective => self.published_retrospective,
            FilterOption::CanceledRetrospective => self.canceled_retrospective,
        }
    }

    /// Flips one option. Individual flags cannot be toggled while `all` is
    /// set; they keep their stored value and become editable again once
    /// `all` is cleared.
    pub fn toggle(&mut self, option: FilterOption) {
        if option == FilterOption::All {
            self.all = !self.all;
            return;
        }
        if self.all {
            return;
        }
        match option {
            FilterOption::All => unreachable!(),
            FilterOption::OwnerChanged => self.owner_changed = !self.owner_changed,
            FilterOption::StatusUpdated => self.status_updated = !self.status_updated,
            FilterOption::TaskStateModified => self.task_state_modified = !self.task_state_modified,
            FilterOption::AssigneeChanged => self.assignee_changed = !self.assignee_changed,
            FilterOption::RanSlashCommand => self.ran_slash_command = !self.ran_slash_command,
            FilterOption::EventFromPost => self.event_from_post = !self.event_from_post,
            FilterOption::UserJoinedLeft => self.user_joined_left = !self.user_joined_left,
            FilterOption::PublishedRetrospective => {
                self.published_retrospective = !self.published_retrospective
            }
            FilterOption::CanceledRetrospective => {
                self.canceled_retrospective = !self.canceled_retrospective
            }
        }
    }
}

/// Pure visibility decision for one event. Run lifecycle milestones
/// (created/finished/restored) have no flag of their own and follow the
/// status-updates bucket; unknown event types are default-deny.
pub fn is_visible(event_type: TimelineEventType, filter: &TimelineFilter) -> bool {
    if filter.all {
        return true;
    }
    match event_type {
        TimelineEventType::RunCreated
        | TimelineEventType::RunFinished
        | TimelineEventType::RunRestored
        | TimelineEventType::StatusUpdated => filter.status_updated,
        TimelineEventType::OwnerChanged => filter.owner_changed,
        TimelineEventType::TaskStateModified => filter.task_state_modified,
        TimelineEventType::AssigneeChanged => filter.assignee_changed,
        TimelineEventType::RanSlashCommand => filter.ran_slash_command,
        TimelineEventType::EventFromPost => filter.event_from_post,
        TimelineEventType::UserJoinedLeft => filter.user_joined_left,
        TimelineEventType::PublishedRetrospective => filter.published_retrospective,
        TimelineEventType::CanceledRetrospective => filter.canceled_retrospective,
        TimelineEventType::Unknown => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TimelineEventType::*;

    fn none_selected() -> TimelineFilter {
        TimelineFilter {
            all: false,
            owner_changed: false,
            status_updated: false,
            task_state_modified: false,
            assignee_changed: false,
            ran_slash_command: false,
            event_from_post: false,
            user_joined_left: false,
            published_retrospective: false,
            canceled_retrospective: false,
        }
    }

    #[test]
    fn all_overrides_every_flag() {
        let filter = TimelineFilter {
            all: true,
            ..none_selected()
        };
        for event_type in [
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
            Unknown,
        ] {
            assert!(is_visible(event_type, &filter), "{event_type} hidden");
        }
    }

    #[test]
    fn lifecycle_events_follow_status_updates_bucket() {
        let filter = TimelineFilter {
            status_updated: true,
            ..none_selected()
        };
        assert!(is_visible(RunCreated, &filter));
        assert!(is_visible(RunFinished, &filter));
        assert!(is_visible(RunRestored, &filter));
        assert!(!is_visible(OwnerChanged, &filter));
    }

    #[test]
    fn unknown_types_are_default_deny() {
        let filter = TimelineFilter {
            all: false,
            ..TimelineFilter::default()
        };
        assert!(!is_visible(Unknown, &filter));
    }

    #[test]
    fn visibility_is_pure() {
        let filter = TimelineFilter {
            owner_changed: true,
            ..none_selected()
        };
        let first = is_visible(OwnerChanged, &filter);
        let second = is_visible(OwnerChanged, &filter);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn individual_toggles_ignored_while_all_set() {
        let mut filter = TimelineFilter {
            all: true,
            ..none_selected()
        };
        filter.toggle(FilterOption::OwnerChanged);
        assert!(!filter.owner_changed);

        filter.toggle(FilterOption::All);
        assert!(!filter.all);
        filter.toggle(FilterOption::OwnerChanged);
        assert!(filter.owner_changed);
    }
}
