//! Timeline event aggregation: resolve subject users (async, memoized),
//! filter against the per-channel filter set, and order/annotate for
//! display. The pipeline is pure between its collaborators and is re-run
//! whole whenever its inputs change.

pub mod filter;
pub mod presenter;
pub mod resolver;

pub use filter::{FilterOption, TimelineFilter};
pub use presenter::SortDirection;
pub use resolver::{UserCache, UserLookup};

use crate::domain::{NameDisplay, PlaybookRun, TimelineEvent};

/// A timeline event annotated with display-only derived fields. The
/// underlying event is never mutated.
#[derive(Debug, Clone)]
pub struct ResolvedEvent {
    pub event: TimelineEvent,
    pub subject_display_name: String,
    /// Deletion timestamp of the matching status post, 0 when the referenced
    /// post exists (or the event references no post).
    pub status_delete_at: i64,
}

/// Resolves a run's timeline: fans out user lookups, drops events whose
/// subject cannot be resolved, and annotates status-post deletion state.
/// Ordering of the result matches the input event order; sorting for display
/// is the caller's concern (see [`presenter::sort_events`]).
pub async fn resolve_run_timeline(
    run: &PlaybookRun,
    lookup: &dyn UserLookup,
    name_display: NameDisplay,
) -> Vec<ResolvedEvent> {
    let mut resolved = resolver::resolve_events(&run.timeline_events, lookup, name_display).await;
    presenter::annotate_status_deletions(&mut resolved, &run.status_posts);
    resolved
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{RunStatus, TimelineEventType, UserProfile};

    struct CacheOnly(resolver::UserCache);

    #[async_trait]
    impl UserLookup for CacheOnly {
        fn get(&self, user_id: &str) -> Option<UserProfile> {
            self.0.get(user_id)
        }

        async fn fetch(&self, _user_id: &str) -> Option<UserProfile> {
            None
        }
    }

    fn user(id: &str, username: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            nickname: String::new(),
        }
    }

    fn event(id: &str, event_at: i64, event_type: TimelineEventType, subject: &str) -> TimelineEvent {
        TimelineEvent {
            id: id.to_string(),
            playbook_run_id: "r1".to_string(),
            create_at: event_at,
            delete_at: 0,
            event_at,
            event_type,
            summary: String::new(),
            details: String::new(),
            post_id: String::new(),
            subject_user_id: subject.to_string(),
            creator_user_id: String::new(),
        }
    }

    // Whole pipeline: resolve two events, then filter to status updates only.
    #[tokio::test]
    async fn resolve_then_filter_keeps_matching_events_in_order() {
        let cache = resolver::UserCache::default();
        cache.insert(user("u1", "alice"));
        cache.insert(user("u2", "bob"));
        let lookup = CacheOnly(cache);

        let run = PlaybookRun {
            id: "r1".to_string(),
            name: "outage".to_string(),
            summary: String::new(),
            owner_user_id: "u1".to_string(),
            team_id: String::new(),
            channel_id: "c1".to_string(),
            create_at: 0,
            end_at: 0,
            current_status: RunStatus::InProgress,
            last_status_update_at: 0,
            participant_ids: vec![],
            status_posts: vec![],
            timeline_events: vec![
                event("e1", 100, TimelineEventType::StatusUpdated, "u1"),
                event("e2", 50, TimelineEventType::OwnerChanged, "u2"),
            ],
            retrospective: String::new(),
            retrospective_published_at: 0,
            retrospective_was_canceled: false,
        };

        let resolved = resolve_run_timeline(&run, &lookup, NameDisplay::Username).await;
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].subject_display_name, "alice");
        assert_eq!(resolved[1].subject_display_name, "bob");

        let only_status = TimelineFilter {
            all: false,
            owner_changed: false,
            ..TimelineFilter::default()
        };
        let visible: Vec<&ResolvedEvent> = resolved
            .iter()
            .filter(|r| filter::is_visible(r.event.event_type, &only_status))
            .collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].event.id, "e1");
        assert_eq!(visible[0].subject_display_name, "alice");
    }
}
