use std::collections::HashMap;

use crate::domain::{StatusPost, TimelineEventType};

use super::ResolvedEvent;

/// Display order requested by a call site. The timeline view wants newest
/// first, the retrospective wants oldest first; the sort itself is always a
/// stable total order by `event_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    NewestFirst,
    OldestFirst,
}

/// Marks status-update events whose originating post was deleted. A post
/// with `delete_at == 0` is live and leaves the event's `status_delete_at`
/// at 0.
pub fn annotate_status_deletions(events: &mut [ResolvedEvent], status_posts: &[StatusPost]) {
    let deleted_at_by_post: HashMap<&str, i64> = status_posts
        .iter()
        .filter(|post| post.delete_at != 0)
        .map(|post| (post.id.as_str(), post.delete_at))
        .collect();

    for resolved in events {
        resolved.status_delete_at = deleted_at_by_post
            .get(resolved.event.post_id.as_str())
            .copied()
            .unwrap_or(0);
    }
}

/// Stable sort by `event_at`; ties keep their relative input order.
pub fn sort_events(events: &mut [ResolvedEvent], direction: SortDirection) {
    match direction {
        SortDirection::OldestFirst => events.sort_by(|a, b| a.event.event_at.cmp(&b.event.event_at)),
        SortDirection::NewestFirst => events.sort_by(|a, b| b.event.event_at.cmp(&a.event.event_at)),
    }
}

/// For each event in display order, the milliseconds since its chronological
/// predecessor in the same sequence (`None` for the chronologically first).
/// Read-only derivation used for the "time since previous event" stamp.
pub fn since_previous(events: &[ResolvedEvent], direction: SortDirection) -> Vec<Option<i64>> {
    events
        .iter()
        .enumerate()
        .map(|(i, resolved)| {
            let prev = match direction {
                SortDirection::NewestFirst => events.get(i + 1),
                SortDirection::OldestFirst => {
                    if i == 0 {
                        None
                    } else {
                        events.get(i - 1)
                    }
                }
            }?;
            Some(resolved.event.event_at - prev.event.event_at)
        })
        .collect()
}

/// Whether the presenter should strike the event through as referring to a
/// deleted status post.
pub fn status_post_deleted(resolved: &ResolvedEvent) -> bool {
    resolved.event.event_type == TimelineEventType::StatusUpdated && resolved.status_delete_at != 0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub detail: Option<String>,
}

/// Title/detail line for one resolved event, per event category. The
/// `user_joined_left` title lives in a JSON-encoded `details` payload;
/// malformed payloads fail soft to the event summary instead of erroring.
pub fn headline(resolved: &ResolvedEvent) -> Headline {
    let event = &resolved.event;
    let name = &resolved.subject_display_name;
    match event.event_type {
        TimelineEventType::RunCreated => Headline {
            title: format!("Run started by {name}"),
            detail: None,
        },
        TimelineEventType::RunFinished => Headline {
            title: format!("Run finished by {name}"),
            detail: None,
        },
        TimelineEventType::RunRestored => Headline {
            title: format!("Run restored by {name}"),
            detail: None,
        },
        TimelineEventType::StatusUpdated => {
            let title = if event.summary.is_empty() {
                format!("{name} posted a status update")
            } else {
                format!("{name} changed status from {}", event.summary)
            };
            Headline {
                title,
                detail: None,
            }
        }
        TimelineEventType::OwnerChanged => Headline {
            title: format!("Owner changed from {}", event.summary),
            detail: None,
        },
        TimelineEventType::TaskStateModified => Headline {
            title: format!("{name} {}", event.summary).replace("**", "\""),
            detail: None,
        },
        TimelineEventType::AssigneeChanged => Headline {
            title: "Assignee changed".to_string(),
            detail: Some(format!("{name} {}", event.summary)),
        },
        TimelineEventType::RanSlashCommand => Headline {
            title: "Slash command executed".to_string(),
            detail: Some(format!("{name} {}", event.summary)),
        },
        TimelineEventType::EventFromPost => Headline {
            title: event.summary.clone(),
            detail: None,
        },
        TimelineEventType::UserJoinedLeft => Headline {
            title: joined_left_title(&event.details).unwrap_or_else(|| event.summary.clone()),
            detail: Some(event.summary.clone()),
        },
        TimelineEventType::PublishedRetrospective => Headline {
            title: format!("Retrospective published by {name}"),
            detail: None,
        },
        TimelineEventType::CanceledRetrospective => Headline {
            title: format!("Retrospective canceled by {name}"),
            detail: None,
        },
        TimelineEventType::Unknown => Headline {
            title: event.summary.clone(),
            detail: None,
        },
    }
}

fn joined_left_title(details: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(details).ok()?;
    value
        .get("title")
        .and_then(|title| title.as_str())
        .map(str::to_string)
}

/// Compact humanized duration for the timeline stamp column.
pub fn format_duration(millis: i64) -> String {
    let negative = millis < 0;
    let mut secs = millis.unsigned_abs() / 1000;

    let days = secs / 86_400;
    secs %= 86_400;
    let hours = secs / 3_600;
    secs %= 3_600;
    let minutes = secs / 60;

    let body = if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        "< 1m".to_string()
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StatusPost, TimelineEvent, TimelineEventType};

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

    fn post(id: &str, delete_at: i64) -> StatusPost {
        StatusPost {
            id: id.to_string(),
            create_at: 0,
            delete_at,
        }
    }

    #[test]
    fn annotates_deleted_status_posts_only() {
        let mut events = vec![
            resolved("e1", 100, TimelineEventType::StatusUpdated),
            resolved("e2", 200, TimelineEventType::StatusUpdated),
            resolved("e3", 300, TimelineEventType::StatusUpdated),
        ];
        events[0].event.post_id = "p1".to_string();
        events[1].event.post_id = "p2".to_string();
        events[2].event.post_id = "p3".to_string();

        let posts = vec![post("p1", 1000), post("p2", 0)];
        annotate_status_deletions(&mut events, &posts);

        assert_eq!(events[0].status_delete_at, 1000);
        assert!(status_post_deleted(&events[0]));
        // live post
        assert_eq!(events[1].status_delete_at, 0);
        // no matching post
        assert_eq!(events[2].status_delete_at, 0);
    }

    #[test]
    fn sorts_both_directions() {
        let mut events = vec![
            resolved("e1", 100, TimelineEventType::StatusUpdated),
            resolved("e2", 50, TimelineEventType::OwnerChanged),
        ];

        sort_events(&mut events, SortDirection::NewestFirst);
        let ids: Vec<&str> = events.iter().map(|r| r.event.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);

        sort_events(&mut events, SortDirection::OldestFirst);
        let ids: Vec<&str> = events.iter().map(|r| r.event.id.as_str()).collect();
        assert_eq!(ids, vec!["e2", "e1"]);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let mut events = vec![
            resolved("e1", 100, TimelineEventType::StatusUpdated),
            resolved("e2", 100, TimelineEventType::OwnerChanged),
            resolved("e3", 100, TimelineEventType::AssigneeChanged),
        ];
        sort_events(&mut events, SortDirection::NewestFirst);
        let ids: Vec<&str> = events.iter().map(|r| r.event.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
    }

    #[test]
    fn since_previous_follows_display_direction() {
        let newest_first = vec![
            resolved("e1", 300, TimelineEventType::StatusUpdated),
            resolved("e2", 100, TimelineEventType::StatusUpdated),
        ];
        assert_eq!(
            since_previous(&newest_first, SortDirection::NewestFirst),
            vec![Some(200), None]
        );

        let oldest_first = vec![
            resolved("e2", 100, TimelineEventType::StatusUpdated),
            resolved("e1", 300, TimelineEventType::StatusUpdated),
        ];
        assert_eq!(
            since_previous(&oldest_first, SortDirection::OldestFirst),
            vec![None, Some(200)]
        );
    }

    #[test]
    fn joined_left_title_fails_soft() {
        let mut event = resolved("e1", 100, TimelineEventType::UserJoinedLeft);
        event.event.details = r#"{"title":"2 people joined"}"#.to_string();
        event.event.summary = "@alice joined".to_string();
        assert_eq!(headline(&event).title, "2 people joined");

        event.event.details = "not json".to_string();
        assert_eq!(headline(&event).title, "@alice joined");

        event.event.details = r#"{"other":1}"#.to_string();
        assert_eq!(headline(&event).title, "@alice joined");
    }

    #[test]
    fn status_update_headline_variants() {
        let mut event = resolved("e1", 100, TimelineEventType::StatusUpdated);
        assert_eq!(headline(&event).title, "alice posted a status update");

        event.event.summary = "Active to Resolved".to_string();
        assert_eq!(
            headline(&event).title,
            "alice changed status from Active to Resolved"
        );
    }

    #[test]
    fn task_state_summary_quotes_markdown_bold() {
        let mut event = resolved("e1", 100, TimelineEventType::TaskStateModified);
        event.event.summary = "checked **Restart server**".to_string();
        assert_eq!(headline(&event).title, "alice checked \"Restart server\"");
    }

    #[test]
    fn humanizes_durations() {
        assert_eq!(format_duration(30_000), "< 1m");
        assert_eq!(format_duration(5 * 60_000), "5m");
        assert_eq!(format_duration(2 * 3_600_000 + 3 * 60_000), "2h 3m");
        assert_eq!(format_duration(26 * 3_600_000), "1d 2h");
        assert_eq!(format_duration(-5 * 60_000), "-5m");
    }
}
