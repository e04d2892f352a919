use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use futures::future::join_all;

use crate::domain::{NameDisplay, TimelineEvent, UserProfile};

use super::ResolvedEvent;

/// User lookup seam for the resolver: a synchronous cache probe plus an
/// asynchronous best-effort fallback. A fetch that fails for any reason
/// returns `None`; the resolver never sees an error.
#[async_trait]
pub trait UserLookup: Send + Sync {
    fn get(&self, user_id: &str) -> Option<UserProfile>;

    async fn fetch(&self, user_id: &str) -> Option<UserProfile>;
}

/// Maps each event's subject user to a display name. Lookups fan out
/// concurrently (one future per event, no cap) and join before returning;
/// results are positional, so the output preserves input order regardless of
/// fetch completion order. Events whose subject cannot be resolved are
/// dropped rather than surfaced as errors, so one missing profile never
/// blanks the whole timeline.
pub async fn resolve_events(
    events: &[TimelineEvent],
    lookup: &dyn UserLookup,
    name_display: NameDisplay,
) -> Vec<ResolvedEvent> {
    let resolutions = events.iter().map(|event| async move {
        let user = match lookup.get(&event.subject_user_id) {
            Some(user) => user,
            None => lookup.fetch(&event.subject_user_id).await?,
        };
        Some(ResolvedEvent {
            subject_display_name: name_display.format(&user),
            status_delete_at: 0,
            event: event.clone(),
        })
    });

    join_all(resolutions).await.into_iter().flatten().collect()
}

/// Shared read-through user cache. Append-only for the lifetime of the
/// hosting view; populated by fetch fallbacks so repeated resolution of the
/// same user is O(1) after the first.
#[derive(Debug, Default)]
pub struct UserCache {
    users: RwLock<HashMap<String, UserProfile>>,
}

impl UserCache {
    pub fn get(&self, user_id: &str) -> Option<UserProfile> {
        self.users
            .read()
            .ok()
            .and_then(|users| users.get(user_id).cloned())
    }

    pub fn insert(&self, user: UserProfile) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id.clone(), user);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn user(id: &str, username: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            nickname: String::new(),
        }
    }

    fn event(id: &str, event_at: i64, subject: &str) -> TimelineEvent {
        TimelineEvent {
            id: id.to_string(),
            playbook_run_id: String::new(),
            create_at: event_at,
            delete_at: 0,
            event_at,
            event_type: crate::domain::TimelineEventType::StatusUpdated,
            summary: String::new(),
            details: String::new(),
            post_id: String::new(),
            subject_user_id: subject.to_string(),
            creator_user_id: String::new(),
        }
    }

    /// Lookup with a pre-seeded cache and a fixed set of fetchable users;
    /// counts fetches so memoization can be asserted.
    struct FakeLookup {
        cache: UserCache,
        remote: HashMap<String, UserProfile>,
        fetches: AtomicUsize,
    }

    impl FakeLookup {
        fn new(cached: &[UserProfile], remote: &[UserProfile]) -> Self {
            let cache = UserCache::default();
            for user in cached {
                cache.insert(user.clone());
            }
            Self {
                cache,
                remote: remote.iter().map(|u| (u.id.clone(), u.clone())).collect(),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl UserLookup for FakeLookup {
        fn get(&self, user_id: &str) -> Option<UserProfile> {
            self.cache.get(user_id)
        }

        async fn fetch(&self, user_id: &str) -> Option<UserProfile> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let user = self.remote.get(user_id).cloned()?;
            self.cache.insert(user.clone());
            Some(user)
        }
    }

    #[tokio::test]
    async fn preserves_input_order() {
        let lookup = FakeLookup::new(
            &[user("u1", "alice"), user("u2", "bob"), user("u3", "carol")],
            &[],
        );
        let events = vec![
            event("e1", 300, "u3"),
            event("e2", 100, "u1"),
            event("e3", 200, "u2"),
        ];

        let resolved = resolve_events(&events, &lookup, NameDisplay::Username).await;

        let ids: Vec<&str> = resolved.iter().map(|r| r.event.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
        assert_eq!(resolved[0].subject_display_name, "carol");
    }

    #[tokio::test]
    async fn drops_events_for_unresolvable_users() {
        let lookup = FakeLookup::new(&[user("u1", "alice")], &[user("u2", "bob")]);
        let events = vec![
            event("e1", 100, "u1"),
            event("e2", 200, "ghost"),
            event("e3", 300, "u2"),
        ];

        let resolved = resolve_events(&events, &lookup, NameDisplay::Username).await;

        let ids: Vec<&str> = resolved.iter().map(|r| r.event.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e3"]);
        assert_eq!(resolved[1].subject_display_name, "bob");
    }

    #[tokio::test]
    async fn fetch_populates_cache_for_later_batches() {
        let lookup = FakeLookup::new(&[], &[user("u1", "alice")]);
        let events = vec![event("e1", 100, "u1")];

        let first = resolve_events(&events, &lookup, NameDisplay::Username).await;
        assert_eq!(first.len(), 1);
        assert_eq!(lookup.fetches.load(Ordering::SeqCst), 1);

        let second = resolve_events(&events, &lookup, NameDisplay::Username).await;
        assert_eq!(second.len(), 1);
        // cache hit, no second fetch
        assert_eq!(lookup.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_input_resolves_to_empty() {
        let lookup = FakeLookup::new(&[], &[]);
        let resolved = resolve_events(&[], &lookup, NameDisplay::Username).await;
        assert!(resolved.is_empty());
    }
}
