use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::client::PlaybooksClient;
use crate::domain::{NameDisplay, PlaybookRun, UserProfile};
use crate::timeline::{self, UserCache, UserLookup};

#[derive(Debug)]
pub enum ApiRequest {
    LoadRuns {
        team_id: Option<String>,
        search: Option<String>,
        page: u64,
        per_page: u64,
    },
    LoadMoreRuns {
        team_id: Option<String>,
        search: Option<String>,
        page: u64,
        per_page: u64,
    },
    LoadRun {
        run_id: String,
    },
    LoadRunByChannel {
        channel_id: String,
    },
    ResolveTimeline {
        run: Box<PlaybookRun>,
        name_display: NameDisplay,
        generation: u64,
    },
    RemoveTimelineEvent {
        run_id: String,
        event_id: String,
    },
}

#[derive(Clone)]
pub struct ApiHandle {
    tx: mpsc::UnboundedSender<ApiRequest>,
}

impl ApiHandle {
    pub fn send(&self, request: ApiRequest) {
        let _ = self.tx.send(request);
    }
}

/// Read-through lookup backing the resolver with the REST client: cache
/// probes are synchronous, misses fetch over the wire and memoize. Fetch
/// failures are logged and swallowed; the resolver drops those events.
pub struct ClientUserLookup {
    client: Arc<dyn PlaybooksClient>,
    cache: Arc<UserCache>,
}

impl ClientUserLookup {
    pub fn new(client: Arc<dyn PlaybooksClient>, cache: Arc<UserCache>) -> Self {
        Self { client, cache }
    }
}

#[async_trait]
impl UserLookup for ClientUserLookup {
    fn get(&self, user_id: &str) -> Option<UserProfile> {
        self.cache.get(user_id)
    }

    async fn fetch(&self, user_id: &str) -> Option<UserProfile> {
        match self.client.get_user(user_id).await {
            Ok(user) => {
                self.cache.insert(user.clone());
                Some(user)
            }
            Err(err) => {
                tracing::debug!(user_id, "user fetch failed: {}", err);
                None
            }
        }
    }
}

pub struct ApiWorker {
    client: Arc<dyn PlaybooksClient>,
    cache: Arc<UserCache>,
    rx: mpsc::UnboundedReceiver<ApiRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl ApiWorker {
    pub fn new(
        client: Arc<dyn PlaybooksClient>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, ApiHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ApiHandle { tx };
        let worker = Self {
            client,
            cache: Arc::new(UserCache::default()),
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            let action = self.process(request).await;
            if self.action_tx.send(action).is_err() {
                break;
            }
        }
    }

    async fn process(&self, request: ApiRequest) -> Action {
        match request {
            ApiRequest::LoadRuns {
                team_id,
                search,
                page,
                per_page,
            } => {
                match self
                    .client
                    .list_runs(team_id.as_deref(), search.as_deref(), page, per_page)
                    .await
                {
                    Ok(runs) => Action::RunsLoaded(runs),
                    Err(e) => Action::Error(format!("failed to load runs: {}", e)),
                }
            }
            ApiRequest::LoadMoreRuns {
                team_id,
                search,
                page,
                per_page,
            } => {
                match self
                    .client
                    .list_runs(team_id.as_deref(), search.as_deref(), page, per_page)
                    .await
                {
                    Ok(runs) => Action::MoreRunsLoaded(runs),
                    Err(e) => Action::Error(format!("failed to load runs: {}", e)),
                }
            }
            ApiRequest::LoadRun { run_id } => match self.client.get_run(&run_id).await {
                Ok(run) => Action::RunLoaded(Box::new(run)),
                Err(e) => Action::Error(format!("failed to load run: {}", e)),
            },
            ApiRequest::LoadRunByChannel { channel_id } => {
                match self.client.get_run_by_channel(&channel_id).await {
                    Ok(run) => Action::RunLoaded(Box::new(run)),
                    Err(e) => Action::Error(format!("no run for channel: {}", e)),
                }
            }
            ApiRequest::ResolveTimeline {
                run,
                name_display,
                generation,
            } => {
                let lookup = ClientUserLookup::new(self.client.clone(), self.cache.clone());
                let events = timeline::resolve_run_timeline(&run, &lookup, name_display).await;
                Action::TimelineResolved { generation, events }
            }
            ApiRequest::RemoveTimelineEvent { run_id, event_id } => {
                match self.client.remove_timeline_event(&run_id, &event_id).await {
                    Ok(()) => Action::EventRemoved,
                    Err(e) => Action::Error(format!("failed to remove timeline event: {}", e)),
                }
            }
        }
    }
}
