use async_trait::async_trait;
use thiserror::Error;

use crate::domain::*;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("config error: {0}")]
    ConfigError(String),
    #[error("timeout")]
    Timeout,
}

pub type ClientResult<T> = Result<T, ClientError>;

#[async_trait]
pub trait PlaybooksClient: Send + Sync {
    async fn list_runs(
        &self,
        team_id: Option<&str>,
        search: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> ClientResult<RunListPage>;

    async fn get_run(&self, run_id: &str) -> ClientResult<PlaybookRun>;

    async fn get_run_by_channel(&self, channel_id: &str) -> ClientResult<PlaybookRun>;

    async fn get_user(&self, user_id: &str) -> ClientResult<UserProfile>;

    async fn remove_timeline_event(&self, run_id: &str, event_id: &str) -> ClientResult<()>;

    /// CSV export link for a run's channel; URL construction only, the
    /// download itself is the browser's concern.
    fn export_channel_url(&self, channel_id: &str) -> String;
}
