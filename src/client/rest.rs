use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::{ClientError, ClientResult, PlaybooksClient};
use crate::domain::*;

/// REST client against the chat server: playbook runs live under the
/// playbooks plugin API, user profiles under the core API.
pub struct RestPlaybooksClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestPlaybooksClient {
    pub async fn connect(base_url: &str, token: &str) -> ClientResult<Self> {
        tracing::info!("Connecting to {}", base_url);

        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClientError::ConfigError(format!("invalid token: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ClientError::ConfigError(format!("failed to build client: {}", e)))?;

        let client = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        };

        // Validate the URL and token up front so the UI starts connected.
        let me: UserProfile = client
            .get_json(&client.core_url("users/me"))
            .await
            .map_err(|e| ClientError::ConnectionError(format!("login check failed: {}", e)))?;
        tracing::info!("Connected as {}", me.username);

        Ok(client)
    }

    fn plugin_url(&self, path: &str) -> String {
        format!("{}/plugins/playbooks/api/v0/{}", self.base_url, path)
    }

    fn core_url(&self, path: &str) -> String {
        format!("{}/api/v4/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let response = self.http.get(url).send().await.map_err(request_error)?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::ParseError(format!("invalid response body: {}", e)))
    }
}

fn request_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else if err.is_connect() {
        ClientError::ConnectionError(err.to_string())
    } else {
        ClientError::RequestFailed(err.to_string())
    }
}

async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().path().to_string();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(url));
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::RequestFailed(format!(
        "{} returned {}: {}",
        url, status, body
    )))
}

#[async_trait]
impl PlaybooksClient for RestPlaybooksClient {
    async fn list_runs(
        &self,
        team_id: Option<&str>,
        search: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> ClientResult<RunListPage> {
        let mut request = self
            .http
            .get(self.plugin_url("runs"))
            .query(&[("page", page), ("per_page", per_page)])
            .query(&[("sort", "create_at"), ("direction", "desc")]);
        if let Some(team_id) = team_id {
            request = request.query(&[("team_id", team_id)]);
        }
        if let Some(term) = search {
            request = request.query(&[("search_term", term)]);
        }

        let response = request.send().await.map_err(request_error)?;
        let response = check_status(response).await?;
        response
            .json::<RunListPage>()
            .await
            .map_err(|e| ClientError::ParseError(format!("invalid run list: {}", e)))
    }

    async fn get_run(&self, run_id: &str) -> ClientResult<PlaybookRun> {
        self.get_json(&self.plugin_url(&format!("runs/{}", run_id)))
            .await
    }

    async fn get_run_by_channel(&self, channel_id: &str) -> ClientResult<PlaybookRun> {
        self.get_json(&self.plugin_url(&format!("runs/channel/{}", channel_id)))
            .await
    }

    async fn get_user(&self, user_id: &str) -> ClientResult<UserProfile> {
        self.get_json(&self.core_url(&format!("users/{}", user_id)))
            .await
    }

    async fn remove_timeline_event(&self, run_id: &str, event_id: &str) -> ClientResult<()> {
        let url = self.plugin_url(&format!("runs/{}/timeline/{}", run_id, event_id));
        let response = self.http.delete(&url).send().await.map_err(request_error)?;
        check_status(response).await?;
        Ok(())
    }

    fn export_channel_url(&self, channel_id: &str) -> String {
        format!(
            "{}/plugins/com.mattermost.plugin-channel-export/api/v1/export?format=csv&channel_id={}",
            self.base_url, channel_id
        )
    }
}
