//! Activity feed access.
//!
//! The feed is keyed by session id and yields incremental step/status
//! information with no delivery guarantees. Consumers rely on snapshot
//! monotonicity, not feed ordering.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use mcc_core::activity::{StepRecord, StepStatus};
use mcc_core::error::{MccError, Result};

use crate::config::AgentPlatformConfig;

const FEED_TIMEOUT: Duration = Duration::from_secs(10);

/// One observation of a session's activity feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    /// Whether the session is still executing server-side.
    pub active: bool,
    pub events: Vec<StepRecord>,
}

/// An abstract per-session activity feed.
///
/// Implementations may be HTTP polling, push, or scripted mocks in tests.
#[async_trait]
pub trait ActivityFeed: Send + Sync {
    /// Fetches the current view of the session's activity.
    async fn fetch(&self, session_id: &str) -> Result<FeedPage>;
}

/// HTTP polling implementation against the agent platform.
pub struct HttpActivityFeed {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpActivityFeed {
    pub fn new(config: &AgentPlatformConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FEED_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl ActivityFeed for HttpActivityFeed {
    async fn fetch(&self, session_id: &str) -> Result<FeedPage> {
        let url = format!("{}/v1/sessions/{}/events", self.base_url, session_id);

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| MccError::transport(format!("Activity feed request failed: {}", err)))?;

        if !response.status().is_success() {
            return Err(MccError::transport(format!(
                "Activity feed returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let page: FeedPageDto = response.json().await.map_err(|err| {
            MccError::transport(format!("Malformed activity feed response: {}", err))
        })?;

        Ok(page.into())
    }
}

#[derive(Debug, Deserialize)]
struct FeedPageDto {
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    events: Vec<FeedEventDto>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct FeedEventDto {
    id: String,
    #[serde(default)]
    label: String,
    status: StepStatus,
}

impl From<FeedPageDto> for FeedPage {
    fn from(dto: FeedPageDto) -> Self {
        FeedPage {
            active: dto.active,
            events: dto
                .events
                .into_iter()
                .map(|event| StepRecord::new(event.id, event.label, event.status))
                .collect(),
        }
    }
}
