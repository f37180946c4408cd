//! AgentInvocationClient - HTTP client for remote agent invocations.
//!
//! Sends one task instruction to a named agent and normalizes every failure
//! mode into an [`InvocationOutcome`]. The `invoke` boundary never errors:
//! transport failures, malformed bodies, and remote-reported failures all
//! become the error case of the outcome. No retries happen here; retry is a
//! caller decision.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use mcc_core::invocation::{ArtifactFile, InvocationAgent, InvocationOutcome};

use crate::config::AgentPlatformConfig;

const INVOKE_PATH: &str = "/v1/agents/invoke";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// HTTP client for the agent platform's invocation endpoint.
#[derive(Clone)]
pub struct AgentInvocationClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    user_id: String,
}

impl AgentInvocationClient {
    /// Creates a client from resolved platform configuration.
    pub fn new(config: AgentPlatformConfig) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            user_id: config.user_id,
        }
    }

    async fn send_invoke(&self, message: &str, agent_id: &str) -> InvocationOutcome {
        let body = InvokeRequest {
            message,
            agent_id,
            user_id: &self.user_id,
        };

        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, INVOKE_PATH))
            .json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!("Agent invocation transport failure: {}", err);
                return InvocationOutcome::transport_failure(transport_message(&err));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return http_error_outcome(status, body_text);
        }

        match response.json::<InvokeResponse>().await {
            Ok(parsed) => normalize_response(parsed),
            Err(err) => InvocationOutcome::transport_failure(format!(
                "Malformed response from agent platform: {}",
                err
            )),
        }
    }
}

#[async_trait]
impl InvocationAgent for AgentInvocationClient {
    async fn invoke(&self, message: &str, agent_id: &str) -> InvocationOutcome {
        self.send_invoke(message, agent_id).await
    }
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    message: &'a str,
    agent_id: &'a str,
    user_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    response: Option<ResponseBody>,
    #[serde(default)]
    module_outputs: Option<ModuleOutputs>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    result: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ModuleOutputs {
    #[serde(default)]
    artifact_files: Vec<ArtifactFileDto>,
}

#[derive(Debug, Deserialize)]
struct ArtifactFileDto {
    file_url: String,
}

/// Maps a parsed wire response to the normalized outcome.
///
/// A declared failure keeps any session id the platform returned, so the
/// session stays eligible for tracking and cleanup.
fn normalize_response(response: InvokeResponse) -> InvocationOutcome {
    if response.success {
        let result = response.response.and_then(|body| body.result);
        let artifact_files = response
            .module_outputs
            .map(|outputs| {
                outputs
                    .artifact_files
                    .into_iter()
                    .map(|dto| ArtifactFile {
                        file_url: dto.file_url,
                    })
                    .collect()
            })
            .unwrap_or_default();
        InvocationOutcome::succeeded(response.session_id, result, artifact_files)
    } else {
        InvocationOutcome::remote_failure(response.session_id, response.error)
    }
}

/// Builds the outcome for a non-2xx HTTP status.
///
/// The platform reports agent-level failures inside a 200 body; an HTTP
/// error status means the platform itself rejected the call, so no session
/// id exists and this is treated as transport-level.
fn http_error_outcome(status: StatusCode, body: String) -> InvocationOutcome {
    let detail = serde_json::from_str::<WireError>(&body)
        .map(|wire| wire.error)
        .unwrap_or(body);
    let detail = if detail.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        detail
    };
    InvocationOutcome::transport_failure(format!(
        "Agent platform returned HTTP {}: {}",
        status.as_u16(),
        detail
    ))
}

#[derive(Deserialize)]
struct WireError {
    error: String,
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "The agent request timed out. Please try again.".to_string()
    } else if err.is_connect() {
        "Could not reach the agent platform. Please check your connection and try again."
            .to_string()
    } else {
        format!("Network error during agent request: {}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: &str) -> InvokeResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_normalize_success_with_result() {
        let response = parse(
            r#"{
                "success": true,
                "session_id": "sess-42",
                "response": { "result": { "title": "X Guide", "seo_score": 87 } }
            }"#,
        );

        let outcome = normalize_response(response);
        assert!(outcome.success);
        assert_eq!(outcome.session_id.as_deref(), Some("sess-42"));
        assert!(outcome.error.is_none());
        let result = outcome.classify().unwrap();
        assert_eq!(result["title"], json!("X Guide"));
    }

    #[test]
    fn test_normalize_success_extracts_artifact_files() {
        let response = parse(
            r#"{
                "success": true,
                "session_id": "sess-7",
                "response": { "result": { "description": "dashboard" } },
                "module_outputs": {
                    "artifact_files": [{ "file_url": "https://cdn.example.test/g.png" }]
                }
            }"#,
        );

        let outcome = normalize_response(response);
        assert_eq!(outcome.artifact_files.len(), 1);
        assert_eq!(
            outcome.artifact_files[0].file_url,
            "https://cdn.example.test/g.png"
        );
    }

    #[test]
    fn test_normalize_declared_failure_keeps_session_id() {
        let response = parse(
            r#"{ "success": false, "session_id": "sess-9", "error": "rate limited" }"#,
        );

        let outcome = normalize_response(response);
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("rate limited"));
        assert_eq!(outcome.session_id.as_deref(), Some("sess-9"));
        assert!(outcome.result.is_none());
    }

    #[test]
    fn test_normalize_failure_without_reason_uses_generic_message() {
        let response = parse(r#"{ "success": false }"#);
        let outcome = normalize_response(response);
        assert!(!outcome.error.as_deref().unwrap().is_empty());
    }

    #[test]
    fn test_normalize_success_without_payload_classifies_as_empty() {
        let response = parse(r#"{ "success": true, "session_id": "sess-1" }"#);
        let outcome = normalize_response(response);
        assert!(outcome.success);
        assert!(matches!(
            outcome.classify(),
            Err(mcc_core::MccError::EmptyResponse)
        ));
    }

    #[test]
    fn test_http_error_outcome_has_readable_message() {
        let outcome = http_error_outcome(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{ "error": "maintenance window" }"#.to_string(),
        );
        assert!(!outcome.success);
        assert!(outcome.session_id.is_none());
        let message = outcome.error.unwrap();
        assert!(message.contains("503"));
        assert!(message.contains("maintenance window"));
    }

    #[test]
    fn test_http_error_outcome_with_unparseable_body() {
        let outcome = http_error_outcome(StatusCode::BAD_GATEWAY, "<html>bad</html>".to_string());
        assert!(outcome.error.unwrap().contains("502"));

        let blank = http_error_outcome(StatusCode::BAD_GATEWAY, String::new());
        assert!(blank.error.unwrap().contains("Bad Gateway"));
    }
}
