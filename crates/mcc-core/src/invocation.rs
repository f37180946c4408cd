//! Invocation request/outcome model.
//!
//! An invocation sends one free-text task instruction to a named remote
//! agent and yields exactly one [`InvocationOutcome`]. The outcome carries
//! either a structured result payload (on declared success) or an error
//! message (on failure), never both, plus an optional session identifier
//! that correlates the agent's server-side progress events.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MccError, Result};

/// A task request addressed to one remote agent. Immutable once sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Free-text task instruction for the agent.
    pub message: String,
    /// Identifier selecting which remote agent handles the task.
    pub agent_id: String,
}

impl InvocationRequest {
    pub fn new(message: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            agent_id: agent_id.into(),
        }
    }
}

/// A generated file reference returned alongside a result payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub file_url: String,
}

/// The normalized result of one invocation.
///
/// Invariant: `result` is populated only when `success` is true, and `error`
/// only when it is false. `session_id` may be present in either case; the
/// agent may have opened a session before failing, and such a session is
/// still eligible for activity tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationOutcome {
    pub success: bool,
    pub session_id: Option<String>,
    pub result: Option<Value>,
    #[serde(default)]
    pub artifact_files: Vec<ArtifactFile>,
    pub error: Option<String>,
    /// True when the failure happened at the transport level rather than
    /// being reported by the remote agent.
    #[serde(default)]
    pub transport_error: bool,
}

impl InvocationOutcome {
    /// Builds a success outcome carrying the remote result payload.
    pub fn succeeded(
        session_id: Option<String>,
        result: Option<Value>,
        artifact_files: Vec<ArtifactFile>,
    ) -> Self {
        Self {
            success: true,
            session_id,
            result,
            artifact_files,
            error: None,
            transport_error: false,
        }
    }

    /// Builds an outcome for a failure the remote agent itself reported.
    ///
    /// Falls back to a generic message when the remote gave no reason. The
    /// session id is preserved so the caller can still track/clean up.
    pub fn remote_failure(session_id: Option<String>, error: Option<String>) -> Self {
        let message = error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "The agent failed to complete the task.".to_string());
        Self {
            success: false,
            session_id,
            result: None,
            artifact_files: Vec::new(),
            error: Some(message),
            transport_error: false,
        }
    }

    /// Builds an outcome for a transport-level failure (connection error,
    /// timeout, malformed response body). No session id is available.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            session_id: None,
            result: None,
            artifact_files: Vec::new(),
            error: Some(message.into()),
            transport_error: true,
        }
    }

    /// Classifies this outcome into the user-visible error taxonomy.
    ///
    /// # Returns
    ///
    /// - `Ok(&Value)`: declared success with a usable result payload
    /// - `Err(MccError::EmptyResponse)`: declared success but the payload is
    ///   missing or empty (distinct from a transport error)
    /// - `Err(MccError::Transport)`: the call never produced a remote verdict
    /// - `Err(MccError::RemoteFailure)`: the remote reported failure; the
    ///   message is the remote's reason, verbatim
    pub fn classify(&self) -> Result<&Value> {
        if self.success {
            match &self.result {
                Some(value) if !is_empty_payload(value) => Ok(value),
                _ => Err(MccError::EmptyResponse),
            }
        } else {
            let message = self
                .error
                .clone()
                .unwrap_or_else(|| "The agent failed to complete the task.".to_string());
            if self.transport_error {
                Err(MccError::transport(message))
            } else {
                Err(MccError::remote_failure(message))
            }
        }
    }
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// An abstract client that submits tasks to remote agents.
///
/// This trait is the seam between orchestration and the HTTP layer. The
/// contract is infallible at the boundary: every failure mode is normalized
/// into the returned [`InvocationOutcome`], and each call produces exactly
/// one outcome. Retries are a caller decision.
#[async_trait]
pub trait InvocationAgent: Send + Sync {
    async fn invoke(&self, message: &str, agent_id: &str) -> InvocationOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_outcome_has_result_and_no_error() {
        let outcome = InvocationOutcome::succeeded(
            Some("sess-1".to_string()),
            Some(json!({"title": "X Guide"})),
            Vec::new(),
        );
        assert!(outcome.success);
        assert!(outcome.result.is_some());
        assert!(outcome.error.is_none());
        assert!(outcome.classify().is_ok());
    }

    #[test]
    fn test_failure_outcome_has_error_and_no_result() {
        let outcome =
            InvocationOutcome::remote_failure(Some("sess-1".to_string()), Some("rate limited".into()));
        assert!(!outcome.success);
        assert!(outcome.result.is_none());
        assert_eq!(outcome.error.as_deref(), Some("rate limited"));
        // Session id survives a declared failure for tracking/cleanup.
        assert_eq!(outcome.session_id.as_deref(), Some("sess-1"));
    }

    #[test]
    fn test_remote_failure_without_reason_gets_generic_message() {
        let outcome = InvocationOutcome::remote_failure(None, None);
        assert!(outcome.error.as_deref().unwrap().contains("failed"));

        let blank = InvocationOutcome::remote_failure(None, Some("   ".into()));
        assert!(blank.error.as_deref().unwrap().contains("failed"));
    }

    #[test]
    fn test_classify_empty_payload_is_distinct_from_failure() {
        let missing = InvocationOutcome::succeeded(None, None, Vec::new());
        assert!(matches!(missing.classify(), Err(MccError::EmptyResponse)));

        let empty_object = InvocationOutcome::succeeded(None, Some(json!({})), Vec::new());
        assert!(matches!(empty_object.classify(), Err(MccError::EmptyResponse)));

        let null = InvocationOutcome::succeeded(None, Some(Value::Null), Vec::new());
        assert!(matches!(null.classify(), Err(MccError::EmptyResponse)));
    }

    #[test]
    fn test_classify_remote_failure_surfaces_reason_verbatim() {
        let outcome = InvocationOutcome::remote_failure(None, Some("rate limited".into()));
        match outcome.classify() {
            Err(MccError::RemoteFailure(message)) => assert_eq!(message, "rate limited"),
            other => panic!("expected RemoteFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_failure_has_no_session_id() {
        let outcome = InvocationOutcome::transport_failure("connection refused");
        assert!(!outcome.success);
        assert!(outcome.session_id.is_none());
        assert!(!outcome.error.as_deref().unwrap().is_empty());
    }

    #[test]
    fn test_classify_distinguishes_transport_from_remote_failure() {
        let transport = InvocationOutcome::transport_failure("connection refused");
        assert!(matches!(transport.classify(), Err(MccError::Transport(_))));

        let remote = InvocationOutcome::remote_failure(None, Some("rate limited".into()));
        assert!(matches!(remote.classify(), Err(MccError::RemoteFailure(_))));
    }
}
