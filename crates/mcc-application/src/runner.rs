//! TaskRunner - per-screen orchestration of one agent task.
//!
//! Ties the three collaborators together: invoke the agent, hand the session
//! id to the activity tracker the moment it exists, classify the outcome,
//! and record exactly one history item per completed task. A busy flag
//! rejects a second invocation while one is in flight; the runner, not the
//! client, enforces this.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mcc_core::error::{MccError, Result};
use mcc_core::history::{HistoryItem, HistoryStore};
use mcc_core::invocation::InvocationAgent;
use mcc_interaction::SessionActivityTracker;

use crate::agents::AgentCatalog;
use crate::payload::{self, ContentResult, GraphicsResult};
use crate::prompt::{ArticleSpec, GraphicSpec, OptimizationSource};

/// One task a user can request from a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskRequest {
    Article(ArticleSpec),
    Optimization(OptimizationSource),
    Graphic(GraphicSpec),
}

impl TaskRequest {
    fn prompt(&self) -> String {
        match self {
            TaskRequest::Article(spec) => spec.prompt(),
            TaskRequest::Optimization(source) => source.prompt(),
            TaskRequest::Graphic(spec) => spec.prompt(),
        }
    }
}

/// Outcome of a completed task: the recorded history item plus the session
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub item: HistoryItem,
    pub session_id: Option<String>,
}

/// Orchestrates invocations for one screen.
pub struct TaskRunner {
    agent: Arc<dyn InvocationAgent>,
    tracker: Arc<SessionActivityTracker>,
    history: Arc<HistoryStore>,
    catalog: AgentCatalog,
    busy: AtomicBool,
}

impl TaskRunner {
    pub fn new(
        agent: Arc<dyn InvocationAgent>,
        tracker: Arc<SessionActivityTracker>,
        history: Arc<HistoryStore>,
        catalog: AgentCatalog,
    ) -> Self {
        Self {
            agent,
            tracker,
            history,
            catalog,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether an invocation is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Runs one task end to end.
    ///
    /// Any session id the platform returns is handed to the tracker before
    /// the payload is processed, and also when the invocation failed (the
    /// session may still carry activity worth showing). The history store is
    /// touched exactly once, and only on a usable result.
    ///
    /// # Errors
    ///
    /// - `MccError::Busy`: another task is in flight on this runner
    /// - `MccError::Transport` / `RemoteFailure` / `EmptyResponse`: the
    ///   user-visible failure taxonomy; no history entry is created
    pub async fn run(&self, request: TaskRequest) -> Result<TaskReport> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let agent_id = match &request {
            TaskRequest::Article(_) | TaskRequest::Optimization(_) => {
                self.catalog.content_agent_id.as_str()
            }
            TaskRequest::Graphic(_) => self.catalog.graphics_agent_id.as_str(),
        };
        let message = request.prompt();

        tracing::debug!("Invoking agent {} for task", agent_id);
        let outcome = self.agent.invoke(&message, agent_id).await;

        // The session starts executing server-side as soon as it exists, so
        // tracking begins before any further outcome processing.
        if let Some(session_id) = &outcome.session_id {
            self.tracker.track(session_id.clone()).await;
        }

        let result = match outcome.classify() {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!("Task did not produce a result: {}", err);
                return Err(err);
            }
        };

        let item = match &request {
            TaskRequest::Article(spec) => {
                payload::article_item(&ContentResult::from_value(result), &spec.topic)
            }
            TaskRequest::Optimization(_) => {
                payload::optimization_item(&ContentResult::from_value(result))
            }
            TaskRequest::Graphic(spec) => payload::graphic_item(
                &GraphicsResult::from_value(result),
                &outcome.artifact_files,
                &spec.description,
            ),
        };

        self.history.append(item.clone()).await;

        Ok(TaskReport {
            item,
            session_id: outcome.session_id.clone(),
        })
    }
}

/// Releases the busy flag on every exit path.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| MccError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mcc_core::error::Result as CoreResult;
    use mcc_core::history::{HistoryFilter, HistoryKind, HistoryRepository};
    use mcc_core::invocation::{ArtifactFile, InvocationOutcome};
    use mcc_interaction::activity_feed::{ActivityFeed, FeedPage};
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    // Agent returning a scripted outcome, recording what it was asked.
    struct ScriptedAgent {
        outcome: InvocationOutcome,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedAgent {
        fn new(outcome: InvocationOutcome) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl InvocationAgent for ScriptedAgent {
        async fn invoke(&self, message: &str, agent_id: &str) -> InvocationOutcome {
            self.calls
                .lock()
                .unwrap()
                .push((message.to_string(), agent_id.to_string()));
            self.outcome.clone()
        }
    }

    // Agent that stays in flight until released, for busy-flag tests.
    struct BlockedAgent {
        release: tokio::sync::Notify,
    }

    #[async_trait]
    impl InvocationAgent for BlockedAgent {
        async fn invoke(&self, _message: &str, _agent_id: &str) -> InvocationOutcome {
            self.release.notified().await;
            InvocationOutcome::succeeded(None, Some(json!({"title": "late"})), Vec::new())
        }
    }

    // Feed with no activity; the runner only needs the tracker to accept
    // the session id.
    struct QuietFeed;

    #[async_trait]
    impl ActivityFeed for QuietFeed {
        async fn fetch(&self, _session_id: &str) -> CoreResult<FeedPage> {
            Ok(FeedPage {
                active: true,
                events: Vec::new(),
            })
        }
    }

    #[derive(Default)]
    struct MemoryHistoryRepository {
        stored: Mutex<Vec<HistoryItem>>,
    }

    #[async_trait]
    impl HistoryRepository for MemoryHistoryRepository {
        async fn load(&self) -> CoreResult<Vec<HistoryItem>> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, items: &[HistoryItem]) -> CoreResult<()> {
            *self.stored.lock().unwrap() = items.to_vec();
            Ok(())
        }
    }

    async fn runner_with(agent: Arc<dyn InvocationAgent>) -> (TaskRunner, Arc<HistoryStore>) {
        let tracker = Arc::new(SessionActivityTracker::with_poll_interval(
            Arc::new(QuietFeed),
            Duration::from_millis(50),
        ));
        let history =
            Arc::new(HistoryStore::load(Arc::new(MemoryHistoryRepository::default())).await);
        let catalog = AgentCatalog {
            content_agent_id: "content-agent-1".to_string(),
            graphics_agent_id: "graphics-agent-1".to_string(),
        };
        (
            TaskRunner::new(agent, tracker, history.clone(), catalog),
            history,
        )
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_successful_article_is_recorded_newest_first() {
        let agent = Arc::new(ScriptedAgent::new(InvocationOutcome::succeeded(
            Some("sess-1".to_string()),
            Some(json!({"title": "X Guide", "seo_score": 87})),
            Vec::new(),
        )));
        let (runner, history) = runner_with(agent.clone()).await;

        let report = runner
            .run(TaskRequest::Article(ArticleSpec::new("Write about X")))
            .await
            .unwrap();

        assert_eq!(report.item.title, "X Guide");
        assert_eq!(report.session_id.as_deref(), Some("sess-1"));

        let listed = history.list(HistoryFilter::All, None).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].kind, HistoryKind::Article);
        assert_eq!(listed[0].title, "X Guide");
        assert_eq!(listed[0].seo_score, Some(87));

        // The content agent handled it, with the built prompt.
        let calls = agent.calls.lock().unwrap();
        assert_eq!(calls[0].1, "content-agent-1");
        assert!(calls[0].0.contains("Write about X"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_session_is_tracked_on_success() {
        let agent = Arc::new(ScriptedAgent::new(InvocationOutcome::succeeded(
            Some("sess-track".to_string()),
            Some(json!({"title": "T"})),
            Vec::new(),
        )));
        let (runner, _history) = runner_with(agent).await;

        runner
            .run(TaskRequest::Article(ArticleSpec::new("topic")))
            .await
            .unwrap();

        assert_eq!(
            runner.tracker.session_id().await.as_deref(),
            Some("sess-track")
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_response_creates_no_history() {
        let agent = Arc::new(ScriptedAgent::new(InvocationOutcome::succeeded(
            Some("sess-2".to_string()),
            None,
            Vec::new(),
        )));
        let (runner, history) = runner_with(agent).await;

        let err = runner
            .run(TaskRequest::Article(ArticleSpec::new("topic")))
            .await
            .unwrap_err();

        assert!(matches!(err, MccError::EmptyResponse));
        assert!(history.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_remote_failure_surfaces_verbatim_and_still_tracks() {
        let agent = Arc::new(ScriptedAgent::new(InvocationOutcome::remote_failure(
            Some("sess-3".to_string()),
            Some("rate limited".to_string()),
        )));
        let (runner, history) = runner_with(agent).await;

        let err = runner
            .run(TaskRequest::Article(ArticleSpec::new("topic")))
            .await
            .unwrap_err();

        match err {
            MccError::RemoteFailure(message) => assert_eq!(message, "rate limited"),
            other => panic!("expected RemoteFailure, got {:?}", other),
        }
        assert!(history.is_empty().await);

        // The failed invocation's session is still handed to the tracker.
        assert_eq!(runner.tracker.session_id().await.as_deref(), Some("sess-3"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_transport_failure_surfaces_without_session() {
        let agent = Arc::new(ScriptedAgent::new(InvocationOutcome::transport_failure(
            "Could not reach the agent platform.",
        )));
        let (runner, history) = runner_with(agent).await;

        let err = runner
            .run(TaskRequest::Graphic(GraphicSpec::new("a banner")))
            .await
            .unwrap_err();

        assert!(matches!(err, MccError::Transport(_)));
        assert!(history.is_empty().await);
        assert!(runner.tracker.session_id().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_graphic_task_routes_to_graphics_agent_and_records_image() {
        let agent = Arc::new(ScriptedAgent::new(InvocationOutcome::succeeded(
            Some("sess-4".to_string()),
            Some(json!({"description": "Dashboard illustration", "style": "Modern"})),
            vec![ArtifactFile {
                file_url: "https://cdn.example.test/g.png".to_string(),
            }],
        )));
        let (runner, history) = runner_with(agent.clone()).await;

        runner
            .run(TaskRequest::Graphic(GraphicSpec::new("A dashboard")))
            .await
            .unwrap();

        let listed = history.list(HistoryFilter::All, None).await;
        assert_eq!(listed[0].kind, HistoryKind::Graphic);
        assert_eq!(
            listed[0].image_url.as_deref(),
            Some("https://cdn.example.test/g.png")
        );
        assert_eq!(agent.calls.lock().unwrap()[0].1, "graphics-agent-1");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_second_invocation_while_busy_is_rejected() {
        let agent = Arc::new(BlockedAgent {
            release: tokio::sync::Notify::new(),
        });
        let (runner, _history) = runner_with(agent.clone()).await;
        let runner = Arc::new(runner);

        let first = {
            let runner = runner.clone();
            tokio::spawn(async move {
                runner
                    .run(TaskRequest::Article(ArticleSpec::new("slow topic")))
                    .await
            })
        };

        // Wait until the first run holds the busy flag.
        while !runner.is_busy() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let err = runner
            .run(TaskRequest::Article(ArticleSpec::new("second topic")))
            .await
            .unwrap_err();
        assert!(matches!(err, MccError::Busy));

        agent.release.notify_one();
        first.await.unwrap().unwrap();
        assert!(!runner.is_busy());
    }
}
