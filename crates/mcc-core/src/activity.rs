//! Session activity snapshot model.
//!
//! A snapshot aggregates the step-by-step progress of one remote agent
//! session. It is built incrementally from feed observations and only ever
//! refines forward: a step's status advances pending -> running ->
//! done/failed and never regresses, and the `active` flag flips true ->
//! false exactly once. The feed itself has no delivery guarantees, so the
//! snapshot tolerates gaps and out-of-order arrival by merging on rank
//! rather than trusting feed ordering.

use serde::{Deserialize, Serialize};

/// Execution status of a single step within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    Failed,
}

impl StepStatus {
    /// Ordering rank used for monotonic merges. Terminal states share the
    /// top rank so done/failed never flip into each other.
    fn rank(self) -> u8 {
        match self {
            StepStatus::Pending => 0,
            StepStatus::Running => 1,
            StepStatus::Done | StepStatus::Failed => 2,
        }
    }

    /// Whether this status is terminal (done or failed).
    pub fn is_terminal(self) -> bool {
        self.rank() == 2
    }
}

/// One observed step of a session's execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Stable identifier for the step within its session.
    pub id: String,
    /// Human-readable label (e.g. "Researching keywords").
    pub label: String,
    pub status: StepStatus,
}

impl StepRecord {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        status: StepStatus,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            status,
        }
    }
}

/// The continuously updated progress view of one session.
///
/// Scoped strictly to a single session id: created when tracking starts and
/// discarded when tracking stops. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub session_id: String,
    pub steps: Vec<StepRecord>,
    /// True while the session is still executing server-side.
    pub active: bool,
}

impl ActivitySnapshot {
    /// Creates an empty snapshot for a session that just started tracking.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            steps: Vec::new(),
            active: true,
        }
    }

    /// Merges newly observed steps into the snapshot monotonically.
    ///
    /// Known steps (matched by id) only advance in rank; a stale observation
    /// with a lower rank is ignored. Unknown steps are appended in the order
    /// observed. Labels follow the most recent observation that was applied.
    ///
    /// Returns true if the snapshot changed.
    pub fn merge(&mut self, observed: &[StepRecord]) -> bool {
        let mut changed = false;
        for incoming in observed {
            match self.steps.iter_mut().find(|s| s.id == incoming.id) {
                Some(existing) => {
                    if incoming.status.rank() > existing.status.rank() {
                        existing.status = incoming.status;
                        existing.label = incoming.label.clone();
                        changed = true;
                    }
                }
                None => {
                    self.steps.push(incoming.clone());
                    changed = true;
                }
            }
        }
        changed
    }

    /// Marks the session as finished. Idempotent; the active flag only ever
    /// transitions true -> false.
    pub fn finish(&mut self) {
        self.active = false;
    }

    /// Count of steps that reached a terminal status.
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.status.is_terminal()).count()
    }
}
