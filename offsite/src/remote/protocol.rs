//! Wire types and the executor seam for the execution service.
//!
//! The service contract is a minimal submit-then-poll pair: a task spec is
//! posted, the service assigns an id, and the status envelope is polled
//! until it reaches a terminal state. A completed envelope carries the run
//! report produced by the remote callable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::OffsiteError;
use crate::steps::RunReport;

/// Identifier of a submitted task, assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What gets submitted to the execution service.
///
/// The remote callable runs `install_command` and, if it exits zero,
/// `test_command`, capturing combined stdout+stderr of each. If the test
/// step also exits zero it reads `result_file` and returns its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Pre-registered remote execution target.
    pub endpoint: String,
    /// Source branch the run is about.
    pub branch: String,
    /// Shell command line for the install step.
    pub install_command: String,
    /// Shell command line for the test step.
    pub test_command: String,
    /// Fixed-named result file read after a passing test step.
    pub result_file: String,
}

/// Lifecycle state of a task on the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Accepted, not yet scheduled on the endpoint.
    Pending,
    /// Executing on the endpoint.
    Running,
    /// Finished; the envelope carries a run report.
    Completed,
    /// The service could not run the task to completion.
    Failed,
}

impl TaskState {
    /// Returns true if no further state transitions will happen.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Polled status envelope for a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEnvelope {
    /// Task identifier.
    pub task_id: TaskId,
    /// Current lifecycle state.
    pub state: TaskState,
    /// When the task was accepted.
    pub submitted_at: DateTime<Utc>,
    /// When the task reached a terminal state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Run report. Present only when `state` is `Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<RunReport>,
    /// Failure reason. Present only when `state` is `Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The seam between the run driver and the execution service.
///
/// Implementations submit a callable for execution on a remote endpoint and
/// block until its result is available. Errors from either operation
/// propagate to the caller unhandled; there is no retry layer.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Submits a task spec, returning the service-assigned id.
    async fn submit(&self, spec: &TaskSpec) -> Result<TaskId, OffsiteError>;

    /// Blocks until the task reaches a terminal state and returns its report.
    async fn wait(&self, task_id: &TaskId) -> Result<RunReport, OffsiteError>;

    /// Submits a spec and waits for its report.
    async fn run(&self, spec: &TaskSpec) -> Result<RunReport, OffsiteError> {
        let task_id = self.submit(spec).await?;
        tracing::info!(%task_id, endpoint = %spec.endpoint, "Task submitted");
        self.wait(&task_id).await
    }
}
