//! Run driver: from branch and endpoint to a run report.

use uuid::Uuid;

use crate::errors::OffsiteError;
use crate::remote::{Executor, TaskSpec};
use crate::steps::RunReport;

/// Fixed-named result file the remote callable reads after a passing
/// test step. CTest writes the output of the most recent run there.
pub const RESULT_FILE: &str = "Testing/Temporary/LastTest.log";

/// One remote test run of a branch on an endpoint.
///
/// Builds the task spec (checkout+build for the install step, the test
/// harness for the test step), submits it through an [`Executor`], and
/// blocks on the result. The sequence is linear: there is no timeout,
/// cancellation, or retry handling here.
#[derive(Debug, Clone)]
pub struct TestRun {
    /// Source branch to check out and test.
    pub branch: String,
    /// Pre-registered remote execution target.
    pub endpoint: String,
    /// Local identity of this invocation, used in log events.
    pub run_id: Uuid,
}

impl TestRun {
    /// Creates a run for a branch on an endpoint.
    #[must_use]
    pub fn new(branch: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            endpoint: endpoint.into(),
            run_id: Uuid::new_v4(),
        }
    }

    /// Builds the task spec submitted to the execution service.
    #[must_use]
    pub fn task_spec(&self) -> TaskSpec {
        TaskSpec {
            endpoint: self.endpoint.clone(),
            branch: self.branch.clone(),
            install_command: format!(
                "git fetch origin && git checkout {branch} && \
                 cmake -S . -B build && cmake --build build --target install",
                branch = self.branch
            ),
            test_command: "ctest --test-dir build --output-on-failure".to_string(),
            result_file: RESULT_FILE.to_string(),
        }
    }

    /// Submits the run and blocks until its report is available.
    pub async fn execute<E: Executor + ?Sized>(
        &self,
        executor: &E,
    ) -> Result<RunReport, OffsiteError> {
        tracing::info!(
            run_id = %self.run_id,
            branch = %self.branch,
            endpoint = %self.endpoint,
            "Starting remote test run"
        );

        let report = executor.run(&self.task_spec()).await?;

        match report.failing_step() {
            None => tracing::info!(run_id = %self.run_id, "Remote test run passed"),
            Some(step) => {
                tracing::warn!(run_id = %self.run_id, %step, "Remote test run failed");
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{TaskId, TaskSpec};
    use crate::steps::{StepKind, StepOutcome};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Executor double that records submissions and replays a canned report.
    struct CannedExecutor {
        report: RunReport,
        submissions: Mutex<Vec<TaskSpec>>,
        waits: AtomicUsize,
    }

    impl CannedExecutor {
        fn new(report: RunReport) -> Self {
            Self {
                report,
                submissions: Mutex::new(Vec::new()),
                waits: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Executor for CannedExecutor {
        async fn submit(&self, spec: &TaskSpec) -> Result<TaskId, OffsiteError> {
            self.submissions.lock().unwrap().push(spec.clone());
            Ok(TaskId("t-1".to_string()))
        }

        async fn wait(&self, _task_id: &TaskId) -> Result<RunReport, OffsiteError> {
            self.waits.fetch_add(1, Ordering::SeqCst);
            Ok(self.report.clone())
        }
    }

    /// Executor double whose submission always fails.
    struct RejectingExecutor;

    #[async_trait]
    impl Executor for RejectingExecutor {
        async fn submit(&self, _spec: &TaskSpec) -> Result<TaskId, OffsiteError> {
            Err(OffsiteError::service_status(503, "POST /tasks"))
        }

        async fn wait(&self, _task_id: &TaskId) -> Result<RunReport, OffsiteError> {
            unreachable!("wait must not be called when submission fails")
        }
    }

    fn passing_report() -> RunReport {
        RunReport::passed(
            StepOutcome::ok(StepKind::Install, "built"),
            StepOutcome::ok(StepKind::Test, "passed"),
            "test #1 ok\n",
        )
    }

    #[test]
    fn test_task_spec_carries_branch_and_endpoint() {
        let run = TestRun::new("fix/patch-sort", "cluster-a");
        let spec = run.task_spec();

        assert_eq!(spec.endpoint, "cluster-a");
        assert_eq!(spec.branch, "fix/patch-sort");
        assert!(spec.install_command.contains("git checkout fix/patch-sort"));
        assert!(spec.test_command.contains("ctest"));
        assert_eq!(spec.result_file, RESULT_FILE);
    }

    #[tokio::test]
    async fn test_execute_submits_then_waits() {
        let executor = CannedExecutor::new(passing_report());
        let run = TestRun::new("main", "cluster-a");

        let report = run.execute(&executor).await.unwrap();

        assert!(report.succeeded());
        assert_eq!(executor.submissions.lock().unwrap().len(), 1);
        assert_eq!(executor.waits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execute_propagates_submission_error() {
        let run = TestRun::new("main", "cluster-a");
        let err = run.execute(&RejectingExecutor).await.unwrap_err();
        assert!(matches!(err, OffsiteError::ServiceStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_failed_report_is_not_an_error() {
        let report = RunReport::install_failed(StepOutcome::new(
            StepKind::Install,
            1,
            "compiler missing",
        ));
        let executor = CannedExecutor::new(report);
        let run = TestRun::new("main", "cluster-a");

        let report = run.execute(&executor).await.unwrap();
        assert_eq!(report.failing_step(), Some(StepKind::Install));
    }
}
