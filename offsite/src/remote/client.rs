//! reqwest-based implementation of the executor seam.

use async_trait::async_trait;
use serde::Deserialize;

use super::config::ClientConfig;
use super::protocol::{Executor, TaskEnvelope, TaskId, TaskSpec, TaskState};
use crate::errors::OffsiteError;
use crate::steps::RunReport;

/// Response body of a task submission.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    task_id: TaskId,
}

/// HTTP client for the managed execution service.
///
/// Submits the task spec as JSON with bearer-token auth, then polls the
/// task status at the configured interval until the state is terminal.
/// There is no retry or backoff layer; transport and service errors
/// propagate to the caller.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpExecutor {
    /// Creates an executor from a client configuration.
    pub fn new(config: ClientConfig) -> Result<Self, OffsiteError> {
        if config.token.is_empty() {
            return Err(OffsiteError::credentials("API token is empty"));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates an executor configured from the environment.
    pub fn from_env() -> Result<Self, OffsiteError> {
        Self::new(ClientConfig::from_env()?)
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.config.base_url.trim_end_matches('/'))
    }

    fn task_url(&self, task_id: &TaskId) -> String {
        format!("{}/{}", self.tasks_url(), task_id)
    }

    async fn fetch_envelope(&self, task_id: &TaskId) -> Result<TaskEnvelope, OffsiteError> {
        let url = self.task_url(task_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OffsiteError::service_status(
                status.as_u16(),
                format!("GET {url}"),
            ));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<TaskEnvelope>(&body)?)
    }
}

/// Maps a polled envelope to the poll loop's decision.
///
/// Returns `Ok(None)` while the task is still pending or running. A
/// completed envelope yields its report; a completed envelope without one,
/// or a failed envelope, is a task-level failure.
fn resolve(envelope: TaskEnvelope) -> Result<Option<RunReport>, OffsiteError> {
    match envelope.state {
        TaskState::Completed => match envelope.report {
            Some(report) => Ok(Some(report)),
            None => Err(OffsiteError::task_failed(
                envelope.task_id.to_string(),
                "completed task carried no report",
            )),
        },
        TaskState::Failed => {
            let reason = envelope
                .reason
                .unwrap_or_else(|| "no reason reported".to_string());
            Err(OffsiteError::task_failed(envelope.task_id.to_string(), reason))
        }
        TaskState::Pending | TaskState::Running => Ok(None),
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn submit(&self, spec: &TaskSpec) -> Result<TaskId, OffsiteError> {
        let url = self.tasks_url();
        tracing::debug!(endpoint = %spec.endpoint, branch = %spec.branch, "Submitting task");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(spec)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OffsiteError::service_status(
                status.as_u16(),
                format!("POST {url}"),
            ));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<SubmitResponse>(&body)?.task_id)
    }

    async fn wait(&self, task_id: &TaskId) -> Result<RunReport, OffsiteError> {
        loop {
            let envelope = self.fetch_envelope(task_id).await?;
            tracing::debug!(%task_id, state = ?envelope.state, "Polled task");

            match resolve(envelope)? {
                Some(report) => return Ok(report),
                None => tokio::time::sleep(self.config.poll_interval()).await,
            }
        }
    }
}
