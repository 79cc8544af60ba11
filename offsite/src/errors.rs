//! Error types for offsite operations.
//!
//! The taxonomy mirrors the failure surface of the tool: credential lookup,
//! transport to the execution service, the service rejecting or losing a
//! task, payload decoding, and local file IO. Remote *step* failures are not
//! errors; they are carried in the run report and decided on by the caller.

use thiserror::Error;

/// The main error type for offsite operations.
#[derive(Debug, Error)]
pub enum OffsiteError {
    /// Credential configuration was missing or unusable.
    #[error("credential error: {0}")]
    Credentials(String),

    /// The HTTP transport to the execution service failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The execution service reported a task-level failure.
    #[error("task {task_id} failed on the service: {reason}")]
    TaskFailed {
        /// The task identifier assigned at submission.
        task_id: String,
        /// The reason reported by the service.
        reason: String,
    },

    /// The service answered with an unexpected status code.
    #[error("service returned HTTP {status} for {context}")]
    ServiceStatus {
        /// HTTP status code.
        status: u16,
        /// What was being requested.
        context: String,
    },

    /// A finished task carried a payload that could not be decoded.
    #[error("payload decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// IO error while writing log files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OffsiteError {
    /// Creates a credential error.
    #[must_use]
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials(message.into())
    }

    /// Creates a task-failed error.
    #[must_use]
    pub fn task_failed(task_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TaskFailed {
            task_id: task_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a service-status error.
    #[must_use]
    pub fn service_status(status: u16, context: impl Into<String>) -> Self {
        Self::ServiceStatus {
            status,
            context: context.into(),
        }
    }
}
