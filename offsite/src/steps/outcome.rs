//! Per-step outcome types.

use serde::{Deserialize, Serialize};

/// The two sequential remote shell invocations of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Environment setup and build of the requested branch.
    Install,
    /// Test-suite execution.
    Test,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Test => write!(f, "test"),
        }
    }
}

/// The outcome of one remote shell step.
///
/// Carries the exit status of the remote subprocess and its captured
/// combined stdout+stderr text. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Which step this outcome belongs to.
    pub kind: StepKind,
    /// Exit status of the remote subprocess.
    pub exit_code: i32,
    /// Captured combined stdout and stderr.
    pub output: String,
}

impl StepOutcome {
    /// Creates a new step outcome.
    #[must_use]
    pub fn new(kind: StepKind, exit_code: i32, output: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code,
            output: output.into(),
        }
    }

    /// Creates a successful outcome for a step.
    #[must_use]
    pub fn ok(kind: StepKind, output: impl Into<String>) -> Self {
        Self::new(kind, 0, output)
    }

    /// Returns true if the remote subprocess exited zero.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}
