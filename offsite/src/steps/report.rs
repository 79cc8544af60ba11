//! The run report triple with factory methods for its legal shapes.

use super::{StepKind, StepOutcome};
use serde::{Deserialize, Serialize};

/// The result triple of one remote test run.
///
/// Produced once by the remote callable and consumed once by the log
/// writer; it has no persistence or identity beyond a single invocation.
/// The factory constructors are the only way the conditional fields get
/// populated, so a report never carries a test outcome for a failed
/// install, nor a result log for a failed test step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Outcome of the install step. Always present.
    pub install: StepOutcome,

    /// Outcome of the test step. Present only if install succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<StepOutcome>,

    /// Raw text of the fixed-named result file read on the remote side.
    /// Present only if the test step succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_test_log: Option<String>,
}

impl RunReport {
    /// Creates a report for a run whose install step failed.
    #[must_use]
    pub fn install_failed(install: StepOutcome) -> Self {
        Self {
            install,
            test: None,
            last_test_log: None,
        }
    }

    /// Creates a report for a run whose test step ran but failed.
    #[must_use]
    pub fn test_failed(install: StepOutcome, test: StepOutcome) -> Self {
        Self {
            install,
            test: Some(test),
            last_test_log: None,
        }
    }

    /// Creates a report for a fully successful run.
    #[must_use]
    pub fn passed(
        install: StepOutcome,
        test: StepOutcome,
        last_test_log: impl Into<String>,
    ) -> Self {
        Self {
            install,
            test: Some(test),
            last_test_log: Some(last_test_log.into()),
        }
    }

    /// Returns true when both steps ran and exited zero.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.install.succeeded() && self.test.as_ref().is_some_and(StepOutcome::succeeded)
    }

    /// The step that decided the run, for reporting.
    #[must_use]
    pub fn failing_step(&self) -> Option<StepKind> {
        if !self.install.succeeded() {
            return Some(StepKind::Install);
        }
        match &self.test {
            Some(test) if !test.succeeded() => Some(StepKind::Test),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn install_ok() -> StepOutcome {
        StepOutcome::ok(StepKind::Install, "configure + build ok")
    }

    #[test]
    fn test_install_failed_shape() {
        let report = RunReport::install_failed(StepOutcome::new(
            StepKind::Install,
            2,
            "fatal: branch not found",
        ));
        assert!(!report.succeeded());
        assert!(report.test.is_none());
        assert!(report.last_test_log.is_none());
        assert_eq!(report.failing_step(), Some(StepKind::Install));
    }

    #[test]
    fn test_test_failed_shape() {
        let report = RunReport::test_failed(
            install_ok(),
            StepOutcome::new(StepKind::Test, 8, "2 tests failed"),
        );
        assert!(!report.succeeded());
        assert!(report.test.is_some());
        assert!(report.last_test_log.is_none());
        assert_eq!(report.failing_step(), Some(StepKind::Test));
    }

    #[test]
    fn test_passed_shape() {
        let report = RunReport::passed(
            install_ok(),
            StepOutcome::ok(StepKind::Test, "100% tests passed"),
            "test #1 ...\n",
        );
        assert!(report.succeeded());
        assert_eq!(report.failing_step(), None);
        assert_eq!(report.last_test_log.as_deref(), Some("test #1 ...\n"));
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let report = RunReport::install_failed(StepOutcome::new(StepKind::Install, 1, "boom"));
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("last_test_log"));
        assert!(!json.contains("\"test\""));

        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
