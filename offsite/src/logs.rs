//! Log file emission for a finished run.
//!
//! Up to three plain-text files are written under a fixed subdirectory of
//! the working directory, mirroring the shape of the run report: the build
//! log is always written, the test log only when the test step ran, and the
//! last-test log only when the remote result file was retrieved.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::OffsiteError;
use crate::steps::RunReport;

/// Default subdirectory the logs land in.
pub const LOG_DIR: &str = "test-logs";

/// File name of the install step's captured output.
pub const BUILD_LOG: &str = "build.log";

/// File name of the test step's captured output.
pub const TEST_LOG: &str = "test.log";

/// File name of the retrieved remote result file, kept verbatim.
pub const LAST_TEST_LOG: &str = "LastTest.log";

/// Writes run-report logs to a local directory.
#[derive(Debug, Clone)]
pub struct LogWriter {
    out_dir: PathBuf,
}

impl Default for LogWriter {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(LOG_DIR),
        }
    }
}

impl LogWriter {
    /// Creates a writer targeting the given directory.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// The directory logs are written to.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Writes the log files for a report and returns the paths written.
    ///
    /// The output directory is created if absent; re-running against an
    /// existing directory succeeds and overwrites the previous logs.
    pub fn write(&self, report: &RunReport) -> Result<Vec<PathBuf>, OffsiteError> {
        fs::create_dir_all(&self.out_dir)?;
        let mut written = Vec::new();

        let build_path = self.out_dir.join(BUILD_LOG);
        fs::write(&build_path, &report.install.output)?;
        tracing::info!(path = %build_path.display(), "Wrote build log");
        written.push(build_path);

        if let Some(test) = &report.test {
            let test_path = self.out_dir.join(TEST_LOG);
            fs::write(&test_path, &test.output)?;
            tracing::info!(path = %test_path.display(), "Wrote test log");
            written.push(test_path);
        }

        if let Some(last_test) = &report.last_test_log {
            let last_path = self.out_dir.join(LAST_TEST_LOG);
            fs::write(&last_path, last_test)?;
            tracing::info!(path = %last_path.display(), "Wrote last-test log");
            written.push(last_path);
        }

        Ok(written)
    }
}
