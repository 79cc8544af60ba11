//! # Offsite
//!
//! Offsite triggers a test run of a source branch on a remote, externally
//! managed compute endpoint, waits for the run to finish, and writes the
//! captured build/test output to local log files.
//!
//! The flow is a single linear sequence:
//!
//! - Build a [`remote::TaskSpec`] for a branch and endpoint.
//! - Submit it through an [`remote::Executor`] and block on the result.
//! - Receive a [`steps::RunReport`]: the install step outcome, the test
//!   step outcome (if install succeeded), and the retrieved result-log
//!   text (if the tests passed).
//! - Write up to three plain-text log files via [`logs::LogWriter`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use offsite::prelude::*;
//!
//! let config = ClientConfig::from_env()?;
//! let executor = HttpExecutor::new(config)?;
//! let report = TestRun::new("main", "prod-endpoint").execute(&executor).await?;
//! let written = LogWriter::default().write(&report)?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

pub mod errors;
pub mod logs;
pub mod remote;
pub mod run;
pub mod steps;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::OffsiteError;
    pub use crate::logs::LogWriter;
    pub use crate::remote::{
        ClientConfig, Executor, HttpExecutor, TaskId, TaskSpec, TaskState,
    };
    pub use crate::run::TestRun;
    pub use crate::steps::{RunReport, StepKind, StepOutcome};
}
