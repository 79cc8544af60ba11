//! Step outcome model for a remote test run.
//!
//! This module contains the types describing what came back from the
//! remote endpoint:
//! - Step kind enum for the two sequential remote shell invocations
//! - Per-step outcome (exit status plus captured combined output)
//! - The run report triple consumed by the log writer

mod outcome;
mod report;

pub use outcome::{StepKind, StepOutcome};
pub use report::RunReport;
