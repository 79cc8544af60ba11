//! Remote submission and result collection.
//!
//! The managed execution service is an opaque external dependency: a task
//! spec goes in, a run report comes out. The [`Executor`] trait is the seam
//! between the run driver and the service; [`HttpExecutor`] is the reqwest
//! implementation used by the binary.

mod client;
mod config;
mod protocol;

pub use client::HttpExecutor;
pub use config::ClientConfig;
pub use protocol::{Executor, TaskEnvelope, TaskId, TaskSpec, TaskState};
