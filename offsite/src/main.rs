//! Offsite CLI entry point.

use anyhow::Context;
use clap::Parser;

use offsite::logs::LogWriter;
use offsite::remote::HttpExecutor;
use offsite::run::TestRun;

/// Trigger a remote test run of a branch and collect its logs.
#[derive(Debug, Parser)]
#[command(name = "offsite", version, about)]
struct Cli {
    /// Source branch to check out and test on the remote endpoint.
    branch: String,

    /// Identifier of the pre-registered remote execution endpoint.
    endpoint: String,

    /// Directory the log files are written to.
    #[arg(long, default_value = offsite::logs::LOG_DIR)]
    out_dir: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Env-based filter, defaulting to info.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let cli = Cli::parse();

    let executor = HttpExecutor::from_env()
        .context("failed to configure the execution-service client")?;

    let run = TestRun::new(&cli.branch, &cli.endpoint);
    let report = run
        .execute(&executor)
        .await
        .context("remote test run did not produce a result")?;

    LogWriter::new(&cli.out_dir)
        .write(&report)
        .context("failed to write log files")?;

    if !report.succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
