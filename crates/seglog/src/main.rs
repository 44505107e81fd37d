//! Seglog CLI binary.

use anyhow::Result;
use seglog::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the seglog CLI.
fn main() -> Result<()> {
    // Logs go to stderr so `--json` output on stdout stays parseable.
    // Example: RUST_LOG=seglog=debug,seglog_tsv=trace seglog -i log.txt -p "state > 0"
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("seglog=warn,seglog_tsv=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting seglog CLI");

    let cli = Cli::parse_args();
    cli.execute()?;

    tracing::debug!("Seglog CLI completed successfully");
    Ok(())
}
