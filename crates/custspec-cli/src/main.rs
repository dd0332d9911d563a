//! custspec CLI
//!
//! Writes `customers.yaml` from the production and development etcd stores.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use custspec_cli::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for --dry-run output
    let default_filter = if args.verbose {
        "info,custspec=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = custspec_cli::run(args).await {
        tracing::error!(
            store_failure = custspec_cli::is_store_failure(&e),
            "custspec failed: {e:#}"
        );
        return Err(e);
    }
    Ok(())
}
