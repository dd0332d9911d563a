//! # custspec-cli
//!
//! Wires settings, the etcd adapter, and the collection pipeline together
//! for the `custspec` binary.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod settings;

use std::sync::Arc;

use anyhow::{Context, Result};
use custspec_collector::{Collected, Pipeline, SpecCollector, SpecSerializer};
use custspec_etcd::{EtcdAuth, EtcdStore};

pub use cli::Args;
pub use settings::Settings;

/// Builds one collector per configured environment, in order.
pub fn build_pipeline(settings: &Settings, password: &str) -> Result<Pipeline> {
    let auth = EtcdAuth::new(settings.auth_username.as_str(), password);
    let collectors = settings
        .environments
        .iter()
        .map(|env| {
            let store = EtcdStore::new(env.clone(), auth.clone(), settings.request_timeout())?;
            SpecCollector::new(Arc::new(store), settings.collector.clone())
        })
        .collect::<custspec_core::Result<Vec<_>>>()?;
    Ok(Pipeline::new(collectors))
}

/// Runs one collection according to `args`.
pub async fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?.with_args(&args)?;
    let password = args
        .password
        .as_deref()
        .with_context(|| format!("{} environment variable must be set", cli::PASSWORD_ENV))?;

    let pipeline = build_pipeline(&settings, password)?;
    tracing::info!(environments = ?pipeline.environments(), "collecting customer specs");

    let collected = if args.dry_run {
        let collected = pipeline.collect_all().await?;
        print!("{}", SpecSerializer::render(&collected.records)?);
        collected
    } else {
        pipeline
            .run(&SpecSerializer::new(&settings.output))
            .await
            .with_context(|| format!("failed to produce {}", settings.output.display()))?
    };

    log_summary(&collected);
    Ok(())
}

/// Returns whether a failed run was caused by the store rather than by the
/// data it held or the local setup.
pub fn is_store_failure(err: &anyhow::Error) -> bool {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<custspec_core::Error>())
        .is_some_and(custspec_core::Error::is_transport)
}

fn log_summary(collected: &Collected) {
    for report in &collected.reports {
        tracing::info!(
            environment = %report.environment,
            customers = report.customers,
            entries = report.entries,
            configured = report.configured,
            incomplete = report.incomplete_skipped,
            absent = report.absent_skipped,
            leaves = report.leaves_skipped,
            "environment summary"
        );
    }
    tracing::info!(records = collected.records.len(), "done");
}
