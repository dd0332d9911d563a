//! Multi-environment collection and persistence.

use custspec_core::{CustomerSpec, Error, Result};

use crate::collector::SpecCollector;
use crate::report::CollectionReport;
use crate::serializer::SpecSerializer;

/// Records aggregated across environments, with per-environment counters.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    /// Records in environment order, then discovery order.
    pub records: Vec<CustomerSpec>,
    /// One report per environment, in collection order.
    pub reports: Vec<CollectionReport>,
}

/// Runs collectors in order and persists the aggregate.
pub struct Pipeline {
    collectors: Vec<SpecCollector>,
}

impl Pipeline {
    /// Creates a pipeline; `collectors` are run in the given order.
    pub fn new(collectors: Vec<SpecCollector>) -> Self {
        Self { collectors }
    }

    /// Returns the environment names in collection order.
    pub fn environments(&self) -> Vec<&str> {
        self.collectors.iter().map(|c| c.environment()).collect()
    }

    /// Collects every environment and concatenates the results.
    ///
    /// An environment with no records is fine on its own; an empty aggregate
    /// is [`Error::EmptyResult`].
    pub async fn collect_all(&self) -> Result<Collected> {
        let mut collected = Collected::default();
        for collector in &self.collectors {
            let (records, report) = collector.collect_with_report().await?;
            collected.records.extend(records);
            collected.reports.push(report);
        }

        if collected.records.is_empty() {
            return Err(Error::EmptyResult {
                environments: self.collectors.len(),
            });
        }
        Ok(collected)
    }

    /// Collects every environment and writes the aggregate with `serializer`.
    ///
    /// The serializer is not invoked when the aggregate is empty.
    pub async fn run(&self, serializer: &SpecSerializer) -> Result<Collected> {
        let collected = self.collect_all().await?;
        serializer.persist(&collected.records)?;
        Ok(collected)
    }
}
