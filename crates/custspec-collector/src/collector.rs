//! Store traversal and record construction.
//!
//! A collection run is a breadth-first walk over a tree of fixed depth:
//!
//! 1. list the children of the customer root, one per customer;
//! 2. list every customer's children, gathering all composite
//!    `/{customer}/{channel}` keys before going further;
//! 3. fetch each composite key and keep the ones whose ecpr variables are
//!    all present.
//!
//! Requests are issued one at a time, in that order.

use std::collections::HashMap;
use std::sync::Arc;

use custspec_core::{
    CollectorConfig, Credentials, CustomerSpec, Error, KeyPath, KeyValueStore, Lookup, RemoteNode,
    Result,
};

use crate::report::CollectionReport;

/// What a single composite key turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The node has no children; it is a scalar, not a configuration group.
    Leaf,
    /// Fewer ecpr variables than required.
    Incomplete {
        /// Number of ecpr variables found
        found: usize,
    },
    /// Fully configured; produces a record.
    Configured(CustomerSpec),
}

/// Collects [`CustomerSpec`] records from one environment's store.
pub struct SpecCollector {
    store: Arc<dyn KeyValueStore>,
    config: CollectorConfig,
}

impl SpecCollector {
    /// Creates a collector, validating `config`.
    pub fn new(store: Arc<dyn KeyValueStore>, config: CollectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Returns the environment name of the underlying store.
    pub fn environment(&self) -> &str {
        self.store.name()
    }

    /// Collects all configured records, in discovery order.
    pub async fn collect(&self) -> Result<Vec<CustomerSpec>> {
        let (records, _) = self.collect_with_report().await?;
        Ok(records)
    }

    /// Collects all configured records along with traversal counters.
    pub async fn collect_with_report(&self) -> Result<(Vec<CustomerSpec>, CollectionReport)> {
        let mut report = CollectionReport::new(self.environment());
        tracing::debug!(environment = %self.environment(), "collecting customer specs");

        let customers = self.list_customers(&mut report).await?;
        let entries = self.list_entries(&customers, &mut report).await?;

        let mut records = Vec::new();
        for key in &entries {
            let Some(node) = self.fetch(key, &mut report).await? else {
                continue;
            };
            match extract_entry(key, &node, &self.config)? {
                EntryOutcome::Leaf => {
                    tracing::debug!(environment = %self.environment(), key = %key, "skipping leaf entry");
                    report.leaves_skipped += 1;
                }
                EntryOutcome::Incomplete { found } => {
                    tracing::debug!(
                        environment = %self.environment(),
                        key = %key,
                        found,
                        required = self.config.required_variables,
                        "ecpr not fully configured"
                    );
                    report.incomplete_skipped += 1;
                }
                EntryOutcome::Configured(spec) => {
                    tracing::debug!(
                        environment = %self.environment(),
                        customer = spec.customer_code(),
                        channel = %spec.release_channel(),
                        "ecpr configured"
                    );
                    records.push(spec);
                }
            }
        }

        report.configured = records.len();
        tracing::info!(
            environment = %report.environment,
            customers = report.customers,
            entries = report.entries,
            configured = report.configured,
            "collection finished"
        );
        Ok((records, report))
    }

    /// Phase 1: customer names under the customer root.
    async fn list_customers(&self, report: &mut CollectionReport) -> Result<Vec<String>> {
        let root = self.config.customer_root.clone();
        let Some(node) = self.fetch(&root, report).await? else {
            return Ok(Vec::new());
        };
        let customers: Vec<String> = node
            .children()
            .iter()
            .map(|c| c.name().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        report.customers = customers.len();
        Ok(customers)
    }

    /// Phase 2: every customer's composite keys, gathered before any detail fetch.
    async fn list_entries(
        &self,
        customers: &[String],
        report: &mut CollectionReport,
    ) -> Result<Vec<String>> {
        let mut entries = Vec::new();
        for customer in customers {
            let Some(node) = self.fetch(customer, report).await? else {
                continue;
            };
            entries.extend(node.children().iter().map(|c| c.key.clone()));
        }
        report.entries = entries.len();
        Ok(entries)
    }

    /// Fetches `key`, turning absent lookups into `None` per the absence policy.
    async fn fetch(&self, key: &str, report: &mut CollectionReport) -> Result<Option<RemoteNode>> {
        match self.store.get(key).await? {
            Lookup::Found(node) => Ok(Some(node)),
            Lookup::Missing { status } if self.config.absence_policy.is_absent(status) => {
                tracing::debug!(environment = %self.environment(), key, status, "no data");
                report.absent_skipped += 1;
                Ok(None)
            }
            Lookup::Missing { status } => Err(Error::Store {
                key: key.to_string(),
                status,
            }),
        }
    }
}

/// Applies the completeness predicate to one fetched composite key and, when
/// it passes, builds the record.
///
/// Only non-directory children whose key contains the variable marker
/// count towards the threshold. Variables are then looked up by the last
/// segment of their key. An unknown channel segment or a missing
/// password variable on a configured entry is an error.
pub fn extract_entry(key: &str, node: &RemoteNode, config: &CollectorConfig) -> Result<EntryOutcome> {
    if !node.has_children() {
        return Ok(EntryOutcome::Leaf);
    }

    let children = node.children();
    let found = children
        .iter()
        .filter(|c| !c.dir && config.is_variable(&c.key))
        .count();
    if found < config.required_variables {
        return Ok(EntryOutcome::Incomplete { found });
    }

    let variables: HashMap<&str, &str> = children
        .iter()
        .filter(|c| config.is_variable(&c.key))
        .filter_map(|c| c.value.as_deref().map(|v| (c.name(), v)))
        .collect();

    let path = KeyPath::parse(key)?;
    let channel = path.release_channel()?;
    let password = variables
        .get(config.password_variable.as_str())
        .ok_or_else(|| Error::MissingVariable {
            key: key.to_string(),
            variable: config.password_variable.clone(),
        })?;

    Ok(EntryOutcome::Configured(CustomerSpec::new(
        path.customer(),
        channel,
        config.endpoint_for(path.customer(), channel.code()),
        Credentials::new(config.credentials_username.as_str(), password),
    )))
}
