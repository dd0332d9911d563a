//! Per-environment traversal counters.

use serde::Serialize;

/// Counters gathered during one collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    /// Environment the counters belong to.
    pub environment: String,
    /// Customers listed under the customer root.
    pub customers: usize,
    /// Composite keys gathered across all customers.
    pub entries: usize,
    /// Lookups skipped because the store had no data.
    pub absent_skipped: usize,
    /// Entries skipped because they had no children.
    pub leaves_skipped: usize,
    /// Entries skipped because ecpr was not fully configured.
    pub incomplete_skipped: usize,
    /// Records produced.
    pub configured: usize,
}

impl CollectionReport {
    /// Creates zeroed counters for `environment`.
    pub fn new<S: Into<String>>(environment: S) -> Self {
        Self {
            environment: environment.into(),
            ..Self::default()
        }
    }
}
