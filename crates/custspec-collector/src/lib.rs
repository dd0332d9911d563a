#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Customer spec collection.
//!
//! - [`SpecCollector`] walks one environment's store and builds
//!   [`CustomerSpec`](custspec_core::CustomerSpec) records
//! - [`SpecSerializer`] writes the aggregated records as YAML, atomically
//! - [`Pipeline`] runs collectors in order, rejects an empty aggregate, and
//!   hands the result to the serializer

pub mod collector;
pub mod pipeline;
pub mod report;
pub mod serializer;

pub use collector::{EntryOutcome, SpecCollector, extract_entry};
pub use pipeline::{Collected, Pipeline};
pub use report::CollectionReport;
pub use serializer::SpecSerializer;
