//! Data pipeline: records, canonical orderings, aggregation and selection.

pub mod aggregate;
pub mod category;
pub mod coordinator;
pub mod dataset;
pub mod error;
pub mod format;
pub mod ordering;
pub mod record;
pub mod selection;
