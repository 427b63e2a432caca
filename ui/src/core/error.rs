//! Error types shared by the data pipeline.

use thiserror::Error;

/// Failure to load or parse one of the embedded survey datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset `{0}` is not bundled with this build")]
    Missing(&'static str),

    #[error("dataset `{name}` is not valid UTF-8")]
    Encoding {
        name: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("dataset `{name}` could not be parsed: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: csv::Error,
    },
}

/// A categorical value has no entry in the canonical ordering it is sorted by.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    #[error("`{value}` has no rank in the {ordering} ordering")]
    Unranked {
        ordering: &'static str,
        value: String,
    },
}

/// Raised when a caller asks for a strictly ordered aggregation and at least
/// one observed key could not be ranked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("{} value(s) missing from the {ordering} ordering: {}", keys.len(), keys.join(", "))]
    Unranked {
        ordering: &'static str,
        keys: Vec<String>,
    },
}
