//! Shared error type across statsgate crates.

use thiserror::Error;

use crate::metric::MetricKind;

/// Shared result type.
pub type Result<T> = std::result::Result<T, StatsgateError>;

/// Unified error type used by core and the HTTP servers.
#[derive(Debug, Error)]
pub enum StatsgateError {
    /// A metric with this name is already registered. Registration never
    /// silently overwrites; callers are expected to fail fast at startup.
    #[error("duplicate metric name: {name}")]
    DuplicateName { name: String },
    /// Metric name does not match `[a-zA-Z_:][a-zA-Z0-9_:]*`.
    #[error("invalid metric name: {name}")]
    InvalidName { name: String },
    /// No metric registered under this name.
    #[error("unknown metric: {name}")]
    UnknownMetric { name: String },
    /// The operation targets a different metric kind than the one registered.
    #[error("kind mismatch for {name}: operation expects {expected}, registered as {actual}")]
    KindMismatch {
        name: String,
        expected: MetricKind,
        actual: MetricKind,
    },
    /// Label value count does not match the label names declared at
    /// registration.
    #[error("label cardinality mismatch for {name}: expected {expected} values, got {got}")]
    LabelCardinality {
        name: String,
        expected: usize,
        got: usize,
    },
    /// Rejected sample value (e.g. negative or NaN counter delta).
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("internal: {0}")]
    Internal(String),
}
