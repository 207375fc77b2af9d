//! statsgate core: metric registry, cells, and exposition encoders.
//!
//! This crate defines the shared metric model (counter / gauge / summary),
//! an explicit registry handle, and the text exposition writers consumed by
//! the HTTP servers. It intentionally carries no transport or runtime
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `StatsgateError`/`Result` so scrape
//! traffic cannot crash the hosting process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod expo;
pub mod metric;
pub mod registry;

/// Shared result type.
pub use error::{Result, StatsgateError};
pub use metric::{FamilySnapshot, MetricKind, Sample, SampleValue};
pub use registry::Registry;
