//! Explicit metric registry.
//!
//! One registry instance per process is the expected shape, but nothing here
//! is global: callers construct a `Registry`, pass the handle into whatever
//! needs to mutate or render it, and tests can hold as many independent
//! instances as they like.
//!
//! Registration happens once at startup and fails fast on duplicate names.
//! Mutation (`set_gauge`, `inc_counter`, `observe_summary`) and rendering are
//! safe to call concurrently; cells are atomics and series maps are sharded.
//! Distinct summary label tuples are never evicted, so label cardinality is
//! the caller's responsibility.

use std::sync::{Arc, RwLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{Result, StatsgateError};
use crate::expo::{self, Format};
use crate::metric::{Cell, FamilySnapshot, Metric, MetricKind, SummarySeries};

#[derive(Default)]
pub struct Registry {
    by_name: DashMap<String, Arc<Metric>>,
    /// Registration order, for deterministic exposition output.
    order: RwLock<Vec<Arc<Metric>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter. Counters only ever move up.
    pub fn register_counter(&self, name: &str, help: &str) -> Result<()> {
        self.register(name, help, Cell::Counter(Default::default()))
    }

    /// Register a gauge.
    pub fn register_gauge(&self, name: &str, help: &str) -> Result<()> {
        self.register(name, help, Cell::Gauge(Default::default()))
    }

    /// Register a labeled summary. `label_names` fixes the arity every
    /// subsequent observation must match; an empty slice makes a plain
    /// unlabeled summary.
    pub fn register_summary(&self, name: &str, help: &str, label_names: &[&str]) -> Result<()> {
        self.register(
            name,
            help,
            Cell::Summary {
                label_names: label_names.iter().map(|s| s.to_string()).collect(),
                series: DashMap::new(),
            },
        )
    }

    fn register(&self, name: &str, help: &str, cell: Cell) -> Result<()> {
        if !valid_name(name) {
            return Err(StatsgateError::InvalidName { name: name.into() });
        }
        let metric = Arc::new(Metric {
            name: name.to_string(),
            help: help.to_string(),
            cell,
        });
        match self.by_name.entry(metric.name.clone()) {
            Entry::Occupied(_) => Err(StatsgateError::DuplicateName { name: name.into() }),
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&metric));
                self.order
                    .write()
                    .map_err(|_| StatsgateError::Internal("registry order lock poisoned".into()))?
                    .push(metric);
                tracing::debug!(metric = name, "registered");
                Ok(())
            }
        }
    }

    /// Replace the gauge's current value. Last write wins; no history.
    pub fn set_gauge(&self, name: &str, value: f64) -> Result<()> {
        match &self.get(name)?.cell {
            Cell::Gauge(cell) => {
                cell.set(value);
                Ok(())
            }
            other => Err(self.kind_mismatch(name, MetricKind::Gauge, other.kind())),
        }
    }

    /// Read the gauge's current value.
    pub fn gauge_value(&self, name: &str) -> Result<f64> {
        match &self.get(name)?.cell {
            Cell::Gauge(cell) => Ok(cell.get()),
            other => Err(self.kind_mismatch(name, MetricKind::Gauge, other.kind())),
        }
    }

    /// Add `delta` to the counter. Negative and non-finite deltas are
    /// rejected to keep the counter monotonic.
    pub fn inc_counter(&self, name: &str, delta: f64) -> Result<()> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(StatsgateError::InvalidValue(format!(
                "counter {name} delta must be finite and non-negative, got {delta}"
            )));
        }
        match &self.get(name)?.cell {
            Cell::Counter(cell) => {
                cell.add(delta);
                Ok(())
            }
            other => Err(self.kind_mismatch(name, MetricKind::Counter, other.kind())),
        }
    }

    /// Append one observation to the labeled series, creating the series on
    /// first use. `label_values` must positionally match the label names
    /// declared at registration.
    pub fn observe_summary(&self, name: &str, label_values: &[&str], value: f64) -> Result<()> {
        match &self.get(name)?.cell {
            Cell::Summary {
                label_names,
                series,
            } => {
                if label_values.len() != label_names.len() {
                    return Err(StatsgateError::LabelCardinality {
                        name: name.into(),
                        expected: label_names.len(),
                        got: label_values.len(),
                    });
                }
                let key: Vec<String> = label_values.iter().map(|v| v.to_string()).collect();
                series
                    .entry(key)
                    .or_insert_with(SummarySeries::default)
                    .observe(value);
                Ok(())
            }
            other => Err(self.kind_mismatch(name, MetricKind::Summary, other.kind())),
        }
    }

    /// Capture a point-in-time snapshot of every registered family, in
    /// registration order. Never cached; each call re-reads the cells.
    pub fn snapshot(&self) -> Result<Vec<FamilySnapshot>> {
        let order = self
            .order
            .read()
            .map_err(|_| StatsgateError::Internal("registry order lock poisoned".into()))?;
        Ok(order.iter().map(|m| m.snapshot()).collect())
    }

    /// Render the current state in the first mutually supported text format
    /// from the `Accept` header. Returns the body and its content type.
    pub fn render(&self, accept: Option<&str>) -> Result<(String, &'static str)> {
        let format = Format::negotiate(accept);
        let families = self.snapshot()?;
        tracing::debug!(families = families.len(), format = ?format, "rendering snapshot");
        Ok((expo::encode(format, &families), format.content_type()))
    }

    fn get(&self, name: &str) -> Result<Arc<Metric>> {
        self.by_name
            .get(name)
            .map(|m| Arc::clone(m.value()))
            .ok_or_else(|| StatsgateError::UnknownMetric { name: name.into() })
    }

    fn kind_mismatch(
        &self,
        name: &str,
        expected: MetricKind,
        actual: MetricKind,
    ) -> StatsgateError {
        StatsgateError::KindMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }
}

/// Prometheus metric name rule: `[a-zA-Z_:][a-zA-Z0-9_:]*`.
fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}
