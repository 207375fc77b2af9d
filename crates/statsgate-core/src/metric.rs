//! Metric cells and point-in-time snapshots.
//!
//! Cells are lock-free: scalar values live in `AtomicU64` bit patterns and
//! summary series live in a `DashMap` keyed by label-value tuples. Mutation
//! and rendering may therefore run concurrently from any number of tasks.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Metric kind. Identity and mutation rules follow the Prometheus model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Monotonic, non-negative.
    Counter,
    /// Arbitrary set value, last-write-wins.
    Gauge,
    /// Observation count + sum, optionally partitioned by labels.
    Summary,
}

impl MetricKind {
    /// Exposition-format type keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Summary => "summary",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `f64` stored as raw bits in an `AtomicU64`.
pub(crate) struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub(crate) fn new(v: f64) -> Self {
        Self {
            bits: AtomicU64::new(v.to_bits()),
        }
    }

    pub(crate) fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub(crate) fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    /// CAS loop; callers only add finite deltas so the loop terminates.
    pub(crate) fn add(&self, delta: f64) {
        let mut cur = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => cur = actual,
            }
        }
    }
}

impl Default for AtomicF64 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// One labeled summary time series (count + sum, no quantiles).
#[derive(Default)]
pub(crate) struct SummarySeries {
    pub(crate) count: AtomicU64,
    pub(crate) sum: AtomicF64,
}

impl SummarySeries {
    pub(crate) fn observe(&self, v: f64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum.add(v);
    }
}

/// Storage for one registered metric.
pub(crate) enum Cell {
    Counter(AtomicF64),
    Gauge(AtomicF64),
    Summary {
        label_names: Vec<String>,
        series: DashMap<Vec<String>, SummarySeries>,
    },
}

impl Cell {
    pub(crate) fn kind(&self) -> MetricKind {
        match self {
            Cell::Counter(_) => MetricKind::Counter,
            Cell::Gauge(_) => MetricKind::Gauge,
            Cell::Summary { .. } => MetricKind::Summary,
        }
    }
}

/// One registered metric: name, help string, and its cell.
pub(crate) struct Metric {
    pub(crate) name: String,
    pub(crate) help: String,
    pub(crate) cell: Cell,
}

impl Metric {
    /// Capture a point-in-time snapshot of this metric's current value(s).
    /// Summary series are sorted by label tuple so output is deterministic.
    pub(crate) fn snapshot(&self) -> FamilySnapshot {
        let (label_names, samples) = match &self.cell {
            Cell::Counter(v) | Cell::Gauge(v) => (
                Vec::new(),
                vec![Sample {
                    label_values: Vec::new(),
                    value: SampleValue::Scalar(v.get()),
                }],
            ),
            Cell::Summary {
                label_names,
                series,
            } => {
                let mut samples: Vec<Sample> = series
                    .iter()
                    .map(|entry| Sample {
                        label_values: entry.key().clone(),
                        value: SampleValue::Summary {
                            count: entry.value().count.load(Ordering::Relaxed),
                            sum: entry.value().sum.get(),
                        },
                    })
                    .collect();
                samples.sort_by(|a, b| a.label_values.cmp(&b.label_values));
                (label_names.clone(), samples)
            }
        };

        FamilySnapshot {
            name: self.name.clone(),
            help: self.help.clone(),
            kind: self.cell.kind(),
            label_names,
            samples,
        }
    }
}

/// Read-only rendering input for one metric family.
pub struct FamilySnapshot {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    /// Empty for scalar kinds.
    pub label_names: Vec<String>,
    pub samples: Vec<Sample>,
}

/// One time series within a family.
pub struct Sample {
    /// Positionally matches the family's `label_names`.
    pub label_values: Vec<String>,
    pub value: SampleValue,
}

/// Snapshotted value of one series.
pub enum SampleValue {
    /// Counter or gauge reading.
    Scalar(f64),
    /// Summary count + sum.
    Summary { count: u64, sum: f64 },
}
