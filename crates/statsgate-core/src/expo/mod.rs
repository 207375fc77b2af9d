//! Exposition formats and content negotiation.
//!
//! Two text formats are supported: classic Prometheus text 0.0.4 (the
//! default) and OpenMetrics 1.0.0 (chosen when the scraper's `Accept` header
//! asks for it). Both writers are pure functions over a snapshot.

pub mod openmetrics;
pub mod text;

use std::fmt::Write;

use crate::metric::{FamilySnapshot, Sample};

/// Supported exposition formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Prometheus text format 0.0.4.
    Text,
    /// OpenMetrics text format 1.0.0.
    OpenMetrics,
}

impl Format {
    /// Pick the first mutually supported format from an `Accept` header.
    /// Anything that does not ask for OpenMetrics falls back to 0.0.4.
    pub fn negotiate(accept: Option<&str>) -> Format {
        match accept {
            Some(a) if a.to_ascii_lowercase().contains("application/openmetrics-text") => {
                Format::OpenMetrics
            }
            _ => Format::Text,
        }
    }

    /// `Content-Type` value for HTTP responses.
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Text => "text/plain; version=0.0.4; charset=utf-8",
            Format::OpenMetrics => "application/openmetrics-text; version=1.0.0; charset=utf-8",
        }
    }
}

/// Encode a snapshot in the given format.
pub fn encode(format: Format, families: &[FamilySnapshot]) -> String {
    match format {
        Format::Text => text::encode(families),
        Format::OpenMetrics => openmetrics::encode(families),
    }
}

/// Escape a help string (`\` and newline).
pub(crate) fn escape_help(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Escape a label value (`\`, `"`, and newline).
pub(crate) fn escape_label_value(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Exposition float formatting. `Display` already renders integral floats
/// without a trailing `.0`, which scrapers accept; only the non-finite
/// spellings need fixing up.
pub(crate) fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{v}")
    }
}

/// Render `{k1="v1",k2="v2"}`, or nothing for the empty label set.
pub(crate) fn write_labels(out: &mut String, names: &[String], sample: &Sample) {
    if names.is_empty() {
        return;
    }
    let pairs = names
        .iter()
        .zip(sample.label_values.iter())
        .map(|(k, v)| format!("{k}=\"{}\"", escape_label_value(v)))
        .collect::<Vec<_>>()
        .join(",");
    let _ = write!(out, "{{{pairs}}}");
}

/// Counter samples are exposed under `<name>_total`.
pub(crate) fn counter_sample_name(name: &str) -> String {
    format!("{name}_total")
}
