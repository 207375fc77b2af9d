//! OpenMetrics text exposition format 1.0.0.
//!
//! Same family content as the 0.0.4 writer plus the mandatory `# EOF`
//! trailer. Quantile-less summaries expose `_count` and `_sum` only, which
//! OpenMetrics permits.

use std::fmt::Write;

use super::{counter_sample_name, escape_help, fmt_value, write_labels};
use crate::metric::{FamilySnapshot, MetricKind, SampleValue};

/// Render all families in registration order, terminated by `# EOF`.
pub fn encode(families: &[FamilySnapshot]) -> String {
    let mut out = String::new();
    for fam in families {
        encode_family(&mut out, fam);
    }
    out.push_str("# EOF\n");
    out
}

fn encode_family(out: &mut String, fam: &FamilySnapshot) {
    let _ = writeln!(out, "# TYPE {} {}", fam.name, fam.kind.as_str());
    let _ = writeln!(out, "# HELP {} {}", fam.name, escape_help(&fam.help));

    for sample in &fam.samples {
        match sample.value {
            SampleValue::Scalar(v) => {
                let sample_name = match fam.kind {
                    MetricKind::Counter => counter_sample_name(&fam.name),
                    _ => fam.name.clone(),
                };
                out.push_str(&sample_name);
                write_labels(out, &fam.label_names, sample);
                let _ = writeln!(out, " {}", fmt_value(v));
            }
            SampleValue::Summary { count, sum } => {
                let _ = write!(out, "{}_count", fam.name);
                write_labels(out, &fam.label_names, sample);
                let _ = writeln!(out, " {count}");

                let _ = write!(out, "{}_sum", fam.name);
                write_labels(out, &fam.label_names, sample);
                let _ = writeln!(out, " {}", fmt_value(sum));
            }
        }
    }
}
