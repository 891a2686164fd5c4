// src/lib.rs
pub mod error;
pub mod gate;
pub mod report;
pub mod types;

use std::io::Write;
use std::path::Path;

pub use crate::error::GateError;
pub use crate::gate::ReportGate;
pub use crate::report::{read_metrics, DEFAULT_REPORT_PATH};
pub use crate::types::{AssemblyMetrics, QualityThresholds, ReportLine, Verdict};

/// Unified entry point: gate the report at `report_path` and write the
/// human-readable outcome to `out`.
pub fn check_report<P: AsRef<Path>, W: Write>(
    report_path: P,
    thresholds: QualityThresholds,
    out: &mut W,
) -> Result<Verdict, GateError> {
    ReportGate::new(report_path.as_ref())
        .with_thresholds(thresholds)
        .run(out)
}
