//src/error.rs

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Everything that can stop the gate before it reaches a verdict.
///
/// A failed quality check is *not* an error; it is a [`crate::types::Verdict`].
#[derive(Debug, Error)]
pub enum GateError {
    #[error("cannot read report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("report {path} has {lines_read} line(s), the metrics row is missing")]
    MissingMetricsLine { path: PathBuf, lines_read: usize },

    #[error("metrics row (line {line_number}) is not valid UTF-8: {source}")]
    NonUtf8MetricsLine {
        line_number: usize,
        #[source]
        source: Utf8Error,
    },

    #[error("line {line_number} has {found} field(s), need at least {required}")]
    TooFewFields {
        line_number: usize,
        found: usize,
        required: usize,
    },

    #[error("{name} in column {column} is not an integer: '{value}'")]
    InvalidMetric {
        name: &'static str,
        column: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("failed to write gate output: {0}")]
    Output(#[source] io::Error),
}
