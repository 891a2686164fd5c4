//src/report.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::GateError;
use crate::types::{AssemblyMetrics, ReportLine};

/// Where the benchmarking tool drops its summary, relative to the test dir.
pub const DEFAULT_REPORT_PATH: &str = "../../tools/quality/results/all.txt";

/// Zero-based index of the row holding the metrics (row 0 is the header).
pub const METRICS_LINE_INDEX: usize = 1;
pub const N50_COLUMN: usize = 1;
pub const MISASSEMBLIES_COLUMN: usize = 9;
pub const FIELD_DELIMITER: char = '|';

/// Opens a report, decompressing on the fly if the name ends in `.gz`.
pub fn open_report<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, GateError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| GateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Reads raw lines up to the metrics row and returns it, leaving `reader`
/// positioned just after it. Only the metrics row has to be valid UTF-8.
///
/// `source` is only used in error messages.
pub fn find_metrics_line<R: BufRead>(reader: &mut R, source: &Path) -> Result<ReportLine, GateError> {
    let mut buf = Vec::new();
    let mut lines_read = 0;

    loop {
        buf.clear();
        if read_raw_line(reader, &mut buf, source)? == 0 {
            return Err(GateError::MissingMetricsLine {
                path: source.to_path_buf(),
                lines_read,
            });
        }
        if lines_read == METRICS_LINE_INDEX {
            break;
        }
        lines_read += 1;
    }

    let line = std::str::from_utf8(trim_line_end(&buf)).map_err(|source| {
        GateError::NonUtf8MetricsLine {
            line_number: lines_read,
            source,
        }
    })?;
    let fields = line
        .split(FIELD_DELIMITER)
        .map(|field| field.to_string())
        .collect();
    Ok(ReportLine {
        line_number: lines_read,
        fields,
    })
}

/// Consumes whatever is left in `reader`, returning the number of lines.
/// Content is ignored; only read failures matter.
pub fn drain_report<R: BufRead>(reader: &mut R, source: &Path) -> Result<usize, GateError> {
    let mut buf = Vec::new();
    let mut lines = 0;
    loop {
        buf.clear();
        if read_raw_line(reader, &mut buf, source)? == 0 {
            break;
        }
        lines += 1;
    }
    log::debug!("Skipped {} trailing line(s) of {}", lines, source.display());
    Ok(lines)
}

fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, source: &Path) -> Result<usize, GateError> {
    reader.read_until(b'\n', buf).map_err(|err| GateError::Io {
        path: source.to_path_buf(),
        source: err,
    })
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Pulls N50 and the misassembly count out of a metrics row.
pub fn parse_metrics(line: &ReportLine) -> Result<AssemblyMetrics, GateError> {
    let required = MISASSEMBLIES_COLUMN.max(N50_COLUMN) + 1;
    if line.fields.len() < required {
        return Err(GateError::TooFewFields {
            line_number: line.line_number,
            found: line.fields.len(),
            required,
        });
    }

    let n50 = parse_column(line, N50_COLUMN, "N50")?;
    let misassemblies = parse_column(line, MISASSEMBLIES_COLUMN, "misassembly count")?;
    Ok(AssemblyMetrics { n50, misassemblies })
}

fn parse_column(line: &ReportLine, column: usize, name: &'static str) -> Result<i64, GateError> {
    let raw = line.field(column).unwrap_or_default();
    raw.trim().parse().map_err(|source| GateError::InvalidMetric {
        name,
        column,
        value: raw.to_string(),
        source,
    })
}

/// Opens the report at `path` and parses its metrics row.
pub fn read_metrics<P: AsRef<Path>>(path: P) -> Result<AssemblyMetrics, GateError> {
    let path = path.as_ref();
    let mut reader = open_report(path)?;
    let line = find_metrics_line(&mut reader, path)?;
    let metrics = parse_metrics(&line)?;
    log::info!(
        "Metrics from {}: N50={}, misassemblies={}",
        path.display(),
        metrics.n50,
        metrics.misassemblies
    );
    Ok(metrics)
}
