//src/gate.rs

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::GateError;
use crate::report::{
    drain_report, find_metrics_line, open_report, parse_metrics, DEFAULT_REPORT_PATH,
};
use crate::types::{AssemblyMetrics, QualityThresholds, Verdict};

/// Reads one quality report and decides whether the build may proceed.
#[derive(Debug, Clone)]
pub struct ReportGate {
    path: PathBuf,
    thresholds: QualityThresholds,
}

impl Default for ReportGate {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_PATH)
    }
}

impl ReportGate {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            thresholds: QualityThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Writes the summary line and, on failure, the reason.
    pub fn evaluate_metrics<W: Write>(
        &self,
        metrics: &AssemblyMetrics,
        out: &mut W,
    ) -> io::Result<Verdict> {
        writeln!(out, "{}", metrics)?;

        let verdict = self.thresholds.evaluate(metrics);
        if let Some(message) = verdict.message() {
            writeln!(out, "{}", message)?;
        }
        log::info!(
            "Gate verdict {:?} (min N50 {}, max misassemblies {})",
            verdict,
            self.thresholds.min_n50,
            self.thresholds.max_misassemblies
        );
        Ok(verdict)
    }

    /// Decides as soon as the metrics row is read. A failing verdict returns
    /// without touching the rest of the file; a pass still reads to EOF.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Verdict, GateError> {
        let mut reader = open_report(&self.path)?;
        let line = find_metrics_line(&mut reader, &self.path)?;
        let metrics = parse_metrics(&line)?;

        let verdict = self
            .evaluate_metrics(&metrics, out)
            .and_then(|verdict| out.flush().map(|_| verdict))
            .map_err(GateError::Output)?;
        if !verdict.passed() {
            return Ok(verdict);
        }

        drain_report(&mut reader, &self.path)?;
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn run_on_bytes(report: &[u8]) -> (Verdict, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all.txt");
        fs::write(&path, report).unwrap();

        let mut out = Vec::new();
        let verdict = ReportGate::new(&path).run(&mut out).unwrap();
        (verdict, String::from_utf8(out).unwrap())
    }

    fn run_on(second_line: &str) -> (Verdict, String) {
        run_on_bytes(
            format!("Assembly|N50|x|x|x|x|x|x|x|misassemblies\n{}\n", second_line).as_bytes(),
        )
    }

    #[test]
    fn passing_report() {
        let (verdict, out) = run_on("a|900|b|c|d|e|f|g|h|0");
        assert_eq!(verdict, Verdict::Pass);
        assert_eq!(out, "n50 = 900 missassemblies 0\n");
    }

    #[test]
    fn short_genome() {
        let (verdict, out) = run_on("a|800|b|c|d|e|f|g|h|0");
        assert_eq!(verdict, Verdict::GenomeTooShort);
        assert_eq!(out, "n50 = 800 missassemblies 0\ngenome too short\n");
    }

    #[test]
    fn misassembled_genome() {
        let (verdict, out) = run_on("a|900|b|c|d|e|f|g|h|2");
        assert_eq!(verdict, Verdict::TooManyMisassemblies);
        assert_eq!(out, "n50 = 900 missassemblies 2\ntoo much miss\n");
    }

    #[test]
    fn boundaries() {
        assert_eq!(run_on("a|844|b|c|d|e|f|g|h|0").0, Verdict::GenomeTooShort);
        assert_eq!(run_on("a|845|b|c|d|e|f|g|h|0").0, Verdict::Pass);
    }

    #[test]
    fn failing_verdict_ignores_garbage_after_metrics() {
        let (verdict, out) = run_on_bytes(b"h|N50\na|800|b|c|d|e|f|g|h|0\njunk \xff\xfe row\n");
        assert_eq!(verdict, Verdict::GenomeTooShort);
        assert_eq!(out, "n50 = 800 missassemblies 0\ngenome too short\n");
    }

    #[test]
    fn passing_verdict_reads_past_non_utf8_rows() {
        let (verdict, out) =
            run_on_bytes(b"Assembly \xe9|N50\na|900|b|c|d|e|f|g|h|0\n\xe9\xe9\n");
        assert_eq!(verdict, Verdict::Pass);
        assert_eq!(out, "n50 = 900 missassemblies 0\n");
    }

    #[test]
    fn relaxed_thresholds() {
        let gate = ReportGate::default().with_thresholds(QualityThresholds {
            min_n50: 500,
            max_misassemblies: 3,
        });
        assert_eq!(gate.path(), Path::new(DEFAULT_REPORT_PATH));

        let metrics = AssemblyMetrics {
            n50: 600,
            misassemblies: 3,
        };
        let mut out = Vec::new();
        assert_eq!(gate.evaluate_metrics(&metrics, &mut out).unwrap(), Verdict::Pass);
        assert_eq!(String::from_utf8(out).unwrap(), "n50 = 600 missassemblies 3\n");
    }

    struct FullWriter;

    impl Write for FullWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left"))
        }
    }

    #[test]
    fn unflushed_summary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all.txt");
        fs::write(&path, "h\na|900|b|c|d|e|f|g|h|0\n").unwrap();

        let result = ReportGate::new(&path).run(&mut FullWriter);
        assert!(matches!(result, Err(GateError::Output(_))));
    }

    #[test]
    fn nothing_printed_on_environment_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let result = ReportGate::new(dir.path().join("missing.txt")).run(&mut out);
        assert!(matches!(result, Err(GateError::Io { .. })));
        assert!(out.is_empty());
    }
}
