//src/types.rs

use std::fmt;

/// Smallest N50 an assembly may report and still pass.
pub const DEFAULT_MIN_N50: i64 = 845;

/// Largest misassembly count an assembly may report and still pass.
pub const DEFAULT_MAX_MISASSEMBLIES: i64 = 0;

/// One row of the quality report, split on `|`.
/// For example:
///  assembly|N50|...|...|...|...|...|...|...|misassemblies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub line_number: usize, // zero-based
    pub fields: Vec<String>,
}

impl ReportLine {
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// The two numbers the gate cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyMetrics {
    pub n50: i64,
    pub misassemblies: i64,
}

impl fmt::Display for AssemblyMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n50 = {} missassemblies {}", self.n50, self.misassemblies)
    }
}

/// Acceptance range for [`AssemblyMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityThresholds {
    pub min_n50: i64,
    pub max_misassemblies: i64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_n50: DEFAULT_MIN_N50,
            max_misassemblies: DEFAULT_MAX_MISASSEMBLIES,
        }
    }
}

impl QualityThresholds {
    /// N50 is checked first, so a short genome is reported as such even when
    /// it also has misassemblies.
    pub fn evaluate(&self, metrics: &AssemblyMetrics) -> Verdict {
        if metrics.n50 < self.min_n50 {
            Verdict::GenomeTooShort
        } else if metrics.misassemblies > self.max_misassemblies {
            Verdict::TooManyMisassemblies
        } else {
            Verdict::Pass
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    GenomeTooShort,
    TooManyMisassemblies,
}

impl Verdict {
    /// Line printed after the summary, if the gate fails.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Verdict::Pass => None,
            Verdict::GenomeTooShort => Some("genome too short"),
            Verdict::TooManyMisassemblies => Some("too much miss"),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Pass => 0,
            Verdict::GenomeTooShort | Verdict::TooManyMisassemblies => 1,
        }
    }

    pub fn passed(&self) -> bool {
        *self == Verdict::Pass
    }
}
