use std::io;
use std::process::ExitCode;

use clap::{value_parser, Arg, Command};

use assembly_quality_gate::types::{DEFAULT_MAX_MISASSEMBLIES, DEFAULT_MIN_N50};
use assembly_quality_gate::{QualityThresholds, ReportGate, DEFAULT_REPORT_PATH};

/// Exit status for a report that could not be read or parsed.
const ENVIRONMENT_FAILURE: u8 = 2;

fn cli() -> Command {
    Command::new("assembly-quality-gate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fails the build when an assembly quality report is out of range")
        .arg(
            Arg::new("report")
                .short('r')
                .long("report")
                .value_name("PATH")
                .help("Pipe-delimited quality report; metrics are read from its second line")
                .default_value(DEFAULT_REPORT_PATH),
        )
        .arg(
            Arg::new("min_n50")
                .long("min-n50")
                .value_name("N")
                .help("Smallest acceptable N50")
                .value_parser(value_parser!(i64))
                .default_value(DEFAULT_MIN_N50.to_string()),
        )
        .arg(
            Arg::new("max_misassemblies")
                .long("max-misassemblies")
                .value_name("N")
                .help("Largest acceptable misassembly count")
                .value_parser(value_parser!(i64))
                .default_value(DEFAULT_MAX_MISASSEMBLIES.to_string()),
        )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();

    // all three carry defaults
    let report = matches
        .get_one::<String>("report")
        .map(String::as_str)
        .unwrap_or(DEFAULT_REPORT_PATH);
    let thresholds = QualityThresholds {
        min_n50: matches
            .get_one::<i64>("min_n50")
            .copied()
            .unwrap_or(DEFAULT_MIN_N50),
        max_misassemblies: matches
            .get_one::<i64>("max_misassemblies")
            .copied()
            .unwrap_or(DEFAULT_MAX_MISASSEMBLIES),
    };

    let gate = ReportGate::new(report).with_thresholds(thresholds);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // run() flushes `out`
    let code = match gate.run(&mut out) {
        Ok(verdict) => verdict.exit_code(),
        Err(err) => {
            log::error!("{}", err);
            ENVIRONMENT_FAILURE
        }
    };
    ExitCode::from(code)
}
