use std::path::PathBuf;

use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use enumset::EnumSet;

use crate::{
    core::{error::ConfigurationError, metric::Metric},
    data::results::Format,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Calculate the annual reduction potential of every measure in the catalog.
    #[clap(name = "calculate")]
    Calculate(Box<CalculateArgs>),

    /// Quantize the catalog onto the quarter-hour grid and save it for inspection.
    #[clap(name = "adapt")]
    Adapt(Box<AdaptArgs>),
}

#[derive(Parser)]
pub struct DataArgs {
    /// Directory with the time series, the yearly averages, and the measure catalog.
    #[clap(long = "data-dir", default_value = "data", env = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Measure catalog file name within the data directory.
    #[clap(long = "measures-file", default_value = "measures.csv", env = "MEASURES_FILE")]
    pub measures_file: String,

    /// Target year.
    #[clap(long, default_value = "2023", env = "YEAR")]
    pub year: i32,
}

impl DataArgs {
    #[must_use]
    pub fn measures_path(&self) -> PathBuf {
        self.data_dir.join(&self.measures_file)
    }
}

#[derive(Parser)]
pub struct OutputArgs {
    #[clap(long = "output-dir", default_value = "output", env = "OUTPUT_DIR")]
    pub output_dir: PathBuf,
}

#[derive(Parser)]
pub struct CalculateArgs {
    #[clap(flatten)]
    pub data: DataArgs,

    /// Also schedule load reduction and increase together for the combinable measures.
    #[clap(
        long,
        env = "COMBINATION",
        default_value = "false",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
    )]
    pub combination: bool,

    /// Select the activations by the CO₂ savings.
    #[clap(
        long = "max-co2",
        env = "MAX_CO2",
        default_value = "true",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
    )]
    pub max_co2: bool,

    /// Select the activations by the cost savings.
    #[clap(
        long = "max-cost",
        env = "MAX_COST",
        default_value = "false",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
    )]
    pub max_cost: bool,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Result file name without the year and extension, defaults to `<today>_results`.
    #[clap(long, env = "RESULTS_FILENAME")]
    pub filename: Option<String>,

    #[clap(long, value_enum, default_value = "csv", env = "RESULTS_FORMAT")]
    pub format: Format,
}

impl CalculateArgs {
    pub fn try_metrics(&self) -> Result<EnumSet<Metric>, ConfigurationError> {
        let mut metrics = EnumSet::empty();
        if self.max_co2 {
            metrics |= Metric::Co2;
        }
        if self.max_cost {
            metrics |= Metric::Cost;
        }
        if metrics.is_empty() { Err(ConfigurationError::NoMetric) } else { Ok(metrics) }
    }

    #[must_use]
    pub fn results_path(&self) -> PathBuf {
        let filename = self
            .filename
            .clone()
            .unwrap_or_else(|| format!("{}_results", Local::now().date_naive()));
        self.output
            .output_dir
            .join(format!("{filename}_{}.{}", self.data.year, self.format.extension()))
    }
}

#[derive(Parser)]
pub struct AdaptArgs {
    #[clap(flatten)]
    pub data: DataArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn parse(args: &[&str]) -> CalculateArgs {
        let args = Args::try_parse_from(["flexpotential", "calculate"].iter().chain(args)).unwrap();
        let Command::Calculate(args) = args.command else { panic!("expected `calculate`") };
        *args
    }

    #[test]
    fn test_default_metrics() {
        let args = parse(&["--year", "2024"]);
        assert_eq!(args.try_metrics().unwrap(), EnumSet::only(Metric::Co2));
        assert!(!args.combination);
        assert_eq!(args.data.year, 2024);
    }

    #[test]
    fn test_bare_flags() {
        let args = parse(&["--combination", "--max-cost"]);
        assert!(args.combination);
        assert_eq!(args.try_metrics().unwrap(), EnumSet::all());
    }

    #[test]
    fn test_no_metric() {
        let args = parse(&["--max-co2", "false"]);
        assert!(matches!(args.try_metrics(), Err(ConfigurationError::NoMetric)));
    }

    #[test]
    fn test_results_path() {
        let args = parse(&["--filename", "run", "--format", "json", "--output-dir", "out"]);
        assert_eq!(args.results_path(), Path::new("out/run_2023.json"));
    }
}
