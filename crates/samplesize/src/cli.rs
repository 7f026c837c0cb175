//! Command-line arguments and their translation into engine calls
//!
//! Margins are entered in percent on the command line (`--margin 5`) and
//! converted to the fractions the engine works with here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use samplesize_core::sensitivity::{SweepDimension, SweepRange, reference_table, sweep};
use samplesize_core::{ConfidenceLevel, EstimateBuilder};

use crate::report::{OutputFormat, Report};
use crate::request::CalculationRequest;

#[derive(Parser, Debug)]
#[command(name = "samplesize")]
#[command(about = "Minimum sample size for estimating a population proportion")]
pub struct Cli {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a single sample size
    Compute {
        #[command(flatten)]
        estimate: EstimateArgs,

        /// Show the formula with the values substituted
        #[arg(long)]
        explain: bool,
    },
    /// Vary one input while holding the others fixed
    Sweep {
        dimension: DimensionArg,

        #[command(flatten)]
        estimate: EstimateArgs,

        /// Explicit values (margins in percent, confidence levels in percent)
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["min", "max", "steps"])]
        values: Option<Vec<f64>>,

        /// Start of a linear range
        #[arg(long, requires_all = ["max", "steps"])]
        min: Option<f64>,

        /// End of a linear range
        #[arg(long, requires_all = ["min", "steps"])]
        max: Option<f64>,

        /// Number of points in a linear range
        #[arg(long, requires_all = ["min", "max"])]
        steps: Option<usize>,
    },
    /// Reference table over confidence levels and margins
    Table {
        /// Confidence levels, e.g. 90,95,99
        #[arg(long, value_delimiter = ',', default_value = "90,95,99")]
        levels: Vec<ConfidenceLevel>,

        /// Margins of error in percent
        #[arg(long, value_delimiter = ',', default_value = "1,2,3,4,5,7,10")]
        margins: Vec<f64>,

        #[arg(short, long, default_value_t = 0.5)]
        proportion: f64,

        #[arg(short = 'N', long, allow_negative_numbers = true)]
        population: Option<i64>,
    },
    /// Process a YAML request file
    Run {
        path: PathBuf,

        /// Show the formula with the values substituted
        #[arg(long)]
        explain: bool,
    },
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Confidence level: 90, 95, 99 or 99.9
    #[arg(short, long, default_value = "95")]
    pub confidence: ConfidenceLevel,

    /// Margin of error in percent
    #[arg(short, long, default_value_t = 5.0)]
    pub margin: f64,

    /// Expected proportion; 0.5 is the most conservative
    #[arg(short, long, default_value_t = 0.5)]
    pub proportion: f64,

    /// Population size; omit for an unknown or very large population
    #[arg(short = 'N', long, allow_negative_numbers = true)]
    pub population: Option<i64>,
}

impl EstimateArgs {
    fn builder(&self) -> EstimateBuilder {
        let builder = EstimateBuilder::new()
            .confidence(self.confidence)
            .margin_percent(self.margin)
            .proportion(self.proportion);
        match self.population {
            Some(size) => builder.population(size),
            None => builder,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimensionArg {
    Margin,
    Confidence,
    Proportion,
}

impl From<DimensionArg> for SweepDimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Margin => SweepDimension::MarginOfError,
            DimensionArg::Confidence => SweepDimension::ConfidenceLevel,
            DimensionArg::Proportion => SweepDimension::Proportion,
        }
    }
}

/// Convert a command-line sweep value to the engine's unit
fn to_sweep_unit(dimension: SweepDimension, value: f64) -> f64 {
    match dimension {
        SweepDimension::MarginOfError => value / 100.0,
        SweepDimension::ConfidenceLevel | SweepDimension::Proportion => value,
    }
}

impl Command {
    /// Run the engine for this command. The flag is whether the formula
    /// should be explained in text output.
    pub fn build_report(&self) -> color_eyre::Result<(Report, bool)> {
        match self {
            Command::Compute { estimate, explain } => {
                let result = estimate.builder().compute()?;
                tracing::info!(sample_size = result.sample_size, "computed sample size");
                Ok((Report::from_estimate(result), *explain))
            }
            Command::Sweep {
                dimension,
                estimate,
                values,
                min,
                max,
                steps,
            } => {
                let dimension = SweepDimension::from(*dimension);
                let range = match (values, min, max, steps) {
                    (Some(values), ..) => SweepRange::Values(
                        values.iter().map(|&v| to_sweep_unit(dimension, v)).collect(),
                    ),
                    (None, Some(min), Some(max), Some(steps)) => SweepRange::Linear {
                        min: to_sweep_unit(dimension, *min),
                        max: to_sweep_unit(dimension, *max),
                        steps: *steps,
                    },
                    _ => SweepRange::Default,
                };
                let series = sweep(dimension, &estimate.builder().fixed_inputs(), &range)?;
                tracing::info!(dimension = %dimension, points = series.len(), "computed sweep");
                Ok((Report::from_series(series), false))
            }
            Command::Table {
                levels,
                margins,
                proportion,
                population,
            } => {
                let margins: Vec<f64> = margins.iter().map(|m| m / 100.0).collect();
                let table = reference_table(levels, &margins, *proportion, *population)?;
                tracing::info!(cells = table.len(), "computed reference table");
                Ok((Report::from_table(table), false))
            }
            Command::Run { path, explain } => {
                tracing::info!("loading request from {}", path.display());
                let request = CalculationRequest::load(path)?;
                Ok((Report::from_request(&request)?, *explain))
            }
        }
    }
}
