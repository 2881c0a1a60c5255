//! CLI argument parsing for gammabench

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::adder::{Adder, BiasedAdder, ExactAdder, LowerOrAdder, TruncatedAdder};
use crate::config::AnalysisConfig;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format with the recognized interchange headers
    Csv,
}

/// Built-in adder model to characterize
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AdderKind {
    /// Exact reference adder (zero error, useful for calibration)
    Exact,
    /// Exact adder with a constant additive bias (see --bias)
    Biased,
    /// Lower-part OR adder: low columns OR'd carry-free (see --approx-bits)
    LowerOr,
    /// Carry-truncated adder: low columns zeroed (see --approx-bits)
    Truncated,
}

#[derive(Parser, Debug)]
#[command(name = "gammabench")]
#[command(version)]
#[command(about = "Approximate-adder error characterization and CORDIC-style error propagation", long_about = None)]
pub struct Cli {
    /// Adder operand width in bits (domain is [0, 2^width)^2; max 16)
    #[arg(short = 'w', long = "width-bits", value_name = "BITS", default_value = "16")]
    pub width_bits: u32,

    /// Built-in adder model to characterize
    #[arg(long = "adder", value_enum, default_value = "lower-or")]
    pub adder: AdderKind,

    /// Number of approximate low-order columns for lower-or/truncated models
    #[arg(long = "approx-bits", value_name = "BITS", default_value = "4")]
    pub approx_bits: u32,

    /// Additive bias for the biased model
    #[arg(long = "bias", value_name = "N", default_value = "1")]
    pub bias: u64,

    /// Monte-Carlo trials per stage count K
    #[arg(short = 't', long = "trials", value_name = "N", default_value = "200000")]
    pub trials: u64,

    /// Smallest stage count K to simulate (inclusive)
    #[arg(long = "k-min", value_name = "K", default_value = "4")]
    pub k_min: u32,

    /// Largest stage count K to simulate (inclusive)
    #[arg(long = "k-max", value_name = "K", default_value = "16")]
    pub k_max: u32,

    /// RNG seed for reproducible simulation
    #[arg(long = "seed", value_name = "SEED", default_value = "123456")]
    pub seed: u64,

    /// Worker threads (0 = all available cores)
    #[arg(long = "threads", value_name = "N", default_value = "0")]
    pub threads: usize,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Skip characterization and use this pre-computed mean (with --std-gamma)
    #[arg(long = "mean-gamma", value_name = "MEAN", allow_negative_numbers = true)]
    pub mean_gamma: Option<f64>,

    /// Skip characterization and use this pre-computed std (with --mean-gamma)
    #[arg(long = "std-gamma", value_name = "STD", allow_negative_numbers = true)]
    pub std_gamma: Option<f64>,

    /// Write the characterization CSV report to this file
    #[arg(long = "gamma-out", value_name = "FILE")]
    pub gamma_out: Option<PathBuf>,

    /// Write the accumulation CSV report to this file
    #[arg(long = "accum-out", value_name = "FILE")]
    pub accum_out: Option<PathBuf>,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Build the analysis configuration from the parsed flags.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            width_bits: self.width_bits,
            k_min: self.k_min,
            k_max: self.k_max,
            trials: self.trials,
            seed: self.seed,
            threads: self.threads,
        }
    }

    /// Instantiate the selected built-in adder model.
    pub fn build_adder(&self) -> Box<dyn Adder + Send + Sync> {
        match self.adder {
            AdderKind::Exact => Box::new(ExactAdder),
            AdderKind::Biased => Box::new(BiasedAdder::new(self.bias)),
            AdderKind::LowerOr => Box::new(LowerOrAdder::new(self.approx_bits)),
            AdderKind::Truncated => Box::new(TruncatedAdder::new(self.approx_bits)),
        }
    }
}
