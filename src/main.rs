use anyhow::{bail, Context, Result};
use clap::Parser;
use gammabench::characterize::{characterize_parallel, ErrorSummary};
use gammabench::cli::{Cli, OutputFormat};
use gammabench::config::ConfigError;
use gammabench::csv_output::{AccumCsv, GammaCsv};
use gammabench::json_output::JsonReport;
use gammabench::simulate::{simulate_parallel, PerKStats};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Human-readable report, matching the original analysis console output.
fn print_text(summary: &ErrorSummary, results: &[PerKStats]) {
    println!("Mean(gamma) = {}", summary.mean);
    println!("Std(gamma)  = {}", summary.std);
    if summary.samples > 0 {
        println!("Min(gamma)  = {}", summary.min);
        println!("Max(gamma)  = {}", summary.max);
        println!("Samples     = {}", summary.samples);
    }
    println!();
    for row in results {
        println!(
            "K={:2} Mean(E)={:.6e} Std(E)={:.6e} Emin={:.6e} Emax={:.6e}",
            row.k, row.mean_e, row.std_e, row.e_min, row.e_max
        );
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    // All parameter validation happens before any enumeration or simulation,
    // so a bad configuration never leaves a partial report behind.
    let config = args.analysis_config();
    config.validate()?;

    let summary = match (args.mean_gamma, args.std_gamma) {
        (Some(mean), Some(std)) => {
            tracing::info!(mean, std, "using pre-computed error summary");
            ErrorSummary::from_mean_std(mean, std)
        }
        (None, None) => {
            let adder = args.build_adder();
            characterize_parallel(
                adder.as_ref(),
                config.width_bits,
                config.effective_threads(),
            )
        }
        _ => bail!(ConfigError::PartialSummaryOverride),
    };

    let results = simulate_parallel(&summary, &config, config.effective_threads())?;

    if let Some(path) = &args.gamma_out {
        std::fs::write(path, GammaCsv::new(&summary).to_csv())
            .with_context(|| format!("writing characterization report to {}", path.display()))?;
        eprintln!("Saved {}", path.display());
    }
    if let Some(path) = &args.accum_out {
        std::fs::write(path, AccumCsv::from(results.as_slice()).to_csv())
            .with_context(|| format!("writing accumulation report to {}", path.display()))?;
        eprintln!("Saved {}", path.display());
    }

    match args.format {
        OutputFormat::Text => print_text(&summary, &results),
        OutputFormat::Csv => {
            print!("{}", GammaCsv::new(&summary).to_csv());
            println!();
            print!("{}", AccumCsv::from(results.as_slice()).to_csv());
        }
        OutputFormat::Json => {
            let report = JsonReport::new(&summary, &results);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
