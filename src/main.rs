//! Command-line front end for kernel resampling.
//!
//! Regularizes one table, a directory of tables, or prints the estimate at a
//! single query time.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use resample_rs::prelude::*;
use resample_rs::{format_value, read_tsv, write_tsv};

#[derive(Parser)]
#[command(name = "resample")]
#[command(about = "Resample irregular time series onto a regular grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Regularize one table
    File {
        /// Input table (tab-separated)
        #[arg(short, long)]
        input: PathBuf,

        /// Output table
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        options: ResampleOptions,
    },

    /// Regularize every table in a directory
    Batch {
        /// Directory of input tables
        #[arg(long)]
        input_dir: PathBuf,

        /// Directory for output tables (created if missing)
        #[arg(long)]
        output_dir: PathBuf,

        #[command(flatten)]
        options: ResampleOptions,
    },

    /// Print the estimate at one query time
    Estimate {
        /// Input table (tab-separated)
        #[arg(short, long)]
        input: PathBuf,

        /// Query time
        #[arg(long)]
        at: f64,

        #[command(flatten)]
        options: ResampleOptions,
    },
}

#[derive(Args)]
struct ResampleOptions {
    /// Grid spacing
    #[arg(long, default_value = "7.0")]
    step: f64,

    /// Bandwidth rank K
    #[arg(short = 'k', long, default_value = "5")]
    neighbors: usize,

    /// Distance at which a grid point reuses an observed column
    #[arg(long)]
    tolerance: Option<f64>,

    /// Kernel weight function
    #[arg(long, value_enum, default_value_t = KernelArg::Epanechnikov)]
    kernel: KernelArg,

    /// Result when every weight in the window is zero
    #[arg(long, value_enum, default_value_t = ZeroWeightArg::Zero)]
    zero_weight: ZeroWeightArg,

    /// Policy for missing cells
    #[arg(long, value_enum, default_value_t = MissingArg::Reject)]
    missing: MissingArg,

    /// Value substituted for missing cells with `--missing fill`
    #[arg(long)]
    fill_value: Option<f64>,

    /// Evaluate grid points on a single thread
    #[arg(long)]
    serial: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KernelArg {
    Epanechnikov,
    Tricube,
    Biweight,
    Triangle,
    Cosine,
    Uniform,
    Gaussian,
}

#[derive(Clone, Copy, ValueEnum)]
enum ZeroWeightArg {
    Zero,
    WindowMean,
}

#[derive(Clone, Copy, ValueEnum)]
enum MissingArg {
    Reject,
    Drop,
    Fill,
}

impl ResampleOptions {
    fn builder(&self) -> Result<Resampler<f64>> {
        let weight_function = match self.kernel {
            KernelArg::Epanechnikov => WeightFunction::Epanechnikov,
            KernelArg::Tricube => WeightFunction::Tricube,
            KernelArg::Biweight => WeightFunction::Biweight,
            KernelArg::Triangle => WeightFunction::Triangle,
            KernelArg::Cosine => WeightFunction::Cosine,
            KernelArg::Uniform => WeightFunction::Uniform,
            KernelArg::Gaussian => WeightFunction::Gaussian,
        };
        let zero_weight_fallback = match self.zero_weight {
            ZeroWeightArg::Zero => ZeroWeightFallback::ReturnZero,
            ZeroWeightArg::WindowMean => ZeroWeightFallback::UseWindowMean,
        };
        let missing_values = match (self.missing, self.fill_value) {
            (MissingArg::Reject, None) => MissingValues::Reject,
            (MissingArg::Drop, None) => MissingValues::DropColumn,
            (MissingArg::Fill, Some(v)) => MissingValues::Fill(v),
            (MissingArg::Fill, None) => bail!("--missing fill requires --fill-value"),
            (_, Some(_)) => bail!("--fill-value is only valid with --missing fill"),
        };

        let mut builder = Resampler::new()
            .step(self.step)
            .neighbors(self.neighbors)
            .weight_function(weight_function)
            .zero_weight_fallback(zero_weight_fallback)
            .missing_values(missing_values)
            .parallel(!self.serial);
        if let Some(tol) = self.tolerance {
            builder = builder.tolerance(tol);
        }
        Ok(builder)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::File {
            input,
            output,
            options,
        } => {
            let model = options.builder()?.adapter(Batch).build()?;
            let labeled =
                read_tsv(&input).with_context(|| format!("reading {}", input.display()))?;
            let result = model.regularize_labeled(&labeled)?;
            write_tsv(&output, &result.table, &labeled.index_name)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(
                output = %output.display(),
                grid_points = result.grid.len(),
                estimated = result.estimated_count(),
                "wrote resampled table"
            );
        }

        Commands::Batch {
            input_dir,
            output_dir,
            options,
        } => {
            options
                .builder()?
                .adapter(Directory)
                .build()?
                .run(&input_dir, &output_dir)
                .with_context(|| format!("processing {}", input_dir.display()))?;
        }

        Commands::Estimate {
            input,
            at,
            options,
        } => {
            let model = options.builder()?.adapter(Batch).build()?;
            let labeled =
                read_tsv(&input).with_context(|| format!("reading {}", input.display()))?;
            let cleaned = model.clean(&labeled)?;
            let estimate = model.estimate_detailed(&cleaned.table, at)?;

            let mut out = std::io::stdout().lock();
            writeln!(out, "{}\t{}", labeled.index_name, format_value(at))?;
            for (feature, value) in cleaned.table.features().iter().zip(&estimate.values) {
                writeln!(out, "{}\t{}", feature, format_value(*value))?;
            }
            info!(
                bandwidth = estimate.bandwidth,
                support = estimate.support,
                kind = ?estimate.kind,
                "estimated"
            );
        }
    }

    Ok(())
}
