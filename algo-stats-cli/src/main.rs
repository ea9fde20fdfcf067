//! Algo Stats CLI Application
//!
//! Command-line front end for the algo-stats library:
//! - `report` (the default): print the results table and render the
//!   execution-time, visits and SCC charts
//! - `compare`: benchmark graph datasets and write the results CSV
//!
//! With no arguments it reads `./algorithm_comparison.csv` and writes charts
//! into `./charts`.

use algo_stats::ImageFormat;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod compare;
mod config;
mod report;

/// Algo Stats - Chart graph-algorithm benchmark results
#[derive(Parser, Debug)]
#[command(name = "algo-stats")]
#[command(about = "Chart SCC / topological sort / DAG shortest path benchmark results", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the results table and render the three charts
    Report {
        /// Results CSV to read
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Directory the chart images are written into
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Image format (png or svg)
        #[arg(long, value_name = "FORMAT")]
        format: Option<ImageFormat>,
    },

    /// Benchmark graph datasets and write the results CSV
    Compare {
        /// Results CSV to write
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// JSON graph datasets, benchmarked in the order given
        #[arg(value_name = "DATASET")]
        datasets: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Algo Stats CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using algo-stats library v{}", algo_stats::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    match args.command {
        None => report::run(&app_config.input.results_csv, app_config.charts),
        Some(Command::Report {
            input,
            output_dir,
            format,
        }) => {
            let mut charts = app_config.charts;
            if let Some(dir) = output_dir {
                charts = charts.with_output_dir(dir);
            }
            if let Some(format) = format {
                charts = charts.with_format(format);
            }
            let input = input.unwrap_or(app_config.input.results_csv);
            report::run(&input, charts)
        }
        Some(Command::Compare { output, datasets }) => {
            let mut compare_config = app_config.compare;
            if let Some(output) = output {
                compare_config.output_csv = output;
            }
            if !datasets.is_empty() {
                compare_config.datasets = datasets;
            }
            compare::run(&compare_config.datasets, &compare_config.output_path())
        }
    }
}

/// Log level for the `-v` count; `-q` wins over any `-v`
fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    use log::LevelFilter;

    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize stderr logging; `RUST_LOG` refines the level from the flags
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::{Builder, Target};
    use std::io::Write;

    Builder::new()
        .target(Target::Stderr)
        .filter_level(log_level(verbose, quiet))
        .parse_default_env()
        .format(|buf, record| {
            let target = record.target();
            let module = target.strip_prefix("algo_stats::").unwrap_or(target);
            writeln!(buf, "[{} {}] {}", record.level(), module, record.args())
        })
        .init();
}
