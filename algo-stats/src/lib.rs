//! Algorithm Benchmark Statistics Library
//!
//! Loads graph-algorithm benchmark results (Tarjan SCC, topological sort and
//! DAG shortest path timings and counters) and renders them as charts.
//!
//! # Architecture
//!
//! - [`table`] reads the results CSV into an ordered, immutable [`ResultsTable`]
//! - [`charts`] turns a table into chart specs and renders them with plotters
//! - [`report`] chains the two: load, display, then the three charts in order
//! - [`graph`] and [`compare`] implement the benchmark harness that produces
//!   the results CSV in the first place
//!
//! Argument parsing, logging setup and config files live in the application
//! layer (algo-stats-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use algo_stats::{ChartConfig, Reporter};
//! use std::path::Path;
//!
//! let config = ChartConfig::new().with_output_dir("charts");
//! let reporter = Reporter::new(config);
//! let summary = reporter
//!     .run(Path::new("algorithm_comparison.csv"), &mut std::io::stdout())
//!     .unwrap();
//!
//! for chart in &summary.charts {
//!     println!("wrote {:?}", chart);
//! }
//! ```

// Public modules
pub mod charts;
pub mod compare;
pub mod config;
pub mod graph;
pub mod metrics;
pub mod report;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use charts::{ChartKind, ChartSpec, Series};
pub use compare::{ComparisonResult, ComparisonRun};
pub use config::{ChartConfig, ImageFormat};
pub use graph::{Edge, Graph};
pub use metrics::Metrics;
pub use report::{ReportSummary, Reporter};
pub use table::{ResultsTable, Row};
pub use types::{Result, StatsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
