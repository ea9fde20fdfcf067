//! Report command: print the results table and render the charts

use algo_stats::{ChartConfig, Reporter};
use anyhow::{Context, Result};
use std::io;
use std::path::Path;

/// Load `input`, dump it to stdout and write the three charts
pub fn run(input: &Path, charts: ChartConfig) -> Result<()> {
    log::info!("Reporting on {:?}", input);

    let reporter = Reporter::new(charts);
    log::debug!("Chart settings: {:?}", reporter.config());
    let summary = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        reporter
            .run(input, &mut out)
            .with_context(|| format!("Failed to report on {:?}", input))?
    };

    println!();
    for chart in &summary.charts {
        println!("Chart written: {}", chart.display());
    }
    log::info!(
        "Report complete: {} rows, {} charts",
        summary.rows,
        summary.charts.len()
    );
    Ok(())
}
