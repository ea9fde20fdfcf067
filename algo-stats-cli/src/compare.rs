//! Compare command: benchmark graph datasets into the results CSV

use algo_stats::compare::run_comparison;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Benchmark `datasets` in order and write the results to `output`
pub fn run(datasets: &[PathBuf], output: &Path) -> Result<()> {
    log::info!("Benchmarking {} datasets", datasets.len());

    let run = run_comparison(datasets, output)
        .with_context(|| format!("Failed to write comparison results to {:?}", output))?;

    for (path, reason) in &run.skipped {
        eprintln!("Skipped {}: {}", path.display(), reason);
    }
    println!(
        "CSV file updated: {} ({} datasets)",
        output.display(),
        run.results.len()
    );
    Ok(())
}
