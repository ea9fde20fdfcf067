//! Benchmark harness producing the results CSV
//!
//! Each dataset goes through the full pipeline: Tarjan SCC, condensation,
//! Kahn sort of the condensation, then DAG shortest paths from the dataset's
//! source over the expanded vertex order. Datasets run one after another so
//! the timings do not interfere.

use crate::graph::{expand_components, kahn_sort, tarjan_scc, DagShortestPath, Graph};
use crate::table;
use crate::types::{Result, StatsError};
use csv::WriterBuilder;
use serde::{Serialize, Serializer};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Header of the results CSV, in column order
pub const CSV_HEADER: [&str; 10] = [
    table::DATASET,
    "n",
    "m",
    table::SCC_TIME_MS,
    table::TOPO_TIME_MS,
    table::DAG_SP_TIME_MS,
    table::SCC_VISITS,
    table::DAG_RELAXATIONS,
    table::SCC_COUNT,
    table::SCC_EDGES,
];

/// One row of the results CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub dataset: String,
    pub n: usize,
    pub m: usize,
    #[serde(serialize_with = "three_decimals")]
    pub scc_time_ms: f64,
    #[serde(serialize_with = "three_decimals")]
    pub topo_time_ms: f64,
    #[serde(serialize_with = "three_decimals")]
    pub dag_sp_time_ms: f64,
    pub scc_visits: u64,
    pub dag_relaxations: u64,
    pub scc_count: usize,
    pub scc_edges: usize,
}

fn three_decimals<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.3}", value))
}

/// Outcome of a harness run over several datasets
#[derive(Debug, Clone, Default)]
pub struct ComparisonRun {
    /// Rows written, in dataset order
    pub results: Vec<ComparisonResult>,
    /// Datasets that failed to load, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Dataset label: the file name without directory or extension
pub fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run all three algorithms over one graph
pub fn compare_graph(graph: &Graph, dataset: &str) -> ComparisonResult {
    let adj = graph.adjacency();

    let scc = tarjan_scc(&adj);
    let condensation = scc.condensation(&adj);
    let scc_edges = condensation.iter().map(Vec::len).sum();

    let topo = kahn_sort(&condensation);
    let vertex_order = expand_components(&scc.components, &topo.order);

    let mut dag = DagShortestPath::from_graph(graph);
    dag.shortest_paths(graph.source, &vertex_order);

    let result = ComparisonResult {
        dataset: dataset.to_string(),
        n: graph.n,
        m: graph.edge_count(),
        scc_time_ms: scc.metrics.elapsed_ms(),
        topo_time_ms: topo.metrics.elapsed_ms(),
        dag_sp_time_ms: dag.metrics().elapsed_ms(),
        scc_visits: scc.metrics.dfs_visits,
        dag_relaxations: dag.metrics().relaxations,
        scc_count: scc.count(),
        scc_edges,
    };

    log::debug!(
        "{}: n={} m={} sccs={} scc_edges={} relaxations={}",
        result.dataset,
        result.n,
        result.m,
        result.scc_count,
        result.scc_edges,
        result.dag_relaxations
    );
    result
}

/// Benchmark every dataset that loads; skip (and log) the ones that don't
pub fn run_datasets(datasets: &[PathBuf]) -> ComparisonRun {
    let mut run = ComparisonRun::default();

    for path in datasets {
        match Graph::load(path) {
            Ok(graph) => {
                let result = compare_graph(&graph, &dataset_name(path));
                log::info!("Benchmarked {}", result.dataset);
                run.results.push(result);
            }
            Err(e) => {
                log::error!("Error processing {:?}: {}", path, e);
                run.skipped.push((path.clone(), e.to_string()));
            }
        }
    }
    run
}

/// Write results to a CSV file (the header is written even with no rows)
pub fn write_csv(results: &[ComparisonResult], output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(CSV_HEADER)?;
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;

    log::info!("CSV file updated: {:?}", output);
    Ok(())
}

/// Benchmark the datasets and write the results CSV
///
/// Fails only if the output cannot be written; individual datasets that fail
/// are reported in `ComparisonRun::skipped`.
pub fn run_comparison(datasets: &[PathBuf], output: &Path) -> Result<ComparisonRun> {
    if datasets.is_empty() {
        return Err(StatsError::MalformedInput("no datasets given".to_string()));
    }

    let run = run_datasets(datasets);
    write_csv(&run.results, output)?;
    Ok(run)
}
