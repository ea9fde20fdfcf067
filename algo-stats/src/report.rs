//! The reporting pipeline
//!
//! load -> display -> timing chart -> visits chart -> SCC chart, strictly in
//! that order. All chart specs are built before anything is drawn, so a
//! missing column fails the run without leaving partial output behind.

use crate::charts::{self, ChartSpec};
use crate::config::ChartConfig;
use crate::table::ResultsTable;
use crate::types::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What a report run produced
#[derive(Debug, Clone)]
pub struct ReportSummary {
    /// Number of data rows in the results table
    pub rows: usize,
    /// Chart images, in render order
    pub charts: Vec<PathBuf>,
}

/// Drives a single report run
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    config: ChartConfig,
}

impl Reporter {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Settings every chart of this run is drawn with
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The three chart specs for a table, in render order
    pub fn chart_specs(table: &ResultsTable) -> Result<Vec<ChartSpec>> {
        Ok(vec![
            charts::timing_chart(table)?,
            charts::visits_chart(table)?,
            charts::scc_chart(table)?,
        ])
    }

    /// Load `input`, dump it to `out`, then render the three charts
    pub fn run<W: Write>(&self, input: &Path, out: &mut W) -> Result<ReportSummary> {
        let table = ResultsTable::load(input)?;
        table.display(out)?;
        out.flush()?;

        let specs = Self::chart_specs(&table)?;
        let mut written = Vec::with_capacity(specs.len());
        for spec in &specs {
            written.push(charts::render(spec, &self.config)?);
        }

        Ok(ReportSummary {
            rows: table.len(),
            charts: written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatsError;

    #[test]
    fn test_chart_specs_order() {
        let csv = "Dataset,SCC Time (ms),Topo Time (ms),DAG-SP Time (ms),SCC Visits,DAG Relaxations,SCC Count,SCC Edges\n\
                   A,1,2,3,10,20,5,7\n";
        let table = ResultsTable::from_reader(csv.as_bytes()).unwrap();
        let titles: Vec<String> = Reporter::chart_specs(&table)
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();

        assert_eq!(
            titles,
            vec![
                "Execution Times Comparison",
                "SCC Visits vs DAG Relaxations",
                "SCC Count vs SCC Edges",
            ]
        );
    }

    #[test]
    fn test_reporter_keeps_its_config() {
        let config = ChartConfig::new()
            .with_output_dir("out")
            .with_format(crate::config::ImageFormat::Svg);
        let reporter = Reporter::new(config.clone());
        assert_eq!(reporter.config(), &config);
        assert_eq!(Reporter::default().config(), &ChartConfig::default());
    }

    #[test]
    fn test_missing_file_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let charts_dir = dir.path().join("charts");
        let reporter = Reporter::new(ChartConfig::new().with_output_dir(&charts_dir));

        let mut out = Vec::new();
        let err = reporter
            .run(&dir.path().join("algorithm_comparison.csv"), &mut out)
            .unwrap_err();

        assert!(matches!(err, StatsError::MissingFile(_)));
        assert!(out.is_empty());
        assert!(!charts_dir.exists());
    }
}
