//! Configuration loading and parsing
//!
//! Every section and field is optional; a missing config file section falls
//! back to the same defaults the CLI uses without `--config`.

use algo_stats::table::DEFAULT_RESULTS_FILE;
use algo_stats::ChartConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Datasets benchmarked by `compare` when none are given
const DEFAULT_DATASETS: [&str; 9] = [
    "data/small_1_acyclic.json",
    "data/small_2_cyclic.json",
    "data/small_3_mixed.json",
    "data/medium_1_sparse.json",
    "data/medium_2_dense.json",
    "data/medium_3_multiple_scc.json",
    "data/large_1_sparse.json",
    "data/large_2_medium.json",
    "data/large_3_dense.json",
];

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub charts: ChartConfig,
    pub compare: CompareConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub results_csv: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            results_csv: PathBuf::from(DEFAULT_RESULTS_FILE),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompareConfig {
    pub datasets: Vec<PathBuf>,
    pub output_csv: PathBuf,
    /// Append a local timestamp to the output file name
    pub timestamped: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            datasets: DEFAULT_DATASETS.iter().map(PathBuf::from).collect(),
            output_csv: PathBuf::from(DEFAULT_RESULTS_FILE),
            timestamped: false,
        }
    }
}

impl CompareConfig {
    /// Output path, with `_YYYY-MM-DD_HH-MM-SS` inserted before the extension if timestamped
    pub fn output_path(&self) -> PathBuf {
        if !self.timestamped {
            return self.output_csv.clone();
        }
        let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        timestamped_path(&self.output_csv, &stamp)
    }
}

fn timestamped_path(path: &Path, stamp: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, stamp),
    };
    path.with_file_name(name)
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use algo_stats::ImageFormat;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            results_csv = "results/algorithm_comparison.csv"

            [charts]
            output_dir = "plots"
            format = "svg"
            width = 800

            [compare]
            datasets = ["a.json", "b.json"]
            timestamped = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.results_csv, PathBuf::from("results/algorithm_comparison.csv"));
        assert_eq!(config.charts.output_dir, PathBuf::from("plots"));
        assert_eq!(config.charts.format, ImageFormat::Svg);
        assert_eq!(config.charts.width, 800);
        assert_eq!(config.charts.height, 600);
        assert_eq!(config.compare.datasets.len(), 2);
        assert_eq!(config.compare.output_csv, PathBuf::from("algorithm_comparison.csv"));
        assert!(config.compare.timestamped);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.input.results_csv, PathBuf::from("algorithm_comparison.csv"));
        assert_eq!(config.charts.output_dir, PathBuf::from("charts"));
        assert_eq!(config.compare.datasets.len(), 9);
        assert!(!config.compare.timestamped);
    }

    #[test]
    fn test_timestamped_path() {
        let path = timestamped_path(Path::new("out/algorithm_comparison.csv"), "2025-01-02_03-04-05");
        assert_eq!(path, PathBuf::from("out/algorithm_comparison_2025-01-02_03-04-05.csv"));

        let path = timestamped_path(Path::new("results"), "stamp");
        assert_eq!(path, PathBuf::from("results_stamp"));
    }

    #[test]
    fn test_untimestamped_output_path() {
        let config = CompareConfig::default();
        assert_eq!(config.output_path(), PathBuf::from("algorithm_comparison.csv"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[charts]\nformat = \"png\"\nheight = 300\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.charts.height, 300);
        assert!(load_config(&dir.path().join("missing.toml")).is_err());
    }
}
