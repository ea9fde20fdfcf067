//! Results table loading and display
//!
//! The results table is read once from a CSV file and never mutated. Row order
//! is the file's row order, and column order is the file's header order.

use crate::types::{Result, StatsError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Row label column
pub const DATASET: &str = "Dataset";
pub const SCC_TIME_MS: &str = "SCC Time (ms)";
pub const TOPO_TIME_MS: &str = "Topo Time (ms)";
pub const DAG_SP_TIME_MS: &str = "DAG-SP Time (ms)";
pub const SCC_VISITS: &str = "SCC Visits";
pub const DAG_RELAXATIONS: &str = "DAG Relaxations";
pub const SCC_COUNT: &str = "SCC Count";
pub const SCC_EDGES: &str = "SCC Edges";

/// Columns every results file must carry
pub const REQUIRED_COLUMNS: [&str; 8] = [
    DATASET,
    SCC_TIME_MS,
    TOPO_TIME_MS,
    DAG_SP_TIME_MS,
    SCC_VISITS,
    DAG_RELAXATIONS,
    SCC_COUNT,
    SCC_EDGES,
];

/// Default input file, resolved from the working directory
pub const DEFAULT_RESULTS_FILE: &str = "algorithm_comparison.csv";

/// A single row of the results table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Dataset label (not guaranteed unique)
    pub dataset: String,
    /// Numeric cells, one per non-Dataset column in header order
    pub values: Vec<f64>,
}

/// The full results table, held in memory for the lifetime of a report
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    columns: Vec<String>,
    dataset_column: usize,
    rows: Vec<Row>,
}

impl ResultsTable {
    /// Load a results table from a CSV file
    ///
    /// # Errors
    /// * `MissingFile` if the path does not resolve
    /// * `MalformedInput` if a required column is missing or a value is not numeric
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading results table: {:?}", path);

        let file = File::open(path).map_err(|e| StatsError::from_open(path, e))?;
        let table = Self::from_reader(BufReader::new(file))?;

        log::info!(
            "Results table loaded: {} rows, {} columns",
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }

    /// Parse a results table from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = csv
            .headers()
            .map_err(|e| StatsError::MalformedInput(format!("unreadable header: {}", e)))?
            .clone();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        validate_header(&columns)?;

        let dataset_column = columns
            .iter()
            .position(|c| c == DATASET)
            .ok_or_else(|| missing_column(DATASET))?;

        let mut rows = Vec::new();
        for (index, record) in csv.records().enumerate() {
            // Header is line 1
            let line = index + 2;
            let record = record
                .map_err(|e| StatsError::MalformedInput(format!("line {}: {}", line, e)))?;
            rows.push(parse_row(&record, &columns, dataset_column, line)?);
        }

        log::debug!("Parsed {} rows with columns {:?}", rows.len(), columns);

        Ok(Self {
            columns,
            dataset_column,
            rows,
        })
    }

    /// Column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in file order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the file had a header but no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dataset labels in file order
    pub fn datasets(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.dataset.as_str()).collect()
    }

    /// All values of a numeric column, in file order
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.value_index(name)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    /// `(dataset, value)` pairs for a numeric column, in file order
    pub fn series(&self, name: &str) -> Result<Vec<(String, f64)>> {
        let idx = self.value_index(name).ok_or_else(|| missing_column(name))?;
        Ok(self
            .rows
            .iter()
            .map(|r| (r.dataset.clone(), r.values[idx]))
            .collect())
    }

    /// Write the human-readable dump used by the report
    pub fn display<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "=== Data Table ===")?;
        write!(out, "{}", self)?;
        Ok(())
    }

    /// Map a column name to its position in `Row::values`
    fn value_index(&self, name: &str) -> Option<usize> {
        let col = self.columns.iter().position(|c| c == name)?;
        match col.cmp(&self.dataset_column) {
            std::cmp::Ordering::Less => Some(col),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(col - 1),
        }
    }

    /// Rendered cell text for every column of every row
    fn cell_text(&self) -> Vec<Vec<String>> {
        let integral: Vec<bool> = (0..self.columns.len().saturating_sub(1))
            .map(|idx| self.rows.iter().all(|r| is_integral(r.values[idx])))
            .collect();

        self.rows
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(self.columns.len());
                let mut values = row.values.iter().enumerate();
                for col in 0..self.columns.len() {
                    if col == self.dataset_column {
                        cells.push(row.dataset.clone());
                    } else if let Some((idx, value)) = values.next() {
                        cells.push(format_value(*value, integral[idx]));
                    }
                }
                cells
            })
            .collect()
    }
}

impl fmt::Display for ResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cell_text();

        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(col, name)| {
                cells
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:width$}", "", width = index_width)?;
        for (name, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", name, width = width)?;
        }
        writeln!(f)?;

        for (index, row) in cells.iter().enumerate() {
            write!(f, "{:<width$}", index, width = index_width)?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", cell, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn missing_column(name: &str) -> StatsError {
    StatsError::MalformedInput(format!("missing required column '{}'", name))
}

fn validate_header(columns: &[String]) -> Result<()> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(missing_column(required));
        }
    }

    for (idx, name) in columns.iter().enumerate() {
        if columns[..idx].contains(name) {
            return Err(StatsError::MalformedInput(format!(
                "duplicate column '{}'",
                name
            )));
        }
    }
    Ok(())
}

fn parse_row(
    record: &StringRecord,
    columns: &[String],
    dataset_column: usize,
    line: usize,
) -> Result<Row> {
    let mut dataset = String::new();
    let mut values = Vec::with_capacity(columns.len().saturating_sub(1));

    for (col, field) in record.iter().enumerate() {
        if col == dataset_column {
            dataset = field.to_string();
            continue;
        }
        let value = field.parse::<f64>().map_err(|_| {
            StatsError::MalformedInput(format!(
                "line {}: column '{}' has non-numeric value '{}'",
                line, columns[col], field
            ))
        })?;
        if !value.is_finite() {
            return Err(StatsError::MalformedInput(format!(
                "line {}: column '{}' has non-finite value '{}'",
                line, columns[col], field
            )));
        }
        values.push(value);
    }

    Ok(Row { dataset, values })
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15
}

fn format_value(value: f64, integral: bool) -> String {
    if integral {
        format!("{}", value as i64)
    } else {
        format!("{:.3}", value)
    }
}
