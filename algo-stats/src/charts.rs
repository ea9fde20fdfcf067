//! Chart specs and rendering
//!
//! Building a chart is split in two steps. The `*_chart` functions turn a
//! results table into a [`ChartSpec`] (pure data: title, axes, categories and
//! series), and [`render`] draws a spec with plotters into an image file.
//! Categories are always the Dataset labels in file order.

use crate::config::{ChartConfig, ImageFormat};
use crate::table::{self, ResultsTable};
use crate::types::{Result, StatsError};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::PathBuf;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Fraction of a category slot taken up by a bar group
const GROUP_WIDTH: f64 = 0.8;

/// Pixels between the x axis and the top of a category name
const LABEL_GAP: i32 = 6;

/// Rough advance of one glyph, as a fraction of the font size
const GLYPH_WIDTH: f64 = 0.6;

/// How a chart draws its series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One line per series, every point marked
    Line,
    /// Side-by-side bars per category
    GroupedBar,
}

/// A named series of `(dataset, value)` points
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(String, f64)>,
}

impl Series {
    /// Values in category order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }
}

/// Everything needed to draw one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Horizontal-axis labels, in file order
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    /// Output file name without extension
    pub file_stem: String,
}

impl ChartSpec {
    /// Smallest and largest value across all series, if any
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Y-axis range: always includes zero, padded at the top
    fn y_range(&self) -> (f64, f64) {
        let (lo, hi) = self.value_range().unwrap_or((0.0, 0.0));
        let lo = lo.min(0.0);
        let hi = hi.max(0.0);
        if hi > lo {
            let pad = (hi - lo) * 0.05;
            let bottom = if lo < 0.0 { lo - pad } else { lo };
            (bottom, hi + pad)
        } else {
            (0.0, 1.0)
        }
    }
}

/// Line chart of the three timing columns
pub fn timing_chart(table: &ResultsTable) -> Result<ChartSpec> {
    build_spec(
        table,
        ChartKind::Line,
        "Execution Times Comparison",
        "Time (ms)",
        &[table::SCC_TIME_MS, table::TOPO_TIME_MS, table::DAG_SP_TIME_MS],
        "execution_times",
    )
}

/// Grouped bars of SCC visits against DAG relaxations
pub fn visits_chart(table: &ResultsTable) -> Result<ChartSpec> {
    build_spec(
        table,
        ChartKind::GroupedBar,
        "SCC Visits vs DAG Relaxations",
        "Count",
        &[table::SCC_VISITS, table::DAG_RELAXATIONS],
        "scc_visits_vs_dag_relaxations",
    )
}

/// Grouped bars of SCC count against condensation edges
pub fn scc_chart(table: &ResultsTable) -> Result<ChartSpec> {
    build_spec(
        table,
        ChartKind::GroupedBar,
        "SCC Count vs SCC Edges",
        "Count",
        &[table::SCC_COUNT, table::SCC_EDGES],
        "scc_count_vs_scc_edges",
    )
}

fn build_spec(
    table: &ResultsTable,
    kind: ChartKind,
    title: &str,
    y_label: &str,
    columns: &[&str],
    file_stem: &str,
) -> Result<ChartSpec> {
    let series = columns
        .iter()
        .map(|name| {
            Ok(Series {
                name: name.to_string(),
                points: table.series(name)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ChartSpec {
        kind,
        title: title.to_string(),
        x_label: table::DATASET.to_string(),
        y_label: y_label.to_string(),
        categories: table.datasets().into_iter().map(str::to_string).collect(),
        series,
        file_stem: file_stem.to_string(),
    })
}

/// Draw a chart spec into `config.output_dir` and return the written path
pub fn render(spec: &ChartSpec, config: &ChartConfig) -> Result<PathBuf> {
    if spec.categories.is_empty() {
        return Err(StatsError::MalformedInput(format!(
            "no rows to plot for '{}'",
            spec.title
        )));
    }
    if let Some((lo, hi)) = spec.value_range() {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(StatsError::MalformedInput(format!(
                "non-finite value in '{}'",
                spec.title
            )));
        }
    }

    std::fs::create_dir_all(&config.output_dir)?;
    let path = config.chart_path(&spec.file_stem);
    let size = (config.width, config.height);
    log::debug!("Rendering '{}' to {:?}", spec.title, path);

    let outcome = match config.format {
        ImageFormat::Png => draw_chart(BitMapBackend::new(&path, size).into_drawing_area(), spec, config),
        ImageFormat::Svg => draw_chart(SVGBackend::new(&path, size).into_drawing_area(), spec, config),
    };
    outcome.map_err(|e| StatsError::RenderError(format!("{}: {}", spec.title, e)))?;

    log::info!("Chart written: {:?}", path);
    Ok(path)
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec, config: &ChartConfig) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let font = config.font_family.as_str();
    let categories = spec.categories.len();
    let (y_min, y_max) = spec.y_range();
    let x_range = -0.5..(categories as f64 - 0.5);

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, (font, config.caption_font_size).into_font())
        .margin(20)
        .x_label_area_size(x_label_area(spec, config))
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_min..y_max)?;

    // Category names are drawn below, one per slot
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories)
        .x_label_formatter(&|_: &f64| String::new())
        .y_label_style((font, config.label_font_size).into_font())
        .axis_desc_style((font, config.label_font_size).into_font())
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()?;

    // Rotated text hangs down from its anchor, centred on the slot
    let tick_style = TextStyle::from((font, config.label_font_size).into_font())
        .transform(FontTransform::Rotate90)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (slot, label) in spec.categories.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(slot as f64, y_min));
        root.draw(&Text::new(
            label.clone(),
            (x, y + LABEL_GAP),
            tick_style.clone(),
        ))?;
    }

    match spec.kind {
        ChartKind::Line => draw_lines(&mut chart, spec, config)?,
        ChartKind::GroupedBar => draw_bars(&mut chart, spec)?,
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((font, config.label_font_size).into_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_lines<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    spec: &ChartSpec,
    config: &ChartConfig,
) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    for (i, series) in spec.series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let points: Vec<(f64, f64)> = series
            .values()
            .enumerate()
            .map(|(x, y)| (x as f64, y))
            .collect();

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                color.stroke_width(config.line_width),
            ))?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        let marker = config.marker_size as i32;
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, marker, color.filled())),
        )?;
    }
    Ok(())
}

fn draw_bars<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    spec: &ChartSpec,
) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let bar_width = GROUP_WIDTH / spec.series.len().max(1) as f64;

    for (i, series) in spec.series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let offset = -GROUP_WIDTH / 2.0 + i as f64 * bar_width;

        chart
            .draw_series(series.values().enumerate().map(|(x, y)| {
                let left = x as f64 + offset;
                Rectangle::new([(left, 0.0), (left + bar_width, y)], color.filled())
            }))?
            .label(series.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }
    Ok(())
}

/// Height of the x label area: the longest rotated category name, then the axis title
fn x_label_area(spec: &ChartSpec, config: &ChartConfig) -> u32 {
    let longest = spec
        .categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);
    let labels = longest as f64 * config.label_font_size * GLYPH_WIDTH;
    let title = config.label_font_size * 2.5;
    let wanted = LABEL_GAP as f64 + labels + title;
    wanted.min(f64::from(config.height) / 2.0).ceil() as u32
}
