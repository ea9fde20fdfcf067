//! Chart rendering configuration
//!
//! This module defines the knobs the renderer needs. Every field has a default
//! so a config file only has to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image format written by the chart renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// File extension for this format (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(format!("unsupported image format: {}", other)),
        }
    }
}

/// Configuration for the chart renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Directory the chart images are written into
    pub output_dir: PathBuf,

    /// Image format (png or svg)
    pub format: ImageFormat,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Font family used for captions and labels
    pub font_family: String,

    /// Caption (title) font size
    pub caption_font_size: f64,

    /// Axis label font size
    pub label_font_size: f64,

    /// Radius of the point markers on line charts
    pub marker_size: u32,

    /// Stroke width of lines on line charts
    pub line_width: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        // 12x6 inches at 100 dpi
        Self {
            output_dir: PathBuf::from("charts"),
            format: ImageFormat::Png,
            width: 1200,
            height: 600,
            font_family: "sans-serif".to_string(),
            caption_font_size: 28.0,
            label_font_size: 14.0,
            marker_size: 4,
            line_width: 2,
        }
    }
}

impl ChartConfig {
    /// Create a chart configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method: set the image format
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder method: set the image size in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder method: set the font family
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Path a chart with the given file stem is written to
    pub fn chart_path(&self, file_stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", file_stem, self.format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_chart_config_builder() {
        let config = ChartConfig::new()
            .with_output_dir("out")
            .with_format(ImageFormat::Svg)
            .with_size(800, 400)
            .with_font_family("serif");

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.format, ImageFormat::Svg);
        assert_eq!((config.width, config.height), (800, 400));
        assert_eq!(config.font_family, "serif");
    }

    #[test]
    fn test_chart_path() {
        let config = ChartConfig::new().with_output_dir("out");
        assert_eq!(config.chart_path("execution_times"), Path::new("out/execution_times.png"));

        let config = config.with_format(ImageFormat::Svg);
        assert_eq!(config.chart_path("execution_times"), Path::new("out/execution_times.svg"));
    }

    #[test]
    fn test_image_format_parsing() {
        assert_eq!("PNG".parse::<ImageFormat>(), Ok(ImageFormat::Png));
        assert_eq!("svg".parse::<ImageFormat>(), Ok(ImageFormat::Svg));
        assert!("gif".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let config: ChartConfig = serde_json::from_str(r#"{"format": "svg", "width": 640}"#).unwrap();
        assert_eq!(config.format, ImageFormat::Svg);
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 600);
        assert_eq!(config.output_dir, PathBuf::from("charts"));
    }
}
