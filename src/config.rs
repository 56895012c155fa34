//! Figure configuration, read from a JSON file.
//!
//! Data-bearing sections (`curves`, `segments`, `scatter`) are optional and
//! must be present when their figure is selected. The analytic sections fall
//! back to the paper's grids and parameters.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::RunDirectory;
use crate::data::model::AlignParams;
use crate::figure::RenderMode;

/// Which figure to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    #[default]
    Curves,
    Segments,
    Scatter,
    Loss,
    Gaussian,
    GeneralizedGaussian,
}

impl FigureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FigureKind::Curves => "curves",
            FigureKind::Segments => "segments",
            FigureKind::Scatter => "scatter",
            FigureKind::Loss => "loss",
            FigureKind::Gaussian => "gaussian",
            FigureKind::GeneralizedGaussian => "generalized_gaussian",
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// One run of the alignment figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSeries {
    /// Record file stem under `runs.base_dir`.
    pub name: String,
    /// Legend text; defaults to `name`.
    pub label: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvesSection {
    pub name: String,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    #[serde(default)]
    pub runs: RunDirectory,
    #[serde(default)]
    pub params: AlignParams,
    pub series: Vec<RunSeries>,
}

/// Paired coordinates of one labelled group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGroup {
    pub label: String,
    pub color: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Shared shape of the `segments` and `scatter` sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupsSection {
    pub name: String,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    pub groups: Vec<PointGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossSection {
    pub name: String,
    pub domain: [f64; 2],
    pub samples: usize,
}

impl Default for LossSection {
    fn default() -> Self {
        Self {
            name: "pic_func".to_string(),
            domain: [-3.0, 3.0],
            samples: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianSection {
    pub name: String,
    pub mu: f64,
    pub sigma: f64,
    pub samples: usize,
}

impl Default for GaussianSection {
    fn default() -> Self {
        Self {
            name: "pic_gaussian".to_string(),
            mu: 0.0,
            sigma: 1.0,
            samples: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub beta: f64,
    pub label: String,
    pub color: Option<String>,
}

impl ShapeSpec {
    fn new(beta: f64, label: &str, color: &str) -> Self {
        Self {
            beta,
            label: label.to_string(),
            color: Some(color.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralizedGaussianSection {
    pub name: String,
    pub mu: f64,
    pub sigma: f64,
    pub samples: usize,
    pub shapes: Vec<ShapeSpec>,
}

impl Default for GeneralizedGaussianSection {
    fn default() -> Self {
        Self {
            name: "pic_g_gaussian".to_string(),
            mu: 0.0,
            sigma: 1.0,
            samples: 1024,
            shapes: vec![
                ShapeSpec::new(1.0, "Laplace", "tomato"),
                ShapeSpec::new(2.0, "Gaussian", "orange"),
                ShapeSpec::new(4.0, "Almost Gaussian", "forestgreen"),
                ShapeSpec::new(8.0, "Median", "steelblue"),
                ShapeSpec::new(1024.0, "Almost Uniform", "purple"),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Config – the whole file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub figure: FigureKind,
    pub mode: RenderMode,
    /// Directory receiving exported documents.
    pub out_dir: PathBuf,
    pub curves: Option<CurvesSection>,
    pub segments: Option<GroupsSection>,
    pub scatter: Option<GroupsSection>,
    pub loss: LossSection,
    pub gaussian: GaussianSection,
    pub generalized_gaussian: GeneralizedGaussianSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            figure: FigureKind::default(),
            mode: RenderMode::default(),
            out_dir: PathBuf::from("figures"),
            curves: None,
            segments: None,
            scatter: None,
            loss: LossSection::default(),
            gaussian: GaussianSection::default(),
            generalized_gaussian: GeneralizedGaussianSection::default(),
        }
    }
}

impl Config {
    /// Read and parse a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!(
            "Loaded config {} (figure: {}, mode: {:?})",
            path.display(),
            config.figure.as_str(),
            config.mode
        );
        Ok(config)
    }
}
