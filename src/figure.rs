use serde::{Deserialize, Serialize};

use crate::color::Rgb;

// ---------------------------------------------------------------------------
// Figure – an explicit canvas handed to each rendering call
// ---------------------------------------------------------------------------

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Line,
    Scatter,
}

/// One labelled series of `[x, y]` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub label: String,
    pub kind: TraceKind,
    pub color: Option<Rgb>,
    pub points: Vec<[f64; 2]>,
}

impl Trace {
    pub fn line(label: impl Into<String>, points: Vec<[f64; 2]>) -> Self {
        Self {
            label: label.into(),
            kind: TraceKind::Line,
            color: None,
            points,
        }
    }

    pub fn scatter(label: impl Into<String>, points: Vec<[f64; 2]>) -> Self {
        Self {
            label: label.into(),
            kind: TraceKind::Scatter,
            color: None,
            points,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// Text pinned to a data coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub at: [f64; 2],
    pub text: String,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Artifact name; also the window title and export file stem.
    pub name: String,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Figure {
    pub fn new(
        name: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            traces: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub fn annotate(&mut self, at: [f64; 2], text: impl Into<String>) {
        self.annotations.push(Annotation {
            at,
            text: text.into(),
        });
    }

    /// File-system friendly version of the figure name.
    pub fn slug(&self) -> String {
        let slug: String = self
            .name
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '.' => c,
                _ => '_',
            })
            .collect();
        if slug.is_empty() {
            "figure".to_string()
        } else {
            slug
        }
    }
}

/// Where a finished figure goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Open an interactive window.
    #[default]
    Display,
    /// Write the figure document to the output directory.
    Export,
}
