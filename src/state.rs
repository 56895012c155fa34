use std::path::{Path, PathBuf};

use crate::figure::{Figure, Trace};
use crate::render::write_document;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    /// Figure being shown.
    pub figure: Figure,

    /// Per-trace visibility, parallel to `figure.traces`.
    pub visible: Vec<bool>,

    /// Whether annotations are drawn.
    pub show_annotations: bool,

    /// Default directory for the export dialog.
    pub out_dir: PathBuf,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(figure: Figure, out_dir: PathBuf) -> Self {
        let visible = vec![true; figure.traces.len()];
        Self {
            figure,
            visible,
            show_annotations: true,
            out_dir,
            status_message: None,
        }
    }

    /// Traces currently switched on, with their index.
    pub fn visible_traces(&self) -> impl Iterator<Item = (usize, &Trace)> {
        self.figure
            .traces
            .iter()
            .enumerate()
            .filter(|(i, _)| self.visible.get(*i).copied().unwrap_or(false))
    }

    /// Flip a single trace on or off.
    pub fn toggle_trace(&mut self, index: usize) {
        if let Some(v) = self.visible.get_mut(index) {
            *v = !*v;
        }
    }

    /// Show every trace.
    pub fn select_all(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = true);
    }

    /// Hide every trace.
    pub fn select_none(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = false);
    }

    /// Write the figure document to `path` and report the outcome.
    pub fn export_to(&mut self, path: &Path) {
        match write_document(&self.figure, path) {
            Ok(()) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export figure: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
