use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui;

use crate::app::FigureViewerApp;
use crate::figure::{Figure, RenderMode};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Hand a finished figure to its destination.
///
/// Returns the written path in [`RenderMode::Export`], `None` once the
/// interactive window has been closed.
pub fn render(figure: Figure, mode: RenderMode, out_dir: &Path) -> Result<Option<PathBuf>> {
    match mode {
        RenderMode::Display => {
            show(figure, out_dir)?;
            Ok(None)
        }
        RenderMode::Export => export_figure(&figure, out_dir).map(Some),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write `<out_dir>/<slug>.json`, creating `out_dir` when missing.
pub fn export_figure(figure: &Figure, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let path = out_dir.join(format!("{}.json", figure.slug()));
    write_document(figure, &path)?;
    Ok(path)
}

/// Serialise `figure` to `path` as pretty JSON.
pub fn write_document(figure: &Figure, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, figure).context("serialising figure")?;
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    log::info!("Exported figure '{}' to {}", figure.name, path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Interactive display
// ---------------------------------------------------------------------------

fn show(figure: Figure, out_dir: &Path) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = format!("Paper Figures – {}", figure.name);
    let app = FigureViewerApp::new(figure, out_dir.to_path_buf());
    eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
