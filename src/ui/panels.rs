use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – trace toggles
// ---------------------------------------------------------------------------

/// Render the left panel listing every trace with a visibility checkbox.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Traces");
    ui.separator();

    if state.figure.traces.is_empty() {
        ui.label("No traces.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    let mut toggled = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, trace) in state.figure.traces.iter().enumerate() {
                let label = format!("{}  ({} pts)", trace.label, trace.points.len());
                let mut text = RichText::new(label);
                if let Some(c) = trace.color {
                    text = text.color(Color32::from(c));
                }

                let mut checked = state.visible.get(i).copied().unwrap_or(false);
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(i);
                }
            }

            if !state.figure.annotations.is_empty() {
                ui.separator();
                ui.checkbox(&mut state.show_annotations, "Annotations");
            }
        });

    if let Some(i) = toggled {
        state.toggle_trace(i);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} of {} traces visible",
            state.figure.name,
            state.visible_traces().count(),
            state.figure.traces.len()
        ));

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_file_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Export figure document")
        .set_directory(&state.out_dir)
        .set_file_name(format!("{}.json", state.figure.slug()))
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
