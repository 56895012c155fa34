use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::figure::TraceKind;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Figure plot (central panel)
// ---------------------------------------------------------------------------

/// Render the figure's visible traces in the central panel.
pub fn figure_plot(ui: &mut Ui, state: &ViewerState) {
    let figure = &state.figure;

    if figure.traces.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("This figure has no traces");
        });
        return;
    }

    Plot::new("figure_plot")
        .legend(Legend::default())
        .x_axis_label(figure.x_label.clone())
        .y_axis_label(figure.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (_, trace) in state.visible_traces() {
                let color = trace.color.map(Color32::from).unwrap_or(Color32::LIGHT_BLUE);
                let points: PlotPoints = trace.points.iter().copied().collect();

                match trace.kind {
                    TraceKind::Line => {
                        let line = Line::new(points)
                            .name(&trace.label)
                            .color(color)
                            .width(1.5);
                        plot_ui.line(line);
                    }
                    TraceKind::Scatter => {
                        let markers = Points::new(points)
                            .name(&trace.label)
                            .color(color)
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(4.0);
                        plot_ui.points(markers);
                    }
                }
            }

            if state.show_annotations {
                for note in &figure.annotations {
                    let [x, y] = note.at;
                    plot_ui.text(Text::new(PlotPoint::new(x, y), note.text.clone()));
                }
            }
        });
}
