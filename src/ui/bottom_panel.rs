//! Bottom panel UI: pointer coordinates, zoom, and counts.

use super::colors;
use crate::state::AppState;
use eframe::egui::{self, RichText};
use geo_types::Coord;

pub fn render_bottom_panel(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("bottom_panel")
        .exact_height(26.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let readout = state
                    .pointer_position
                    .map(format_position)
                    .unwrap_or_default();
                ui.label(RichText::new(readout).monospace().size(12.0));

                ui.separator();
                stat(ui, "Zoom", &state.zoom_level().to_string());
                stat(ui, "Stations", &state.overlays.station_count().to_string());
                stat(ui, "Drawn", &state.overlays.drawn_count().to_string());
                if let Some(layer) = &state.boundaries {
                    stat(ui, "Boundaries", &layer.polygon_count().to_string());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(state.layers.base.attribution())
                            .small()
                            .color(colors::ui::DIM),
                    );
                });
            });
        });
}

fn stat(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(RichText::new(format!("{}:", label)).small().color(colors::ui::LABEL));
    ui.label(RichText::new(value).small().color(colors::ui::VALUE));
}

/// Pointer readout with five decimals.
pub fn format_position(coord: Coord<f64>) -> String {
    format!("Lat: {:.5}, Lng: {:.5}", coord.y, coord.x)
}
