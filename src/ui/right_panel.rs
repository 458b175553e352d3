//! Right panel UI: layer switcher, draw and edit tools.

use super::colors;
use crate::draw::{DrawTool, EditMode};
use crate::geo::BaseLayer;
use crate::state::{AppState, LoadStatus, OverlayKind};
use eframe::egui::{self, RichText, ScrollArea};

pub fn render_right_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("right_panel")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .max_width(350.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Controls");
                ui.separator();

                render_base_layer_section(ui, state);
                ui.add_space(5.0);

                render_overlay_section(ui, state);
                ui.add_space(5.0);

                render_draw_section(ui, state);
                ui.add_space(5.0);

                render_edit_section(ui, state);
            });
        });
}

fn render_base_layer_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Base Layer").strong())
        .default_open(true)
        .show(ui, |ui| {
            for layer in BaseLayer::all() {
                if ui
                    .radio_value(&mut state.layers.base, *layer, layer.label())
                    .changed()
                {
                    log::debug!("Base layer: {}", layer.label());
                }
            }
        });
}

fn render_overlay_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Overlays").strong())
        .default_open(true)
        .show(ui, |ui| {
            let mut stations = state.stations_visible();
            let label = match &state.stations_status {
                LoadStatus::Loaded => OverlayKind::Stations.label().to_string(),
                LoadStatus::Pending => format!("{} (loading)", OverlayKind::Stations.label()),
                LoadStatus::Failed(_) => format!("{} (unavailable)", OverlayKind::Stations.label()),
            };
            if ui.checkbox(&mut stations, label).changed() {
                state.set_overlay(OverlayKind::Stations, stations);
            }

            render_boundary_toggle(ui, state);
        });
}

/// The boundary entry only becomes a live toggle once the layer exists.
fn render_boundary_toggle(ui: &mut egui::Ui, state: &mut AppState) {
    let label = OverlayKind::Boundaries.label();
    match &state.boundaries_status {
        LoadStatus::Loaded => {
            let mut visible = state.layers.active.contains(OverlayKind::Boundaries);
            if ui.checkbox(&mut visible, label).changed() {
                state.set_overlay(OverlayKind::Boundaries, visible);
            }
        }
        LoadStatus::Pending => {
            ui.horizontal(|ui| {
                ui.add_enabled(false, egui::Checkbox::new(&mut false, label));
                ui.spinner();
            });
        }
        LoadStatus::Failed(reason) => {
            ui.add_enabled(false, egui::Checkbox::new(&mut false, label))
                .on_disabled_hover_text(reason.as_str());
            ui.label(
                RichText::new("unavailable")
                    .small()
                    .color(colors::ui::ERROR),
            );
        }
    }
}

fn render_draw_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Draw").strong())
        .default_open(true)
        .show(ui, |ui| {
            let active_tool = state.draw.sketch().map(|s| s.tool());
            ui.horizontal_wrapped(|ui| {
                for tool in DrawTool::all() {
                    let selected = active_tool == Some(*tool);
                    if ui.selectable_label(selected, tool.label()).clicked() && !selected {
                        state.draw.start_drawing(*tool, &mut state.overlays);
                        state.popup = None;
                    }
                }
            });

            let Some((tool, vertex_count, can_finish)) = state
                .draw
                .sketch()
                .map(|s| (s.tool(), s.vertices().len(), s.can_finish()))
            else {
                return;
            };
            ui.label(
                RichText::new(tool.hint(vertex_count))
                    .small()
                    .color(colors::ui::DIM),
            );

            ui.horizontal(|ui| {
                if tool != DrawTool::Marker
                    && ui.add_enabled(can_finish, egui::Button::new("Finish")).clicked()
                {
                    if let Some(id) = state.draw.finish(&mut state.overlays) {
                        state.status_message = format!("Created shape {}", id);
                    }
                }
                if ui
                    .add_enabled(vertex_count > 0, egui::Button::new("Delete last point"))
                    .clicked()
                {
                    state.draw.undo();
                }
                if ui.button("Cancel").clicked() {
                    state.draw.cancel(&mut state.overlays);
                }
            });
        });
}

fn render_edit_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Edit").strong())
        .default_open(true)
        .show(ui, |ui| {
            let active_mode = state.draw.edit_mode();
            let has_members = !state.overlays.is_empty();
            ui.horizontal_wrapped(|ui| {
                for mode in [EditMode::Edit, EditMode::Delete] {
                    let selected = active_mode == Some(mode);
                    let response = ui.add_enabled(
                        has_members || selected,
                        egui::SelectableLabel::new(selected, mode.label()),
                    );
                    if response.clicked() && !selected {
                        state.draw.start_editing(mode, &mut state.overlays);
                        state.popup = None;
                    }
                }
            });

            let Some(mode) = state.draw.edit_mode() else {
                return;
            };
            ui.label(RichText::new(mode.hint()).small().color(colors::ui::DIM));

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    state.draw.save();
                }
                if ui.button("Cancel").clicked() {
                    state.draw.cancel(&mut state.overlays);
                }
                if mode == EditMode::Delete
                    && ui
                        .add_enabled(!state.overlays.is_empty(), egui::Button::new("Clear all"))
                        .clicked()
                {
                    state.draw.clear_all(&mut state.overlays);
                    state.popup = None;
                }
            });
        });
}
