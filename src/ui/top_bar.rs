//! Top bar UI: app title, place search, and status.

use super::colors;
use crate::state::AppState;
use eframe::egui::{self, Color32, RichText};

/// Renders the top bar. Returns a query when the user submits a search.
pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState, searching: bool) -> Option<String> {
    let mut submitted = None;

    let panel = egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // App title
                ui.label(
                    RichText::new("Weather Stations")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                // Search input
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search.query)
                        .hint_text("Search places...")
                        .desired_width(240.0),
                );
                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui
                    .add_enabled(!searching, egui::Button::new("Search"))
                    .clicked();
                if (enter || clicked) && !state.search.query.trim().is_empty() {
                    submitted = Some(state.search.query.trim().to_string());
                }

                if searching {
                    ui.spinner();
                }

                ui.separator();

                // Status text
                let status_color = match &state.search.error {
                    Some(_) => colors::ui::ERROR,
                    None => Color32::GRAY,
                };
                let status = state
                    .search
                    .error
                    .as_deref()
                    .unwrap_or(state.status_message.as_str());
                ui.label(RichText::new(status).size(13.0).color(status_color));

                response.rect
            })
            .inner
        });

    render_search_results(ctx, state, panel.inner.left_bottom());
    submitted
}

/// Result list shown under the search box until a result is picked.
fn render_search_results(ctx: &egui::Context, state: &mut AppState, anchor: egui::Pos2) {
    if state.search.results.is_empty() {
        return;
    }

    let mut selected = None;
    let mut dismissed = false;
    egui::Area::new(egui::Id::new("search_results"))
        .fixed_pos(anchor + egui::vec2(0.0, 4.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(360.0);
                for (index, result) in state.search.results.iter().enumerate() {
                    if ui.selectable_label(false, &result.name).clicked() {
                        selected = Some(index);
                    }
                }
                ui.separator();
                if ui.small_button("Close").clicked() {
                    dismissed = true;
                }
            });
        });

    if let Some(index) = selected {
        if let Some(bounds) = state.search.select(index) {
            log::debug!("Fitting view to {:?}", bounds);
        }
    } else if dismissed {
        state.search.clear_results();
    }
}
