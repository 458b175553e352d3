//! Central canvas UI: the slippy map and everything drawn on top of it.

use super::colors;
use crate::draw::{hit_test, DrawState, EditMode, Sketch, VertexRef};
use crate::geo::{
    render_boundaries, render_handle, render_label, render_path, render_pin, render_popup,
    BaseTiles, MapProjection, POPUP_ANCHOR,
};
use crate::state::{AppState, OverlayMember, Shape};
use eframe::egui::{self, Painter, Pos2, Rect, Response, Sense, Stroke, Vec2};
use geo_types::Coord;
use walkers::{Map, MapMemory, Plugin, Position, Projector};

/// Stroke width of drawn lines and polygons.
const SHAPE_LINE_WIDTH: f32 = 3.0;

/// Render the map with the boundary and station overlays.
pub fn render_canvas(
    ctx: &egui::Context,
    state: &mut AppState,
    tiles: &mut BaseTiles,
    map_memory: &mut MapMemory,
    home: Position,
) {
    let rimless = egui::Frame {
        fill: ctx.style().visuals.panel_fill,
        ..Default::default()
    };

    egui::CentralPanel::default().frame(rimless).show(ctx, |ui| {
        let base = state.layers.base;
        let map = Map::new(Some(tiles.get_mut(base)), map_memory, home)
            .with_plugin(OverlayPlugin { state });
        ui.add(map);
    });
}

/// Draws boundaries, station markers, drawn shapes and the active tool, and
/// routes pointer input on the map to the application state.
struct OverlayPlugin<'a> {
    state: &'a mut AppState,
}

impl Plugin for OverlayPlugin<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, response: &Response, projector: &Projector) {
        let state = self.state;
        let rect = response.rect;
        let projection = MapProjection::calibrate(
            |coord: Coord<f64>| {
                projector
                    .project(Position::from_lat_lon(coord.y, coord.x))
                    .to_pos2()
            },
            rect,
        );
        let painter = ui.painter_at(rect);

        state.pointer_position = response
            .hover_pos()
            .map(|pos| projection.screen_to_geo(pos));

        if state.boundaries_visible() {
            if let Some(layer) = &state.boundaries {
                render_boundaries(&painter, layer, &projection);
            }
        }

        if state.stations_visible() {
            render_members(&painter, state, &projection, response.hover_pos());
            if state.draw.edit_mode() == Some(EditMode::Edit) {
                handle_vertex_drags(ui, &painter, state, &projection);
            }
        }

        if let Some(sketch) = state.draw.sketch() {
            render_sketch(&painter, sketch, &projection, response.hover_pos());
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                state.handle_map_click(&projection, pos);
            }
        }

        render_open_popup(&painter, state, &projection);
    }
}

fn render_members(
    painter: &Painter,
    state: &AppState,
    projection: &MapProjection,
    hover: Option<Pos2>,
) {
    let delete_target = match (&state.draw, hover) {
        (DrawState::Editing(session), Some(pos)) if session.mode() == EditMode::Delete => {
            hit_test(&state.overlays, projection, pos)
        }
        _ => None,
    };

    for (id, member) in state.overlays.iter() {
        let Some(bounds) = member.bounds() else {
            continue;
        };
        if !projection.bbox_visible(&bounds) {
            continue;
        }

        let highlighted = delete_target == Some(id);
        match member {
            OverlayMember::Station(station) => {
                let anchor = projection.geo_to_screen(station.position);
                let fill = if highlighted {
                    colors::drawn::delete_hover()
                } else if state.popup == Some(id) {
                    colors::stations::SELECTED
                } else {
                    colors::stations::PIN
                };
                render_pin(painter, anchor, fill, colors::stations::PIN_STROKE);
            }
            OverlayMember::Drawn(shape) => {
                let color = if highlighted {
                    colors::drawn::delete_hover()
                } else {
                    colors::drawn::SHAPE
                };
                render_shape(painter, shape, projection, color);
            }
        }
    }
}

fn render_shape(
    painter: &Painter,
    shape: &Shape,
    projection: &MapProjection,
    color: egui::Color32,
) {
    let stroke = Stroke::new(SHAPE_LINE_WIDTH, color);
    match shape {
        Shape::Marker(coord) => {
            let fill = if color == colors::drawn::SHAPE {
                colors::drawn::MARKER
            } else {
                color
            };
            render_pin(
                painter,
                projection.geo_to_screen(*coord),
                fill,
                colors::drawn::MARKER_STROKE,
            );
        }
        Shape::Polyline(coords) => render_path(painter, coords, projection, stroke, false),
        Shape::Polygon(coords) => render_path(painter, coords, projection, stroke, true),
    }
}

/// Draggable handles on every vertex while in edit mode.
fn handle_vertex_drags(
    ui: &mut egui::Ui,
    painter: &Painter,
    state: &mut AppState,
    projection: &MapProjection,
) {
    let vertices: Vec<(VertexRef, Pos2)> = state
        .overlays
        .iter()
        .flat_map(|(member, item)| {
            item.vertices()
                .iter()
                .enumerate()
                .map(move |(index, coord)| (VertexRef { member, index }, *coord))
        })
        .map(|(vertex, coord)| (vertex, projection.geo_to_screen(coord)))
        .filter(|(_, pos)| projection.screen_rect.contains(*pos))
        .collect();

    for (vertex, pos) in vertices {
        let handle = Rect::from_center_size(pos, Vec2::splat(14.0));
        let response = ui.interact(handle, egui::Id::new(("vertex_handle", vertex)), Sense::drag());

        let mut center = pos;
        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                state
                    .draw
                    .drag_vertex(&mut state.overlays, vertex, projection.screen_to_geo(pointer));
                center = pointer;
            }
        }
        if response.hovered() || response.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Move);
        }
        render_handle(painter, center, response.dragged());
    }
}

fn render_sketch(
    painter: &Painter,
    sketch: &Sketch,
    projection: &MapProjection,
    hover: Option<Pos2>,
) {
    let vertices = sketch.vertices();
    render_path(
        painter,
        vertices,
        projection,
        Stroke::new(SHAPE_LINE_WIDTH, colors::drawn::SKETCH),
        false,
    );

    if let (Some(last), Some(pointer)) = (vertices.last(), hover) {
        let from = projection.geo_to_screen(*last);
        painter.extend(egui::Shape::dashed_line(
            &[from, pointer],
            Stroke::new(2.0, colors::drawn::guide()),
            6.0,
            4.0,
        ));
    }

    for (index, coord) in vertices.iter().enumerate() {
        render_handle(painter, projection.geo_to_screen(*coord), index == 0);
    }
    if let Some(pointer) = hover {
        render_label(
            painter,
            pointer,
            sketch.tool().hint(vertices.len()),
            colors::drawn::SKETCH,
        );
    }
}

fn render_open_popup(painter: &Painter, state: &mut AppState, projection: &MapProjection) {
    let Some(id) = state.popup else {
        return;
    };
    let Some(member) = state.overlays.get(id) else {
        // Member was removed while its popup was open
        state.popup = None;
        return;
    };
    let Some(first) = member.vertices().first() else {
        return;
    };

    let anchor = projection.geo_to_screen(*first);
    let tip = if member.is_point() {
        anchor + POPUP_ANCHOR
    } else {
        anchor
    };
    render_popup(painter, tip, &member.popup_text());
}
