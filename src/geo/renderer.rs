//! Geographic layer rendering.
//!
//! Renders boundary outlines, station pins and drawn shapes to the map.

use super::{BoundaryLayer, GeoFeature, MapProjection};
use eframe::egui::{self, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use geo_types::Coord;

/// Pin icon size in pixels (width, height).
pub const PIN_SIZE: Vec2 = Vec2::new(15.0, 24.0);

/// Pin anchor relative to the icon's top-left corner (bottom center).
pub const PIN_ANCHOR: Vec2 = Vec2::new(7.5, 24.0);

/// Popup tip position relative to the pin anchor.
pub const POPUP_ANCHOR: Vec2 = Vec2::new(0.0, -20.0);

/// Screen rectangle covered by a pin whose tip sits at `anchor`.
pub fn pin_rect(anchor: Pos2) -> Rect {
    Rect::from_min_size(anchor - PIN_ANCHOR, PIN_SIZE)
}

/// Renders the boundary layer, skipping features outside the view.
pub fn render_boundaries(painter: &Painter, layer: &BoundaryLayer, projection: &MapProjection) {
    let stroke = Stroke::new(layer.line_width, layer.color);
    let visible = projection.visible_bounds();

    for feature in &layer.features {
        if !visible.intersects(&feature.bounds, 1.0) {
            continue;
        }
        render_feature(painter, &feature.feature, projection, stroke);
    }
}

fn render_feature(
    painter: &Painter,
    feature: &GeoFeature,
    projection: &MapProjection,
    stroke: Stroke,
) {
    match feature {
        GeoFeature::Point(coord) => {
            painter.circle_filled(projection.geo_to_screen(*coord), 3.0, stroke.color);
        }
        GeoFeature::LineString(coords) => {
            render_path(painter, coords, projection, stroke, false);
        }
        GeoFeature::Polygon { exterior, holes } => {
            render_path(painter, exterior, projection, stroke, true);
            for hole in holes {
                render_path(painter, hole, projection, stroke, true);
            }
        }
    }
}

/// Renders a line string or ring as a single path shape.
pub fn render_path(
    painter: &Painter,
    coords: &[Coord<f64>],
    projection: &MapProjection,
    stroke: Stroke,
    closed: bool,
) {
    if coords.len() < 2 {
        return;
    }

    let mut points: Vec<Pos2> = Vec::with_capacity(coords.len());
    for coord in coords {
        let pos = projection.geo_to_screen(*coord);
        // Skip sub-pixel steps; detailed coastlines collapse a lot at low zoom
        if let Some(last) = points.last() {
            if last.distance_sq(pos) < 0.5 {
                continue;
            }
        }
        points.push(pos);
    }

    if points.len() < 2 {
        return;
    }

    if closed {
        painter.add(Shape::closed_line(points, stroke));
    } else {
        painter.add(Shape::line(points, stroke));
    }
}

/// Draws a map pin with its tip at `anchor`.
pub fn render_pin(painter: &Painter, anchor: Pos2, fill: Color32, outline: Color32) {
    let rect = pin_rect(anchor);
    let head_radius = rect.width() / 2.0;
    let head_center = Pos2::new(rect.center().x, rect.top() + head_radius);

    // Shadow under the tip
    painter.circle_filled(
        anchor + Vec2::new(3.0, -1.0),
        3.0,
        Color32::from_black_alpha(60),
    );

    painter.add(Shape::convex_polygon(
        vec![
            Pos2::new(rect.left() + 1.0, head_center.y + 2.0),
            Pos2::new(rect.right() - 1.0, head_center.y + 2.0),
            anchor,
        ],
        fill,
        Stroke::new(1.0, outline),
    ));
    painter.circle(head_center, head_radius, fill, Stroke::new(1.0, outline));
    painter.circle_filled(head_center, head_radius * 0.4, Color32::WHITE);
}

/// Draws a popup bubble whose tip sits at `tip`.
pub fn render_popup(painter: &Painter, tip: Pos2, text: &str) {
    let galley = painter.layout_no_wrap(
        text.to_string(),
        FontId::proportional(13.0),
        Color32::from_rgb(30, 30, 30),
    );
    let padding = Vec2::new(8.0, 5.0);
    let size = galley.size() + padding * 2.0;
    let rect = Rect::from_min_size(
        Pos2::new(tip.x - size.x / 2.0, tip.y - 6.0 - size.y),
        size,
    );

    painter.add(Shape::convex_polygon(
        vec![
            Pos2::new(tip.x - 6.0, rect.bottom()),
            Pos2::new(tip.x + 6.0, rect.bottom()),
            tip,
        ],
        Color32::WHITE,
        Stroke::NONE,
    ));
    painter.rect_filled(rect, 4.0, Color32::WHITE);
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, Color32::from_gray(160)));
    painter.galley(rect.min + padding, galley, Color32::from_rgb(30, 30, 30));
}

/// Draws a square vertex handle used while editing or sketching.
pub fn render_handle(painter: &Painter, center: Pos2, active: bool) {
    let rect = Rect::from_center_size(center, Vec2::splat(10.0));
    let fill = if active {
        Color32::from_rgb(255, 240, 150)
    } else {
        Color32::WHITE
    };
    painter.rect_filled(rect, 1.0, fill);
    painter.rect_stroke(rect, 1.0, Stroke::new(1.0, Color32::from_gray(60)));
}

/// Short text label anchored to the right of a point.
pub fn render_label(painter: &Painter, pos: Pos2, text: &str, color: Color32) {
    painter.text(
        pos + Vec2::new(8.0, 0.0),
        egui::Align2::LEFT_CENTER,
        text,
        FontId::proportional(11.0),
        color,
    );
}
