//! Screen-space hit testing of overlay members.

use crate::geo::{pin_rect, MapProjection};
use crate::state::{MemberId, OverlayGroup, OverlayMember, Shape};
use eframe::egui::Pos2;

/// Pick distance for lines, in pixels.
pub const HIT_TOLERANCE: f32 = 6.0;

/// Topmost member under `pos`, if any. Later members are drawn on top.
pub fn hit_test(group: &OverlayGroup, projection: &MapProjection, pos: Pos2) -> Option<MemberId> {
    let hits: Vec<MemberId> = group
        .iter()
        .filter(|(_, member)| member_contains(member, projection, pos))
        .map(|(id, _)| id)
        .collect();
    hits.last().copied()
}

fn member_contains(member: &OverlayMember, projection: &MapProjection, pos: Pos2) -> bool {
    match member {
        OverlayMember::Station(station) => {
            pin_rect(projection.geo_to_screen(station.position)).contains(pos)
        }
        OverlayMember::Drawn(Shape::Marker(coord)) => {
            pin_rect(projection.geo_to_screen(*coord)).contains(pos)
        }
        OverlayMember::Drawn(Shape::Polyline(coords)) => {
            let points: Vec<Pos2> = coords.iter().map(|c| projection.geo_to_screen(*c)).collect();
            near_path(&points, pos, false)
        }
        OverlayMember::Drawn(Shape::Polygon(coords)) => {
            let points: Vec<Pos2> = coords.iter().map(|c| projection.geo_to_screen(*c)).collect();
            near_path(&points, pos, true) || point_in_ring(&points, pos)
        }
    }
}

fn near_path(points: &[Pos2], pos: Pos2, closed: bool) -> bool {
    let closing = if closed && points.len() > 2 {
        points.last().zip(points.first())
    } else {
        None
    };
    points
        .windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .chain(closing)
        .any(|(a, b)| distance_to_segment(pos, *a, *b) <= HIT_TOLERANCE)
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Even-odd rule.
fn point_in_ring(points: &[Pos2], pos: Pos2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > pos.y) != (pj.y > pos.y)
            && pos.x < (pj.x - pi.x) * (pos.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
