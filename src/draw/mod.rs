//! Draw and edit tools for the station overlay group.
//!
//! Drawing and editing are mutually exclusive: starting one ends the other.
//! Shapes finished with a draw tool join the same [`OverlayGroup`] as the CSV
//! station markers, so the edit and delete tools treat both alike.

mod edit;
mod hit;
mod sketch;

pub use edit::{EditMode, EditSession, VertexRef};
pub use hit::{hit_test, HIT_TOLERANCE};
pub use sketch::{DrawTool, Sketch, SketchStep};

use crate::geo::MapProjection;
use crate::state::{MemberId, OverlayGroup, OverlayMember, Shape};
use eframe::egui::Pos2;

/// What the map does with clicks.
#[derive(Debug, Clone, Default)]
pub enum DrawState {
    /// Clicks open popups
    #[default]
    Idle,
    Drawing(Sketch),
    Editing(EditSession),
}

/// Effect of a map click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Nothing changed
    None,
    /// A click in idle mode landed on a member (or on nothing)
    Selected(Option<MemberId>),
    /// A vertex was added to the sketch
    SketchExtended,
    /// A drawn shape was added to the group
    Created(MemberId),
    /// A member was removed in delete mode
    Deleted(MemberId),
}

impl DrawState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DrawState::Idle)
    }

    pub fn sketch(&self) -> Option<&Sketch> {
        match self {
            DrawState::Drawing(sketch) => Some(sketch),
            _ => None,
        }
    }

    pub fn edit_mode(&self) -> Option<EditMode> {
        match self {
            DrawState::Editing(session) => Some(session.mode()),
            _ => None,
        }
    }

    /// Starts a draw tool. An open edit session is cancelled.
    pub fn start_drawing(&mut self, tool: DrawTool, group: &mut OverlayGroup) {
        self.cancel(group);
        log::debug!("Drawing {}", tool.label());
        *self = DrawState::Drawing(Sketch::new(tool));
    }

    /// Starts an edit tool. An in-progress sketch is discarded.
    pub fn start_editing(&mut self, mode: EditMode, group: &mut OverlayGroup) {
        self.cancel(group);
        log::debug!("{}", mode.label());
        *self = DrawState::Editing(EditSession::begin(mode, group));
    }

    /// Discards the sketch or reverts the edit session.
    pub fn cancel(&mut self, group: &mut OverlayGroup) {
        if let DrawState::Editing(session) = std::mem::take(self) {
            session.cancel(group);
        }
    }

    /// Commits the edit session.
    pub fn save(&mut self) {
        if let DrawState::Editing(session) = self {
            if session.has_changes() {
                log::info!("Saved overlay edits");
            }
            *self = DrawState::Idle;
        }
    }

    /// Finishes the sketch if it has enough vertices.
    pub fn finish(&mut self, group: &mut OverlayGroup) -> Option<MemberId> {
        let DrawState::Drawing(sketch) = self else {
            return None;
        };
        let shape = sketch.finish()?;
        *self = DrawState::Idle;
        Some(add_shape(group, shape))
    }

    pub fn undo(&mut self) -> bool {
        match self {
            DrawState::Drawing(sketch) => sketch.undo(),
            _ => false,
        }
    }

    /// Removes every member while in delete mode.
    pub fn clear_all(&mut self, group: &mut OverlayGroup) {
        if let DrawState::Editing(session) = self {
            session.clear_all(group);
        }
    }

    /// Moves a vertex while in edit mode.
    pub fn drag_vertex(
        &mut self,
        group: &mut OverlayGroup,
        vertex: VertexRef,
        to: geo_types::Coord<f64>,
    ) -> bool {
        match self {
            DrawState::Editing(session) if session.mode() == EditMode::Edit => {
                session.move_vertex(group, vertex, to)
            }
            _ => false,
        }
    }

    /// Handles a click on the map at screen position `pos`.
    pub fn click(
        &mut self,
        group: &mut OverlayGroup,
        projection: &MapProjection,
        pos: Pos2,
    ) -> ClickOutcome {
        match self {
            DrawState::Idle => ClickOutcome::Selected(hit_test(group, projection, pos)),
            DrawState::Drawing(sketch) => {
                let on_first_vertex = sketch.vertices().first().is_some_and(|first| {
                    projection.geo_to_screen(*first).distance(pos) <= HIT_TOLERANCE
                });
                match sketch.click(projection.screen_to_geo(pos), on_first_vertex) {
                    SketchStep::Continue => ClickOutcome::SketchExtended,
                    SketchStep::Complete(shape) => {
                        *self = DrawState::Idle;
                        ClickOutcome::Created(add_shape(group, shape))
                    }
                }
            }
            DrawState::Editing(session) if session.mode() == EditMode::Delete => {
                let Some(id) = hit_test(group, projection, pos) else {
                    return ClickOutcome::None;
                };
                if session.delete(group, id) {
                    ClickOutcome::Deleted(id)
                } else {
                    ClickOutcome::None
                }
            }
            DrawState::Editing(_) => ClickOutcome::None,
        }
    }
}

fn add_shape(group: &mut OverlayGroup, shape: Shape) -> MemberId {
    log::info!("Created {} with {} vertices", shape.label(), shape.vertices().len());
    group.add(OverlayMember::Drawn(shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Station;
    use eframe::egui::{Rect, Vec2};
    use geo_types::Coord;

    fn projection() -> MapProjection {
        MapProjection::new(
            Coord { x: 20.0, y: 0.0 },
            6.0,
            Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        )
    }

    fn stations() -> OverlayGroup {
        let mut group = OverlayGroup::new();
        group.add(OverlayMember::Station(Station::new("A1", 1.0, 18.0)));
        group.add(OverlayMember::Station(Station::new("A2", -1.0, 22.0)));
        group
    }

    #[test]
    fn test_drawn_polygon_joins_group_and_deletes_alone() {
        let proj = projection();
        let mut group = stations();
        let mut draw = DrawState::default();

        draw.start_drawing(DrawTool::Polygon, &mut group);
        for pos in [
            Pos2::new(300.0, 200.0),
            Pos2::new(500.0, 200.0),
            Pos2::new(400.0, 350.0),
        ] {
            assert_eq!(draw.click(&mut group, &proj, pos), ClickOutcome::SketchExtended);
        }
        let ClickOutcome::Created(polygon) = draw.click(&mut group, &proj, Pos2::new(301.0, 201.0))
        else {
            panic!("closing click should create the polygon");
        };
        assert!(draw.is_idle());
        assert_eq!(group.len(), 3);
        assert!(matches!(
            group.get(polygon),
            Some(OverlayMember::Drawn(Shape::Polygon(v))) if v.len() == 3
        ));

        draw.start_editing(EditMode::Delete, &mut group);
        assert_eq!(
            draw.click(&mut group, &proj, Pos2::new(400.0, 250.0)),
            ClickOutcome::Deleted(polygon)
        );
        draw.save();

        assert_eq!(group.len(), 2);
        assert_eq!(group.station_count(), 2);
        assert!(!group.contains(polygon));
    }

    #[test]
    fn test_starting_draw_cancels_edit_session() {
        let proj = projection();
        let mut group = stations();
        let mut draw = DrawState::default();

        draw.start_editing(EditMode::Delete, &mut group);
        draw.clear_all(&mut group);
        assert!(group.is_empty());

        draw.start_drawing(DrawTool::Marker, &mut group);
        assert_eq!(group.len(), 2);

        let outcome = draw.click(&mut group, &proj, Pos2::new(100.0, 100.0));
        assert!(matches!(outcome, ClickOutcome::Created(_)));
        assert_eq!(group.drawn_count(), 1);
    }

    #[test]
    fn test_edit_drag_and_cancel() {
        let mut group = stations();
        let first = group.iter().next().map(|(id, _)| id).unwrap();
        let mut draw = DrawState::default();

        assert!(!draw.drag_vertex(
            &mut group,
            VertexRef { member: first, index: 0 },
            Coord { x: 0.0, y: 0.0 }
        ));

        draw.start_editing(EditMode::Edit, &mut group);
        assert!(draw.drag_vertex(
            &mut group,
            VertexRef { member: first, index: 0 },
            Coord { x: 0.0, y: 0.0 }
        ));
        draw.cancel(&mut group);

        assert_eq!(
            group.get(first).map(|m| m.vertices()[0]),
            Some(Coord { x: 18.0, y: 1.0 })
        );
    }

    #[test]
    fn test_idle_click_selects() {
        let proj = projection();
        let mut group = stations();
        let mut draw = DrawState::default();

        let tip = proj.geo_to_screen(Coord { x: 18.0, y: 1.0 });
        let outcome = draw.click(&mut group, &proj, tip - Vec2::new(0.0, 10.0));
        assert!(matches!(outcome, ClickOutcome::Selected(Some(_))));
        assert_eq!(
            draw.click(&mut group, &proj, Pos2::new(5.0, 5.0)),
            ClickOutcome::Selected(None)
        );
    }

    #[test]
    fn test_finish_requires_enough_vertices() {
        let proj = projection();
        let mut group = OverlayGroup::new();
        let mut draw = DrawState::default();

        draw.start_drawing(DrawTool::Polyline, &mut group);
        draw.click(&mut group, &proj, Pos2::new(100.0, 100.0));
        assert_eq!(draw.finish(&mut group), None);

        draw.click(&mut group, &proj, Pos2::new(200.0, 100.0));
        assert!(draw.finish(&mut group).is_some());
        assert_eq!(group.len(), 1);
        assert!(draw.is_idle());
    }
}
