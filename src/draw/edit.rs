//! Edit and delete sessions over the overlay group.

use crate::state::{MemberId, OverlayGroup};
use geo_types::Coord;

/// Which edit tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Drag vertices
    Edit,
    /// Click members to remove them
    Delete,
}

impl EditMode {
    pub fn label(&self) -> &'static str {
        match self {
            EditMode::Edit => "Edit layers",
            EditMode::Delete => "Delete layers",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            EditMode::Edit => "Drag handles or markers to edit features.",
            EditMode::Delete => "Click on a feature to remove it.",
        }
    }
}

/// A single vertex of a group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexRef {
    pub member: MemberId,
    pub index: usize,
}

/// Changes made since entering an edit mode, revertible until saved.
#[derive(Debug, Clone)]
pub struct EditSession {
    mode: EditMode,
    snapshot: OverlayGroup,
    changed: bool,
}

impl EditSession {
    /// Starts a session, remembering the group as it is now.
    pub fn begin(mode: EditMode, group: &OverlayGroup) -> Self {
        Self {
            mode,
            snapshot: group.clone(),
            changed: false,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn has_changes(&self) -> bool {
        self.changed
    }

    /// Moves a vertex. Returns false if the vertex no longer exists.
    pub fn move_vertex(&mut self, group: &mut OverlayGroup, vertex: VertexRef, to: Coord<f64>) -> bool {
        let moved = move_vertex(group, vertex, to);
        self.changed |= moved;
        moved
    }

    /// Removes a member. Returns false if it was not present.
    pub fn delete(&mut self, group: &mut OverlayGroup, member: MemberId) -> bool {
        let removed = group.remove(member);
        self.changed |= removed;
        removed
    }

    pub fn clear_all(&mut self, group: &mut OverlayGroup) {
        self.changed |= !group.is_empty();
        group.clear();
    }

    /// Restores the group to how it was when the session began.
    pub fn cancel(self, group: &mut OverlayGroup) {
        *group = self.snapshot;
    }
}

/// Moves one vertex of a member. Returns false if it does not exist.
pub fn move_vertex(group: &mut OverlayGroup, vertex: VertexRef, to: Coord<f64>) -> bool {
    let Some(member) = group.get_mut(vertex.member) else {
        return false;
    };
    match member.vertices_mut().get_mut(vertex.index) {
        Some(coord) => {
            *coord = Coord {
                x: to.x.clamp(-180.0, 180.0),
                y: to.y.clamp(-90.0, 90.0),
            };
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Station;
    use crate::state::{OverlayMember, Shape};

    #[test]
    fn test_cancel_restores_snapshot() {
        let mut group = OverlayGroup::new();
        let a = group.add(OverlayMember::Station(Station::new("A1", 10.0, 20.0)));
        let b = group.add(OverlayMember::Drawn(Shape::Polyline(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
        ])));

        let mut session = EditSession::begin(EditMode::Edit, &group);
        assert!(session.move_vertex(
            &mut group,
            VertexRef { member: b, index: 1 },
            Coord { x: 5.0, y: 5.0 }
        ));
        assert!(session.delete(&mut group, a));
        assert!(session.has_changes());
        session.cancel(&mut group);

        assert_eq!(group.len(), 2);
        assert_eq!(
            group.get(b).map(|m| m.vertices()[1]),
            Some(Coord { x: 1.0, y: 1.0 })
        );
    }

    #[test]
    fn test_move_missing_vertex() {
        let mut group = OverlayGroup::new();
        let a = group.add(OverlayMember::Station(Station::new("A1", 10.0, 20.0)));
        assert!(!move_vertex(
            &mut group,
            VertexRef { member: a, index: 1 },
            Coord { x: 0.0, y: 0.0 }
        ));
    }

    #[test]
    fn test_clear_all() {
        let mut group = OverlayGroup::new();
        group.add(OverlayMember::Station(Station::new("A1", 10.0, 20.0)));
        let mut session = EditSession::begin(EditMode::Delete, &group);
        session.clear_all(&mut group);
        assert!(group.is_empty());
        assert!(session.has_changes());
    }
}
