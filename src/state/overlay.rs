//! Station overlay group.
//!
//! CSV station markers and user-drawn shapes share one group so the edit and
//! delete tools operate on both uniformly.

use crate::data::Station;
use crate::geo::GeoBounds;
use geo_types::Coord;

/// Stable handle for a group member. Never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(u64);

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user-drawn shape. Coordinates are (x = lon, y = lat).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Marker(Coord<f64>),
    Polyline(Vec<Coord<f64>>),
    /// Open ring; the closing edge is implied.
    Polygon(Vec<Coord<f64>>),
}

impl Shape {
    pub fn vertices(&self) -> &[Coord<f64>] {
        match self {
            Shape::Marker(coord) => std::slice::from_ref(coord),
            Shape::Polyline(coords) | Shape::Polygon(coords) => coords,
        }
    }

    pub fn vertices_mut(&mut self) -> &mut [Coord<f64>] {
        match self {
            Shape::Marker(coord) => std::slice::from_mut(coord),
            Shape::Polyline(coords) | Shape::Polygon(coords) => coords,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Marker(_) => "Marker",
            Shape::Polyline(_) => "Polyline",
            Shape::Polygon(_) => "Polygon",
        }
    }
}

/// Something rendered in the station overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayMember {
    Station(Station),
    Drawn(Shape),
}

impl OverlayMember {
    pub fn vertices(&self) -> &[Coord<f64>] {
        match self {
            OverlayMember::Station(station) => std::slice::from_ref(&station.position),
            OverlayMember::Drawn(shape) => shape.vertices(),
        }
    }

    pub fn vertices_mut(&mut self) -> &mut [Coord<f64>] {
        match self {
            OverlayMember::Station(station) => std::slice::from_mut(&mut station.position),
            OverlayMember::Drawn(shape) => shape.vertices_mut(),
        }
    }

    /// Text shown in the member's popup.
    pub fn popup_text(&self) -> String {
        match self {
            OverlayMember::Station(station) => station.id.clone(),
            OverlayMember::Drawn(shape) => shape.label().to_string(),
        }
    }

    /// True for members drawn as a pin.
    pub fn is_point(&self) -> bool {
        matches!(
            self,
            OverlayMember::Station(_) | OverlayMember::Drawn(Shape::Marker(_))
        )
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_coords(self.vertices())
    }
}

/// Ordered collection of overlay members.
#[derive(Debug, Clone, Default)]
pub struct OverlayGroup {
    members: Vec<(MemberId, OverlayMember)>,
    next_id: u64,
}

impl OverlayGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, member: OverlayMember) -> MemberId {
        let id = MemberId(self.next_id);
        self.next_id += 1;
        self.members.push((id, member));
        id
    }

    /// Removes a member. Returns false if it was not present.
    pub fn remove(&mut self, id: MemberId) -> bool {
        match self.members.iter().position(|(member_id, _)| *member_id == id) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: MemberId) -> Option<&OverlayMember> {
        self.members
            .iter()
            .find(|(member_id, _)| *member_id == id)
            .map(|(_, member)| member)
    }

    pub fn get_mut(&mut self, id: MemberId) -> Option<&mut OverlayMember> {
        self.members
            .iter_mut()
            .find(|(member_id, _)| *member_id == id)
            .map(|(_, member)| member)
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.get(id).is_some()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MemberId, &OverlayMember)> {
        self.members.iter().map(|(id, member)| (*id, member))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn station_count(&self) -> usize {
        self.members
            .iter()
            .filter(|(_, member)| matches!(member, OverlayMember::Station(_)))
            .count()
    }

    pub fn drawn_count(&self) -> usize {
        self.len() - self.station_count()
    }
}
