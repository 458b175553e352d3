//! In-progress shapes.

use crate::state::Shape;
use geo_types::Coord;

/// Shape the user is currently drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTool {
    Marker,
    Polyline,
    Polygon,
}

impl DrawTool {
    pub fn label(&self) -> &'static str {
        match self {
            DrawTool::Marker => "Marker",
            DrawTool::Polyline => "Polyline",
            DrawTool::Polygon => "Polygon",
        }
    }

    pub fn all() -> &'static [DrawTool] {
        &[DrawTool::Marker, DrawTool::Polyline, DrawTool::Polygon]
    }

    /// Vertices needed before the shape can be finished.
    pub fn min_vertices(&self) -> usize {
        match self {
            DrawTool::Marker => 1,
            DrawTool::Polyline => 2,
            DrawTool::Polygon => 3,
        }
    }

    /// Hint shown while the tool is active.
    pub fn hint(&self, vertex_count: usize) -> &'static str {
        match (self, vertex_count) {
            (DrawTool::Marker, _) => "Click map to place marker.",
            (DrawTool::Polyline, 0) => "Click to start drawing line.",
            (DrawTool::Polyline, _) => "Click to continue drawing line.",
            (DrawTool::Polygon, 0) => "Click to start drawing shape.",
            (DrawTool::Polygon, 1 | 2) => "Click to continue drawing shape.",
            (DrawTool::Polygon, _) => "Click first point to close this shape.",
        }
    }
}

/// Result of feeding a click to a sketch.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchStep {
    /// Vertex added, keep drawing
    Continue,
    /// Shape is complete
    Complete(Shape),
}

/// Vertices collected so far for one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Sketch {
    tool: DrawTool,
    vertices: Vec<Coord<f64>>,
}

impl Sketch {
    pub fn new(tool: DrawTool) -> Self {
        Self {
            tool,
            vertices: Vec::new(),
        }
    }

    pub fn tool(&self) -> DrawTool {
        self.tool
    }

    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.vertices
    }

    /// Adds a vertex at `coord`.
    ///
    /// `on_first_vertex` tells whether the click landed on the first vertex;
    /// for polygons that closes the ring instead of adding a vertex.
    pub fn click(&mut self, coord: Coord<f64>, on_first_vertex: bool) -> SketchStep {
        match self.tool {
            DrawTool::Marker => SketchStep::Complete(Shape::Marker(coord)),
            DrawTool::Polygon if on_first_vertex && self.can_finish() => {
                SketchStep::Complete(Shape::Polygon(std::mem::take(&mut self.vertices)))
            }
            DrawTool::Polyline | DrawTool::Polygon => {
                self.vertices.push(coord);
                SketchStep::Continue
            }
        }
    }

    pub fn can_finish(&self) -> bool {
        self.vertices.len() >= self.tool.min_vertices()
    }

    /// Completes the shape if it has enough vertices.
    pub fn finish(&mut self) -> Option<Shape> {
        if !self.can_finish() {
            return None;
        }
        let vertices = std::mem::take(&mut self.vertices);
        Some(match self.tool {
            DrawTool::Marker => Shape::Marker(vertices[0]),
            DrawTool::Polyline => Shape::Polyline(vertices),
            DrawTool::Polygon => Shape::Polygon(vertices),
        })
    }

    /// Removes the last vertex. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        self.vertices.pop().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[test]
    fn test_marker_completes_on_first_click() {
        let mut sketch = Sketch::new(DrawTool::Marker);
        assert_eq!(
            sketch.click(coord(1.0, 2.0), false),
            SketchStep::Complete(Shape::Marker(coord(1.0, 2.0)))
        );
    }

    #[test]
    fn test_polyline_needs_two_vertices() {
        let mut sketch = Sketch::new(DrawTool::Polyline);
        sketch.click(coord(0.0, 0.0), false);
        assert_eq!(sketch.finish(), None);

        sketch.click(coord(1.0, 1.0), false);
        assert_eq!(
            sketch.finish(),
            Some(Shape::Polyline(vec![coord(0.0, 0.0), coord(1.0, 1.0)]))
        );
    }

    #[test]
    fn test_polygon_closes_on_first_vertex() {
        let mut sketch = Sketch::new(DrawTool::Polygon);
        sketch.click(coord(0.0, 0.0), false);
        sketch.click(coord(1.0, 0.0), false);

        // Too early to close: the click just adds a vertex
        assert_eq!(sketch.click(coord(0.0, 0.0), true), SketchStep::Continue);
        assert_eq!(sketch.vertices().len(), 3);
        assert!(sketch.undo());

        sketch.click(coord(1.0, 1.0), false);
        assert_eq!(
            sketch.click(coord(0.0, 0.0), true),
            SketchStep::Complete(Shape::Polygon(vec![
                coord(0.0, 0.0),
                coord(1.0, 0.0),
                coord(1.0, 1.0),
            ]))
        );
    }

    #[test]
    fn test_undo_on_empty_sketch() {
        let mut sketch = Sketch::new(DrawTool::Polygon);
        assert!(!sketch.undo());
    }
}
