// diagnostics/polygon.rs
// User-drawn flux boundary: Empty -> Open -> Closed, reset back to Empty.

use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum FluxPolygon {
    #[default]
    Empty,
    Open(Vec<DVec2>),
    /// Always holds at least three vertices.
    Closed(Vec<DVec2>),
}

impl FluxPolygon {
    pub fn new() -> Self {
        Self::Empty
    }

    /// Append a vertex. A closed polygon reopens with the new vertex added.
    pub fn push_vertex(&mut self, vertex: DVec2) {
        let mut vertices = std::mem::take(self).into_vertices();
        vertices.push(vertex);
        *self = FluxPolygon::Open(vertices);
    }

    /// Close an open polygon with three or more vertices. Returns whether the
    /// polygon is closed afterwards.
    pub fn close(&mut self) -> bool {
        match self {
            FluxPolygon::Open(vertices) if vertices.len() >= 3 => {
                let vertices = std::mem::take(vertices);
                *self = FluxPolygon::Closed(vertices);
                true
            }
            FluxPolygon::Closed(_) => true,
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        *self = FluxPolygon::Empty;
    }

    pub fn vertices(&self) -> &[DVec2] {
        match self {
            FluxPolygon::Empty => &[],
            FluxPolygon::Open(v) | FluxPolygon::Closed(v) => v,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices().is_empty()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, FluxPolygon::Closed(_))
    }

    /// Membership test; only a closed polygon contains anything.
    pub fn contains(&self, point: DVec2) -> bool {
        match self {
            FluxPolygon::Closed(v) => super::point_in_polygon(point, v),
            _ => false,
        }
    }

    fn into_vertices(self) -> Vec<DVec2> {
        match self {
            FluxPolygon::Empty => Vec::new(),
            FluxPolygon::Open(v) | FluxPolygon::Closed(v) => v,
        }
    }
}
