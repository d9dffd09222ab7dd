// Copyright 2025 Lars Brubaker
// License: MIT
//
// Polygon data model: contours of vertices tagged as holes or external
// boundaries, and the triangle-strip form produced by `tristrip_clip`.

use crate::error::ClipError;
use crate::geom::{signed_area, triangle_area, Bbox, Vertex};

/// A closed ring of vertices. The last vertex connects back to the first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    vertices: Vec<Vertex>,
}

impl Contour {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Contour { vertices }
    }

    /// Build a contour from flat `[x0, y0, x1, y1, ...]` coordinates.
    /// A trailing odd coordinate is ignored.
    pub fn from_coords(coords: &[f64]) -> Self {
        let vertices = coords
            .chunks_exact(2)
            .map(|c| Vertex::new(c[0], c[1]))
            .collect();
        Contour { vertices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    pub fn push(&mut self, v: Vertex) {
        self.vertices.push(v);
    }

    pub fn bbox(&self) -> Bbox {
        Bbox::from_vertices(&self.vertices)
    }

    /// Positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

impl From<Vec<Vertex>> for Contour {
    fn from(vertices: Vec<Vertex>) -> Self {
        Contour { vertices }
    }
}

impl FromIterator<Vertex> for Contour {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Contour {
            vertices: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Contour {
    type Item = &'a Vertex;
    type IntoIter = std::slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

/// A set of contours, each flagged as a hole or an external boundary.
///
/// `contours` and `holes` always have the same length. An empty polygon
/// (no contours) is a valid value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    contours: Vec<Contour>,
    holes: Vec<bool>,
}

impl Polygon {
    pub fn new() -> Self {
        Polygon::default()
    }

    /// Assemble a polygon from parallel contour and hole-flag lists.
    pub fn from_parts(contours: Vec<Contour>, holes: Vec<bool>) -> Result<Self, ClipError> {
        if contours.len() != holes.len() {
            return Err(ClipError::HoleFlagMismatch {
                contours: contours.len(),
                holes: holes.len(),
            });
        }
        Ok(Polygon { contours, holes })
    }

    /// Append a contour. Vertex counts are checked when the polygon is clipped.
    pub fn add_contour(&mut self, contour: impl Into<Contour>, hole: bool) {
        self.contours.push(contour.into());
        self.holes.push(hole);
    }

    pub fn num_contours(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn holes(&self) -> &[bool] {
        &self.holes
    }

    pub fn contour(&self, index: usize) -> Option<&Contour> {
        self.contours.get(index)
    }

    pub fn is_hole(&self, index: usize) -> bool {
        self.holes.get(index).copied().unwrap_or(false)
    }

    /// Iterate `(contour, is_hole)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Contour, bool)> + '_ {
        self.contours.iter().zip(self.holes.iter().copied())
    }

    /// Check the structural invariants the sweep relies on.
    pub fn validate(&self) -> Result<(), ClipError> {
        if self.contours.len() != self.holes.len() {
            return Err(ClipError::HoleFlagMismatch {
                contours: self.contours.len(),
                holes: self.holes.len(),
            });
        }
        for (c, contour) in self.contours.iter().enumerate() {
            if contour.len() < 3 {
                return Err(ClipError::TooFewVertices {
                    contour: c,
                    vertices: contour.len(),
                });
            }
            if let Some(v) = contour.iter().position(|v| !v.is_finite()) {
                return Err(ClipError::NonFiniteCoordinate { contour: c, vertex: v });
            }
        }
        Ok(())
    }

    pub fn bbox(&self) -> Bbox {
        self.contours
            .iter()
            .fold(Bbox::EMPTY, |acc, c| acc.union(&c.bbox()))
    }

    /// Enclosed area: external contours add, holes subtract.
    pub fn area(&self) -> f64 {
        self.iter()
            .map(|(c, hole)| {
                let a = c.signed_area().abs();
                if hole {
                    -a
                } else {
                    a
                }
            })
            .sum()
    }
}

/// Triangle strips: in each strip every three consecutive vertices form a
/// triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriStrip {
    strips: Vec<Vec<Vertex>>,
}

impl TriStrip {
    pub fn new() -> Self {
        TriStrip::default()
    }

    pub(crate) fn from_strips(strips: Vec<Vec<Vertex>>) -> Self {
        TriStrip { strips }
    }

    pub fn strips(&self) -> &[Vec<Vertex>] {
        &self.strips
    }

    pub fn num_strips(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    /// Every triangle of every strip, in strip order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.strips
            .iter()
            .flat_map(|s| s.windows(3).map(|w| [w[0], w[1], w[2]]))
    }

    /// Total covered area (absolute triangle areas summed).
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| triangle_area(&a, &b, &c).abs())
            .sum()
    }
}
