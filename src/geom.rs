// Copyright 2025 Lars Brubaker
// License: MIT
//
// Point, bounding box and area primitives shared by the clipper.
//
// All coordinates are f64. Coordinate comparisons inside the sweep are exact
// (`==`, `<`) except where two edges are tested for coincidence, which uses
// an epsilon so that round-off does not split a shared boundary.

/// Tolerance used for vertex equality and for bundling coincident edges.
pub const DEFAULT_EPSILON: f64 = 1e-15;

/// Returns true if `a` and `b` differ by no more than `eps`.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// A 2D point.
#[derive(Copy, Clone, Debug, Default)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Vertex { x, y }
    }

    /// Component-wise comparison within `eps`.
    #[inline]
    pub fn approx_eq(&self, other: &Vertex, eps: f64) -> bool {
        approx_eq(self.x, other.x, eps) && approx_eq(self.y, other.y, eps)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Equality tolerates `DEFAULT_EPSILON` of floating round-off per component.
impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, DEFAULT_EPSILON)
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((x, y): (f64, f64)) -> Self {
        Vertex { x, y }
    }
}

impl From<[f64; 2]> for Vertex {
    fn from([x, y]: [f64; 2]) -> Self {
        Vertex { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bbox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Bbox {
    /// An inverted box that any point will expand.
    pub const EMPTY: Bbox = Bbox {
        xmin: f64::MAX,
        ymin: f64::MAX,
        xmax: -f64::MAX,
        ymax: -f64::MAX,
    };

    pub fn from_vertices<'a, I>(vertices: I) -> Bbox
    where
        I: IntoIterator<Item = &'a Vertex>,
    {
        let mut b = Bbox::EMPTY;
        for v in vertices {
            b.add(v);
        }
        b
    }

    #[inline]
    pub fn add(&mut self, v: &Vertex) {
        if v.x < self.xmin {
            self.xmin = v.x;
        }
        if v.x > self.xmax {
            self.xmax = v.x;
        }
        if v.y < self.ymin {
            self.ymin = v.y;
        }
        if v.y > self.ymax {
            self.ymax = v.y;
        }
    }

    pub fn union(&self, other: &Bbox) -> Bbox {
        Bbox {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }

    /// True if no point has been added.
    pub fn is_empty(&self) -> bool {
        self.xmin > self.xmax || self.ymin > self.ymax
    }

    /// Closed-interval overlap test: boxes that only touch still overlap.
    pub fn overlaps(&self, other: &Bbox) -> bool {
        !(self.xmax < other.xmin || self.xmin > other.xmax)
            && !(self.ymax < other.ymin || self.ymin > other.ymax)
    }
}

/// Signed area of a closed ring (positive when counter-clockwise).
pub fn signed_area(vertices: &[Vertex]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

/// Signed area of the triangle (a, b, c).
#[inline]
pub fn triangle_area(a: &Vertex, b: &Vertex, c: &Vertex) -> f64 {
    0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_eq_tolerates_round_off() {
        let a = Vertex::new(0.1 + 0.2, 1.0);
        let b = Vertex::new(0.3, 1.0);
        assert_eq!(a, b);
        assert_ne!(Vertex::new(0.0, 0.0), Vertex::new(1e-9, 0.0));
    }

    #[test]
    fn bbox_overlap_is_closed() {
        let a = Bbox::from_vertices(&[Vertex::new(0.0, 0.0), Vertex::new(4.0, 4.0)]);
        let touching = Bbox::from_vertices(&[Vertex::new(4.0, 0.0), Vertex::new(8.0, 4.0)]);
        let apart = Bbox::from_vertices(&[Vertex::new(10.0, 10.0), Vertex::new(14.0, 14.0)]);
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
        assert!(!apart.overlaps(&a));
    }

    #[test]
    fn empty_bbox() {
        assert!(Bbox::EMPTY.is_empty());
        let b = Bbox::from_vertices(&[Vertex::new(1.0, 2.0)]);
        assert!(!b.is_empty());
        assert_eq!(b.xmin, 1.0);
        assert_eq!(b.ymax, 2.0);
    }

    #[test]
    fn signed_area_orientation() {
        let ccw = [
            Vertex::new(0.0, 0.0),
            Vertex::new(2.0, 0.0),
            Vertex::new(2.0, 3.0),
            Vertex::new(0.0, 3.0),
        ];
        assert!((signed_area(&ccw) - 6.0).abs() < 1e-12);
        let cw: Vec<Vertex> = ccw.iter().rev().copied().collect();
        assert!((signed_area(&cw) + 6.0).abs() < 1e-12);
    }

    #[test]
    fn triangle_area_basic() {
        let a = Vertex::new(0.0, 0.0);
        let b = Vertex::new(1.0, 0.0);
        let c = Vertex::new(0.0, 1.0);
        assert!((triangle_area(&a, &b, &c) - 0.5).abs() < 1e-12);
        assert!((triangle_area(&a, &c, &b) + 0.5).abs() < 1e-12);
    }
}
