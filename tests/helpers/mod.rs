// Copyright 2025 Lars Brubaker
// License: MIT
//
// Shared test utilities for vatti-clip tests.

#![allow(dead_code)]

use vatti_clip::{Contour, Polygon, TriStrip, Vertex};

/// Axis-aligned rectangle, counter-clockwise from the lower-left corner.
pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
    Contour::from_coords(&[x0, y0, x1, y0, x1, y1, x0, y1])
}

/// Polygon from `(contour, is_hole)` pairs.
pub fn polygon(contours: &[(Contour, bool)]) -> Polygon {
    let mut p = Polygon::new();
    for (c, hole) in contours {
        p.add_contour(c.clone(), *hole);
    }
    p
}

/// Single external rectangle.
pub fn rect_polygon(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    polygon(&[(rect(x0, y0, x1, y1), false)])
}

/// True when `a` and `b` hold the same vertex cycle, whatever the start
/// vertex and direction.
pub fn same_ring(a: &[Vertex], b: &[Vertex]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let n = a.len();
    if n == 0 {
        return true;
    }
    (0..n).any(|shift| {
        (0..n).all(|i| a[i] == b[(i + shift) % n]) || (0..n).all(|i| a[i] == b[(shift + n - i) % n])
    })
}

pub fn assert_area_approx(actual: f64, expected: f64, label: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{}: expected area ~{}, got {} (diff={})",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}

/// Verify every output vertex is finite and every contour has at least 3
/// vertices with a matching hole flag.
pub fn verify_valid_polygon(p: &Polygon) {
    assert_eq!(p.contours().len(), p.holes().len(), "hole flags out of step");
    for (i, c) in p.contours().iter().enumerate() {
        assert!(c.len() >= 3, "contour {} has {} vertices", i, c.len());
        for v in c {
            assert!(v.is_finite(), "contour {} has non-finite vertex {:?}", i, v);
        }
    }
}

/// Verify every strip has at least 3 finite vertices.
pub fn verify_valid_tristrip(t: &TriStrip) {
    for (i, s) in t.strips().iter().enumerate() {
        assert!(s.len() >= 3, "strip {} has {} vertices", i, s.len());
        assert!(s.iter().all(|v| v.is_finite()), "strip {} has non-finite vertex", i);
    }
}

/// Bounding-box corners of every contour, for checks that don't depend on
/// vertex order.
pub fn contour_bboxes(p: &Polygon) -> Vec<(f64, f64, f64, f64)> {
    let mut boxes: Vec<_> = p
        .contours()
        .iter()
        .map(|c| {
            let b = c.bbox();
            (b.xmin, b.ymin, b.xmax, b.ymax)
        })
        .collect();
    boxes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    boxes
}

/// `same_ring` with a coordinate tolerance, for crossings computed from
/// edges met in a different order.
pub fn same_ring_within(a: &[Vertex], b: &[Vertex], eps: f64) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let n = a.len();
    if n == 0 {
        return true;
    }
    (0..n).any(|shift| {
        (0..n).all(|i| a[i].approx_eq(&b[(i + shift) % n], eps))
            || (0..n).all(|i| a[i].approx_eq(&b[(shift + n - i) % n], eps))
    })
}

/// Assert both polygons hold the same contours with the same hole flags,
/// regardless of contour order, start vertex or direction.
pub fn assert_same_contour_set(a: &Polygon, b: &Polygon, label: &str) {
    assert_eq!(a.num_contours(), b.num_contours(), "{}: contour counts differ", label);
    let mut used = vec![false; b.num_contours()];
    for (i, (ca, hole_a)) in a.iter().enumerate() {
        let found = b.iter().enumerate().position(|(j, (cb, hole_b))| {
            !used[j] && hole_a == hole_b && same_ring_within(ca.vertices(), cb.vertices(), 1e-9)
        });
        match found {
            Some(j) => used[j] = true,
            None => panic!("{}: contour {} (hole={}) has no match: {:?}", label, i, hole_a, ca.vertices()),
        }
    }
}
