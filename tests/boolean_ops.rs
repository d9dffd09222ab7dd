// Copyright 2025 Lars Brubaker
// License: MIT
//
// Boolean operation correctness tests with area verification.

mod helpers;

use helpers::{
    assert_area_approx, assert_same_contour_set, polygon, rect, rect_polygon, same_ring, verify_valid_polygon,
};
use vatti_clip::{clip, ClipOp, Contour, Polygon};

const ALL_OPS: [ClipOp; 4] = [
    ClipOp::Difference,
    ClipOp::Intersection,
    ClipOp::ExclusiveOr,
    ClipOp::Union,
];

/// Two 10x10 squares overlapping in a 5x5 corner:
/// A = [0,10]^2, B = [5,15]^2.
fn overlapping_squares() -> (Polygon, Polygon) {
    (rect_polygon(0.0, 0.0, 10.0, 10.0), rect_polygon(5.0, 5.0, 15.0, 15.0))
}

fn right_triangle() -> Polygon {
    let mut p = Polygon::new();
    p.add_contour(Contour::from_coords(&[0.0, 0.0, 10.0, 0.0, 0.0, 10.0]), false);
    p
}

#[test]
fn overlapping_squares_all_ops() {
    let (a, b) = overlapping_squares();
    let expected = [
        (ClipOp::Difference, 75.0, 1),
        (ClipOp::Intersection, 25.0, 1),
        (ClipOp::ExclusiveOr, 150.0, 2),
        (ClipOp::Union, 175.0, 1),
    ];
    for (op, area, contours) in expected {
        let r = clip(op, &a, &b).unwrap();
        verify_valid_polygon(&r);
        assert_eq!(r.num_contours(), contours, "{:?}", op);
        assert!(r.holes().iter().all(|&h| !h), "{:?} produced a hole", op);
        assert_area_approx(r.area(), area, &format!("{:?}", op));
    }
}

#[test]
fn difference_leaves_an_ell() {
    let (a, b) = overlapping_squares();
    let r = clip(ClipOp::Difference, &b, &a).unwrap();
    assert_eq!(r.num_contours(), 1);
    assert_eq!(r.contour(0).unwrap().len(), 6);
    assert_area_approx(r.area(), 75.0, "B - A");
}

#[test]
fn symmetric_ops_commute() {
    let (a, b) = overlapping_squares();
    for op in [ClipOp::Intersection, ClipOp::ExclusiveOr, ClipOp::Union] {
        let ab = clip(op, &a, &b).unwrap();
        let ba = clip(op, &b, &a).unwrap();
        assert_same_contour_set(&ab, &ba, &format!("{:?} squares", op));
    }
}

#[test]
fn symmetric_ops_commute_on_slanted_shapes_with_a_hole() {
    let mut a = Polygon::new();
    a.add_contour(Contour::from_coords(&[0.0, 0.0, 12.0, 1.0, 11.0, 10.0, 1.0, 9.0]), false);
    let mut b = Polygon::new();
    b.add_contour(Contour::from_coords(&[5.0, -2.0, 16.0, 4.0, 14.0, 14.0, 4.0, 11.0]), false);
    b.add_contour(Contour::from_coords(&[8.0, 3.0, 11.0, 4.0, 10.0, 8.0, 7.0, 7.0]), true);
    for op in [ClipOp::Intersection, ClipOp::ExclusiveOr, ClipOp::Union] {
        let ab = clip(op, &a, &b).unwrap();
        let ba = clip(op, &b, &a).unwrap();
        assert!(!ab.is_empty(), "{:?}", op);
        assert_same_contour_set(&ab, &ba, &format!("{:?} slanted", op));
        assert_area_approx(ab.area(), ba.area(), &format!("{:?} slanted area", op));
    }
}

#[test]
fn intersection_result_is_the_overlap_square() {
    let (a, b) = overlapping_squares();
    let r = clip(ClipOp::Intersection, &b, &a).unwrap();
    assert!(same_ring(
        r.contour(0).unwrap().vertices(),
        rect(5.0, 5.0, 10.0, 10.0).vertices()
    ));
}

#[test]
fn contained_square() {
    let big = rect_polygon(0.0, 0.0, 10.0, 10.0);
    let small = rect_polygon(3.0, 3.0, 7.0, 7.0);

    let r = clip(ClipOp::Intersection, &big, &small).unwrap();
    assert_eq!(r.num_contours(), 1);
    assert!(same_ring(r.contour(0).unwrap().vertices(), rect(3.0, 3.0, 7.0, 7.0).vertices()));

    let r = clip(ClipOp::Union, &big, &small).unwrap();
    assert_eq!(r.num_contours(), 1);
    assert!(same_ring(r.contour(0).unwrap().vertices(), rect(0.0, 0.0, 10.0, 10.0).vertices()));

    assert!(clip(ClipOp::Difference, &small, &big).unwrap().is_empty());

    let r = clip(ClipOp::ExclusiveOr, &big, &small).unwrap();
    assert_eq!(r.num_contours(), 2);
    assert_eq!(r.holes().iter().filter(|&&h| h).count(), 1);
    assert_area_approx(r.area(), 84.0, "ring");
}

#[test]
fn disjoint_squares() {
    let a = rect_polygon(0.0, 0.0, 4.0, 4.0);
    let b = rect_polygon(10.0, 0.0, 12.0, 2.0);

    let r = clip(ClipOp::Union, &a, &b).unwrap();
    assert_eq!(r.num_contours(), 2);
    assert_area_approx(r.area(), 20.0, "union");

    let r = clip(ClipOp::ExclusiveOr, &a, &b).unwrap();
    assert_area_approx(r.area(), 20.0, "xor");

    let r = clip(ClipOp::Difference, &a, &b).unwrap();
    assert_eq!(r.num_contours(), 1);
    assert_area_approx(r.area(), 16.0, "difference");

    assert!(clip(ClipOp::Intersection, &a, &b).unwrap().is_empty());
}

#[test]
fn triangle_against_square() {
    // The hypotenuse x + y = 10 cuts the corner (6,6) off [1,6]^2.
    let tri = right_triangle();
    let sq = rect_polygon(1.0, 1.0, 6.0, 6.0);

    let r = clip(ClipOp::Intersection, &tri, &sq).unwrap();
    assert_eq!(r.num_contours(), 1);
    assert_eq!(r.contour(0).unwrap().len(), 5);
    assert_area_approx(r.area(), 23.0, "intersection");

    let r = clip(ClipOp::Union, &tri, &sq).unwrap();
    assert_eq!(r.num_contours(), 1);
    assert_area_approx(r.area(), 52.0, "union");

    let r = clip(ClipOp::Difference, &sq, &tri).unwrap();
    assert_eq!(r.num_contours(), 1);
    assert_area_approx(r.area(), 2.0, "corner");
}

#[test]
fn multi_contour_subject() {
    let subject = polygon(&[
        (rect(0.0, 0.0, 4.0, 4.0), false),
        (rect(6.0, 0.0, 10.0, 4.0), false),
    ]);
    let bar = rect_polygon(2.0, 1.0, 8.0, 3.0);
    let r = clip(ClipOp::Intersection, &subject, &bar).unwrap();
    assert_eq!(r.num_contours(), 2);
    assert_area_approx(r.area(), 8.0, "two pieces");

    let r = clip(ClipOp::Union, &subject, &bar).unwrap();
    assert_eq!(r.num_contours(), 1);
    assert_area_approx(r.area(), 36.0, "bridged");
}

#[test]
fn squares_sharing_an_edge_union_fills_both() {
    let a = rect_polygon(0.0, 0.0, 10.0, 10.0);
    let b = rect_polygon(10.0, 0.0, 20.0, 10.0);
    let r = clip(ClipOp::Union, &a, &b).unwrap();
    verify_valid_polygon(&r);
    assert_area_approx(r.area(), 200.0, "shared edge");
}

#[test]
fn orientation_does_not_matter() {
    let (a, b) = overlapping_squares();
    let mut reversed = rect(0.0, 0.0, 10.0, 10.0).into_vertices();
    reversed.reverse();
    let a_cw = polygon(&[(Contour::new(reversed), false)]);
    for op in ALL_OPS {
        let r0 = clip(op, &a, &b).unwrap();
        let r1 = clip(op, &a_cw, &b).unwrap();
        assert_eq!(r0.num_contours(), r1.num_contours(), "{:?}", op);
        assert_area_approx(r0.area(), r1.area(), &format!("{:?} clockwise", op));
    }
}

#[test]
fn output_vertices_are_finite() {
    let tri = right_triangle();
    let (a, b) = overlapping_squares();
    for op in ALL_OPS {
        verify_valid_polygon(&clip(op, &tri, &a).unwrap());
        verify_valid_polygon(&clip(op, &b, &tri).unwrap());
    }
}

#[test]
fn disjoint_union_returns_both_rectangles() {
    let a = rect_polygon(0.0, 0.0, 4.0, 4.0);
    let b = rect_polygon(10.0, 10.0, 14.0, 14.0);
    assert!(clip(ClipOp::Intersection, &a, &b).unwrap().is_empty());

    let r = clip(ClipOp::Union, &a, &b).unwrap();
    assert_eq!(r.num_contours(), 2);
    for expected in [rect(0.0, 0.0, 4.0, 4.0), rect(10.0, 10.0, 14.0, 14.0)] {
        assert!(
            r.contours().iter().any(|c| same_ring(c.vertices(), expected.vertices())),
            "missing {:?}",
            expected
        );
    }
}

#[test]
fn self_xor_is_empty() {
    let tri = right_triangle();
    assert!(clip(ClipOp::ExclusiveOr, &tri, &tri).unwrap().is_empty());
    let (a, _) = overlapping_squares();
    assert!(clip(ClipOp::ExclusiveOr, &a, &a).unwrap().is_empty());
}
