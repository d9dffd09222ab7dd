// Copyright 2025 Lars Brubaker
// License: MIT
//
// Intersection table for one scanbeam.
//
// Edges are fed left to right in AET order (by X at the bottom of the beam).
// A sorted edge stack holds the edges seen so far ordered by X at the top of
// the beam. Each new edge sinks past every stacked edge that ends to its
// right, and every edge it sinks past is a crossing inside the beam.

use crate::edge::{BundleState, Edge, EdgeIdx, ABOVE};

/// Two AET edges crossing inside the current scanbeam. `e0` is left of `e1`
/// at the bottom of the beam. `y` is relative to the beam bottom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    pub e0: EdgeIdx,
    pub e1: EdgeIdx,
    pub x: f64,
    pub y: f64,
}

#[derive(Copy, Clone, Debug)]
struct StackEdge {
    edge: EdgeIdx,
    xb: f64,
    xt: f64,
    dx: f64,
}

/// Crossings of the edges in `order` within a beam of height `dy`, sorted
/// by Y. Crossings at equal Y keep discovery order.
///
/// Pairs whose slopes differ by less than `eps` over the beam are treated as
/// not crossing.
pub fn build_intersection_table(
    edges: &[Edge],
    order: impl Iterator<Item = EdgeIdx>,
    dy: f64,
    eps: f64,
) -> Vec<Intersection> {
    let mut it: Vec<Intersection> = Vec::new();
    // Bottom of the stack is index 0.
    let mut st: Vec<StackEdge> = Vec::new();

    for idx in order {
        let e = &edges[idx as usize];
        if !(e.bstate[ABOVE] == BundleState::Head || e.contributes_above()) {
            continue;
        }
        let mut pos = st.len();
        while pos > 0 {
            let top = &st[pos - 1];
            let den = (top.xt - top.xb) - (e.xt - e.xb);
            if e.xt >= top.xt || e.dx == top.dx || den.abs() <= eps {
                break;
            }
            let r = (e.xb - top.xb) / den;
            let x = top.xb + r * (top.xt - top.xb);
            let y = r * dy;
            let at = it.partition_point(|n| n.y <= y);
            it.insert(at, Intersection { e0: top.edge, e1: idx, x, y });
            pos -= 1;
        }
        st.insert(
            pos,
            StackEdge {
                edge: idx,
                xb: e.xb,
                xt: e.xt,
                dx: e.dx,
            },
        );
    }
    it
}
