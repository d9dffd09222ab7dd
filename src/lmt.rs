// Copyright 2025 Lars Brubaker
// License: MIT
//
// Local minima table.
//
// Each contour is reduced to its optimal vertices (those not buried inside
// a horizontal run) and cut into bounds: monotone chains of edges rising
// from a local minimum to the next local maximum. Bounds are filed under the
// Y of their minimum, ordered by (bottom x, slope), so that the sweep can
// splice them into the active edge table deterministically.

use log::debug;

use crate::clip::ClipOp;
use crate::edge::{Edge, EdgeIdx};
use crate::geom::Vertex;
use crate::polygon::Polygon;
use crate::scanbeam::ScanbeamTable;

/// All bounds starting at one Y.
#[derive(Clone, Debug)]
pub struct LocalMinimum {
    pub y: f64,
    /// First edge of each bound, sorted by (bot.x, dx).
    pub bounds: Vec<EdgeIdx>,
}

#[derive(Clone, Debug, Default)]
pub struct LocalMinimaTable {
    minima: Vec<LocalMinimum>,
}

impl LocalMinimaTable {
    pub fn new() -> Self {
        LocalMinimaTable { minima: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.minima.is_empty()
    }

    pub fn len(&self) -> usize {
        self.minima.len()
    }

    pub fn get(&self, i: usize) -> Option<&LocalMinimum> {
        self.minima.get(i)
    }

    /// Bound list for `y`, created in Y order if absent.
    fn bound_list(&mut self, y: f64) -> &mut Vec<EdgeIdx> {
        let pos = self.minima.partition_point(|m| m.y < y);
        if pos == self.minima.len() || self.minima[pos].y != y {
            self.minima.insert(pos, LocalMinimum { y, bounds: Vec::new() });
        }
        &mut self.minima[pos].bounds
    }

    /// File the bound starting at `first` under its bottom Y. Ties on
    /// (x, dx) keep insertion order.
    fn insert_bound(&mut self, edges: &[Edge], first: EdgeIdx) {
        let e = &edges[first as usize];
        let (x, dx) = (e.bot.x, e.dx);
        let list = self.bound_list(e.bot.y);
        let pos = list.partition_point(|&b| {
            let b = &edges[b as usize];
            !(x < b.bot.x || (x == b.bot.x && dx < b.dx))
        });
        list.insert(pos, first);
    }
}

#[inline]
fn prev_index(i: usize, n: usize) -> usize {
    (i + n - 1) % n
}

#[inline]
fn next_index(i: usize, n: usize) -> usize {
    (i + 1) % n
}

/// A vertex is optimal unless both neighbours share its Y.
fn optimal_vertices(vertices: &[Vertex]) -> Vec<Vertex> {
    let n = vertices.len();
    (0..n)
        .filter(|&i| {
            vertices[prev_index(i, n)].y != vertices[i].y
                || vertices[next_index(i, n)].y != vertices[i].y
        })
        .map(|i| vertices[i])
        .collect()
}

/// Append the bound that walks from local minimum `min` through `step`
/// until a local maximum, returning its first edge.
fn push_bound(
    edges: &mut Vec<Edge>,
    verts: &[Vertex],
    min: usize,
    num_edges: usize,
    step: impl Fn(usize) -> usize,
    kind: usize,
    clip_bside: bool,
) -> EdgeIdx {
    let first = edges.len() as EdgeIdx;
    let mut v = min;
    for i in 0..num_edges {
        let bot = verts[v];
        v = step(v);
        let top = verts[v];
        let mut e = Edge::new(bot, top, kind, clip_bside);
        if i + 1 < num_edges {
            e.succ = first + i as EdgeIdx + 1;
        }
        edges.push(e);
    }
    first
}

/// Add the bounds of every contributing contour of `polygon` to `lmt`, and
/// every optimal vertex Y to `sbt`.
///
/// `contributes[c]` false skips contour `c` entirely.
pub fn build_lmt(
    lmt: &mut LocalMinimaTable,
    sbt: &mut ScanbeamTable,
    edges: &mut Vec<Edge>,
    polygon: &Polygon,
    contributes: &[bool],
    kind: usize,
    op: ClipOp,
) {
    // Difference inverts the clip polygon by starting it on the right.
    let clip_bside = op == ClipOp::Difference;

    for (c, contour) in polygon.contours().iter().enumerate() {
        if !contributes.get(c).copied().unwrap_or(true) {
            continue;
        }

        let verts = optimal_vertices(contour.vertices());
        let n = verts.len();
        if n < 3 {
            debug!(
                "dropping degenerate contour {} ({} optimal of {} vertices)",
                c,
                n,
                contour.len()
            );
            continue;
        }
        for v in &verts {
            sbt.insert(v.y);
        }

        // Forward pass: minima whose bound climbs with increasing index.
        for min in 0..n {
            let fwd_min = verts[prev_index(min, n)].y >= verts[min].y
                && verts[next_index(min, n)].y > verts[min].y;
            if !fwd_min {
                continue;
            }
            let mut num_edges = 1;
            let mut max = next_index(min, n);
            while verts[next_index(max, n)].y > verts[max].y {
                num_edges += 1;
                max = next_index(max, n);
            }
            let first = push_bound(edges, &verts, min, num_edges, |i| next_index(i, n), kind, clip_bside);
            lmt.insert_bound(edges, first);
        }

        // Reverse pass: minima whose bound climbs with decreasing index.
        for min in 0..n {
            let rev_min = verts[prev_index(min, n)].y > verts[min].y
                && verts[next_index(min, n)].y >= verts[min].y;
            if !rev_min {
                continue;
            }
            let mut num_edges = 1;
            let mut max = prev_index(min, n);
            while verts[prev_index(max, n)].y > verts[max].y {
                num_edges += 1;
                max = prev_index(max, n);
            }
            let first = push_bound(edges, &verts, min, num_edges, |i| prev_index(i, n), kind, clip_bside);
            lmt.insert_bound(edges, first);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{CLIP, INVALID, SUBJ};
    use crate::polygon::Contour;

    fn build(polygon: &Polygon) -> (LocalMinimaTable, ScanbeamTable, Vec<Edge>) {
        let mut lmt = LocalMinimaTable::new();
        let mut sbt = ScanbeamTable::new();
        let mut edges = Vec::new();
        let all = vec![true; polygon.num_contours()];
        build_lmt(&mut lmt, &mut sbt, &mut edges, polygon, &all, SUBJ, ClipOp::Union);
        (lmt, sbt, edges)
    }

    #[test]
    fn square_has_one_minimum_with_two_bounds() {
        let mut p = Polygon::new();
        p.add_contour(Contour::from_coords(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]), false);
        let (lmt, sbt, edges) = build(&p);
        assert_eq!(lmt.len(), 1);
        let min = lmt.get(0).unwrap();
        assert_eq!(min.y, 0.0);
        assert_eq!(min.bounds.len(), 2);
        // Left bound sorts first.
        assert_eq!(edges[min.bounds[0] as usize].bot.x, 0.0);
        assert_eq!(edges[min.bounds[1] as usize].bot.x, 10.0);
        assert_eq!(sbt.as_slice(), &[0.0, 10.0]);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn bounds_chain_through_successors() {
        // A diamond with an extra vertex on the right flank.
        let mut p = Polygon::new();
        p.add_contour(
            Contour::from_coords(&[0.0, 0.0, 2.0, 1.0, 3.0, 2.0, 0.0, 4.0, -2.0, 2.0]),
            false,
        );
        let (lmt, sbt, edges) = build(&p);
        assert_eq!(lmt.len(), 1);
        assert_eq!(sbt.as_slice(), &[0.0, 1.0, 2.0, 4.0]);
        let bounds = &lmt.get(0).unwrap().bounds;
        let right = bounds
            .iter()
            .copied()
            .find(|&b| edges[b as usize].dx > 0.0)
            .unwrap();
        let mut count = 0;
        let mut e = right;
        while e != INVALID {
            count += 1;
            e = edges[e as usize].succ;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn horizontal_runs_are_filtered() {
        // Middle vertex of the bottom run is not optimal.
        let mut p = Polygon::new();
        p.add_contour(
            Contour::from_coords(&[0.0, 0.0, 5.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]),
            false,
        );
        let (lmt, _sbt, edges) = build(&p);
        assert_eq!(lmt.get(0).unwrap().bounds.len(), 2);
        assert!(edges.iter().all(|e| e.bot.y != e.top.y));
    }

    #[test]
    fn flat_contour_is_dropped() {
        let mut p = Polygon::new();
        p.add_contour(Contour::from_coords(&[0.0, 1.0, 5.0, 1.0, 9.0, 1.0]), false);
        let (lmt, sbt, edges) = build(&p);
        assert!(lmt.is_empty());
        assert!(sbt.is_empty());
        assert!(edges.is_empty());
    }

    #[test]
    fn non_contributing_contour_is_skipped() {
        let mut p = Polygon::new();
        p.add_contour(Contour::from_coords(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]), false);
        let mut lmt = LocalMinimaTable::new();
        let mut sbt = ScanbeamTable::new();
        let mut edges = Vec::new();
        build_lmt(&mut lmt, &mut sbt, &mut edges, &p, &[false], SUBJ, ClipOp::Intersection);
        assert!(lmt.is_empty());
        assert!(sbt.is_empty());
    }

    #[test]
    fn difference_starts_clip_edges_on_the_right() {
        let mut p = Polygon::new();
        p.add_contour(Contour::from_coords(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]), false);
        let mut lmt = LocalMinimaTable::new();
        let mut sbt = ScanbeamTable::new();
        let mut edges = Vec::new();
        build_lmt(&mut lmt, &mut sbt, &mut edges, &p, &[true], CLIP, ClipOp::Difference);
        assert!(edges.iter().all(|e| e.bside[CLIP] && !e.bside[SUBJ]));
    }
}
