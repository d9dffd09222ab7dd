// Copyright 2025 Lars Brubaker
// License: MIT
//
// The scanbeam sweep.
//
// The sweep line stops at every scanbeam Y. At each stop it splices in the
// bounds starting there, bundles coincident edges, classifies every bundle
// against the running parities and drops edges ending there. Between stops
// it resolves edge crossings in Y order and hands each finished edge over to
// its successor. Geometry is emitted through a `SweepOutput`, so contour and
// triangle-strip results share one driver.

pub mod intersect;

use log::trace;

use crate::aet::ActiveEdgeTable;
use crate::classify::{crossing_quadrants, BoundaryState, VertexType};
use crate::clip::ClipOp;
use crate::edge::{BundleState, Edge, EdgeIdx, ABOVE, BELOW, CLIP, INVALID, SUBJ};
use crate::geom::approx_eq;
use crate::lmt::{build_lmt, LocalMinimaTable};
use crate::polygon::Polygon;
use crate::scanbeam::ScanbeamTable;

use intersect::{build_intersection_table, Intersection};

/// Receives the classified vertices of a sweep.
pub trait SweepOutput {
    /// Called once per scanbeam boundary, before any `boundary_vertex`.
    fn begin_boundary(&mut self) {}

    /// A contributing bundle headed by `e` at the boundary `yb`.
    fn boundary_vertex(
        &mut self,
        edges: &mut [Edge],
        aet: &ActiveEdgeTable,
        e: EdgeIdx,
        vclass: VertexType,
        yb: f64,
    );

    /// Contributing bundles `e0` (left below) and `e1` crossing at `(ix, iy)`.
    #[allow(clippy::too_many_arguments)]
    fn crossing(
        &mut self,
        edges: &mut [Edge],
        aet: &ActiveEdgeTable,
        e0: EdgeIdx,
        e1: EdgeIdx,
        vclass: VertexType,
        ix: f64,
        iy: f64,
    );
}

/// Sweep state for one clip call: every edge of both inputs plus the
/// tables that schedule them.
pub struct Sweep {
    op: ClipOp,
    eps: f64,
    edges: Vec<Edge>,
    lmt: LocalMinimaTable,
    sbt: ScanbeamTable,
}

impl Sweep {
    /// Build the local minima and scanbeam tables for `subject` and `clip`.
    /// Contours flagged false in the `*_contrib` tables are left out.
    pub fn new(
        op: ClipOp,
        subject: &Polygon,
        clip: &Polygon,
        subj_contrib: &[bool],
        clip_contrib: &[bool],
        eps: f64,
    ) -> Self {
        let mut lmt = LocalMinimaTable::new();
        let mut sbt = ScanbeamTable::new();
        let mut edges = Vec::new();
        build_lmt(&mut lmt, &mut sbt, &mut edges, subject, subj_contrib, SUBJ, op);
        build_lmt(&mut lmt, &mut sbt, &mut edges, clip, clip_contrib, CLIP, op);
        Sweep {
            op,
            eps,
            edges,
            lmt,
            sbt,
        }
    }

    /// True if neither input left any edges.
    pub fn is_empty(&self) -> bool {
        self.lmt.is_empty()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_scanbeams(&self) -> usize {
        self.sbt.len()
    }

    pub fn run<O: SweepOutput>(self, out: &mut O) {
        let Sweep {
            op,
            eps,
            mut edges,
            lmt,
            sbt,
        } = self;
        let ys = sbt.as_slice();
        let mut aet = ActiveEdgeTable::new();
        let mut next_min = 0;

        for (beam, &yb) in ys.iter().enumerate() {
            let last = beam + 1 == ys.len();
            let yt = if last { yb } else { ys[beam + 1] };

            // ── boundary ──
            if let Some(min) = lmt.get(next_min) {
                if min.y == yb {
                    for &b in &min.bounds {
                        let (xb, dx) = (edges[b as usize].xb, edges[b as usize].dx);
                        aet.insert(b, |_, a| {
                            let a = &edges[a as usize];
                            xb < a.xb || (xb == a.xb && dx < a.dx)
                        });
                    }
                    next_min += 1;
                }
            }

            bundle_edges(&mut edges, &aet, yb, eps);
            classify_boundary(op, &mut edges, &aet, yb, out);
            remove_terminating(&mut edges, &mut aet, yb, yt);

            trace!("scanbeam {}: y {} .. {}, {} active edges", beam, yb, yt, aet.len());

            if last {
                break;
            }

            // ── interior ──
            let it = build_intersection_table(&edges, aet.iter(), yt - yb, eps);
            if !it.is_empty() {
                trace!("scanbeam {}: {} crossings", beam, it.len());
            }
            process_crossings(op, &mut edges, &mut aet, &it, yb, out);
            advance(&mut edges, &mut aet, yt);
        }
    }
}

/// Recompute the above-boundary bundle flags and group coincident edges.
/// The rightmost edge of a group becomes its head and carries the flags.
fn bundle_edges(edges: &mut [Edge], aet: &ActiveEdgeTable, yb: f64, eps: f64) {
    let mut order = aet.iter();
    let Some(first) = order.next() else {
        return;
    };
    reset_above(&mut edges[first as usize], yb);

    let mut e0 = first as usize;
    for next in order {
        let n = next as usize;
        reset_above(&mut edges[n], yb);
        let kind = edges[n].kind;
        if !edges[n].bundle[ABOVE][kind] {
            continue;
        }
        let coincident = approx_eq(edges[e0].xb, edges[n].xb, eps)
            && approx_eq(edges[e0].dx, edges[n].dx, eps)
            && edges[e0].top.y != yb;
        if coincident {
            let carried = edges[e0].bundle[ABOVE];
            let head = &mut edges[n];
            head.bundle[ABOVE][kind] ^= carried[kind];
            head.bundle[ABOVE][1 - kind] = carried[1 - kind];
            head.bstate[ABOVE] = BundleState::Head;
            let tail = &mut edges[e0];
            tail.bundle[ABOVE] = [false; 2];
            tail.bstate[ABOVE] = BundleState::Tail;
        }
        e0 = n;
    }
}

#[inline]
fn reset_above(e: &mut Edge, yb: f64) {
    e.bundle[ABOVE][e.kind] = e.top.y != yb;
    e.bundle[ABOVE][1 - e.kind] = false;
    e.bstate[ABOVE] = BundleState::Unbundled;
}

fn classify_boundary<O: SweepOutput>(
    op: ClipOp,
    edges: &mut [Edge],
    aet: &ActiveEdgeTable,
    yb: f64,
    out: &mut O,
) {
    out.begin_boundary();
    let mut state = BoundaryState::new(op);
    for idx in aet.iter() {
        let e = &mut edges[idx as usize];
        if !e.bundle.iter().flatten().any(|&b| b) {
            continue;
        }
        let contributing = state.contributing(op, e);
        let q = state.quadrants(op, e);
        state.advance(e);
        if contributing {
            out.boundary_vertex(edges, aet, idx, VertexType::from_quadrants(q), yb);
        }
    }
}

/// Drop edges whose top is at `yb`; set `xt` for the rest. A dropped bundle
/// head passes its output chain to the tail left of it.
fn remove_terminating(edges: &mut [Edge], aet: &mut ActiveEdgeTable, yb: f64, yt: f64) {
    aet.retain_with(|idx, kept| {
        let i = idx as usize;
        if edges[i].top.y != yb {
            let e = &mut edges[i];
            e.xt = if e.top.y == yt { e.top.x } else { e.x_at(yt) };
            return true;
        }
        if edges[i].bstate[BELOW] != BundleState::Head {
            return false;
        }
        let Some(&prev) = kept.last() else {
            return false;
        };
        if edges[prev as usize].bstate[BELOW] == BundleState::Tail {
            let outp = edges[i].outp[BELOW];
            let tail_before = kept.len() >= 2
                && edges[kept[kept.len() - 2] as usize].bstate[BELOW] == BundleState::Tail;
            let p = &mut edges[prev as usize];
            p.outp[BELOW] = outp;
            p.bstate[BELOW] = if tail_before {
                BundleState::Head
            } else {
                BundleState::Unbundled
            };
        }
        false
    });
}

fn process_crossings<O: SweepOutput>(
    op: ClipOp,
    edges: &mut [Edge],
    aet: &mut ActiveEdgeTable,
    it: &[Intersection],
    yb: f64,
    out: &mut O,
) {
    for n in it {
        let (i0, i1) = (n.e0 as usize, n.e1 as usize);
        if edges[i0].contributes_above() && edges[i1].contributes_above() {
            let q = crossing_quadrants(op, &edges[i0], &edges[i1]);
            out.crossing(edges, aet, n.e0, n.e1, VertexType::from_quadrants(q), n.x, n.y + yb);
        }

        // Each edge now lies on the other side of the other's polygon.
        for s in [CLIP, SUBJ] {
            if edges[i0].bundle[ABOVE][s] {
                edges[i1].bside[s] = !edges[i1].bside[s];
            }
            if edges[i1].bundle[ABOVE][s] {
                edges[i0].bside[s] = !edges[i0].bside[s];
            }
        }

        if !aet.swap_bundles(edges, n.e0, n.e1) {
            trace!("crossing {} x {} out of order, not swapped", n.e0, n.e1);
        }
    }
}

/// Carry above-boundary state down for the next beam. Edges ending at `yt`
/// are replaced by their successor in place.
fn advance(edges: &mut [Edge], aet: &mut ActiveEdgeTable, yt: f64) {
    for pos in 0..aet.len() {
        let i = aet.get(pos) as usize;
        let (outp, bstate, bundle) = (edges[i].outp[ABOVE], edges[i].bstate[ABOVE], edges[i].bundle[ABOVE]);
        let succ = edges[i].succ;
        if edges[i].top.y == yt && succ != INVALID {
            let s = &mut edges[succ as usize];
            s.outp[BELOW] = outp;
            s.bstate[BELOW] = bstate;
            s.bundle[BELOW] = bundle;
            aet.set(pos, succ);
        } else {
            let e = &mut edges[i];
            e.outp[BELOW] = outp;
            e.bstate[BELOW] = bstate;
            e.bundle[BELOW] = bundle;
            e.xb = e.xt;
        }
        edges[i].outp[ABOVE] = None;
    }
}
