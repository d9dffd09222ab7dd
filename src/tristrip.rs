// Copyright 2025 Lars Brubaker
// License: MIT
//
// Triangle strip builder.
//
// Each strip keeps a left and a right vertex chain. Interleaving the two
// chains (left, right, left, ...) gives the strip order, so every new vertex
// forms a triangle with the last two written on either side.

use crate::aet::ActiveEdgeTable;
use crate::classify::VertexType;
use crate::edge::{Edge, EdgeIdx, ABOVE, BELOW};
use crate::geom::Vertex;
use crate::polygon::TriStrip;
use crate::sweep::SweepOutput;

const LEFT: usize = 0;
const RIGHT: usize = 1;

#[derive(Clone, Debug, Default)]
struct Strip {
    sides: [Vec<Vertex>; 2],
}

impl Strip {
    fn len(&self) -> usize {
        self.sides[LEFT].len() + self.sides[RIGHT].len()
    }
}

#[derive(Debug, Default)]
pub struct TriStripBuilder {
    strips: Vec<Strip>,
    invert: bool,
    /// Bundle that opened the span now being walked at this boundary.
    cf: Option<EdgeIdx>,
    cft: Option<VertexType>,
}

impl TriStripBuilder {
    /// With `invert`, strips start from the right chain instead of the left.
    pub fn new(invert: bool) -> Self {
        TriStripBuilder {
            invert,
            ..Default::default()
        }
    }

    fn new_strip(&mut self, edges: &mut [Edge], e: EdgeIdx, x: f64, y: f64) {
        let id = self.strips.len() as u32;
        let mut strip = Strip::default();
        strip.sides[LEFT].push(Vertex::new(x, y));
        self.strips.push(strip);
        edges[e as usize].outp[ABOVE] = Some(id);
    }

    /// Append `(x, y)` to `side` of the strip `e` is building `which` way.
    fn vertex(&mut self, edges: &[Edge], e: EdgeIdx, which: usize, side: usize, x: f64, y: f64) {
        if let Some(s) = edges[e as usize].outp[which] {
            if let Some(strip) = self.strips.get_mut(s as usize) {
                strip.sides[side].push(Vertex::new(x, y));
            }
        }
    }

    fn cf_led(&self) -> bool {
        self.cft == Some(VertexType::LeftEdge)
    }

    pub fn into_tristrip(self) -> TriStrip {
        let (first, second) = if self.invert { (RIGHT, LEFT) } else { (LEFT, RIGHT) };
        let strips = self
            .strips
            .into_iter()
            .filter(|s| s.len() > 2)
            .map(|s| {
                let mut out = Vec::with_capacity(s.len());
                let (a, b) = (&s.sides[first], &s.sides[second]);
                for i in 0..a.len().max(b.len()) {
                    out.extend(a.get(i));
                    out.extend(b.get(i));
                }
                out
            })
            .collect();
        TriStrip::from_strips(strips)
    }
}

/// Nearest edge left of `e` that is building a strip, and its X at `y`.
fn prev_edge(edges: &[Edge], aet: &ActiveEdgeTable, e: EdgeIdx, y: f64) -> Option<(EdgeIdx, f64)> {
    let pos = aet.position(e)?;
    let d = aet.find_prev(pos, |k| edges[k as usize].outp[ABOVE].is_some())?;
    Some((d, edges[d as usize].x_at(y)))
}

/// Nearest edge right of `e` that is building a strip, and its X at `y`.
fn next_edge(edges: &[Edge], aet: &ActiveEdgeTable, e: EdgeIdx, y: f64) -> Option<(EdgeIdx, f64)> {
    let pos = aet.position(e)?;
    let d = aet.find_next(pos, |k| edges[k as usize].outp[ABOVE].is_some())?;
    Some((d, edges[d as usize].x_at(y)))
}

impl SweepOutput for TriStripBuilder {
    fn boundary_vertex(
        &mut self,
        edges: &mut [Edge],
        _aet: &ActiveEdgeTable,
        e: EdgeIdx,
        vclass: VertexType,
        yb: f64,
    ) {
        use VertexType::*;
        let i = e as usize;
        let xb = edges[i].xb;
        let cf_above = self.cf.and_then(|c| edges[c as usize].outp[ABOVE]);
        let cf_xb = self.cf.map(|c| edges[c as usize].xb);

        match vclass {
            ExternalMin => {
                self.new_strip(edges, e, xb, yb);
                self.cf = Some(e);
            }
            ExternalRightIntermediate => {
                edges[i].outp[ABOVE] = cf_above;
                if cf_xb != Some(xb) {
                    self.vertex(edges, e, ABOVE, RIGHT, xb, yb);
                }
                self.cf = None;
            }
            ExternalLeftIntermediate => {
                self.vertex(edges, e, BELOW, LEFT, xb, yb);
                edges[i].outp[ABOVE] = None;
                self.cf = Some(e);
            }
            ExternalMax => {
                if cf_xb != Some(xb) {
                    self.vertex(edges, e, BELOW, RIGHT, xb, yb);
                }
                edges[i].outp[ABOVE] = None;
                self.cf = None;
            }
            InternalMin => {
                self.restart_left_edge(edges, yb);
                edges[i].outp[ABOVE] = self.cf.and_then(|c| edges[c as usize].outp[ABOVE]);
                self.vertex(edges, e, ABOVE, RIGHT, xb, yb);
            }
            InternalLeftIntermediate => {
                self.new_strip(edges, e, xb, yb);
                self.cf = Some(e);
                self.cft = Some(InternalLeftIntermediate);
            }
            InternalRightIntermediate => {
                self.restart_left_edge(edges, yb);
                self.vertex(edges, e, BELOW, RIGHT, xb, yb);
                edges[i].outp[ABOVE] = None;
            }
            InternalMax => {
                self.vertex(edges, e, BELOW, LEFT, xb, yb);
                edges[i].outp[ABOVE] = None;
                self.cft = Some(InternalMax);
            }
            InternalMaxMin => {
                self.vertex(edges, e, BELOW, LEFT, xb, yb);
                edges[i].outp[ABOVE] = cf_above;
                if let Some(cf) = self.cf {
                    if cf_xb != Some(xb) {
                        self.vertex(edges, cf, ABOVE, RIGHT, xb, yb);
                    }
                }
                self.cf = Some(e);
            }
            ExternalMaxMin => {
                self.vertex(edges, e, BELOW, RIGHT, xb, yb);
                edges[i].outp[ABOVE] = None;
                self.new_strip(edges, e, xb, yb);
                self.cf = Some(e);
            }
            LeftEdge => {
                if edges[i].bot.y == yb {
                    self.vertex(edges, e, BELOW, LEFT, xb, yb);
                }
                edges[i].outp[ABOVE] = edges[i].outp[BELOW];
                self.cf = Some(e);
                self.cft = Some(LeftEdge);
            }
            RightEdge => {
                edges[i].outp[ABOVE] = cf_above;
                if self.cf_led() {
                    if let (Some(cf), Some(cx)) = (self.cf, cf_xb) {
                        if edges[cf as usize].bot.y == yb {
                            self.vertex(edges, e, BELOW, RIGHT, xb, yb);
                        } else if edges[i].bot.y == yb {
                            self.vertex(edges, cf, BELOW, LEFT, cx, yb);
                            self.vertex(edges, e, BELOW, RIGHT, xb, yb);
                        }
                    }
                } else {
                    self.vertex(edges, e, BELOW, RIGHT, xb, yb);
                    self.vertex(edges, e, ABOVE, RIGHT, xb, yb);
                }
                self.cf = None;
            }
            Null | TopEdge | BottomEdge | Full => {}
        }
    }

    fn crossing(
        &mut self,
        edges: &mut [Edge],
        aet: &ActiveEdgeTable,
        e0: EdgeIdx,
        e1: EdgeIdx,
        vclass: VertexType,
        ix: f64,
        iy: f64,
    ) {
        use VertexType::*;
        let (i0, i1) = (e0 as usize, e1 as usize);
        let p = edges[i0].outp[ABOVE];
        let q = edges[i1].outp[ABOVE];
        match vclass {
            ExternalMin => {
                self.new_strip(edges, e1, ix, iy);
                edges[i0].outp[ABOVE] = edges[i1].outp[ABOVE];
            }
            ExternalRightIntermediate => {
                if p.is_some() {
                    if let Some((prev, px)) = prev_edge(edges, aet, e0, iy) {
                        self.vertex(edges, prev, ABOVE, LEFT, px, iy);
                    }
                    self.vertex(edges, e0, ABOVE, RIGHT, ix, iy);
                    edges[i1].outp[ABOVE] = p;
                    edges[i0].outp[ABOVE] = None;
                }
            }
            ExternalLeftIntermediate => {
                if q.is_some() {
                    let next = next_edge(edges, aet, e1, iy);
                    self.vertex(edges, e1, ABOVE, LEFT, ix, iy);
                    if let Some((next, nx)) = next {
                        self.vertex(edges, next, ABOVE, RIGHT, nx, iy);
                    }
                    edges[i0].outp[ABOVE] = q;
                    edges[i1].outp[ABOVE] = None;
                }
            }
            ExternalMax => {
                if p.is_some() && q.is_some() {
                    self.vertex(edges, e0, ABOVE, LEFT, ix, iy);
                    edges[i0].outp[ABOVE] = None;
                    edges[i1].outp[ABOVE] = None;
                }
            }
            InternalMin => {
                let prev = prev_edge(edges, aet, e0, iy);
                if let Some((prev, px)) = prev {
                    self.vertex(edges, prev, ABOVE, LEFT, px, iy);
                }
                let next = next_edge(edges, aet, e1, iy);
                if let Some((next, nx)) = next {
                    self.vertex(edges, next, ABOVE, RIGHT, nx, iy);
                }
                if let (Some((prev, px)), Some((next, nx))) = (prev, next) {
                    self.new_strip(edges, prev, px, iy);
                    edges[i1].outp[ABOVE] = edges[prev as usize].outp[ABOVE];
                    self.vertex(edges, e1, ABOVE, RIGHT, ix, iy);
                    self.new_strip(edges, e0, ix, iy);
                    edges[next as usize].outp[ABOVE] = edges[i0].outp[ABOVE];
                    self.vertex(edges, next, ABOVE, RIGHT, nx, iy);
                }
            }
            InternalLeftIntermediate => {
                if p.is_some() {
                    self.vertex(edges, e0, ABOVE, LEFT, ix, iy);
                    if let Some((next, nx)) = next_edge(edges, aet, e1, iy) {
                        self.vertex(edges, next, ABOVE, RIGHT, nx, iy);
                    }
                    edges[i1].outp[ABOVE] = p;
                    edges[i0].outp[ABOVE] = None;
                }
            }
            InternalRightIntermediate => {
                if q.is_some() {
                    self.vertex(edges, e1, ABOVE, RIGHT, ix, iy);
                    if let Some((prev, px)) = prev_edge(edges, aet, e0, iy) {
                        self.vertex(edges, prev, ABOVE, LEFT, px, iy);
                    }
                    edges[i0].outp[ABOVE] = q;
                    edges[i1].outp[ABOVE] = None;
                }
            }
            InternalMax => {
                if p.is_some() && q.is_some() {
                    self.vertex(edges, e0, ABOVE, RIGHT, ix, iy);
                    self.vertex(edges, e1, ABOVE, LEFT, ix, iy);
                    edges[i0].outp[ABOVE] = None;
                    edges[i1].outp[ABOVE] = None;
                    let prev = prev_edge(edges, aet, e0, iy);
                    if let Some((prev, px)) = prev {
                        self.vertex(edges, prev, ABOVE, LEFT, px, iy);
                        self.new_strip(edges, prev, px, iy);
                    }
                    if let Some((next, nx)) = next_edge(edges, aet, e1, iy) {
                        self.vertex(edges, next, ABOVE, RIGHT, nx, iy);
                        if let Some((prev, _)) = prev {
                            edges[next as usize].outp[ABOVE] = edges[prev as usize].outp[ABOVE];
                        }
                        self.vertex(edges, next, ABOVE, RIGHT, nx, iy);
                    }
                }
            }
            InternalMaxMin => {
                if p.is_some() && q.is_some() {
                    self.vertex(edges, e0, ABOVE, RIGHT, ix, iy);
                    self.vertex(edges, e1, ABOVE, LEFT, ix, iy);
                    let prev = prev_edge(edges, aet, e0, iy);
                    if let Some((prev, px)) = prev {
                        self.vertex(edges, prev, ABOVE, LEFT, px, iy);
                        self.new_strip(edges, prev, px, iy);
                    }
                    let next = next_edge(edges, aet, e1, iy);
                    if let Some((next, nx)) = next {
                        self.vertex(edges, next, ABOVE, RIGHT, nx, iy);
                    }
                    if let Some((prev, _)) = prev {
                        edges[i1].outp[ABOVE] = edges[prev as usize].outp[ABOVE];
                    }
                    self.vertex(edges, e1, ABOVE, RIGHT, ix, iy);
                    self.new_strip(edges, e0, ix, iy);
                    if let Some((next, nx)) = next {
                        edges[next as usize].outp[ABOVE] = edges[i0].outp[ABOVE];
                        self.vertex(edges, next, ABOVE, RIGHT, nx, iy);
                    }
                }
            }
            ExternalMaxMin => {
                if p.is_some() && q.is_some() {
                    self.vertex(edges, e0, ABOVE, LEFT, ix, iy);
                    self.new_strip(edges, e1, ix, iy);
                    edges[i0].outp[ABOVE] = edges[i1].outp[ABOVE];
                }
            }
            Null | TopEdge | BottomEdge | LeftEdge | RightEdge | Full => {}
        }
    }
}

impl TriStripBuilder {
    /// After a left edge, an internal minimum or right intermediate splits
    /// the span: close the old strip at the left edge and start a new one.
    fn restart_left_edge(&mut self, edges: &mut [Edge], yb: f64) {
        if !self.cf_led() {
            return;
        }
        let Some(cf) = self.cf else {
            return;
        };
        let (cx, cy) = (edges[cf as usize].xb, edges[cf as usize].bot.y);
        if cy != yb {
            self.vertex(edges, cf, BELOW, LEFT, cx, yb);
        }
        self.new_strip(edges, cf, cx, yb);
    }
}
