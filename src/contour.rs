// Copyright 2025 Lars Brubaker
// License: MIT
//
// Output contour builder.
//
// Open contours are vertex chains grown at both ends. Vertices live in one
// arena as a singly linked list from the left end to the right end. When two
// chains meet at a maximum they are spliced together and the absorbed chain
// is redirected to the survivor through a union-find parent table, so edges
// still holding the old chain index keep writing to the right place.

use crate::aet::ActiveEdgeTable;
use crate::classify::VertexType;
use crate::edge::{Edge, EdgeIdx, ABOVE, BELOW};
use crate::geom::Vertex;
use crate::polygon::{Contour, Polygon};
use crate::sweep::SweepOutput;

#[derive(Copy, Clone, Debug)]
struct Node {
    v: Vertex,
    next: Option<u32>,
}

#[derive(Copy, Clone, Debug)]
struct Chain {
    left: u32,
    right: u32,
    hole: bool,
    active: bool,
}

#[derive(Debug, Default)]
pub struct ContourBuilder {
    nodes: Vec<Node>,
    chains: Vec<Chain>,
    parent: Vec<u32>,
    /// X of the last vertex written at this boundary.
    px: f64,
    /// Chain left open by the previous bundle at this boundary.
    cf: Option<u32>,
}

impl ContourBuilder {
    pub fn new() -> Self {
        ContourBuilder {
            px: -f64::MAX,
            ..Default::default()
        }
    }

    fn push_node(&mut self, x: f64, y: f64) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(Node {
            v: Vertex::new(x, y),
            next: None,
        });
        id
    }

    /// Canonical chain for `p`, compressing the path on the way.
    fn find(&mut self, p: u32) -> u32 {
        let mut root = p;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut cur = p;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Open a new chain at `(x, y)`.
    pub fn add_local_min(&mut self, x: f64, y: f64) -> u32 {
        let n = self.push_node(x, y);
        let id = self.chains.len() as u32;
        self.chains.push(Chain {
            left: n,
            right: n,
            hole: false,
            active: true,
        });
        self.parent.push(id);
        id
    }

    pub fn add_left(&mut self, p: u32, x: f64, y: f64) {
        let r = self.find(p) as usize;
        let n = self.push_node(x, y);
        self.nodes[n as usize].next = Some(self.chains[r].left);
        self.chains[r].left = n;
    }

    pub fn add_right(&mut self, p: u32, x: f64, y: f64) {
        let r = self.find(p) as usize;
        let n = self.push_node(x, y);
        let tail = self.chains[r].right as usize;
        self.nodes[tail].next = Some(n);
        self.chains[r].right = n;
    }

    /// Close `q` on its left with `p`; the result bounds a hole.
    pub fn merge_left(&mut self, p: u32, q: u32) {
        let (rp, rq) = (self.find(p), self.find(q));
        self.chains[rq as usize].hole = true;
        if rp != rq {
            let (pl, pr) = (self.chains[rp as usize].left, self.chains[rp as usize].right);
            self.nodes[pr as usize].next = Some(self.chains[rq as usize].left);
            self.chains[rq as usize].left = pl;
            self.absorb(rp, rq);
        }
    }

    /// Close `q` on its right with `p`; the result is an external contour.
    pub fn merge_right(&mut self, p: u32, q: u32) {
        let (rp, rq) = (self.find(p), self.find(q));
        self.chains[rq as usize].hole = false;
        if rp != rq {
            let (pl, pr) = (self.chains[rp as usize].left, self.chains[rp as usize].right);
            let qr = self.chains[rq as usize].right;
            self.nodes[qr as usize].next = Some(pl);
            self.chains[rq as usize].right = pr;
            self.absorb(rp, rq);
        }
    }

    fn absorb(&mut self, from: u32, into: u32) {
        self.chains[from as usize].active = false;
        self.parent[from as usize] = into;
    }

    /// Every live chain with more than two vertices, newest first, each with
    /// its vertex order reversed.
    pub fn into_polygon(self) -> Polygon {
        let mut result = Polygon::new();
        for chain in self.chains.iter().rev().filter(|c| c.active) {
            let mut verts = Vec::new();
            let mut cur = Some(chain.left);
            // Never walk more nodes than exist.
            while let Some(n) = cur {
                if verts.len() > self.nodes.len() {
                    break;
                }
                let node = self.nodes[n as usize];
                verts.push(node.v);
                cur = node.next;
            }
            if verts.len() > 2 {
                verts.reverse();
                result.add_contour(Contour::new(verts), chain.hole);
            }
        }
        result
    }

    fn edge_vertex_at_boundary(&mut self, edges: &mut [Edge], e: EdgeIdx, vclass: VertexType, yb: f64) {
        use VertexType::*;
        let i = e as usize;
        let xb = edges[i].xb;
        let below = edges[i].outp[BELOW];
        match vclass {
            ExternalMin | InternalMin => {
                let p = self.add_local_min(xb, yb);
                edges[i].outp[ABOVE] = Some(p);
                self.px = xb;
                self.cf = Some(p);
            }
            ExternalRightIntermediate => {
                if xb != self.px {
                    if let Some(cf) = self.cf {
                        self.add_right(cf, xb, yb);
                    }
                    self.px = xb;
                }
                edges[i].outp[ABOVE] = self.cf.take();
            }
            ExternalLeftIntermediate => {
                if let Some(b) = below {
                    self.add_left(b, xb, yb);
                }
                self.px = xb;
                self.cf = below;
            }
            ExternalMax => {
                if xb != self.px {
                    if let Some(cf) = self.cf {
                        self.add_left(cf, xb, yb);
                    }
                    self.px = xb;
                }
                if let (Some(cf), Some(b)) = (self.cf, below) {
                    self.merge_right(cf, b);
                }
                self.cf = None;
            }
            InternalLeftIntermediate => {
                if xb != self.px {
                    if let Some(cf) = self.cf {
                        self.add_left(cf, xb, yb);
                    }
                    self.px = xb;
                }
                edges[i].outp[ABOVE] = self.cf.take();
            }
            InternalRightIntermediate => {
                if let Some(b) = below {
                    self.add_right(b, xb, yb);
                }
                self.px = xb;
                self.cf = below;
                edges[i].outp[BELOW] = None;
            }
            InternalMax => {
                if xb != self.px {
                    if let Some(cf) = self.cf {
                        self.add_right(cf, xb, yb);
                    }
                    self.px = xb;
                }
                if let (Some(cf), Some(b)) = (self.cf, below) {
                    self.merge_left(cf, b);
                }
                self.cf = None;
                edges[i].outp[BELOW] = None;
            }
            InternalMaxMin => {
                if xb != self.px {
                    if let Some(cf) = self.cf {
                        self.add_right(cf, xb, yb);
                    }
                    self.px = xb;
                }
                if let (Some(cf), Some(b)) = (self.cf, below) {
                    self.merge_left(cf, b);
                }
                edges[i].outp[BELOW] = None;
                let p = self.add_local_min(xb, yb);
                edges[i].outp[ABOVE] = Some(p);
                self.cf = Some(p);
            }
            ExternalMaxMin => {
                if xb != self.px {
                    if let Some(cf) = self.cf {
                        self.add_left(cf, xb, yb);
                    }
                    self.px = xb;
                }
                if let (Some(cf), Some(b)) = (self.cf, below) {
                    self.merge_right(cf, b);
                }
                edges[i].outp[BELOW] = None;
                let p = self.add_local_min(xb, yb);
                edges[i].outp[ABOVE] = Some(p);
                self.cf = Some(p);
            }
            LeftEdge => {
                if edges[i].bot.y == yb {
                    if let Some(b) = below {
                        self.add_left(b, xb, yb);
                    }
                }
                edges[i].outp[ABOVE] = below;
                self.px = xb;
            }
            RightEdge => {
                if edges[i].bot.y == yb {
                    if let Some(b) = below {
                        self.add_right(b, xb, yb);
                    }
                }
                edges[i].outp[ABOVE] = below;
                self.px = xb;
            }
            Null | TopEdge | BottomEdge | Full => {}
        }
    }
}

impl SweepOutput for ContourBuilder {
    fn begin_boundary(&mut self) {
        self.px = -f64::MAX;
    }

    fn boundary_vertex(
        &mut self,
        edges: &mut [Edge],
        _aet: &ActiveEdgeTable,
        e: EdgeIdx,
        vclass: VertexType,
        yb: f64,
    ) {
        self.edge_vertex_at_boundary(edges, e, vclass, yb);
    }

    fn crossing(
        &mut self,
        edges: &mut [Edge],
        _aet: &ActiveEdgeTable,
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
            ExternalMin | InternalMin => {
                let m = self.add_local_min(ix, iy);
                edges[i0].outp[ABOVE] = Some(m);
                edges[i1].outp[ABOVE] = Some(m);
            }
            ExternalRightIntermediate => {
                if let Some(p) = p {
                    self.add_right(p, ix, iy);
                    edges[i1].outp[ABOVE] = Some(p);
                    edges[i0].outp[ABOVE] = None;
                }
            }
            ExternalLeftIntermediate => {
                if let Some(q) = q {
                    self.add_left(q, ix, iy);
                    edges[i0].outp[ABOVE] = Some(q);
                    edges[i1].outp[ABOVE] = None;
                }
            }
            ExternalMax => {
                if let (Some(p), Some(q)) = (p, q) {
                    self.add_left(p, ix, iy);
                    self.merge_right(p, q);
                    edges[i0].outp[ABOVE] = None;
                    edges[i1].outp[ABOVE] = None;
                }
            }
            InternalLeftIntermediate => {
                if let Some(p) = p {
                    self.add_left(p, ix, iy);
                    edges[i1].outp[ABOVE] = Some(p);
                    edges[i0].outp[ABOVE] = None;
                }
            }
            InternalRightIntermediate => {
                if let Some(q) = q {
                    self.add_right(q, ix, iy);
                    edges[i0].outp[ABOVE] = Some(q);
                    edges[i1].outp[ABOVE] = None;
                }
            }
            InternalMax => {
                if let (Some(p), Some(q)) = (p, q) {
                    self.add_right(p, ix, iy);
                    self.merge_left(p, q);
                    edges[i0].outp[ABOVE] = None;
                    edges[i1].outp[ABOVE] = None;
                }
            }
            InternalMaxMin => {
                if let (Some(p), Some(q)) = (p, q) {
                    self.add_right(p, ix, iy);
                    self.merge_left(p, q);
                    let m = self.add_local_min(ix, iy);
                    edges[i0].outp[ABOVE] = Some(m);
                    edges[i1].outp[ABOVE] = Some(m);
                }
            }
            ExternalMaxMin => {
                if let (Some(p), Some(q)) = (p, q) {
                    self.add_left(p, ix, iy);
                    self.merge_right(p, q);
                    let m = self.add_local_min(ix, iy);
                    edges[i0].outp[ABOVE] = Some(m);
                    edges[i1].outp[ABOVE] = Some(m);
                }
            }
            Null | TopEdge | BottomEdge | LeftEdge | RightEdge | Full => {}
        }
    }
}
