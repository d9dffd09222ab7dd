// Copyright 2025 Lars Brubaker
// License: MIT
//
// Edge records for the scanbeam sweep.
//
// Every edge of both input polygons lives in one Vec, addressed by u32
// index. INVALID = u32::MAX represents a null link. Output chains are
// referenced by index into the active output builder.

use crate::geom::Vertex;

pub type EdgeIdx = u32;
pub const INVALID: u32 = u32::MAX;

/// Polygon side indices into `bundle`, `bside` and parity arrays.
pub const CLIP: usize = 0;
pub const SUBJ: usize = 1;

/// Scanbeam boundary indices into `bundle`, `bstate` and `outp`.
pub const ABOVE: usize = 0;
pub const BELOW: usize = 1;

/// Position of an edge within a group of coincident edges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BundleState {
    #[default]
    Unbundled,
    Head,
    Tail,
}

/// One non-horizontal edge of an input contour, directed upward.
#[derive(Clone, Debug)]
pub struct Edge {
    pub bot: Vertex,
    pub top: Vertex,
    /// X at the bottom of the current scanbeam.
    pub xb: f64,
    /// X at the top of the current scanbeam.
    pub xt: f64,
    /// dx/dy.
    pub dx: f64,
    /// CLIP or SUBJ.
    pub kind: usize,
    /// [ABOVE/BELOW][CLIP/SUBJ]: this bundle contributes an edge of that side.
    pub bundle: [[bool; 2]; 2],
    /// Per side: false = left, true = right of the running parity.
    pub bside: [bool; 2],
    pub bstate: [BundleState; 2],
    /// [ABOVE/BELOW]: output chain this edge is currently building.
    pub outp: [Option<u32>; 2],
    /// Next edge of the same bound, or INVALID at a local maximum.
    pub succ: EdgeIdx,
}

impl Edge {
    pub fn new(bot: Vertex, top: Vertex, kind: usize, clip_bside: bool) -> Self {
        let dy = top.y - bot.y;
        let dx = if dy != 0.0 { (top.x - bot.x) / dy } else { 0.0 };
        Edge {
            bot,
            top,
            xb: bot.x,
            xt: bot.x,
            dx,
            kind,
            bundle: [[false; 2]; 2],
            bside: [clip_bside, false],
            bstate: [BundleState::Unbundled; 2],
            outp: [None; 2],
            succ: INVALID,
        }
    }

    /// X of this edge's supporting line at height `y`.
    #[inline]
    pub fn x_at(&self, y: f64) -> f64 {
        self.bot.x + self.dx * (y - self.bot.y)
    }

    /// True if the bundle this edge heads carries any edge above the boundary.
    #[inline]
    pub fn contributes_above(&self) -> bool {
        self.bundle[ABOVE][CLIP] || self.bundle[ABOVE][SUBJ]
    }
}
