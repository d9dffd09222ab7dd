// Copyright 2025 Lars Brubaker
// License: MIT
//
// Vertex classification.
//
// At every boundary vertex and every edge crossing the sweep decides, per
// polygon, which of the four quadrants around the point lie inside. The
// per-polygon answers are combined by the clip operation into a 4-bit code
// `tr + 2*tl + 4*br + 8*bl` that names one of sixteen local configurations.

use crate::clip::ClipOp;
use crate::edge::{Edge, ABOVE, BELOW, CLIP, SUBJ};

/// The sixteen local configurations, numbered by their quadrant code.
///
/// "External" cases bound filled area from outside, "internal" ones from
/// inside a hole or notch. Intermediates continue a chain on one side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum VertexType {
    /// Nothing inside.
    Null = 0,
    ExternalMax = 1,
    ExternalLeftIntermediate = 2,
    TopEdge = 3,
    ExternalRightIntermediate = 4,
    RightEdge = 5,
    InternalMaxMin = 6,
    InternalMin = 7,
    ExternalMin = 8,
    ExternalMaxMin = 9,
    LeftEdge = 10,
    InternalLeftIntermediate = 11,
    BottomEdge = 12,
    InternalRightIntermediate = 13,
    InternalMax = 14,
    /// Everything inside.
    Full = 15,
}

impl VertexType {
    const ALL: [VertexType; 16] = [
        VertexType::Null,
        VertexType::ExternalMax,
        VertexType::ExternalLeftIntermediate,
        VertexType::TopEdge,
        VertexType::ExternalRightIntermediate,
        VertexType::RightEdge,
        VertexType::InternalMaxMin,
        VertexType::InternalMin,
        VertexType::ExternalMin,
        VertexType::ExternalMaxMin,
        VertexType::LeftEdge,
        VertexType::InternalLeftIntermediate,
        VertexType::BottomEdge,
        VertexType::InternalRightIntermediate,
        VertexType::InternalMax,
        VertexType::Full,
    ];

    /// Low four bits of `code`.
    #[inline]
    pub fn from_bits(code: u8) -> VertexType {
        VertexType::ALL[(code & 0xF) as usize]
    }

    #[inline]
    pub fn from_quadrants(q: Quadrants) -> VertexType {
        VertexType::from_bits(q.tr as u8 | (q.tl as u8) << 1 | (q.br as u8) << 2 | (q.bl as u8) << 3)
    }
}

/// Occupancy of the four quadrants around a point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Quadrants {
    pub tr: bool,
    pub tl: bool,
    pub br: bool,
    pub bl: bool,
}

impl Quadrants {
    /// Combine the per-polygon quadrants as `op` requires.
    pub fn combine(op: ClipOp, c: Quadrants, s: Quadrants) -> Quadrants {
        let f: fn(bool, bool) -> bool = match op {
            ClipOp::Intersection | ClipOp::Difference => |a, b| a && b,
            ClipOp::ExclusiveOr => |a, b| a ^ b,
            ClipOp::Union => |a, b| a || b,
        };
        Quadrants {
            tr: f(c.tr, s.tr),
            tl: f(c.tl, s.tl),
            br: f(c.br, s.br),
            bl: f(c.bl, s.bl),
        }
    }
}

/// Horizontal edge state per polygon while walking a boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HState {
    /// No horizontal edge pending.
    #[default]
    None,
    Bottom,
    Top,
}

impl HState {
    /// Next state after an edge whose `exists` code (1 above, 2 below, 3
    /// both) is non-zero. `parity` is the side parity past that edge.
    pub fn next(self, exists: u8, parity: bool) -> HState {
        use HState::*;
        const TABLE: [[HState; 6]; 3] = [
            [Bottom, Top, Top, Bottom, None, None],
            [None, None, None, None, Top, Top],
            [None, None, None, None, Bottom, Bottom],
        ];
        let row = match self {
            None => 0,
            Bottom => 1,
            Top => 2,
        };
        let col = ((exists.clamp(1, 3) as usize - 1) << 1) + parity as usize;
        TABLE[row][col]
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != HState::None
    }
}

/// Running boundary state: one parity and horizontal state per polygon.
#[derive(Copy, Clone, Debug)]
pub struct BoundaryState {
    pub parity: [bool; 2],
    pub horiz: [HState; 2],
}

impl BoundaryState {
    /// Difference starts the clip polygon on the inside of its parity.
    pub fn new(op: ClipOp) -> Self {
        BoundaryState {
            parity: [op == ClipOp::Difference, false],
            horiz: [HState::None; 2],
        }
    }

    /// True if the bundle headed by `e` draws part of the result's outline.
    pub fn contributing(&self, op: ClipOp, e: &Edge) -> bool {
        let ex = exists(e);
        let (ec, es) = (ex[CLIP] != 0, ex[SUBJ] != 0);
        let (pc, ps) = (self.parity[CLIP], self.parity[SUBJ]);
        let (hc, hs) = (self.horiz[CLIP].is_some(), self.horiz[SUBJ].is_some());
        match op {
            ClipOp::Intersection | ClipOp::Difference => {
                (ec && (ps || hs)) || (es && (pc || hc)) || (ec && es && pc == ps)
            }
            ClipOp::ExclusiveOr => ec || es,
            ClipOp::Union => {
                (ec && (!ps || hs)) || (es && (!pc || hc)) || (ec && es && pc == ps)
            }
        }
    }

    /// Quadrants around the bottom vertex of `e`, from the state before `e`.
    pub fn quadrants(&self, op: ClipOp, e: &Edge) -> Quadrants {
        let side = |s: usize| {
            let p = self.parity[s];
            let h = self.horiz[s].is_some();
            Quadrants {
                br: p,
                bl: p ^ e.bundle[ABOVE][s],
                tr: p ^ h,
                tl: p ^ h ^ e.bundle[BELOW][s],
            }
        };
        Quadrants::combine(op, side(CLIP), side(SUBJ))
    }

    /// Step past `e`: record its side, then flip parity and horizontals.
    pub fn advance(&mut self, e: &mut Edge) {
        let ex = exists(e);
        e.bside = self.parity;
        for s in [CLIP, SUBJ] {
            self.parity[s] ^= e.bundle[ABOVE][s];
            if ex[s] != 0 {
                self.horiz[s] = self.horiz[s].next(ex[s], self.parity[s]);
            }
        }
    }
}

/// Per polygon: 1 if the bundle continues above, 2 if it came from below.
#[inline]
fn exists(e: &Edge) -> [u8; 2] {
    [
        e.bundle[ABOVE][CLIP] as u8 + ((e.bundle[BELOW][CLIP] as u8) << 1),
        e.bundle[ABOVE][SUBJ] as u8 + ((e.bundle[BELOW][SUBJ] as u8) << 1),
    ]
}

/// Quadrants around the crossing of `e0` (left below) and `e1`.
pub fn crossing_quadrants(op: ClipOp, e0: &Edge, e1: &Edge) -> Quadrants {
    let side = |s: usize| {
        let (a0, b0) = (e0.bundle[ABOVE][s], e0.bside[s]);
        let (a1, b1) = (e1.bundle[ABOVE][s], e1.bside[s]);
        let inside = (a0 && !b0) || (a1 && b1) || (!a0 && !a1 && b0 && b1);
        Quadrants {
            tr: inside,
            tl: inside ^ a1,
            br: inside ^ a0,
            bl: inside ^ a1 ^ a0,
        }
    };
    Quadrants::combine(op, side(CLIP), side(SUBJ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vertex;

    fn subj_edge(above: bool, below: bool) -> Edge {
        let mut e = Edge::new(Vertex::new(0.0, 0.0), Vertex::new(0.0, 1.0), SUBJ, false);
        e.bundle[ABOVE][SUBJ] = above;
        e.bundle[BELOW][SUBJ] = below;
        e
    }

    #[test]
    fn codes_round_trip() {
        for code in 0..16u8 {
            assert_eq!(VertexType::from_bits(code) as u8, code);
        }
        assert_eq!(VertexType::from_bits(0x18), VertexType::ExternalMin);
    }

    #[test]
    fn quadrant_packing() {
        let q = Quadrants { tr: true, tl: false, br: false, bl: true };
        assert_eq!(VertexType::from_quadrants(q), VertexType::ExternalMaxMin);
        let q = Quadrants { tr: false, tl: false, br: true, bl: true };
        assert_eq!(VertexType::from_quadrants(q), VertexType::BottomEdge);
    }

    #[test]
    fn horizontal_state_table() {
        assert_eq!(HState::None.next(1, false), HState::Bottom);
        assert_eq!(HState::None.next(1, true), HState::Top);
        assert_eq!(HState::None.next(2, false), HState::Top);
        assert_eq!(HState::None.next(3, false), HState::None);
        assert_eq!(HState::Bottom.next(3, true), HState::Top);
        assert_eq!(HState::Top.next(1, false), HState::None);
        assert_eq!(HState::Top.next(3, false), HState::Bottom);
    }

    #[test]
    fn left_bound_of_square_is_external_min() {
        // Left edge of a lone subject square at its bottom vertex; the clip
        // polygon is absent, so Union sees only the subject.
        let st = BoundaryState::new(ClipOp::Union);
        let e = subj_edge(true, false);
        assert!(st.contributing(ClipOp::Union, &e));
        let q = st.quadrants(ClipOp::Union, &e);
        assert_eq!(q, Quadrants { tr: false, tl: false, br: false, bl: true });
        assert_eq!(VertexType::from_quadrants(q), VertexType::ExternalMin);
    }

    #[test]
    fn advance_flips_parity_and_records_side() {
        let mut st = BoundaryState::new(ClipOp::Union);
        let mut e = subj_edge(true, false);
        st.advance(&mut e);
        assert!(st.parity[SUBJ]);
        assert!(!e.bside[SUBJ]);
        assert_eq!(st.horiz[SUBJ], HState::Top);
        let mut e2 = subj_edge(true, false);
        st.advance(&mut e2);
        assert!(!st.parity[SUBJ]);
        assert!(e2.bside[SUBJ]);
    }

    #[test]
    fn difference_starts_clip_inside() {
        let st = BoundaryState::new(ClipOp::Difference);
        assert_eq!(st.parity, [true, false]);
    }

    #[test]
    fn crossing_of_two_subject_edges_under_union() {
        // e0 is a left bound (inside to its right), e1 a right bound.
        let mut e0 = subj_edge(true, true);
        let mut e1 = subj_edge(true, true);
        e0.bside[SUBJ] = false;
        e1.bside[SUBJ] = true;
        let q = crossing_quadrants(ClipOp::Union, &e0, &e1);
        // Inside below and above the crossing, outside left and right.
        assert_eq!(VertexType::from_quadrants(q), VertexType::ExternalMaxMin);
    }
}
