// Copyright 2025 Lars Brubaker
// License: MIT
//
// Public clipping entry points.
//
// `Clipper` carries the options; the free functions use the defaults. Every
// call validates its inputs, answers the empty-polygon cases directly, and
// otherwise runs one sweep over fresh tables. Inputs are only ever borrowed.

mod prune;

use log::debug;

use crate::contour::ContourBuilder;
use crate::error::ClipError;
use crate::geom::DEFAULT_EPSILON;
use crate::polygon::{Polygon, TriStrip};
use crate::sweep::Sweep;
use crate::tristrip::TriStripBuilder;

// ─────────────────────────────── Public types ──────────────────────────────────

/// Boolean operation applied to subject and clip polygons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClipOp {
    /// Subject minus clip.
    Difference,
    Intersection,
    /// Symmetric difference.
    ExclusiveOr,
    Union,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipOption {
    /// Skip contours whose bounding box misses the other polygon entirely.
    /// Applies to intersection and difference. On by default.
    BoundingBoxPruning,
    /// Start every triangle strip from its right vertex chain. Off by default.
    InvertTriStrips,
}

// ─────────────────────────────── Clipper ───────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Clipper {
    bbox_pruning: bool,
    invert_tristrips: bool,
    eps: f64,
}

impl Clipper {
    pub fn new() -> Self {
        Clipper {
            bbox_pruning: true,
            invert_tristrips: false,
            eps: DEFAULT_EPSILON,
        }
    }

    pub fn set_option(&mut self, option: ClipOption, value: bool) {
        match option {
            ClipOption::BoundingBoxPruning => self.bbox_pruning = value,
            ClipOption::InvertTriStrips => self.invert_tristrips = value,
        }
    }

    /// Tolerance for treating two edges as coincident and for rejecting
    /// near-parallel crossings.
    pub fn set_epsilon(&mut self, eps: f64) {
        self.eps = eps.abs();
    }

    pub fn epsilon(&self) -> f64 {
        self.eps
    }

    /// Apply `op` to `subject` and `clip`.
    pub fn clip(&self, op: ClipOp, subject: &Polygon, clip: &Polygon) -> Result<Polygon, ClipError> {
        subject.validate()?;
        clip.validate()?;
        debug!(
            "clip {:?}: subject {} contours, clip {} contours",
            op,
            subject.num_contours(),
            clip.num_contours()
        );

        if let Some(result) = trivial_result(op, subject, clip) {
            debug!("clip {:?}: empty operand, {} contours", op, result.num_contours());
            return Ok(result);
        }

        let Some(sweep) = self.prepare(op, subject, clip) else {
            return Ok(Polygon::new());
        };
        let mut out = ContourBuilder::new();
        sweep.run(&mut out);
        let result = out.into_polygon();
        debug!("clip {:?}: {} contours", op, result.num_contours());
        Ok(result)
    }

    /// Apply `op` and return the result as triangle strips.
    pub fn tristrip_clip(&self, op: ClipOp, subject: &Polygon, clip: &Polygon) -> Result<TriStrip, ClipError> {
        subject.validate()?;
        clip.validate()?;
        debug!(
            "tristrip clip {:?}: subject {} contours, clip {} contours",
            op,
            subject.num_contours(),
            clip.num_contours()
        );

        if result_is_empty(op, subject, clip) {
            debug!("tristrip clip {:?}: empty result", op);
            return Ok(TriStrip::new());
        }

        let Some(sweep) = self.prepare(op, subject, clip) else {
            return Ok(TriStrip::new());
        };
        let mut out = TriStripBuilder::new(self.invert_tristrips);
        sweep.run(&mut out);
        let result = out.into_tristrip();
        debug!("tristrip clip {:?}: {} strips", op, result.num_strips());
        Ok(result)
    }

    /// Triangulate `polygon` as strips.
    pub fn polygon_to_tristrip(&self, polygon: &Polygon) -> Result<TriStrip, ClipError> {
        self.tristrip_clip(ClipOp::Difference, polygon, &Polygon::new())
    }

    /// Build the sweep tables, or None if nothing is left to sweep.
    fn prepare(&self, op: ClipOp, subject: &Polygon, clip: &Polygon) -> Option<Sweep> {
        let mut subj_contrib = vec![true; subject.num_contours()];
        let mut clip_contrib = vec![true; clip.num_contours()];
        if self.bbox_pruning
            && matches!(op, ClipOp::Intersection | ClipOp::Difference)
            && !subject.is_empty()
            && !clip.is_empty()
        {
            prune::mark_contributing(op, subject, clip, &mut subj_contrib, &mut clip_contrib);
            let pruned = subj_contrib.iter().chain(&clip_contrib).filter(|&&c| !c).count();
            if pruned > 0 {
                debug!("{:?}: {} contours pruned by bounding box", op, pruned);
            }
        }

        let sweep = Sweep::new(op, subject, clip, &subj_contrib, &clip_contrib, self.eps);
        if sweep.is_empty() {
            debug!("{:?}: no edges to sweep", op);
            return None;
        }
        debug!(
            "{:?}: {} edges over {} scanbeams",
            op,
            sweep.num_edges(),
            sweep.num_scanbeams()
        );
        Some(sweep)
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

/// Cases where the answer is known without sweeping.
fn result_is_empty(op: ClipOp, subject: &Polygon, clip: &Polygon) -> bool {
    (subject.is_empty() && clip.is_empty())
        || (subject.is_empty() && matches!(op, ClipOp::Intersection | ClipOp::Difference))
        || (clip.is_empty() && op == ClipOp::Intersection)
}

/// Result of a contour clip with an empty operand: nothing, or an exact
/// copy of the other operand.
fn trivial_result(op: ClipOp, subject: &Polygon, clip: &Polygon) -> Option<Polygon> {
    if result_is_empty(op, subject, clip) {
        return Some(Polygon::new());
    }
    if subject.is_empty() {
        // Union and exclusive-or with nothing.
        return Some(clip.clone());
    }
    if clip.is_empty() {
        return Some(subject.clone());
    }
    None
}

// ─────────────────────────────── Free functions ────────────────────────────────

/// Apply `op` to `subject` and `clip` with default options.
pub fn clip(op: ClipOp, subject: &Polygon, clip: &Polygon) -> Result<Polygon, ClipError> {
    Clipper::new().clip(op, subject, clip)
}

/// Apply `op` with default options and return triangle strips.
pub fn tristrip_clip(op: ClipOp, subject: &Polygon, clip: &Polygon) -> Result<TriStrip, ClipError> {
    Clipper::new().tristrip_clip(op, subject, clip)
}

/// Triangulate `polygon` as strips with default options.
pub fn polygon_to_tristrip(polygon: &Polygon) -> Result<TriStrip, ClipError> {
    Clipper::new().polygon_to_tristrip(polygon)
}
