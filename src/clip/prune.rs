// Copyright 2025 Lars Brubaker
// License: MIT
//
// Bounding-box pruning for intersection and difference.

use crate::clip::ClipOp;
use crate::geom::Bbox;
use crate::polygon::Polygon;

/// Clear the flag of every clip contour whose box overlaps no subject box.
/// For intersection, do the same for subject contours. Flags already false
/// stay false.
pub(super) fn mark_contributing(
    op: ClipOp,
    subject: &Polygon,
    clip: &Polygon,
    subj_contrib: &mut [bool],
    clip_contrib: &mut [bool],
) {
    let s_boxes: Vec<Bbox> = subject.contours().iter().map(|c| c.bbox()).collect();
    let c_boxes: Vec<Bbox> = clip.contours().iter().map(|c| c.bbox()).collect();

    for (cb, flag) in c_boxes.iter().zip(clip_contrib.iter_mut()) {
        if !s_boxes.iter().any(|sb| sb.overlaps(cb)) {
            *flag = false;
        }
    }

    if op == ClipOp::Intersection {
        for (sb, flag) in s_boxes.iter().zip(subj_contrib.iter_mut()) {
            if !c_boxes.iter().any(|cb| cb.overlaps(sb)) {
                *flag = false;
            }
        }
    }
}
