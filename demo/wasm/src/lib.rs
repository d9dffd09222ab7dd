// Copyright 2025 Lars Brubaker
// License: MIT
//
// WASM bindings for vatti-clip

use vatti_clip::{ClipOp, ClipOption, Clipper, Contour, Polygon, TriStrip};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// Subject and clip polygons built up contour by contour, then clipped.
/// Results are read back as flat arrays.
#[wasm_bindgen]
pub struct ClipperJs {
    clipper: Clipper,
    subject: Polygon,
    clip: Polygon,
    result: Polygon,
    strips: TriStrip,
    error: Option<String>,
}

impl Default for ClipperJs {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ClipperJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ClipperJs {
        ClipperJs {
            clipper: Clipper::new(),
            subject: Polygon::new(),
            clip: Polygon::new(),
            result: Polygon::new(),
            strips: TriStrip::new(),
            error: None,
        }
    }

    /// Add a subject contour from a flat [x0,y0, x1,y1, ...] array.
    pub fn add_subject_contour(&mut self, coords: &[f64], hole: bool) {
        self.subject.add_contour(Contour::from_coords(coords), hole);
    }

    /// Add a clip contour from a flat [x0,y0, x1,y1, ...] array.
    pub fn add_clip_contour(&mut self, coords: &[f64], hole: bool) {
        self.clip.add_contour(Contour::from_coords(coords), hole);
    }

    pub fn clear(&mut self) {
        self.subject = Polygon::new();
        self.clip = Polygon::new();
        self.result = Polygon::new();
        self.strips = TriStrip::new();
        self.error = None;
    }

    /// Set an option (0 = BoundingBoxPruning, 1 = InvertTriStrips).
    pub fn set_option(&mut self, option: u32, value: bool) {
        let opt = match option {
            0 => ClipOption::BoundingBoxPruning,
            1 => ClipOption::InvertTriStrips,
            _ => return,
        };
        self.clipper.set_option(opt, value);
    }

    pub fn set_epsilon(&mut self, eps: f64) {
        self.clipper.set_epsilon(eps);
    }

    /// Clip to contours and return true on success.
    /// op: 0=Difference 1=Intersection 2=ExclusiveOr 3=Union; other codes fail.
    pub fn clip(&mut self, op: u32) -> bool {
        let Some(op) = self.parse_op(op) else {
            self.result = Polygon::new();
            return false;
        };
        match self.clipper.clip(op, &self.subject, &self.clip) {
            Ok(p) => {
                self.result = p;
                self.error = None;
                true
            }
            Err(e) => {
                self.result = Polygon::new();
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Clip to triangle strips and return true on success.
    pub fn tristrip_clip(&mut self, op: u32) -> bool {
        let Some(op) = self.parse_op(op) else {
            self.strips = TriStrip::new();
            return false;
        };
        match self.clipper.tristrip_clip(op, &self.subject, &self.clip) {
            Ok(t) => {
                self.strips = t;
                self.error = None;
                true
            }
            Err(e) => {
                self.strips = TriStrip::new();
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Message of the last failed call, if any.
    pub fn last_error(&self) -> Option<String> {
        self.error.clone()
    }

    pub fn contour_count(&self) -> u32 {
        self.result.num_contours() as u32
    }

    pub fn is_hole(&self, index: u32) -> bool {
        self.result.is_hole(index as usize)
    }

    /// Flat vertex positions of one result contour.
    pub fn get_contour(&self, index: u32) -> Vec<f64> {
        self.result
            .contour(index as usize)
            .map(|c| c.iter().flat_map(|v| [v.x, v.y]).collect())
            .unwrap_or_default()
    }

    pub fn strip_count(&self) -> u32 {
        self.strips.num_strips() as u32
    }

    /// Flat vertex positions of one strip.
    pub fn get_strip(&self, index: u32) -> Vec<f64> {
        self.strips
            .strips()
            .get(index as usize)
            .map(|s| s.iter().flat_map(|v| [v.x, v.y]).collect())
            .unwrap_or_default()
    }

    /// Every strip expanded to independent triangles [x0,y0, x1,y1, x2,y2, ...].
    pub fn get_triangles(&self) -> Vec<f64> {
        self.strips
            .triangles()
            .flat_map(|t| t.into_iter().flat_map(|v| [v.x, v.y]))
            .collect()
    }
}

impl ClipperJs {
    /// Map an op code, recording an error for unknown codes.
    fn parse_op(&mut self, op: u32) -> Option<ClipOp> {
        let parsed = clip_op(op);
        if parsed.is_none() {
            self.error = Some(format!("unknown clip operation {}", op));
        }
        parsed
    }
}

fn clip_op(op: u32) -> Option<ClipOp> {
    match op {
        0 => Some(ClipOp::Difference),
        1 => Some(ClipOp::Intersection),
        2 => Some(ClipOp::ExclusiveOr),
        3 => Some(ClipOp::Union),
        _ => None,
    }
}


/// Convenience: clip two single contours, returning the first result contour.
#[wasm_bindgen]
pub fn clip_contours(subject: &[f64], clip: &[f64], op: u32) -> Vec<f64> {
    let mut c = ClipperJs::new();
    c.add_subject_contour(subject, false);
    c.add_clip_contour(clip, false);
    if !c.clip(op) {
        return Vec::new();
    }
    c.get_contour(0)
}
