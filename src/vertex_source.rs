// Copyright 2025 Lars Brubaker
// License: MIT
//
// Vertex-source adaptor.
//
// Path pipelines hand geometry around as a stream of commands pulled from a
// `VertexSource`. This module turns such streams into polygons, replays
// polygons as streams, and offers `ClipSource`, a pipeline stage that clips
// two upstream sources when rewound.

use log::warn;

use crate::clip::{ClipOp, Clipper};
use crate::geom::Vertex;
use crate::polygon::{Contour, Polygon};

/// One step of a path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Vertex),
    LineTo(Vertex),
    /// Close the current contour.
    EndPoly,
    /// No more commands until the next rewind.
    Stop,
}

/// A pull-based stream of path commands.
pub trait VertexSource {
    /// Restart at the beginning of path `path_id` (0 for the first or only
    /// path).
    fn rewind(&mut self, path_id: u32);

    fn next_command(&mut self) -> PathCommand;
}

/// Pipeline stages can borrow their source instead of owning it.
impl<T: VertexSource + ?Sized> VertexSource for &mut T {
    fn rewind(&mut self, path_id: u32) {
        (**self).rewind(path_id);
    }

    fn next_command(&mut self) -> PathCommand {
        (**self).next_command()
    }
}

impl Polygon {
    /// Collect every contour of path `path_id`. `MoveTo` and `EndPoly` both
    /// close the contour in progress; contours with fewer than 3 vertices
    /// are dropped. All contours are external: even-odd parity sorts out
    /// holes when the polygon is clipped.
    pub fn from_vertex_source<S: VertexSource + ?Sized>(src: &mut S, path_id: u32) -> Polygon {
        let mut polygon = Polygon::new();
        let mut current: Vec<Vertex> = Vec::new();
        fn flush(current: &mut Vec<Vertex>, polygon: &mut Polygon) {
            if current.len() >= 3 {
                polygon.add_contour(Contour::new(std::mem::take(current)), false);
            } else {
                current.clear();
            }
        }

        src.rewind(path_id);
        loop {
            match src.next_command() {
                PathCommand::MoveTo(v) => {
                    flush(&mut current, &mut polygon);
                    current.push(v);
                }
                PathCommand::LineTo(v) => current.push(v),
                PathCommand::EndPoly => flush(&mut current, &mut polygon),
                PathCommand::Stop => break,
            }
        }
        flush(&mut current, &mut polygon);
        polygon
    }
}

/// Replays a polygon as `MoveTo`, `LineTo`..., `EndPoly` per contour.
#[derive(Clone, Debug, Default)]
pub struct PolygonVertices {
    polygon: Polygon,
    contour: usize,
    vertex: usize,
}

impl PolygonVertices {
    pub fn new(polygon: Polygon) -> Self {
        PolygonVertices {
            polygon,
            contour: 0,
            vertex: 0,
        }
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn into_polygon(self) -> Polygon {
        self.polygon
    }
}

impl VertexSource for PolygonVertices {
    fn rewind(&mut self, _path_id: u32) {
        self.contour = 0;
        self.vertex = 0;
    }

    fn next_command(&mut self) -> PathCommand {
        let Some(contour) = self.polygon.contour(self.contour) else {
            return PathCommand::Stop;
        };
        let i = self.vertex;
        if i == contour.len() {
            self.contour += 1;
            self.vertex = 0;
            return PathCommand::EndPoly;
        }
        self.vertex += 1;
        let v = contour.vertices()[i];
        if i == 0 {
            PathCommand::MoveTo(v)
        } else {
            PathCommand::LineTo(v)
        }
    }
}

/// Clips the output of two sources. Rewinding reads path `path_id` of both
/// sources, clips them, and replays the result.
pub struct ClipSource<A, B> {
    subject: A,
    clip: B,
    op: ClipOp,
    clipper: Clipper,
    result: PolygonVertices,
}

impl<A: VertexSource, B: VertexSource> ClipSource<A, B> {
    pub fn new(subject: A, clip: B, op: ClipOp) -> Self {
        ClipSource {
            subject,
            clip,
            op,
            clipper: Clipper::new(),
            result: PolygonVertices::default(),
        }
    }

    pub fn set_operation(&mut self, op: ClipOp) {
        self.op = op;
    }

    pub fn clipper_mut(&mut self) -> &mut Clipper {
        &mut self.clipper
    }

    /// Result of the last rewind.
    pub fn result(&self) -> &Polygon {
        self.result.polygon()
    }
}

impl<A: VertexSource, B: VertexSource> VertexSource for ClipSource<A, B> {
    fn rewind(&mut self, path_id: u32) {
        let subject = Polygon::from_vertex_source(&mut self.subject, path_id);
        let clip = Polygon::from_vertex_source(&mut self.clip, path_id);
        let result = match self.clipper.clip(self.op, &subject, &clip) {
            Ok(p) => p,
            Err(e) => {
                warn!("clip source: {}, emitting nothing", e);
                Polygon::new()
            }
        };
        self.result = PolygonVertices::new(result);
    }

    fn next_command(&mut self) -> PathCommand {
        self.result.next_command()
    }
}
