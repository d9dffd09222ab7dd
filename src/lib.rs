// vatti-clip: polygon boolean operations by scanbeam sweep
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod aet;
pub mod classify;
pub mod clip;
pub mod contour;
pub mod edge;
pub mod error;
pub mod geom;
pub mod io;
pub mod lmt;
pub mod polygon;
pub mod scanbeam;
pub mod sweep;
pub mod tristrip;
pub mod vertex_source;

pub use clip::{clip, polygon_to_tristrip, tristrip_clip, ClipOp, ClipOption, Clipper};
pub use error::{ClipError, FormatError};
pub use geom::{Bbox, Vertex, DEFAULT_EPSILON};
pub use io::{parse_polygon, read_polygon, write_polygon};
pub use polygon::{Contour, Polygon, TriStrip};
pub use vertex_source::{ClipSource, PathCommand, PolygonVertices, VertexSource};
