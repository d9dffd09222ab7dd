// Copyright 2025 Lars Brubaker
// License: MIT
//
// Plain-text polygon format.
//
//     <contour count>
//     per contour:
//         [<hole flag 0|1>]      only when hole flags are enabled
//         <vertex count>
//         <x> <y>                one line per vertex
//
// Tokens are whitespace-separated, so line breaks are not significant when
// reading. Coordinates are written in shortest round-trip form, which makes
// reading back a written polygon exact.

use std::io::{Read, Write};

use crate::error::FormatError;
use crate::geom::Vertex;
use crate::polygon::{Contour, Polygon};

struct Tokens<'a> {
    inner: std::str::SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Tokens {
            inner: text.split_ascii_whitespace(),
        }
    }

    fn take(&mut self, what: &'static str) -> Result<&'a str, FormatError> {
        self.inner.next().ok_or(FormatError::UnexpectedEof(what))
    }

    fn int(&mut self, what: &'static str) -> Result<i64, FormatError> {
        let tok = self.take(what)?;
        tok.parse().map_err(|_| FormatError::Malformed {
            what,
            token: tok.to_string(),
        })
    }

    fn float(&mut self, what: &'static str) -> Result<f64, FormatError> {
        let tok = self.take(what)?;
        tok.parse().map_err(|_| FormatError::Malformed {
            what,
            token: tok.to_string(),
        })
    }
}

/// Parse a polygon from text. Without `hole_flags` every contour is external.
pub fn parse_polygon(text: &str, hole_flags: bool) -> Result<Polygon, FormatError> {
    let mut tokens = Tokens::new(text);
    let count = tokens.int("contour count")?;
    if count < 0 {
        return Err(FormatError::Malformed {
            what: "contour count",
            token: count.to_string(),
        });
    }

    let mut polygon = Polygon::new();
    for c in 0..count as usize {
        let hole = if hole_flags {
            match tokens.int("hole flag")? {
                0 => false,
                1 => true,
                other => return Err(FormatError::InvalidHoleFlag(other)),
            }
        } else {
            false
        };
        let n = tokens.int("vertex count")?;
        if n < 3 {
            return Err(FormatError::TooFewVertices { contour: c, vertices: n });
        }
        // The count is untrusted; grow as vertices actually arrive.
        let mut vertices = Vec::new();
        for _ in 0..n {
            let x = tokens.float("x coordinate")?;
            let y = tokens.float("y coordinate")?;
            vertices.push(Vertex::new(x, y));
        }
        polygon.add_contour(Contour::new(vertices), hole);
    }
    Ok(polygon)
}

/// Read a whole polygon from `reader`.
pub fn read_polygon<R: Read>(mut reader: R, hole_flags: bool) -> Result<Polygon, FormatError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_polygon(&text, hole_flags)
}

/// Write `polygon` to `writer`, with a hole flag per contour if requested.
pub fn write_polygon<W: Write>(mut writer: W, polygon: &Polygon, hole_flags: bool) -> Result<(), FormatError> {
    writeln!(writer, "{}", polygon.num_contours())?;
    for (contour, hole) in polygon.iter() {
        if hole_flags {
            writeln!(writer, "{}", hole as u8)?;
        }
        writeln!(writer, "{}", contour.len())?;
        for v in contour {
            writeln!(writer, "{} {}", v.x, v.y)?;
        }
    }
    writer.flush()?;
    Ok(())
}
