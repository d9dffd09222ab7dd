// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error types for clipping and for the polygon text format.

use thiserror::Error;

/// Input rejected before any sweep state is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClipError {
    #[error("polygon has {contours} contours but {holes} hole flags")]
    HoleFlagMismatch { contours: usize, holes: usize },

    #[error("contour {contour} has {vertices} vertices, at least 3 are required")]
    TooFewVertices { contour: usize, vertices: usize },

    #[error("contour {contour} has a non-finite coordinate at vertex {vertex}")]
    NonFiniteCoordinate { contour: usize, vertex: usize },
}

/// Failure while reading or writing the polygon text format.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("malformed {what}: {token:?}")]
    Malformed { what: &'static str, token: String },

    #[error("invalid hole flag {0}, expected 0 or 1")]
    InvalidHoleFlag(i64),

    #[error("contour {contour} declares {vertices} vertices, at least 3 are required")]
    TooFewVertices { contour: usize, vertices: i64 },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
