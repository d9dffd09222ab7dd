// Copyright 2025 Lars Brubaker
// License: MIT
//
// Scanbeam table: the distinct Y coordinates of every optimal vertex, kept
// sorted ascending. The sweep line stops at each entry.
//
// Insertion is a binary search into a sorted Vec, so pathological inputs
// with many distinct Y values never recurse.

use std::cmp::Ordering;

#[derive(Clone, Debug, Default)]
pub struct ScanbeamTable {
    ys: Vec<f64>,
}

impl ScanbeamTable {
    pub fn new() -> Self {
        ScanbeamTable { ys: Vec::new() }
    }

    /// Record `y`, ignoring exact duplicates.
    pub fn insert(&mut self, y: f64) {
        // Inputs are validated finite, so partial_cmp only fails on NaN.
        match self
            .ys
            .binary_search_by(|p| p.partial_cmp(&y).unwrap_or(Ordering::Less))
        {
            Ok(_) => {}
            Err(pos) => self.ys.insert(pos, y),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.ys.get(i).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.ys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_and_deduplicated() {
        let mut sbt = ScanbeamTable::new();
        for y in [5.0, 1.0, 3.0, 5.0, 1.0, -2.0, 3.0] {
            sbt.insert(y);
        }
        assert_eq!(sbt.as_slice(), &[-2.0, 1.0, 3.0, 5.0]);
        assert_eq!(sbt.len(), 4);
        assert_eq!(sbt.get(1), Some(1.0));
        assert_eq!(sbt.get(4), None);
    }

    #[test]
    fn signed_zero_is_one_entry() {
        let mut sbt = ScanbeamTable::new();
        sbt.insert(0.0);
        sbt.insert(-0.0);
        assert_eq!(sbt.len(), 1);
    }

    #[test]
    fn many_distinct_values() {
        let mut sbt = ScanbeamTable::new();
        for i in (0..10_000).rev() {
            sbt.insert(i as f64);
        }
        assert_eq!(sbt.len(), 10_000);
        assert!(sbt.as_slice().windows(2).all(|w| w[0] < w[1]));
    }
}
