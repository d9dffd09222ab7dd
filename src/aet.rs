// Copyright 2025 Lars Brubaker
// License: MIT
//
// Active edge table: the edges crossing the sweep line, kept in X order.
//
// Keys are edge indices. Ordering is supplied by the caller as a `before`
// predicate, so the table itself knows nothing about edge geometry except
// for bundle membership when two bundles trade places.

use crate::edge::{BundleState, Edge, EdgeIdx, ABOVE};

#[derive(Clone, Debug, Default)]
pub struct ActiveEdgeTable {
    order: Vec<EdgeIdx>,
}

impl ActiveEdgeTable {
    pub fn new() -> Self {
        ActiveEdgeTable { order: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn get(&self, pos: usize) -> EdgeIdx {
        self.order[pos]
    }

    #[inline]
    pub fn set(&mut self, pos: usize, key: EdgeIdx) {
        self.order[pos] = key;
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        self.order.iter().copied()
    }

    pub fn position(&self, key: EdgeIdx) -> Option<usize> {
        self.order.iter().position(|&k| k == key)
    }

    /// Insert `key` in front of the first entry it sorts `before`, or at the
    /// back if there is none.
    pub fn insert<F>(&mut self, key: EdgeIdx, before: F) -> usize
    where
        F: Fn(EdgeIdx, EdgeIdx) -> bool,
    {
        let pos = self
            .order
            .iter()
            .position(|&k| before(key, k))
            .unwrap_or(self.order.len());
        self.order.insert(pos, key);
        pos
    }

    /// Keep only the entries for which `keep` returns true. `keep` sees each
    /// entry in order together with the entries kept so far.
    pub fn retain_with<F>(&mut self, mut keep: F)
    where
        F: FnMut(EdgeIdx, &[EdgeIdx]) -> bool,
    {
        let mut kept = Vec::with_capacity(self.order.len());
        for &k in &self.order {
            if keep(k, &kept) {
                kept.push(k);
            }
        }
        self.order = kept;
    }

    /// Exchange the bundle headed by `e0` with the bundle that follows it,
    /// which ends at `e1`. The tails of a bundle sit immediately before its
    /// head. Returns false if `e1` does not follow `e0`.
    pub fn swap_bundles(&mut self, edges: &[Edge], e0: EdgeIdx, e1: EdgeIdx) -> bool {
        let (i0, i1) = match (self.position(e0), self.position(e1)) {
            (Some(i0), Some(i1)) if i0 < i1 => (i0, i1),
            _ => return false,
        };
        let mut start = i0;
        if edges[e0 as usize].bstate[ABOVE] == BundleState::Head {
            while start > 0 && edges[self.order[start - 1] as usize].bstate[ABOVE] == BundleState::Tail {
                start -= 1;
            }
        }
        self.order[start..=i1].rotate_left(i0 - start + 1);
        true
    }

    /// Nearest entry left of `pos` satisfying `pred`.
    pub fn find_prev<F>(&self, pos: usize, pred: F) -> Option<EdgeIdx>
    where
        F: Fn(EdgeIdx) -> bool,
    {
        self.order[..pos].iter().rev().copied().find(|&k| pred(k))
    }

    /// Nearest entry right of `pos` satisfying `pred`.
    pub fn find_next<F>(&self, pos: usize, pred: F) -> Option<EdgeIdx>
    where
        F: Fn(EdgeIdx) -> bool,
    {
        self.order.get(pos + 1..)?.iter().copied().find(|&k| pred(k))
    }
}
