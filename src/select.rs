//! Per-tick row selection for injection
//!
//! Injecting into a random subset of rows each tick makes the fill cascade
//! irregularly instead of moving as one rigid wavefront.

use rand::{Rng, RngCore};

use crate::geometry::ROW_MAX;

/// Set of row indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowSet(u16);

impl RowSet {
    pub const EMPTY: Self = Self(0);

    /// Set containing rows `0..rows`
    pub const fn all(rows: usize) -> Self {
        if rows >= 16 {
            return Self(u16::MAX);
        }
        Self((1 << rows) - 1)
    }

    pub const fn insert(&mut self, row: usize) {
        if row < 16 {
            self.0 |= 1 << row;
        }
    }

    pub const fn contains(self, row: usize) -> bool {
        row < 16 && self.0 & (1 << row) != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Source of the rows that inject a token this tick
pub trait RowSelector {
    /// Pick the rows (out of `0..rows`) that receive an injection
    fn select(&mut self, rows: usize) -> RowSet;
}

/// Selects a uniformly random count of rows, then a random subset of that size
#[derive(Debug, Clone)]
pub struct RandomRows<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RandomRows<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> RowSelector for RandomRows<R> {
    fn select(&mut self, rows: usize) -> RowSet {
        let rows = rows.min(ROW_MAX);
        if rows == 0 {
            return RowSet::EMPTY;
        }
        let count = self.rng.gen_range(0..=rows);

        // Partial Fisher-Yates over the row indices
        let mut order = [0usize; ROW_MAX];
        for (i, row) in order.iter_mut().enumerate() {
            *row = i;
        }
        let mut picked = RowSet::EMPTY;
        for i in 0..count {
            let j = self.rng.gen_range(i..rows);
            order.swap(i, j);
            picked.insert(order[i]);
        }
        picked
    }
}

/// Selects every row on every tick
#[derive(Debug, Clone, Copy, Default)]
pub struct EveryRow;

impl RowSelector for EveryRow {
    fn select(&mut self, rows: usize) -> RowSet {
        RowSet::all(rows)
    }
}

impl<T: RowSelector + ?Sized> RowSelector for &mut T {
    fn select(&mut self, rows: usize) -> RowSet {
        (**self).select(rows)
    }
}
