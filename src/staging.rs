//! Hidden staging buffer
//!
//! Holds the encoded tokens of the next time value until they are injected
//! into the channel heads. Columns are in reading order; each row pops its
//! own columns from the right end independently of the other rows.

use heapless::Vec;

use crate::geometry::{COLUMN_MAX, ROW_MAX, STAGING_WIDTH};
use crate::glyph::{GLYPH_HEIGHT, GLYPH_WIDTH, TimeText};
use crate::grid::Occupancy;

/// Off-screen tokens waiting for injection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingBuffer {
    /// `cells[column][row]`
    cells: Vec<[Occupancy; ROW_MAX], COLUMN_MAX>,
    /// Next column to inject per row, `None` once the row is exhausted
    cursors: [Option<usize>; ROW_MAX],
}

impl StagingBuffer {
    /// Encode a time value
    ///
    /// Glyphs are laid out left to right. Within a glyph the bitmap columns
    /// are read right to left, which puts them in reading order here, so the
    /// rightmost column is popped (and travels furthest) first.
    pub fn encode(time: &TimeText) -> Self {
        let mut cells: Vec<[Occupancy; ROW_MAX], COLUMN_MAX> = Vec::new();
        for glyph in time.glyphs() {
            for column in (0..GLYPH_WIDTH).rev() {
                let bits = glyph[column];
                let mut cell = [Occupancy::Empty; ROW_MAX];
                for (row, occupancy) in cell.iter_mut().take(GLYPH_HEIGHT).enumerate() {
                    // Row 0 is the top of the face, bit 0 the bottom of the glyph
                    let lit = (bits >> (GLYPH_HEIGHT - 1 - row)) & 1 == 1;
                    *occupancy = if lit { Occupancy::Light } else { Occupancy::Dark };
                }
                // STAGING_WIDTH <= COLUMN_MAX
                let _ = cells.push(cell);
            }
        }

        let mut buffer = Self {
            cells,
            cursors: [None; ROW_MAX],
        };
        buffer.rewind();
        buffer
    }

    /// Reset every row cursor to the last column
    pub fn rewind(&mut self) {
        let last = self.cells.len().checked_sub(1);
        for (row, cursor) in self.cursors.iter_mut().enumerate() {
            *cursor = if row < GLYPH_HEIGHT { last } else { None };
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, column: usize, row: usize) -> Occupancy {
        self.cells
            .get(column)
            .and_then(|cell| cell.get(row))
            .copied()
            .unwrap_or(Occupancy::Empty)
    }

    /// Next column that `row` will inject, if any
    pub fn cursor(&self, row: usize) -> Option<usize> {
        self.cursors.get(row).copied().flatten()
    }

    /// Whether `row` has nothing left to inject
    pub fn is_exhausted(&self, row: usize) -> bool {
        self.cursor(row).is_none()
    }

    /// Take the next token for `row`, moving its cursor one column left
    ///
    /// Returns [`Occupancy::Empty`] once the row is exhausted.
    pub fn pop(&mut self, row: usize) -> Occupancy {
        let Some(cursor) = self.cursors.get_mut(row) else {
            return Occupancy::Empty;
        };
        let Some(column) = *cursor else {
            return Occupancy::Empty;
        };
        *cursor = column.checked_sub(1);
        self.cells
            .get(column)
            .and_then(|cell| cell.get(row))
            .copied()
            .unwrap_or(Occupancy::Empty)
    }

    /// Tokens not yet injected across all rows
    pub fn remaining(&self) -> usize {
        self.cursors
            .iter()
            .flatten()
            .map(|column| column + 1)
            .sum()
    }
}

impl Default for StagingBuffer {
    /// An exhausted buffer
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            cursors: [None; ROW_MAX],
        }
    }
}

const _: () = assert!(STAGING_WIDTH <= COLUMN_MAX);
const _: () = assert!(GLYPH_HEIGHT <= ROW_MAX);
