//! Live channel grid
//!
//! Owns every slot of every channel. The flow machine mutates occupancy,
//! the renderer only reads it. Coordinates never change after construction.

use heapless::Vec;

use crate::geometry::{Geometry, PATH_MAX, Point, ROW_MAX};

/// Content of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occupancy {
    #[default]
    Empty,
    /// Token for a lit dot of a glyph
    Light,
    /// Token for an unlit dot of a glyph
    Dark,
}

impl Occupancy {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_token(self) -> bool {
        !self.is_empty()
    }
}

/// A single position of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub point: Point,
    pub occupancy: Occupancy,
}

/// Ordered slots of one row, head first
#[derive(Debug, Clone)]
pub struct Channel {
    slots: Vec<Slot, PATH_MAX>,
    stop: usize,
}

impl Channel {
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index where tokens queue for release
    pub const fn stop(&self) -> usize {
        self.stop
    }

    /// Index of the last slot, 0 for a channel without slots
    pub fn tail(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    /// Number of slots after the stop index
    pub fn tail_side_len(&self) -> usize {
        self.tail().saturating_sub(self.stop)
    }

    pub fn get(&self, index: usize) -> Occupancy {
        self.slots
            .get(index)
            .map_or(Occupancy::Empty, |slot| slot.occupancy)
    }

    pub fn set(&mut self, index: usize, occupancy: Occupancy) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.occupancy = occupancy;
        }
    }

    /// Move the token at `from` into the empty slot at `to`
    ///
    /// Returns `true` if a token moved.
    pub(crate) fn advance(&mut self, from: usize, to: usize) -> bool {
        let source = self.get(from);
        if source.is_empty() || self.get(to).is_token() {
            return false;
        }
        self.set(to, source);
        self.set(from, Occupancy::Empty);
        true
    }

    /// Whether no token has an empty slot directly ahead of it
    pub fn is_settled(&self) -> bool {
        self.slots
            .windows(2)
            .all(|pair| pair[0].occupancy.is_empty() || pair[1].occupancy.is_token())
    }

    /// Tokens in order from head to tail
    pub fn tokens(&self) -> impl Iterator<Item = Occupancy> + '_ {
        self.slots
            .iter()
            .map(|slot| slot.occupancy)
            .filter(|occupancy| occupancy.is_token())
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.occupancy = Occupancy::Empty;
        }
    }
}

/// Token tally of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenCounts {
    pub light: usize,
    pub dark: usize,
}

impl TokenCounts {
    pub const fn total(self) -> usize {
        self.light + self.dark
    }
}

/// All channels of the clock face
#[derive(Debug, Clone)]
pub struct ChannelGrid {
    channels: Vec<Channel, ROW_MAX>,
    columns: usize,
    dot_size: u16,
}

impl ChannelGrid {
    /// Create an empty grid from a computed geometry
    pub fn new(geometry: &Geometry) -> Self {
        let channels = geometry
            .channels
            .iter()
            .map(|layout| Channel {
                slots: layout
                    .points
                    .iter()
                    .map(|&point| Slot {
                        point,
                        occupancy: Occupancy::Empty,
                    })
                    .collect(),
                stop: layout.stop,
            })
            .collect();

        Self {
            channels,
            columns: geometry.columns,
            dot_size: geometry.dot_size,
        }
    }

    pub fn rows(&self) -> usize {
        self.channels.len()
    }

    /// Cells in each straight run
    pub const fn columns(&self) -> usize {
        self.columns
    }

    pub const fn dot_size(&self) -> u16 {
        self.dot_size
    }

    pub fn channel(&self, row: usize) -> Option<&Channel> {
        self.channels.get(row)
    }

    pub fn channel_mut(&mut self, row: usize) -> Option<&mut Channel> {
        self.channels.get_mut(row)
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [Channel] {
        &mut self.channels
    }

    /// Iterate over every slot of every channel
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.channels.iter().flat_map(|channel| channel.slots.iter())
    }

    /// Longest tail side over all channels
    pub fn max_tail_side_len(&self) -> usize {
        self.channels
            .iter()
            .map(Channel::tail_side_len)
            .max()
            .unwrap_or(0)
    }

    /// Slot index of a display column, counted from the tail
    pub fn display_index(&self, row: usize, column: usize) -> Option<usize> {
        let channel = self.channels.get(row)?;
        if column >= self.columns || channel.is_empty() {
            return None;
        }
        channel.tail().checked_sub(column)
    }

    /// Whether every display slot of every row is empty
    pub fn is_display_empty(&self) -> bool {
        (0..self.rows()).all(|row| {
            (0..self.columns).all(|column| {
                self.display_index(row, column)
                    .is_none_or(|index| self.channels[row].get(index).is_empty())
            })
        })
    }

    /// Count tokens by color
    pub fn counts(&self) -> TokenCounts {
        self.slots()
            .fold(TokenCounts::default(), |mut counts, slot| {
                match slot.occupancy {
                    Occupancy::Light => counts.light += 1,
                    Occupancy::Dark => counts.dark += 1,
                    Occupancy::Empty => {}
                }
                counts
            })
    }

    pub fn token_count(&self) -> usize {
        self.counts().total()
    }

    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.clear();
        }
    }
}
