//! Marble flow state machine
//!
//! Moves the clock face from one time value to the next in four phases:
//!
//! 1. [`Phase::AcquireTime`] waits for a new time value and stages it.
//! 2. [`Phase::FillTop`] injects staged tokens at the channel heads and lets
//!    them queue up behind the stop index until the release deadline.
//! 3. [`Phase::DrainBottom`] drops the previously shown value out of the
//!    tail runs, column by column.
//! 4. [`Phase::FillBottom`] opens the stop and lets the queued tokens roll
//!    into the tail runs, where they form the new value.
//!
//! Each phase handler takes the phase data by value and returns the next
//! phase, so phase-local counters never outlive their phase.

mod acquire;
mod drain_bottom;
mod fill_bottom;
mod fill_top;

use chrono::NaiveDate;
use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::collaborator::TimeSource;
use crate::geometry::{GeometryError, STAGING_WIDTH};
use crate::glyph::{GLYPH_HEIGHT, TimeText};
use crate::grid::ChannelGrid;
use crate::select::RowSelector;
use crate::staging::StagingBuffer;

pub use drain_bottom::rotate_column;
pub use fill_bottom::release;
pub use fill_top::{inject, shift_queue};

/// Default time a new value spends in the top queue before release
pub const DEFAULT_HOLD: Duration = Duration::from_secs(20);

/// Current phase with its phase-local data
#[derive(Debug, Clone)]
pub enum Phase {
    /// Waiting for a time value different from the one on display
    AcquireTime,
    /// Injecting the staged value until the release deadline
    FillTop {
        staging: StagingBuffer,
        release_at: Instant,
    },
    /// Dropping the old value out of the tail runs
    DrainBottom {
        /// Number of tail columns currently rotating
        frontier: usize,
    },
    /// Rolling the queued value into the tail runs
    FillBottom,
}

/// Phase discriminant for external observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    AcquireTime,
    FillTop,
    DrainBottom,
    FillBottom,
}

impl Phase {
    pub const fn kind(&self) -> PhaseKind {
        match self {
            Self::AcquireTime => PhaseKind::AcquireTime,
            Self::FillTop { .. } => PhaseKind::FillTop,
            Self::DrainBottom { .. } => PhaseKind::DrainBottom,
            Self::FillBottom => PhaseKind::FillBottom,
        }
    }
}

impl PhaseKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AcquireTime => "acquire_time",
            Self::FillTop => "fill_top",
            Self::DrainBottom => "drain_bottom",
            Self::FillBottom => "fill_bottom",
        }
    }
}

/// Drives a [`ChannelGrid`] through the four flow phases
pub struct MarbleFlow<S: RowSelector> {
    phase: Phase,
    selector: S,
    hold: Duration,
    shown: Option<TimeText>,
    date: Option<NaiveDate>,
}

impl<S: RowSelector> MarbleFlow<S> {
    /// Create a flow machine for `grid`
    ///
    /// The grid must have one row per glyph row and one column per staged
    /// column.
    pub fn new(grid: &ChannelGrid, selector: S, hold: Duration) -> Result<Self, GeometryError> {
        if grid.rows() != GLYPH_HEIGHT || grid.columns() != STAGING_WIDTH {
            return Err(GeometryError::GlyphMismatch {
                rows: grid.rows(),
                columns: grid.columns(),
            });
        }
        Ok(Self {
            phase: Phase::AcquireTime,
            selector,
            hold,
            shown: None,
            date: None,
        })
    }

    /// Run one tick of the current phase
    ///
    /// Returns the phase the machine is in after the tick.
    pub fn step<T: TimeSource>(
        &mut self,
        grid: &mut ChannelGrid,
        time: &mut T,
        now: Instant,
    ) -> PhaseKind {
        let phase = core::mem::replace(&mut self.phase, Phase::AcquireTime);
        #[cfg(feature = "esp32-log")]
        let before = phase.kind();

        self.phase = match phase {
            Phase::AcquireTime => {
                acquire::acquire(&mut self.shown, &mut self.date, time, now, self.hold)
            }
            Phase::FillTop {
                staging,
                release_at,
            } => fill_top::fill_top(grid, staging, release_at, &mut self.selector, now),
            Phase::DrainBottom { frontier } => drain_bottom::drain_bottom(grid, frontier),
            Phase::FillBottom => fill_bottom::fill_bottom(grid),
        };

        #[cfg(feature = "esp32-log")]
        if before != self.phase.kind() {
            println!(
                "[MarbleFlow.step] {} -> {} at {}ms",
                before.as_str(),
                self.phase.kind().as_str(),
                now.as_millis()
            );
        }
        self.phase.kind()
    }

    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    pub const fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// Drain frontier, while draining
    pub const fn frontier(&self) -> Option<usize> {
        match self.phase {
            Phase::DrainBottom { frontier } => Some(frontier),
            _ => None,
        }
    }

    /// Last accepted time value
    pub const fn shown(&self) -> Option<TimeText> {
        self.shown
    }

    /// Date of the last time reading
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub const fn hold(&self) -> Duration {
        self.hold
    }

    /// Change the hold duration, effective from the next accepted time value
    pub const fn set_hold(&mut self, hold: Duration) {
        self.hold = hold;
    }

    pub fn selector_mut(&mut self) -> &mut S {
        &mut self.selector
    }
}
