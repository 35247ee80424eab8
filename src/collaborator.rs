//! Boundary traits for the world outside the clock face
//!
//! Implement these on top of the platform: network time, the smart-home API,
//! the touch controller.

use chrono::{DateTime, NaiveDate};

use crate::geometry::Point;
use crate::glyph::TimeText;

/// Time value read from the wall clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub text: TimeText,
    /// Seconds since the Unix epoch
    pub epoch: u64,
}

impl ClockReading {
    /// Calendar date of `epoch` in UTC
    ///
    /// `None` if the timestamp is outside the range `chrono` can represent.
    pub fn date(&self) -> Option<NaiveDate> {
        let secs = i64::try_from(self.epoch).ok()?;
        DateTime::from_timestamp(secs, 0).map(|moment| moment.date_naive())
    }
}

/// Pull-based wall-clock source
pub trait TimeSource {
    /// Read the current time, `None` if the source is not available yet
    fn read(&mut self) -> Option<ClockReading>;
}

/// Smart-light control
pub trait LightControl {
    type Error: core::fmt::Debug;
    /// Light identifier
    type Id: Clone;

    /// List the available lights
    ///
    /// Identifiers are written into `found`; returns how many were written.
    fn discover(&mut self, found: &mut [Self::Id]) -> Result<usize, Self::Error>;

    /// Whether the light is on
    fn state(&mut self, id: &Self::Id) -> Result<bool, Self::Error>;

    fn set_state(&mut self, id: &Self::Id, on: bool) -> Result<(), Self::Error>;
}

/// Ambient temperature lookup
pub trait TemperatureSource {
    type Error: core::fmt::Debug;

    /// Temperature in degrees for a location or sensor entity
    fn temperature(&mut self, location: &str) -> Result<f32, Self::Error>;
}

/// Touch controller, queried once per tick
pub trait TouchInput {
    /// Touched screen coordinate, if any
    fn poll(&mut self) -> Option<Point>;
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn read(&mut self) -> Option<ClockReading> {
        (**self).read()
    }
}
