//! Touch input for the header band
//!
//! Touch controllers usually report from an interrupt, so points are queued
//! in a [`TouchQueue`] and polled once per tick.

use crate::collaborator::TouchInput;
use crate::geometry::{DrawRegion, Point};
use crate::mailbox::{Mailbox, Receiver};

/// Queue of touch points
pub type TouchQueue<const SIZE: usize> = Mailbox<Point, SIZE>;

impl<const SIZE: usize> TouchInput for Receiver<'_, Point, SIZE> {
    fn poll(&mut self) -> Option<Point> {
        self.try_receive()
    }
}

/// What a touch should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// Flip the smart light on or off
    ToggleLight,
    /// Open or close the settings screen
    ToggleSettings,
}

/// Touch-sensitive areas of the header band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchZones {
    pub light: DrawRegion,
    pub settings: DrawRegion,
}

impl TouchZones {
    /// Light bulb in the middle of the header, settings at its right end
    pub const fn header(width: i32, header_height: i32) -> Self {
        Self {
            light: DrawRegion {
                x: (width - header_height) / 2,
                y: 0,
                width: header_height,
                height: header_height,
            },
            settings: DrawRegion {
                x: width - header_height,
                y: 0,
                width: header_height,
                height: header_height,
            },
        }
    }

    /// Map a touch point to its action
    pub const fn hit(&self, point: Point) -> Option<TouchAction> {
        if self.light.contains(point) {
            Some(TouchAction::ToggleLight)
        } else if self.settings.contains(point) {
            Some(TouchAction::ToggleSettings)
        } else {
            None
        }
    }
}
