//! Grid painting
//!
//! The renderer keeps no state between frames: it walks every slot and
//! paints it with the palette color of its occupancy.

use crate::color::{Palette, Rgb};
use crate::geometry::Point;
use crate::grid::{ChannelGrid, Slot};

/// Abstract drawing surface
///
/// Implement this trait on top of the display driver. Dimensions exclude
/// any header band reserved by the surrounding chrome.
pub trait RenderSurface {
    /// Fill a `size` x `size` square with its top-left corner at `point`
    fn paint_slot(&mut self, point: Point, color: Rgb, size: u16);

    fn width(&self) -> i32;

    fn height(&self) -> i32;
}

/// Paints slots with a fixed token size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    palette: Palette,
    dot_size: u16,
}

impl Renderer {
    pub const fn new(palette: Palette, dot_size: u16) -> Self {
        Self { palette, dot_size }
    }

    /// Paint a single slot
    pub fn paint<S: RenderSurface + ?Sized>(&self, surface: &mut S, slot: &Slot) {
        surface.paint_slot(
            slot.point,
            self.palette.color(slot.occupancy),
            self.dot_size,
        );
    }

    /// Paint every slot of the grid
    pub fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S, grid: &ChannelGrid) {
        for slot in grid.slots() {
            self.paint(surface, slot);
        }
    }

    pub const fn palette(&self) -> Palette {
        self.palette
    }

    pub const fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }
}
