use smart_leds::RGB8;

use crate::grid::Occupancy;

pub type Rgb = RGB8;

/// Create a color from a `0xRRGGBB` value
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(hex: u32) -> Rgb {
    Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}

/// Pack a color into the RGB565 format used by 16-bit TFT panels
#[allow(clippy::cast_lossless)]
pub const fn rgb565(color: Rgb) -> u16 {
    ((color.r as u16 & 0xF8) << 8) | ((color.g as u16 & 0xFC) << 3) | (color.b as u16 >> 3)
}

/// Colors of the three slot states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Empty slot (background)
    pub empty: Rgb,
    /// Token of a lit glyph dot
    pub light: Rgb,
    /// Token of an unlit glyph dot
    pub dark: Rgb,
}

impl Palette {
    #[allow(clippy::unreadable_literal)]
    pub const DEFAULT: Self = Self {
        empty: rgb_from_u32(0x000000),
        light: rgb_from_u32(0xFFFF00),
        dark: rgb_from_u32(0x0000FF),
    };

    pub const fn color(&self, occupancy: Occupancy) -> Rgb {
        match occupancy {
            Occupancy::Empty => self.empty,
            Occupancy::Light => self.light,
            Occupancy::Dark => self.dark,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}
