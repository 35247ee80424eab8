//! Bitmap glyphs for the clock digits
//!
//! Each glyph is [`GLYPH_WIDTH`] columns of [`GLYPH_HEIGHT`] bits. Columns are
//! stored right to left (index 0 is the rightmost column on screen) and bit 0
//! of each column is the lowest dot.

use core::fmt;

use thiserror::Error;

/// Number of bitmap columns per glyph
pub const GLYPH_WIDTH: usize = 5;

/// Number of bitmap rows per glyph
pub const GLYPH_HEIGHT: usize = 7;

/// Number of characters in a time string (`HH:MM`)
pub const TIME_TEXT_LEN: usize = 5;

/// Column bitmap of a single glyph
pub type Glyph = [u8; GLYPH_WIDTH];

const GLYPH_COLON: Glyph = [0b000_0000, 0b000_0000, 0b011_0110, 0b011_0110, 0b000_0000];

const GLYPH_DIGITS: [Glyph; 10] = [
    [0b011_1110, 0b101_0001, 0b100_1001, 0b100_0101, 0b011_1110], // 0
    [0b000_0000, 0b000_0001, 0b111_1111, 0b010_0001, 0b000_0000], // 1
    [0b011_0001, 0b100_1001, 0b100_0101, 0b100_0011, 0b010_0001], // 2
    [0b100_0110, 0b110_1001, 0b101_0001, 0b100_0001, 0b100_0010], // 3
    [0b000_0100, 0b111_1111, 0b010_0100, 0b001_0100, 0b000_1100], // 4
    [0b100_1110, 0b101_0001, 0b101_0001, 0b101_0001, 0b111_0010], // 5
    [0b000_0110, 0b100_1001, 0b100_1001, 0b010_1001, 0b001_1110], // 6
    [0b110_0000, 0b101_0000, 0b100_1000, 0b100_0111, 0b100_0000], // 7
    [0b011_0110, 0b100_1001, 0b100_1001, 0b100_1001, 0b011_0110], // 8
    [0b011_1100, 0b100_1010, 0b100_1001, 0b100_1001, 0b011_0000], // 9
];

/// Returns the bitmap for a digit or colon, `None` for anything else
pub const fn glyph(ch: u8) -> Option<&'static Glyph> {
    match ch {
        b'0'..=b'9' => Some(&GLYPH_DIGITS[(ch - b'0') as usize]),
        b':' => Some(&GLYPH_COLON),
        _ => None,
    }
}

/// Checks a single dot of a glyph in reading coordinates
///
/// `x` counts columns from the left, `y` counts rows from the top.
pub const fn is_lit(glyph: &Glyph, x: usize, y: usize) -> bool {
    if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
        return false;
    }
    let column = glyph[GLYPH_WIDTH - 1 - x];
    (column >> (GLYPH_HEIGHT - 1 - y)) & 1 == 1
}

/// Error returned when a string is not a valid `HH:MM` time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeTextError {
    #[error("time text must be exactly {len} characters", len = TIME_TEXT_LEN)]
    Length,
    /// A character outside `0-9` / `:` or a misplaced colon
    #[error("unexpected byte {0:#04x} in time text")]
    Character(u8),
    /// Hours above 23 or minutes above 59
    #[error("hours or minutes out of range")]
    OutOfRange,
}

/// Validated `HH:MM` time string
///
/// Every character is guaranteed to have a glyph, so encoding never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeText([u8; TIME_TEXT_LEN]);

impl TimeText {
    /// Parse a `HH:MM` string
    pub fn parse(text: &str) -> Result<Self, TimeTextError> {
        let bytes: [u8; TIME_TEXT_LEN] =
            text.as_bytes().try_into().map_err(|_| TimeTextError::Length)?;

        for (i, &ch) in bytes.iter().enumerate() {
            let valid = if i == 2 { ch == b':' } else { ch.is_ascii_digit() };
            if !valid {
                return Err(TimeTextError::Character(ch));
            }
        }

        let hours = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minutes = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        Self::from_hm(hours, minutes)
    }

    /// Build a time string from hours and minutes
    pub const fn from_hm(hours: u8, minutes: u8) -> Result<Self, TimeTextError> {
        if hours > 23 || minutes > 59 {
            return Err(TimeTextError::OutOfRange);
        }
        Ok(Self([
            b'0' + hours / 10,
            b'0' + hours % 10,
            b':',
            b'0' + minutes / 10,
            b'0' + minutes % 10,
        ]))
    }

    pub const fn as_bytes(&self) -> &[u8; TIME_TEXT_LEN] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII digits and ':' are ever stored
        core::str::from_utf8(&self.0).unwrap_or("00:00")
    }

    /// Iterate over the glyphs of this time, left to right
    pub fn glyphs(&self) -> impl Iterator<Item = &'static Glyph> + '_ {
        self.0.iter().filter_map(|&ch| glyph(ch))
    }
}

impl fmt::Display for TimeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
