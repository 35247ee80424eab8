//! Channel geometry
//!
//! Every display row owns one channel: a straight run of cells along the top,
//! a half circle on the left and a straight run along the bottom. Row radii
//! grow by one dot pitch per row so the arcs nest without touching.
//!
//! ```text
//!    .--<--<--<--<--<  head (index 0)
//!   /
//!  |  arc
//!   \
//!    '-->-->-->-->-->  tail (index len - 1)
//! ```

use core::f32::consts::PI;

use heapless::Vec;
use thiserror::Error;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::glyph::{GLYPH_HEIGHT, GLYPH_WIDTH, TIME_TEXT_LEN};

/// Maximum number of rows (channels)
pub const ROW_MAX: usize = 8;

/// Maximum number of slots in one channel
pub const PATH_MAX: usize = 128;

/// Maximum number of columns in a straight run
pub const COLUMN_MAX: usize = 40;

/// Number of columns needed to show a full `HH:MM` time
pub const STAGING_WIDTH: usize = TIME_TEXT_LEN * GLYPH_WIDTH;

/// Fraction of the arc after which tokens queue for release
const STOP_FRACTION: f32 = 0.25;

/// Screen coordinate of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Drawable part of the screen available to the channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DrawRegion {
    /// Region of a `width` x `height` screen below a reserved header band
    pub const fn below_header(width: i32, height: i32, header: i32) -> Self {
        Self {
            x: 0,
            y: header,
            width,
            height: height - header,
        }
    }

    /// Check if a point lies inside the region
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

/// Geometry parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Number of channels
    pub rows: usize,
    /// Cells in each straight run
    pub columns: usize,
    /// Token size in pixels
    pub dot_size: u16,
    /// Distance between neighbouring cells and between nested arcs
    pub dot_pitch: u16,
    /// Radius of the innermost arc, minus one
    pub min_radius: u16,
    /// Extra spacing between arc samples on top of the token size
    pub arc_margin: f32,
}

impl GeometryConfig {
    pub const DEFAULT: Self = Self {
        rows: GLYPH_HEIGHT,
        columns: STAGING_WIDTH,
        dot_size: 4,
        dot_pitch: 5,
        min_radius: 8,
        arc_margin: 2.5,
    };

    /// Radius of the arc of a row
    pub const fn radius(&self, row: usize) -> i32 {
        self.min_radius as i32 + 1 + row as i32 * self.dot_pitch as i32
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error returned when the geometry cannot be laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Row count is zero or exceeds [`ROW_MAX`]
    #[error("row count {0} outside 1..={max}", max = ROW_MAX)]
    Rows(usize),
    /// Column count is zero or exceeds [`COLUMN_MAX`]
    #[error("column count {0} outside 1..={max}", max = COLUMN_MAX)]
    Columns(usize),
    /// The arc of a row is too small to hold two samples
    #[error("arc of row {row} is too short")]
    ArcTooShort { row: usize },
    /// A channel needs more than [`PATH_MAX`] slots
    #[error("channel of row {row} needs {len} slots, capacity is {max}", max = PATH_MAX)]
    PathTooLong { row: usize, len: usize },
    #[error("channels do not fit into the draw region")]
    RegionTooSmall,
    /// The grid does not match the glyph dimensions of the clock face
    #[error("grid is {rows}x{columns}, clock face needs {h}x{w}", h = GLYPH_HEIGHT, w = STAGING_WIDTH)]
    GlyphMismatch { rows: usize, columns: usize },
}

/// Layout of a single channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLayout {
    /// Slot coordinates from head to tail
    pub points: Vec<Point, PATH_MAX>,
    /// Index where tokens queue for release
    pub stop: usize,
}

impl ChannelLayout {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Computed layout of all channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub channels: Vec<ChannelLayout, ROW_MAX>,
    pub columns: usize,
    pub dot_size: u16,
}

impl Geometry {
    /// Lay out all channels inside `region`
    ///
    /// The channels are centered in the region. Every channel holds `columns`
    /// head-side cells, the arc samples and `columns` tail-side cells.
    pub fn build(config: &GeometryConfig, region: DrawRegion) -> Result<Self, GeometryError> {
        if config.rows == 0 || config.rows > ROW_MAX {
            return Err(GeometryError::Rows(config.rows));
        }
        if config.columns == 0 || config.columns > COLUMN_MAX {
            return Err(GeometryError::Columns(config.columns));
        }

        let pitch = i32::from(config.dot_pitch);
        let dot = i32::from(config.dot_size);
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let columns = config.columns as i32;
        let max_radius = config.radius(config.rows - 1);

        let needed_width = max_radius + columns * pitch + dot;
        let needed_height = 2 * max_radius + dot;
        if needed_width > region.width || needed_height > region.height {
            return Err(GeometryError::RegionTooSmall);
        }
        let origin = Point::new(
            region.x + (region.width - needed_width) / 2 + max_radius,
            region.y + (region.height - needed_height) / 2 + max_radius,
        );

        let spacing = f32::from(config.dot_size) + config.arc_margin;
        let mut channels = Vec::new();
        for row in 0..config.rows {
            let layout = Self::channel(config, row, origin, spacing)?;
            // Row count was checked against ROW_MAX above
            let _ = channels.push(layout);
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[Geometry.build] {} channels, origin ({}, {})",
            channels.len(),
            origin.x,
            origin.y
        );

        Ok(Self {
            channels,
            columns: config.columns,
            dot_size: config.dot_size,
        })
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn channel(
        config: &GeometryConfig,
        row: usize,
        origin: Point,
        spacing: f32,
    ) -> Result<ChannelLayout, GeometryError> {
        let radius = config.radius(row);
        let pitch = i32::from(config.dot_pitch);
        let columns = config.columns;

        let arc_count = libm::floorf(PI * radius as f32 / spacing) as usize;
        if arc_count < 2 {
            return Err(GeometryError::ArcTooShort { row });
        }
        let len = 2 * columns + arc_count;
        if len > PATH_MAX {
            return Err(GeometryError::PathTooLong { row, len });
        }

        let mut points = Vec::new();
        let mut push = |point: Point| {
            // Length was checked against PATH_MAX above
            let _ = points.push(point);
        };

        // Top run, right to left
        for column in (0..columns).rev() {
            push(Point::new(
                origin.x + (column as i32 + 1) * pitch,
                origin.y - radius,
            ));
        }

        // Arc from the top, around the left side, to the bottom
        let last = (arc_count - 1) as f32;
        for i in 0..arc_count {
            let angle = 1.5 * PI - PI * i as f32 / last;
            push(Point::new(
                origin.x + libm::roundf(radius as f32 * libm::cosf(angle)) as i32,
                origin.y + libm::roundf(radius as f32 * libm::sinf(angle)) as i32,
            ));
        }

        // Bottom run, left to right
        for column in 0..columns {
            push(Point::new(
                origin.x + (column as i32 + 1) * pitch,
                origin.y + radius,
            ));
        }

        let stop = columns + libm::roundf(last * STOP_FRACTION) as usize;

        Ok(ChannelLayout { points, stop })
    }

    pub fn rows(&self) -> usize {
        self.channels.len()
    }
}
