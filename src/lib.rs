#![no_std]

pub mod chrome;
pub mod clock;
pub mod collaborator;
pub mod color;
pub mod flow;
pub mod frame_scheduler;
pub mod geometry;
pub mod glyph;
pub mod grid;
pub mod intent;
pub mod mailbox;
pub mod renderer;
pub mod select;
pub mod staging;
pub mod touch;

pub use chrome::{Chrome, ChromeConfig};
pub use clock::{ClockConfig, MarbleClock};
pub use collaborator::{ClockReading, LightControl, TemperatureSource, TimeSource, TouchInput};
pub use flow::{MarbleFlow, Phase, PhaseKind};
pub use frame_scheduler::{FrameResult, FrameScheduler, IdleHook};
pub use geometry::{DrawRegion, Geometry, GeometryConfig, GeometryError, Point};
pub use glyph::{TimeText, TimeTextError};
pub use grid::{Channel, ChannelGrid, Occupancy, Slot};
pub use intent::{ClockIntent, IntentChannel, IntentReceiver, IntentSender};
pub use renderer::{RenderSurface, Renderer};
pub use select::{EveryRow, RandomRows, RowSelector, RowSet};
pub use staging::StagingBuffer;
pub use touch::{TouchAction, TouchQueue, TouchZones};

pub use chrono::NaiveDate;
pub use color::{Palette, Rgb};
pub use embassy_time::{Duration, Instant};
