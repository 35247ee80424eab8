use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::collaborator::TimeSource;
use crate::color::Palette;
use crate::flow::{DEFAULT_HOLD, MarbleFlow, PhaseKind};
use crate::geometry::{DrawRegion, Geometry, GeometryConfig, GeometryError};
use crate::grid::ChannelGrid;
use crate::intent::{IntentEffects, IntentProcessor, IntentReceiver};
use crate::renderer::{RenderSurface, Renderer};
use crate::select::RowSelector;

/// Configuration for the clock face
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    pub geometry: GeometryConfig,
    /// Part of the screen the channels may use
    pub region: DrawRegion,
    /// Time a new value is held in the top queue before release
    pub hold: Duration,
    pub palette: Palette,
}

impl ClockConfig {
    /// Default configuration for a screen of the given size
    pub const fn for_screen(width: i32, height: i32, header: i32) -> Self {
        Self {
            geometry: GeometryConfig::DEFAULT,
            region: DrawRegion::below_header(width, height, header),
            hold: DEFAULT_HOLD,
            palette: Palette::DEFAULT,
        }
    }
}

/// Marble clock - owns the grid and drives it
pub struct MarbleClock<'a, S: RowSelector, const INTENT_CHANNEL_SIZE: usize> {
    intents: IntentProcessor<'a, INTENT_CHANNEL_SIZE>,
    grid: ChannelGrid,
    flow: MarbleFlow<S>,
    renderer: Renderer,
}

impl<'a, S: RowSelector, const INTENT_CHANNEL_SIZE: usize> MarbleClock<'a, S, INTENT_CHANNEL_SIZE> {
    /// Lay out the channels and create an empty clock face
    pub fn new(
        intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
        config: &ClockConfig,
        selector: S,
    ) -> Result<Self, GeometryError> {
        let geometry = Geometry::build(&config.geometry, config.region)?;
        let grid = ChannelGrid::new(&geometry);
        let flow = MarbleFlow::new(&grid, selector, config.hold)?;

        Ok(Self {
            intents: IntentProcessor::new(intents),
            renderer: Renderer::new(config.palette, grid.dot_size()),
            grid,
            flow,
        })
    }

    /// Apply pending intents and run one flow tick
    pub fn step<T: TimeSource>(&mut self, time: &mut T, now: Instant) -> PhaseKind {
        let effects = self.intents.process_pending();
        self.apply_effects(&effects);

        self.flow.step(&mut self.grid, time, now)
    }

    /// Paint the whole grid
    pub fn draw<O: RenderSurface + ?Sized>(&self, surface: &mut O) {
        self.renderer.draw(surface, &self.grid);
    }

    fn apply_effects(&mut self, effects: &IntentEffects) {
        if !effects.has_effects() {
            return;
        }
        #[cfg(feature = "esp32-log")]
        println!("[MarbleClock.apply_effects] {:?}", effects);

        if let Some(hold) = effects.hold {
            self.flow.set_hold(hold);
        }
        if let Some(palette) = effects.palette {
            self.renderer.set_palette(palette);
        }
    }

    pub const fn grid(&self) -> &ChannelGrid {
        &self.grid
    }

    pub const fn flow(&self) -> &MarbleFlow<S> {
        &self.flow
    }

    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}
