//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::clock::MarbleClock;
use crate::collaborator::TimeSource;
use crate::flow::PhaseKind;
use crate::renderer::RenderSurface;
use crate::select::RowSelector;

/// Default frame duration (20 FPS).
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(50);

/// Work done at the start of every frame, before the clock moves
pub trait IdleHook {
    fn idle(&mut self, now: Instant);
}

impl IdleHook for () {
    fn idle(&mut self, _now: Instant) {}
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Flow phase after this frame.
    pub phase: PhaseKind,
}

/// Portable frame scheduler that manages timing without async.
///
/// Every tick runs, in order:
/// 1. the idle hook
/// 2. one flow step of the clock
/// 3. a full redraw of the grid
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(clock, surface, time, chrome);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct FrameScheduler<'a, O, T, H, S, const INTENT_CHANNEL_SIZE: usize>
where
    O: RenderSurface,
    T: TimeSource,
    H: IdleHook,
    S: RowSelector,
{
    clock: MarbleClock<'a, S, INTENT_CHANNEL_SIZE>,
    surface: O,
    time: T,
    idle: H,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O, T, H, S, const INTENT_CHANNEL_SIZE: usize>
    FrameScheduler<'a, O, T, H, S, INTENT_CHANNEL_SIZE>
where
    O: RenderSurface,
    T: TimeSource,
    H: IdleHook,
    S: RowSelector,
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (20 FPS) for frame timing.
    pub fn new(
        clock: MarbleClock<'a, S, INTENT_CHANNEL_SIZE>,
        surface: O,
        time: T,
        idle: H,
    ) -> Self {
        Self::with_frame_duration(clock, surface, time, idle, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        clock: MarbleClock<'a, S, INTENT_CHANNEL_SIZE>,
        surface: O,
        time: T,
        idle: H,
        frame_duration: Duration,
    ) -> Self {
        Self {
            clock,
            surface,
            time,
            idle,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.idle.idle(now);
        let phase = self.clock.step(&mut self.time, now);
        self.clock.draw(&mut self.surface);

        self.next_frame += self.frame_duration;

        // Zero if we're behind
        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            phase,
        }
    }

    pub fn clock(&self) -> &MarbleClock<'a, S, INTENT_CHANNEL_SIZE> {
        &self.clock
    }

    pub fn surface(&self) -> &O {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut O {
        &mut self.surface
    }

    pub fn idle_hook(&self) -> &H {
        &self.idle
    }

    pub fn idle_hook_mut(&mut self) -> &mut H {
        &mut self.idle
    }

    pub fn time_source_mut(&mut self) -> &mut T {
        &mut self.time
    }
}
