//! Intent processing module
//!
//! Settings changes reach the clock as intents through a [`Mailbox`] and are
//! applied between ticks.

use embassy_time::Duration;

use crate::color::Palette;
use crate::mailbox::{Mailbox, Receiver, Sender};

/// Request to change a clock setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockIntent {
    /// Change how long a new value is held in the top queue
    SetHold(Duration),
    /// Change the token colors
    SetPalette(Palette),
}

/// Settings to apply after draining the pending intents
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentEffects {
    pub hold: Option<Duration>,
    pub palette: Option<Palette>,
}

impl IntentEffects {
    /// Check if any effects need to be applied
    pub const fn has_effects(&self) -> bool {
        self.hold.is_some() || self.palette.is_some()
    }
}

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> = Sender<'a, ClockIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, ClockIntent, SIZE>;

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Mailbox<ClockIntent, SIZE>;

/// Collapses queued intents into the settings to apply
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Drain all pending intents (non-blocking)
    ///
    /// When the same setting was requested more than once, the latest wins.
    pub fn process_pending(&mut self) -> IntentEffects {
        let mut effects = IntentEffects::default();
        for intent in self.intents.drain() {
            match intent {
                ClockIntent::SetHold(hold) => effects.hold = Some(hold),
                ClockIntent::SetPalette(palette) => effects.palette = Some(palette),
            }
        }
        effects
    }
}
