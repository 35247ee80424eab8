use super::Phase;
use crate::grid::{Channel, ChannelGrid};

/// Roll tokens towards the tails until every channel has settled
///
/// A tick in which nothing moved always leaves the grid settled, so the
/// phase ends at the latest one tick after the last movement. Checking for
/// room ahead after the pass ends it on the tick of the last movement.
pub(super) fn fill_bottom(grid: &mut ChannelGrid) -> Phase {
    let mut settled = true;
    for channel in grid.channels_mut() {
        release(channel);
        settled &= channel.is_settled();
    }

    if settled {
        Phase::AcquireTime
    } else {
        Phase::FillBottom
    }
}

/// Move every token one slot towards the tail where there is room
///
/// Scans from the slot before the tail back to the head. Tokens queued at
/// the stop index only pass it here. Returns `true` if any token moved.
pub fn release(channel: &mut Channel) -> bool {
    let mut moved = false;
    for index in (0..channel.tail()).rev() {
        moved |= channel.advance(index, index + 1);
    }
    moved
}
