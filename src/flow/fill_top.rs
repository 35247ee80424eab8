use embassy_time::Instant;

use super::Phase;
use crate::grid::{Channel, ChannelGrid};
use crate::select::RowSelector;
use crate::staging::StagingBuffer;

pub(super) fn fill_top<S: RowSelector>(
    grid: &mut ChannelGrid,
    mut staging: StagingBuffer,
    release_at: Instant,
    selector: &mut S,
    now: Instant,
) -> Phase {
    if now >= release_at {
        // Whatever has been injected so far is released as is
        return Phase::DrainBottom { frontier: 0 };
    }

    let picked = selector.select(grid.rows());
    for (row, channel) in grid.channels_mut().iter_mut().enumerate() {
        shift_queue(channel);
        if picked.contains(row) {
            inject(channel, &mut staging, row);
        }
    }

    Phase::FillTop {
        staging,
        release_at,
    }
}

/// Move head-side tokens one slot towards the stop index
///
/// Scans from the stop index down to 1 and pulls each token into an empty
/// slot ahead of it. A whole train behind a gap moves together, and no token
/// ever jumps over another or crosses the stop index.
pub fn shift_queue(channel: &mut Channel) {
    for index in (1..=channel.stop()).rev() {
        channel.advance(index - 1, index);
    }
}

/// Put the next staged token of `row` into the head slot
///
/// A head still holding a token keeps it and the staged token waits for a
/// later tick. An exhausted row injects nothing, so its head stays empty.
pub fn inject(channel: &mut Channel, staging: &mut StagingBuffer, row: usize) {
    if channel.get(0).is_token() {
        return;
    }
    channel.set(0, staging.pop(row));
}
