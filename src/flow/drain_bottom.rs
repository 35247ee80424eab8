use super::Phase;
use crate::grid::{ChannelGrid, Occupancy};

pub(super) fn drain_bottom(grid: &mut ChannelGrid, frontier: usize) -> Phase {
    let columns = grid.columns();
    let frontier = (frontier + 1).min(columns);
    for column in 0..frontier {
        rotate_column(grid, column);
    }

    // A partially filled display can run dry at the leftmost slot of the
    // bottom row while other columns still hold tokens
    if frontier == columns && grid.is_display_empty() {
        return Phase::FillBottom;
    }

    Phase::DrainBottom { frontier }
}

/// Rotate one tail column across the rows
///
/// `column` counts from the tail. Working from the last row up, each slot
/// swaps with the one above it, carrying the bottom token to the top row,
/// where it is dropped. Every other token falls one row.
pub fn rotate_column(grid: &mut ChannelGrid, column: usize) {
    let rows = grid.rows();
    for row in (1..rows).rev() {
        let (Some(lower), Some(upper)) =
            (grid.display_index(row, column), grid.display_index(row - 1, column))
        else {
            continue;
        };
        let channels = grid.channels_mut();
        let below = channels[row].get(lower);
        let above = channels[row - 1].get(upper);
        channels[row].set(lower, above);
        channels[row - 1].set(upper, below);
    }
    if let Some(top) = grid.display_index(0, column) {
        if let Some(channel) = grid.channel_mut(0) {
            channel.set(top, Occupancy::Empty);
        }
    }
}
