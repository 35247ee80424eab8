use chrono::NaiveDate;
use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::Phase;
use crate::collaborator::TimeSource;
use crate::glyph::TimeText;
use crate::staging::StagingBuffer;

/// Stage a new time value, or keep waiting
///
/// An unavailable source or an unchanged value keeps the machine here, so
/// the face holds the last shown time. The date follows every reading.
pub(super) fn acquire<T: TimeSource>(
    shown: &mut Option<TimeText>,
    date: &mut Option<NaiveDate>,
    time: &mut T,
    now: Instant,
    hold: Duration,
) -> Phase {
    let Some(reading) = time.read() else {
        return Phase::AcquireTime;
    };
    *date = reading.date();
    if *shown == Some(reading.text) {
        return Phase::AcquireTime;
    }

    #[cfg(feature = "esp32-log")]
    println!(
        "[MarbleFlow.acquire] accepted {} (epoch {})",
        reading.text.as_str(),
        reading.epoch
    );

    *shown = Some(reading.text);
    Phase::FillTop {
        staging: StagingBuffer::encode(&reading.text),
        release_at: now + hold,
    }
}
