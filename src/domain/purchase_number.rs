use super::ports::{Clock, ClockBox};
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Smallest 12-digit number.
const FLOOR: u64 = 100_000_000_000;
/// Count of 12-digit numbers.
const SPAN: u64 = 900_000_000_000;
const NANOS_PER_CENTISECOND: i128 = 10_000_000;

/// Issues the 12-digit `purchaseNumber` sent with every transaction-opening request.
///
/// Numbers follow the clock at centisecond resolution. When the clock has not moved since
/// the last number (or moved backwards), the next free number after the last one is issued
/// instead, so values never repeat for the lifetime of the generator, even when it is
/// shared between tasks.
pub struct PurchaseNumberGenerator {
    clock: ClockBox,
    last: AtomicU64,
}

impl PurchaseNumberGenerator {
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: AtomicU64::new(0),
        }
    }

    pub fn next(&self) -> String {
        let candidate = Self::from_time(self.clock.now());
        // The closure always returns Some, so both arms carry the previous value.
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(Self::successor(last, candidate))
            }) {
            Ok(previous) | Err(previous) => previous,
        };
        Self::successor(previous, candidate).to_string()
    }

    fn from_time(now: OffsetDateTime) -> u64 {
        let centis = now.unix_timestamp_nanos() / NANOS_PER_CENTISECOND;
        let offset = u64::try_from(centis.rem_euclid(i128::from(SPAN))).unwrap_or(0);
        FLOOR + offset
    }

    fn successor(last: u64, candidate: u64) -> u64 {
        if candidate > last {
            candidate
        } else if last + 1 >= FLOOR + SPAN {
            FLOOR
        } else {
            last + 1
        }
    }
}
