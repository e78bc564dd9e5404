//! Bounded blocking waits driven by a high-resolution counter.
//!
//! The wait spins on the counter instead of sleeping: delays between injected
//! events are short and need sub-millisecond accuracy. Hosts without a usable
//! counter fall back to `std::thread::sleep`.

use std::{
    sync::OnceLock,
    time::{Duration, Instant},
};

/// Upper bound for a single wait, in milliseconds (one hour).
pub const MAX_WAIT_MS: u32 = 1000 * 60 * 60;

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WaitError {
    #[error("wait duration exceeds the one hour limit")]
    DurationTooLarge,
    #[error("performance counter would overflow")]
    CounterOverflow,
}

impl WaitError {
    pub fn as_str(self) -> &'static str {
        match self {
            WaitError::DurationTooLarge => "DURATION_TOO_LARGE",
            WaitError::CounterOverflow => "COUNTER_OVERFLOW",
        }
    }
}

/// A monotonic tick source.
///
/// `frequency` is ticks per second. `None` (or a non-positive value) means the
/// host has no usable counter and waits degrade to a coarse sleep.
pub trait HighResCounter {
    fn frequency(&self) -> Option<i64>;
    fn now(&self) -> i64;
}

/// Portable counter: microseconds elapsed since the first time any wait ran in
/// this process.
#[derive(Copy, Clone, Debug, Default)]
pub struct MonotonicCounter;

const MICROS_PER_SECOND: i64 = 1_000_000;

fn anchor() -> Instant {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    *ANCHOR.get_or_init(Instant::now)
}

impl HighResCounter for MonotonicCounter {
    fn frequency(&self) -> Option<i64> {
        Some(MICROS_PER_SECOND)
    }

    fn now(&self) -> i64 {
        i64::try_from(anchor().elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// Waits `ms` milliseconds on the portable counter.
pub fn wait_for(ms: u32) -> Result<(), WaitError> {
    wait_with(&MonotonicCounter, ms)
}

/// Waits `ms` milliseconds on `counter`.
///
/// Rejects durations above [`MAX_WAIT_MS`] and durations whose end tick could
/// not be represented in the elapsed-time arithmetic, without blocking.
pub fn wait_with<C: HighResCounter + ?Sized>(counter: &C, ms: u32) -> Result<(), WaitError> {
    if ms == 0 {
        return Ok(());
    }
    if ms > MAX_WAIT_MS {
        return Err(WaitError::DurationTooLarge);
    }

    let Some(frequency) = counter.frequency().filter(|f| *f > 0) else {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
        return Ok(());
    };

    let begin = counter.now();
    check_headroom(begin, frequency, ms)?;

    let wanted = i64::from(ms);
    loop {
        let elapsed = (counter.now() - begin) * 1000 / frequency;
        if elapsed >= wanted {
            return Ok(());
        }
        std::hint::spin_loop();
    }
}

fn check_headroom(begin: i64, frequency: i64, ms: u32) -> Result<(), WaitError> {
    if begin > i64::MAX / 1000 {
        return Err(WaitError::CounterOverflow);
    }
    let max_delay = (i64::MAX - begin * 1000) / frequency;
    if i64::from(ms) > max_delay {
        return Err(WaitError::CounterOverflow);
    }
    Ok(())
}
