use std::sync::OnceLock;

use cross_window_input_core::timing::HighResCounter;
use windows::Win32::System::Performance::{QueryPerformanceCounter, QueryPerformanceFrequency};

/// The system performance counter.
///
/// The frequency is fixed at boot, so it is queried once per process.
#[derive(Copy, Clone, Debug, Default)]
pub struct PerformanceCounter;

static FREQUENCY: OnceLock<Option<i64>> = OnceLock::new();

impl HighResCounter for PerformanceCounter {
    fn frequency(&self) -> Option<i64> {
        *FREQUENCY.get_or_init(|| {
            let mut frequency = 0i64;
            let queried = unsafe { QueryPerformanceFrequency(&mut frequency) };
            if let Err(e) = &queried {
                tracing::debug!(error = ?e, "QueryPerformanceFrequency failed, waits will sleep");
            }
            queried.ok().map(|()| frequency).filter(|f| *f > 0)
        })
    }

    fn now(&self) -> i64 {
        let mut count = 0i64;
        // Cannot fail once the frequency query succeeded.
        let _ = unsafe { QueryPerformanceCounter(&mut count) };
        count
    }
}
