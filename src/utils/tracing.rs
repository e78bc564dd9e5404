#[cfg(feature = "debug-tracing")]
use std::sync::Mutex;

#[cfg(feature = "debug-tracing")]
use tracing_appender::non_blocking::WorkerGuard;
#[cfg(feature = "debug-tracing")]
use tracing_subscriber::EnvFilter;

/// Directory for hourly log files. Without it, logs go to stderr.
#[cfg(feature = "debug-tracing")]
const LOG_DIR_ENV: &str = "CWI_LOG_DIR";

#[cfg(feature = "debug-tracing")]
static TRACING_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

#[cfg(feature = "debug-tracing")]
pub fn init_tracing() {
    let default_filter = "cross_window_input=trace,cross_window_input_core=trace";
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_level(true)
        .with_target(true);

    let initialized = match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::hourly(dir, "cwi.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let ok = builder
                .with_writer(non_blocking)
                .with_ansi(false)
                .try_init()
                .is_ok();
            store_tracing_guard(guard);
            ok
        }
        None => builder
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .try_init()
            .is_ok(),
    };

    if initialized {
        tracing::info!("tracing initialized");
    }
}

#[cfg(feature = "debug-tracing")]
fn store_tracing_guard(guard: WorkerGuard) {
    if let Ok(mut slot) = TRACING_GUARD.lock() {
        *slot = Some(guard);
    }
}

#[cfg(not(feature = "debug-tracing"))]
pub fn init_tracing() {}
