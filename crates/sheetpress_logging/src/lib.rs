#![deny(missing_docs)]
//! Logging macros shared by the sheetpress crates.
//!
//! Every crate logs through the `press_*` macros so the backend can be swapped
//! in one place. The macros forward to the `log` facade; the binary decides
//! where records end up (see `sheetpress_app`'s logging module).

/// Logs a trace-level message.
#[macro_export]
macro_rules! press_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! press_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message.
#[macro_export]
macro_rules! press_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message.
#[macro_export]
macro_rules! press_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message.
#[macro_export]
macro_rules! press_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Shortens a payload description for log lines: `"name (1234 B)"`.
pub fn describe_payload(name: &str, len: usize) -> String {
    format!("{name} ({len} B)")
}

/// Installs a terminal logger for tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
