//! Logging macros gated by a module-level `ENABLE_LOGS` flag.
//!
//! ```rust,ignore
//! const ENABLE_LOGS: bool = true;
//!
//! crate::log_info!("Stored sleep window for {date_key}");
//! ```
//!
//! Flip the flag to `false` to silence a noisy module without touching
//! `RUST_LOG`.

/// Info-level log, emitted only when the calling module's `ENABLE_LOGS` is set.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

/// Per-event chatter such as individual classifier batches.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}
