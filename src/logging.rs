//! Log macros
//!
//! `log_debug!`, `log_info!` and `log_warn!` take `defmt` format strings.
//!
//! Forward to `defmt` on target. On host builds they expand to nothing,
//! so arguments must not carry side effects.

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::debug!($($arg)*);
    }};
}

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::info!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::warn!($($arg)*);
    }};
}

pub(crate) use {log_debug, log_info, log_warn};
