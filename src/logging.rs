//! Logging abstraction
//!
//! The core logs through these macros so the same code works on every target:
//! - Firmware (`rp2350` feature): defmt
//! - Host tests: println!
//! - Host non-test: no-op

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rp2350")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "rp2350"), test))]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rp2350")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "rp2350"), test))]
        eprintln!("[WARN] {}", format!($($arg)*));
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rp2350")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "rp2350"), test))]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}
