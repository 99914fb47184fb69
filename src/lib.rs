//! Obstacle-avoiding robot core
//!
//! Hardware independent decision logic: the startup rotation calibration and
//! the distance driven avoidance loop. Peripherals are reached only through
//! the collaborator traits in [`system::peripherals`], so the whole core runs
//! on the host under test and on the RP2350 firmware alike.

#![cfg_attr(not(test), no_std)]

/// Logging macros shared by the core
#[macro_use]
pub mod logging;
/// Core system components for robot operation
pub mod system;
