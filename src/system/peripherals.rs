//! Collaborator interfaces
//!
//! The core never touches hardware. It drives the robot through these traits,
//! which the firmware implements on top of embassy-rp and the tests implement
//! with recording mocks.
//!
//! All waits are plain `.await`s issued one after another. Nothing in the core
//! races a wait against a sensor change, so an obstacle that appears while the
//! controller is waiting is only seen on the next iteration.

use crate::system::command::RotationSense;
use crate::system::error::Result;

/// Dual track motor driver
pub trait Motor {
    /// Drive both tracks forward at `duty` percent
    fn move_forward(&mut self, duty: u8) -> Result<()>;

    /// Drive both tracks backward at `duty` percent
    fn move_backward(&mut self, duty: u8) -> Result<()>;

    /// Turn in place in the given sense at `duty` percent
    fn rotate(&mut self, sense: RotationSense, duty: u8) -> Result<()>;

    /// Remove power from both tracks
    fn stop(&mut self) -> Result<()>;
}

/// Character oriented status display
pub trait Display {
    /// Move the write position to `row`, `col`
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<()>;

    /// Write text at the current position, advancing it
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Write a whole number at the current position, advancing it
    fn write_number(&mut self, number: i32) -> Result<()>;

    /// Blank the whole display and home the cursor
    fn clear(&mut self) -> Result<()>;
}

/// Timer service
///
/// Offers two blocking primitives: a fixed wait and a wait on the one-shot
/// timeout signal. The signal is sticky. Once raised it stays raised until
/// [`Timer::clear_timeout`] is called, so a waiter that forgets to clear it
/// lets the next wait through immediately.
#[allow(async_fn_in_trait)]
pub trait Timer {
    /// Wait exactly `ms` milliseconds
    async fn delay_ms(&mut self, ms: u32) -> Result<()>;

    /// Wait exactly `us` microseconds
    async fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Arm the one-shot timeout to fire `ms` milliseconds from now
    ///
    /// Re-arming restarts the countdown. Arming does not clear a signal that
    /// has already been raised.
    fn start_timeout(&mut self, ms: u32) -> Result<()>;

    /// Whether the timeout signal is currently raised
    fn timeout_fired(&self) -> bool;

    /// Lower the timeout signal
    fn clear_timeout(&mut self);

    /// Wait until the timeout signal is raised
    ///
    /// Returns immediately if it already is. Does not clear it.
    async fn wait_timeout(&mut self) -> Result<()>;
}

/// Push-button level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Push-button reader
///
/// Debouncing is the reader's job; the core takes every level at face value.
pub trait Button {
    /// Current level of the button on `channel`
    fn read_state(&mut self, channel: u8) -> Result<ButtonState>;
}

/// Obstacle distance source
pub trait DistanceSensor {
    /// Latest distance to the obstacle ahead, in centimeters
    fn latest_sample(&mut self) -> Result<f64>;
}
