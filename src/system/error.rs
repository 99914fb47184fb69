//! Error types
//!
//! Every collaborator operation reports failure through [`Error`]. The
//! controller treats any of them as fatal for the current iteration only.

use core::fmt;

/// Result type for core and collaborator operations
pub type Result<T> = core::result::Result<T, Error>;

/// Collaborator level errors
///
/// Peripheral implementations map their driver specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum Error {
    /// Motor driver rejected a command
    Motor(MotorError),
    /// Status display write failed
    Display(DisplayError),
    /// Timer service failed
    Timer(TimerError),
    /// Push-button could not be read
    Button(ButtonError),
    /// No usable distance sample
    Sensor(SensorError),
}

/// Motor driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum MotorError {
    /// Duty cycle outside 0-100
    InvalidDuty,
    /// Driver pin or PWM write failed
    HardwareFault,
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum DisplayError {
    /// Cursor outside the character grid
    CursorOutOfRange,
    /// Bus transfer to the display failed
    BusError,
}

/// Timer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum TimerError {
    /// Waiting on a timeout that was never armed
    NotArmed,
    /// Requested duration cannot be represented
    InvalidDuration,
}

/// Button errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum ButtonError {
    /// No button wired to the requested channel
    UnknownChannel,
}

/// Distance sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum SensorError {
    /// No measurement has been taken yet
    NoSample,
    /// Sample was negative or NaN
    InvalidSample,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Motor(e) => write!(f, "motor error: {:?}", e),
            Error::Display(e) => write!(f, "display error: {:?}", e),
            Error::Timer(e) => write!(f, "timer error: {:?}", e),
            Error::Button(e) => write!(f, "button error: {:?}", e),
            Error::Sensor(e) => write!(f, "sensor error: {:?}", e),
        }
    }
}
