//! Motion Command Module
//!
//! Defines the commands the avoidance controller hands to the motor driver
//! and the status display, and the rotation sense chosen at calibration.

/// Duty cycle steps the controller drives with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum Speed {
    /// 0% duty, motors off
    Zero,
    /// 30% duty, cautious cruising and retreat
    Cruise,
    /// 50% duty, open road and search rotation
    Fast,
}

impl Speed {
    /// Motor duty cycle in percent
    pub fn duty(self) -> u8 {
        match self {
            Speed::Zero => 0,
            Speed::Cruise => 30,
            Speed::Fast => 50,
        }
    }

    /// Three character label shown on the status display
    pub fn label(self) -> &'static str {
        match self {
            Speed::Zero => "00%",
            Speed::Cruise => "30%",
            Speed::Fast => "50%",
        }
    }
}

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
    /// Turning in place, in the calibrated rotation sense
    Rotating,
    Stopped,
}

impl Direction {
    /// Single character label shown on the status display
    pub fn label(self) -> &'static str {
        match self {
            Direction::Forward => "F",
            Direction::Backward => "B",
            Direction::Rotating => "R",
            Direction::Stopped => "S",
        }
    }
}

/// One motion decision of the avoidance controller
///
/// Consumed right away by the motor driver and the display; the controller
/// only keeps the last one around to re-render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub struct MotionCommand {
    pub speed: Speed,
    pub direction: Direction,
}

impl MotionCommand {
    /// Motors off
    pub const STOP: MotionCommand = MotionCommand {
        speed: Speed::Zero,
        direction: Direction::Stopped,
    };

    /// Drive straight ahead
    pub const fn forward(speed: Speed) -> Self {
        Self {
            speed,
            direction: Direction::Forward,
        }
    }

    /// Drive straight back
    pub const fn backward(speed: Speed) -> Self {
        Self {
            speed,
            direction: Direction::Backward,
        }
    }

    /// Turn in place
    pub const fn rotate(speed: Speed) -> Self {
        Self {
            speed,
            direction: Direction::Rotating,
        }
    }
}

/// Rotation sense used when searching for a free path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum RotationSense {
    /// Turn right
    #[default]
    Clockwise,
    /// Turn left
    CounterClockwise,
}

impl RotationSense {
    /// Returns the opposite sense
    pub fn toggled(self) -> Self {
        match self {
            RotationSense::Clockwise => RotationSense::CounterClockwise,
            RotationSense::CounterClockwise => RotationSense::Clockwise,
        }
    }

    /// Label shown while calibrating, padded to a common width so a
    /// shorter label fully overwrites a longer one
    pub fn label(self) -> &'static str {
        match self {
            RotationSense::Clockwise => "Right",
            RotationSense::CounterClockwise => "Left ",
        }
    }
}
