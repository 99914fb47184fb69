//! Avoidance State
//!
//! Distance bands, the controller's behavior regions and the bounded counter
//! for the quarter turn search.
//!
//! # Bands
//! Bands are half open and checked from the highest threshold down; a value
//! sitting exactly on a threshold belongs to the lower band:
//! - Far: more than 70 cm
//! - Mid: more than 30 cm, up to 70 cm
//! - Near: more than 20 cm, up to 30 cm
//! - Critical: 20 cm and closer
//!
//! # Latches
//! Regions that run an entry action once per dwell hold their latch in the
//! variant itself: the latch is set exactly while that variant is the current
//! state, so it is gone the moment the controller moves to another band.

/// Above this distance the path ahead is considered open (cm)
pub const FAR_THRESHOLD_CM: f64 = 70.0;

/// Above this distance the robot still cruises (cm)
pub const MID_THRESHOLD_CM: f64 = 30.0;

/// Above this distance the robot stops and scans; at or below it retreats (cm)
pub const NEAR_THRESHOLD_CM: f64 = 20.0;

/// Quarter turns that make up one full search sweep
pub const QUARTER_TURNS_PER_SWEEP: u8 = 4;

/// Distance band a sample falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum Band {
    Far,
    Mid,
    Near,
    Critical,
}

impl Band {
    /// Classifies a distance in centimeters
    pub fn classify(distance: f64) -> Band {
        if distance > FAR_THRESHOLD_CM {
            Band::Far
        } else if distance > MID_THRESHOLD_CM {
            Band::Mid
        } else if distance > NEAR_THRESHOLD_CM {
            Band::Near
        } else {
            Band::Critical
        }
    }
}

/// Behavior region of the avoidance controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum ControllerState {
    /// Open path: start at cruise speed, step up once the speed timer fired
    FarCruise {
        /// The one time step up to fast has happened in this dwell
        stepped_up: bool,
    },
    /// Obstacle in sight: keep cruising
    MidCruise,
    /// Obstacle close: stopped, last search sweep completed with a rescan pause
    StopAndScan,
    /// Obstacle close: turning in quarter turns looking for a free path
    Rotating360Search,
    /// Obstacle too close: back off
    ReverseRetreat,
}

impl ControllerState {
    /// The band this region serves
    pub fn band(&self) -> Band {
        match self {
            ControllerState::FarCruise { .. } => Band::Far,
            ControllerState::MidCruise => Band::Mid,
            ControllerState::StopAndScan | ControllerState::Rotating360Search => Band::Near,
            ControllerState::ReverseRetreat => Band::Critical,
        }
    }
}

/// What the controller does with a band on this iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Band differs from the current region: run the entry hook
    Enter(Band),
    /// Still in the current region's band: run its continue hook
    Continue(ControllerState),
}

impl Transition {
    /// Decides between entering a new region and continuing the current one
    pub fn select(current: Option<ControllerState>, band: Band) -> Transition {
        match current {
            Some(state) if state.band() == band => Transition::Continue(state),
            _ => Transition::Enter(band),
        }
    }
}

/// Bounded counter of quarter turns taken in the current search sweep
///
/// Only a completed sweep resets it; leaving the Near band does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationSearch {
    quarter_turns: u8,
}

impl RotationSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quarter turns taken so far
    pub fn count(&self) -> u8 {
        self.quarter_turns
    }

    /// Whether a full sweep has been made
    pub fn is_complete(&self) -> bool {
        self.quarter_turns >= QUARTER_TURNS_PER_SWEEP
    }

    /// Record one more quarter turn
    pub fn advance(&mut self) {
        if !self.is_complete() {
            self.quarter_turns += 1;
        }
    }

    /// Start a new sweep
    pub fn reset(&mut self) {
        self.quarter_turns = 0;
    }
}
