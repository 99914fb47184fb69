//! Core system components for robot operation
pub mod calibration;
pub mod command;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod peripherals;
pub mod state;
pub mod status_display;

#[cfg(test)]
pub(crate) mod mock;
