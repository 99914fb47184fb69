//! Rotation button
//!
//! Push-button between 3.3V and the input pin, pulled down so an idle button
//! reads low. Levels are debounced before they reach calibration.

use crate::task::resources::RotationButtonResources;
use avoidance_robot::system::calibration::ROTATION_BUTTON_CHANNEL;
use avoidance_robot::system::debounce::Debouncer;
use avoidance_robot::system::error::{ButtonError, Error, Result};
use avoidance_robot::system::peripherals::{Button, ButtonState};
use embassy_rp::gpio::{Input, Pull};
use embassy_time::Instant;

pub struct RotationButton {
    btn: Input<'static>,
    debouncer: Debouncer,
}

impl RotationButton {
    pub fn new(r: RotationButtonResources) -> Self {
        Self {
            btn: Input::new(r.btn, Pull::Down),
            debouncer: Debouncer::new(),
        }
    }
}

impl Button for RotationButton {
    fn read_state(&mut self, channel: u8) -> Result<ButtonState> {
        if channel != ROTATION_BUTTON_CHANNEL {
            return Err(Error::Button(ButtonError::UnknownChannel));
        }
        let raw = if self.btn.is_high() {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        };
        Ok(self.debouncer.update(raw, Instant::now().as_millis()))
    }
}
