//! Autonomous drive
//!
//! Brings up the collaborators, lets the operator pick the rotation sense and
//! then hands control to the avoidance loop for good.

use crate::task::button::RotationButton;
use crate::task::display::StatusDisplay;
use crate::task::distance_measure::LatestDistance;
use crate::task::interval_timer::IntervalTimer;
use crate::task::motor_driver::TrackDrive;
use crate::task::resources::{DisplayResources, MotorDriverResources, RotationButtonResources};
use avoidance_robot::system::calibration::calibrate;
use avoidance_robot::system::command::RotationSense;
use avoidance_robot::system::controller::Controller;
use avoidance_robot::system::peripherals::Motor;
use defmt::{info, warn};

#[embassy_executor::task]
pub async fn autonomous_drive(
    motor_r: MotorDriverResources,
    display_r: DisplayResources,
    button_r: RotationButtonResources,
) {
    let mut motor = TrackDrive::new(motor_r);
    let mut display = StatusDisplay::new(display_r);
    let mut timer = IntervalTimer;
    let mut button = RotationButton::new(button_r);

    if let Err(e) = motor.stop() {
        warn!("could not stop motors: {}", e);
    }

    let sense = match calibrate(&mut display, &mut timer, &mut button, RotationSense::default()).await
    {
        Ok(sense) => sense,
        Err(e) => {
            warn!("calibration failed: {}, using default rotation", e);
            RotationSense::default()
        }
    };
    info!("starting avoidance, rotation {}", sense);

    let mut controller = Controller::new(motor, display, timer, LatestDistance, sense);
    controller.run().await;
}
