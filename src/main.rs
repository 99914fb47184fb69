//! Robot firmware entry point
//!
//! Initializes the RP2350, brings up the collaborators and spawns the tasks.

#![no_std]
#![no_main]

use crate::task::{
    autonomous_drive::autonomous_drive, distance_measure::distance_measure,
    interval_timer::interval_timer,
};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use task::resources::{
    AssignedResources, DisplayResources, DistanceSensorResources, MotorDriverResources,
    RotationButtonResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Task implementations and hardware collaborators
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups for each task
    let r = split_resources!(p);

    // The timer and the distance sensor have to be running before the
    // avoidance task starts waiting on them
    spawner.spawn(interval_timer()).unwrap();
    spawner.spawn(distance_measure(r.distance_sensor)).unwrap();
    spawner
        .spawn(autonomous_drive(r.motor_driver, r.display, r.rotation_button))
        .unwrap();
}
