//! Distance sensor handling
//!
//! Measures the distance to the obstacle ahead with the HC-SR04 ultrasonic
//! sensor and keeps the latest filtered value for the avoidance controller.
//!
//! # Sensor Operation
//! - Uses async HC-SR04 driver for non-blocking measurements
//! - Measurements taken every 100ms
//! - Distance reported in centimeters
//! - Assumes fixed ambient temperature of 21.5°C
//!
//! # Signal Processing
//! - Uses a moving median filter with a window of 3 samples
//! - Failed measurements are dropped, the previous value stays published

use crate::task::resources::DistanceSensorResources;
use avoidance_robot::system::error::{Error, Result, SensorError};
use avoidance_robot::system::peripherals::DistanceSensor;
use core::cell::Cell;
use defmt::{debug, warn};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Timer};
use hcsr04_async::{Config, DistanceUnit, Hcsr04, TemperatureUnit};
use moving_median::MovingMedian;

/// Time between measurements
const MEASUREMENT_INTERVAL: Duration = Duration::from_millis(100);

/// Size of median filter window
const MEDIAN_WINDOW_SIZE: usize = 3;

/// Fixed ambient temperature for distance calculations
const TEMPERATURE: f64 = 21.5;

/// Latest filtered distance, `None` until the first good measurement
static LATEST_DISTANCE: Mutex<CriticalSectionRawMutex, Cell<Option<f64>>> =
    Mutex::new(Cell::new(None));

/// Measurement task, publishes the filtered distance every interval
#[embassy_executor::task]
pub async fn distance_measure(r: DistanceSensorResources) {
    let config = Config {
        distance_unit: DistanceUnit::Centimeters,
        temperature_unit: TemperatureUnit::Celsius,
    };

    let trigger = Output::new(r.trigger_pin, Level::Low);
    let echo = Input::new(r.echo_pin, Pull::None);
    let mut sensor = Hcsr04::new(trigger, echo, config);

    let mut median_filter = MovingMedian::<f64, MEDIAN_WINDOW_SIZE>::new();

    loop {
        match sensor.measure(TEMPERATURE).await {
            Ok(distance_cm) => {
                median_filter.add_value(distance_cm);
                let filtered = median_filter.median();
                debug!("distance {} cm", filtered);
                LATEST_DISTANCE.lock(|latest| latest.set(Some(filtered)));
            }
            Err(e) => warn!("measurement failed: {}", e),
        }

        Timer::after(MEASUREMENT_INTERVAL).await;
    }
}

/// Reads the value published by the measurement task
pub struct LatestDistance;

impl DistanceSensor for LatestDistance {
    fn latest_sample(&mut self) -> Result<f64> {
        LATEST_DISTANCE
            .lock(|latest| latest.get())
            .ok_or(Error::Sensor(SensorError::NoSample))
    }
}
