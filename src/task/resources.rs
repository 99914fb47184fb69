//! Hardware Resource Management
//!
//! Allocates pins and peripherals to the collaborators of the avoidance core.
//!
//! # Resource Groups
//! - Motor Driver: TB6612FNG dual motor driver pins and PWM channels
//! - Distance Sensor: HC-SR04 ultrasonic sensor pins
//! - Rotation Button: push-button used during calibration
//! - Display: SSD1306 OLED on I2C0

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// TB6612FNG dual motor driver pins and PWM channels
    motor_driver: MotorDriverResources {
        standby_pin: PIN_22,
        // Motor drive PWM
        left_slice: PWM_SLICE6,
        left_pwm_pin: PIN_28,
        left_forward_pin: PIN_21,
        left_backward_pin: PIN_20,
        // Motor drive PWM
        right_slice: PWM_SLICE5,
        right_pwm_pin: PIN_27,
        right_forward_pin: PIN_19,
        right_backward_pin: PIN_18,
    },
    /// HC-SR04 ultrasonic distance sensor pins
    distance_sensor: DistanceSensorResources {
        trigger_pin: PIN_15,
        echo_pin: PIN_14,
    },
    /// Rotation sense selector button
    rotation_button: RotationButtonResources {
        btn: PIN_16,
    },
    /// SSD1306 status display
    display: DisplayResources {
        i2c: I2C0,
        scl: PIN_13,
        sda: PIN_12,
    },
}
