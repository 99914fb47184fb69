//! Motor Driver
//!
//! Drives the two tracks through a TB6612FNG dual motor driver.
//!
//! # Hardware Configuration
//! - Motor A (left track): PWM slice 6, forward/backward direction pins
//! - Motor B (right track): PWM slice 5, forward/backward direction pins
//! - Standby pin: low puts the driver to sleep, high enables the outputs
//!
//! Turning in place runs the tracks in opposite directions; clockwise means
//! left track forward, right track backward.

use crate::task::resources::MotorDriverResources;
use avoidance_robot::system::command::RotationSense;
use avoidance_robot::system::error::{Error, MotorError, Result};
use avoidance_robot::system::peripherals;
use defmt::info;
use embassy_rp::gpio;
use embassy_rp::pwm;
use tb6612fng::{DriveCommand, Motor};

/// PWM frequency, cheaper DC motors work better at lower frequencies (Hz)
const PWM_FREQUENCY_HZ: u32 = 10_000;

/// Highest duty cycle the driver accepts (percent)
const MAX_DUTY: u8 = 100;

/// One track: two direction pins and a PWM output
type TrackMotor = Motor<gpio::Output<'static>, gpio::Output<'static>, pwm::Pwm<'static>>;

/// TB6612FNG backed implementation of the motor collaborator
pub struct TrackDrive {
    left: TrackMotor,
    right: TrackMotor,
    standby: gpio::Output<'static>,
}

impl TrackDrive {
    /// Configures PWM and direction pins; the driver starts in standby
    pub fn new(r: MotorDriverResources) -> Self {
        let clock_freq_hz = embassy_rp::clocks::clk_sys_freq(); // 150MHz

        // Calculate minimum divider needed to keep period under 16-bit limit (65535)
        let divider = ((clock_freq_hz / PWM_FREQUENCY_HZ) / 65535 + 1) as u8;
        let period = (clock_freq_hz / (PWM_FREQUENCY_HZ * divider as u32)) as u16 - 1;

        let mut pwm_config = pwm::Config::default();
        pwm_config.divider = divider.into();
        pwm_config.top = period;

        let standby = gpio::Output::new(r.standby_pin, gpio::Level::Low);

        // motor A, here defined to be the left motor
        let left_fwd = gpio::Output::new(r.left_forward_pin, gpio::Level::Low);
        let left_bckw = gpio::Output::new(r.left_backward_pin, gpio::Level::Low);
        let left_pwm = pwm::Pwm::new_output_a(r.left_slice, r.left_pwm_pin, pwm_config.clone());
        let left = Motor::new(left_fwd, left_bckw, left_pwm).unwrap();

        // motor B, here defined to be the right motor
        let right_fwd = gpio::Output::new(r.right_forward_pin, gpio::Level::Low);
        let right_bckw = gpio::Output::new(r.right_backward_pin, gpio::Level::Low);
        let right_pwm = pwm::Pwm::new_output_b(r.right_slice, r.right_pwm_pin, pwm_config);
        let right = Motor::new(right_fwd, right_bckw, right_pwm).unwrap();

        Self {
            left,
            right,
            standby,
        }
    }

    /// Wakes the driver up if it is in standby
    fn wake(&mut self) {
        if self.standby.is_set_low() {
            info!("motor driver leaving standby");
            self.standby.set_high();
        }
    }

    /// Drives both tracks, waking the driver first
    fn drive(&mut self, left: DriveCommand, right: DriveCommand) -> Result<()> {
        self.wake();
        self.left.drive(left).map_err(|_| Error::Motor(MotorError::HardwareFault))?;
        self.right.drive(right).map_err(|_| Error::Motor(MotorError::HardwareFault))
    }
}

/// Rejects duty cycles the driver cannot represent
fn checked(duty: u8) -> Result<u8> {
    if duty > MAX_DUTY {
        return Err(Error::Motor(MotorError::InvalidDuty));
    }
    Ok(duty)
}

impl peripherals::Motor for TrackDrive {
    fn move_forward(&mut self, duty: u8) -> Result<()> {
        let duty = checked(duty)?;
        info!("drive forward {}", duty);
        self.drive(DriveCommand::Forward(duty), DriveCommand::Forward(duty))
    }

    fn move_backward(&mut self, duty: u8) -> Result<()> {
        let duty = checked(duty)?;
        info!("drive backward {}", duty);
        self.drive(DriveCommand::Backward(duty), DriveCommand::Backward(duty))
    }

    fn rotate(&mut self, sense: RotationSense, duty: u8) -> Result<()> {
        let duty = checked(duty)?;
        info!("rotate {} {}", sense, duty);
        match sense {
            RotationSense::Clockwise => {
                self.drive(DriveCommand::Forward(duty), DriveCommand::Backward(duty))
            }
            RotationSense::CounterClockwise => {
                self.drive(DriveCommand::Backward(duty), DriveCommand::Forward(duty))
            }
        }
    }

    fn stop(&mut self) -> Result<()> {
        info!("coast");
        self.left
            .drive(DriveCommand::Stop)
            .map_err(|_| Error::Motor(MotorError::HardwareFault))?;
        self.right
            .drive(DriveCommand::Stop)
            .map_err(|_| Error::Motor(MotorError::HardwareFault))
    }
}
