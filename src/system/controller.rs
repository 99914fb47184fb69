//! Avoidance Controller
//!
//! The steady state loop of the robot. Each iteration reads the latest
//! distance, classifies it into a band, runs the entry or continue hook of the
//! matching region and renders the resulting command on the status display.
//!
//! | Band     | Entry                                   | Continue                               |
//! |----------|-----------------------------------------|----------------------------------------|
//! | Far      | forward 30%, wait 5 s on the speed timer | forward 50% once the speed timer fired |
//! | Mid      | forward 30%                             | nothing new                            |
//! | Near     | stop, pause, quarter turn or rescan     | same as entry                          |
//! | Critical | stop, pause                             | backward 30%                           |
//!
//! All waits are sequential; an obstacle that shows up during a wait is only
//! acted on in the next iteration.

use crate::system::command::{Direction, MotionCommand, RotationSense, Speed};
use crate::system::error::{Error, Result, SensorError};
use crate::system::peripherals::{Display, DistanceSensor, Motor, Timer};
use crate::system::state::{Band, ControllerState, RotationSearch, Transition};
use crate::system::status_display;

/// Cruise time before stepping up to fast on an open path (ms)
const SPEED_STEP_UP_MS: u32 = 5000;

/// Pause after stopping in front of an obstacle (ms)
const STOP_PAUSE_MS: u32 = 1000;

/// Pause after a full search sweep before scanning again (ms)
const RESCAN_PAUSE_MS: u32 = 3000;

/// Obstacle avoidance state machine
///
/// Owns its collaborators and all mutable avoidance state: the rotation
/// sense, the current region, the search counter and the last command.
pub struct Controller<M, D, T, S> {
    motor: M,
    display: D,
    timer: T,
    sensor: S,
    sense: RotationSense,
    /// None until a region's entry hook has completed
    state: Option<ControllerState>,
    search: RotationSearch,
    last_command: MotionCommand,
}

impl<M, D, T, S> Controller<M, D, T, S>
where
    M: Motor,
    D: Display,
    T: Timer,
    S: DistanceSensor,
{
    /// Creates a controller that searches in the given rotation sense
    pub fn new(motor: M, display: D, timer: T, sensor: S, sense: RotationSense) -> Self {
        Self {
            motor,
            display,
            timer,
            sensor,
            sense,
            state: None,
            search: RotationSearch::new(),
            last_command: MotionCommand::STOP,
        }
    }

    /// Current region, if one has been entered
    pub fn state(&self) -> Option<ControllerState> {
        self.state
    }

    /// Rotation sense used for the search
    pub fn sense(&self) -> RotationSense {
        self.sense
    }

    /// Quarter turns taken in the current search sweep
    pub fn rotation_search_count(&self) -> u8 {
        self.search.count()
    }

    /// Last command issued by the avoidance loop
    pub fn last_command(&self) -> MotionCommand {
        self.last_command
    }

    /// Runs the avoidance loop forever
    ///
    /// A failing collaborator only costs the current iteration: the error is
    /// logged and the next iteration starts from a fresh distance sample.
    pub async fn run(&mut self) {
        log_info!("avoidance started, sense {:?}", self.sense);
        loop {
            if let Err(e) = self.step().await {
                log_warn!("iteration aborted: {:?}", e);
            }
        }
    }

    /// Runs one iteration of the avoidance loop
    pub async fn step(&mut self) -> Result<ControllerState> {
        let distance = self.sensor.latest_sample()?;
        // also rejects NaN
        if !(distance >= 0.0) {
            return Err(Error::Sensor(SensorError::InvalidSample));
        }
        let band = Band::classify(distance);

        let next = match Transition::select(self.state, band) {
            Transition::Continue(state) => self.resume(state, distance).await?,
            Transition::Enter(band) => {
                if let Some(previous) = self.state.take() {
                    log_info!("leaving {:?} at {} cm", previous, distance);
                }
                self.enter(band, distance).await?
            }
        };
        self.state = Some(next);

        status_display::render(&mut self.display, self.last_command, distance)?;
        Ok(next)
    }

    /// Stops the robot and shows the stopped message
    ///
    /// Leaves the region and the last command alone; the next iteration
    /// carries on from them and renders over the message.
    pub fn halt(&mut self) -> Result<()> {
        self.motor.stop()?;
        status_display::render_stopped(&mut self.display)
    }

    /// Entry hook of the region serving `band`
    async fn enter(&mut self, band: Band, distance: f64) -> Result<ControllerState> {
        match band {
            Band::Far => {
                self.issue(MotionCommand::forward(Speed::Cruise))?;
                status_display::render(&mut self.display, self.last_command, distance)?;
                self.timer.start_timeout(SPEED_STEP_UP_MS)?;
                self.timer.delay_ms(SPEED_STEP_UP_MS).await?;
                Ok(ControllerState::FarCruise { stepped_up: false })
            }
            Band::Mid => {
                self.issue(MotionCommand::forward(Speed::Cruise))?;
                Ok(ControllerState::MidCruise)
            }
            Band::Near => self.scan(distance).await,
            Band::Critical => {
                self.stop_and_pause(STOP_PAUSE_MS, distance).await?;
                Ok(ControllerState::ReverseRetreat)
            }
        }
    }

    /// Continue hook of the current region
    async fn resume(&mut self, state: ControllerState, distance: f64) -> Result<ControllerState> {
        match state {
            ControllerState::FarCruise { stepped_up: false } if self.timer.timeout_fired() => {
                self.issue(MotionCommand::forward(Speed::Fast))?;
                self.timer.clear_timeout();
                Ok(ControllerState::FarCruise { stepped_up: true })
            }
            ControllerState::FarCruise { .. } | ControllerState::MidCruise => Ok(state),
            ControllerState::StopAndScan | ControllerState::Rotating360Search => {
                self.scan(distance).await
            }
            ControllerState::ReverseRetreat => {
                self.issue(MotionCommand::backward(Speed::Cruise))?;
                Ok(state)
            }
        }
    }

    /// Stops, then either takes a quarter turn or, after a full sweep, pauses to rescan
    async fn scan(&mut self, distance: f64) -> Result<ControllerState> {
        self.stop_and_pause(STOP_PAUSE_MS, distance).await?;

        if !self.search.is_complete() {
            self.issue(MotionCommand::rotate(Speed::Fast))?;
            self.search.advance();
            log_debug!("quarter turn {}", self.search.count());
            Ok(ControllerState::Rotating360Search)
        } else {
            self.stop_and_pause(RESCAN_PAUSE_MS, distance).await?;
            self.search.reset();
            log_debug!("search sweep complete, rescanning");
            Ok(ControllerState::StopAndScan)
        }
    }

    /// Stops, shows it, then blocks for `ms` and on the timeout signal
    async fn stop_and_pause(&mut self, ms: u32, distance: f64) -> Result<()> {
        self.issue(MotionCommand::STOP)?;
        status_display::render(&mut self.display, self.last_command, distance)?;
        self.timer.start_timeout(ms)?;
        self.timer.delay_ms(ms).await?;
        self.timer.wait_timeout().await?;
        self.timer.clear_timeout();
        Ok(())
    }

    /// Sends a command to the motor driver and remembers it
    fn issue(&mut self, command: MotionCommand) -> Result<()> {
        let duty = command.speed.duty();
        match command.direction {
            Direction::Forward => self.motor.move_forward(duty)?,
            Direction::Backward => self.motor.move_backward(duty)?,
            Direction::Rotating => self.motor.rotate(self.sense, duty)?,
            Direction::Stopped => self.motor.stop()?,
        }
        self.last_command = command;
        Ok(())
    }
}
