//! Recording collaborators for tests
//!
//! Every mock appends to one shared [`Journal`] so tests can assert the order
//! of motor, display and timer calls across collaborators. Time is simulated:
//! delays advance the journal clock and an armed timeout fires once the clock
//! reaches its deadline.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use crate::system::command::RotationSense;
use crate::system::error::{
    ButtonError, DisplayError, Error, MotorError, Result, SensorError, TimerError,
};
use crate::system::peripherals::{Button, ButtonState, Display, DistanceSensor, Motor, Timer};

/// Display grid size, matching the 16x2 character layout
const ROWS: usize = 2;
const COLS: usize = 16;

/// One collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Forward(u8),
    Backward(u8),
    Rotate(RotationSense, u8),
    Stop,
    Cursor(u8, u8),
    Text(String),
    Number(i32),
    Clear,
    Delay(u32),
    DelayUs(u32),
    ArmTimeout(u32),
    WaitTimeout,
    ClearTimeout,
}

impl Record {
    /// Whether this record is a motor command
    pub fn is_motor(&self) -> bool {
        matches!(
            self,
            Record::Forward(_) | Record::Backward(_) | Record::Rotate(..) | Record::Stop
        )
    }
}

/// Shared call log, simulated clock and distance source
#[derive(Clone, Default)]
pub struct Journal {
    records: Rc<RefCell<Vec<Record>>>,
    now_us: Rc<Cell<u64>>,
    distance: Rc<Cell<Option<f64>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, record: Record) {
        self.records.borrow_mut().push(record);
    }

    /// Everything recorded so far
    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    /// Only the motor commands, in order
    pub fn motor_commands(&self) -> Vec<Record> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.is_motor())
            .cloned()
            .collect()
    }

    /// Forget everything recorded so far (the clock keeps running)
    pub fn reset(&self) {
        self.records.borrow_mut().clear();
    }

    /// Simulated time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_us.get() / 1000
    }

    /// Distance the mock sensor reports from now on
    pub fn set_distance(&self, distance: f64) {
        self.distance.set(Some(distance));
    }
}

/// Motor driver that records commands
pub struct MockMotor {
    journal: Journal,
    fail_next: bool,
}

impl MockMotor {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail_next: false,
        }
    }

    /// Make the next command fail without being recorded
    pub fn fail_next_command(&mut self) {
        self.fail_next = true;
    }

    fn record(&mut self, record: Record) -> Result<()> {
        if core::mem::take(&mut self.fail_next) {
            return Err(Error::Motor(MotorError::HardwareFault));
        }
        self.journal.push(record);
        Ok(())
    }
}

impl Motor for MockMotor {
    fn move_forward(&mut self, duty: u8) -> Result<()> {
        self.record(Record::Forward(duty))
    }

    fn move_backward(&mut self, duty: u8) -> Result<()> {
        self.record(Record::Backward(duty))
    }

    fn rotate(&mut self, sense: RotationSense, duty: u8) -> Result<()> {
        self.record(Record::Rotate(sense, duty))
    }

    fn stop(&mut self) -> Result<()> {
        self.record(Record::Stop)
    }
}

/// 16x2 character display that records writes and keeps the resulting screen
pub struct MockDisplay {
    journal: Journal,
    grid: [[char; COLS]; ROWS],
    row: usize,
    col: usize,
    fail_next: bool,
}

impl MockDisplay {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            grid: [[' '; COLS]; ROWS],
            row: 0,
            col: 0,
            fail_next: false,
        }
    }

    /// Make the next write fail
    pub fn fail_next_write(&mut self) {
        self.fail_next = true;
    }

    /// Visible content of `row`, without trailing blanks
    pub fn row(&self, row: usize) -> String {
        let text: String = self.grid[row].iter().collect();
        text.trim_end().into()
    }

    fn check(&mut self) -> Result<()> {
        if core::mem::take(&mut self.fail_next) {
            return Err(Error::Display(DisplayError::BusError));
        }
        Ok(())
    }

    fn put(&mut self, text: &str) {
        for c in text.chars() {
            if self.col < COLS {
                self.grid[self.row][self.col] = c;
            }
            self.col += 1;
        }
    }
}

impl Display for MockDisplay {
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<()> {
        self.check()?;
        if row as usize >= ROWS || col as usize >= COLS {
            return Err(Error::Display(DisplayError::CursorOutOfRange));
        }
        self.row = row as usize;
        self.col = col as usize;
        self.journal.push(Record::Cursor(row, col));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.check()?;
        self.put(text);
        self.journal.push(Record::Text(text.into()));
        Ok(())
    }

    fn write_number(&mut self, number: i32) -> Result<()> {
        self.check()?;
        self.put(&number.to_string());
        self.journal.push(Record::Number(number));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check()?;
        self.grid = [[' '; COLS]; ROWS];
        self.row = 0;
        self.col = 0;
        self.journal.push(Record::Clear);
        Ok(())
    }
}

/// Timer on simulated time
///
/// Delays complete instantly but move the journal clock forward; an armed
/// timeout raises the signal once the clock passes its deadline. Waiting on a
/// timeout that is neither raised nor armed would hang real hardware, so the
/// mock reports it as an error instead.
pub struct MockTimer {
    journal: Journal,
    deadline_us: Option<u64>,
    fired: bool,
    record_delays: bool,
}

impl MockTimer {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            deadline_us: None,
            fired: false,
            record_delays: true,
        }
    }

    /// Stop journaling delays; they still advance the clock
    pub fn without_delay_records(mut self) -> Self {
        self.record_delays = false;
        self
    }

    /// Raise the timeout signal as if the overflow interrupt had run
    pub fn fire(&mut self) {
        self.fired = true;
        self.deadline_us = None;
    }

    fn advance(&mut self, us: u64) {
        let now = self.journal.now_us.get() + us;
        self.journal.now_us.set(now);
        if self.deadline_us.is_some_and(|deadline| now >= deadline) {
            self.fire();
        }
    }
}

impl Timer for MockTimer {
    async fn delay_ms(&mut self, ms: u32) -> Result<()> {
        if self.record_delays {
            self.journal.push(Record::Delay(ms));
        }
        self.advance(ms as u64 * 1000);
        Ok(())
    }

    async fn delay_us(&mut self, us: u32) -> Result<()> {
        if self.record_delays {
            self.journal.push(Record::DelayUs(us));
        }
        self.advance(us as u64);
        Ok(())
    }

    fn start_timeout(&mut self, ms: u32) -> Result<()> {
        self.journal.push(Record::ArmTimeout(ms));
        self.deadline_us = Some(self.journal.now_us.get() + ms as u64 * 1000);
        Ok(())
    }

    fn timeout_fired(&self) -> bool {
        self.fired
    }

    fn clear_timeout(&mut self) {
        self.journal.push(Record::ClearTimeout);
        self.fired = false;
    }

    async fn wait_timeout(&mut self) -> Result<()> {
        self.journal.push(Record::WaitTimeout);
        if self.fired {
            return Ok(());
        }
        match self.deadline_us {
            Some(deadline) => {
                let now = self.journal.now_us.get();
                self.advance(deadline.saturating_sub(now));
                Ok(())
            }
            None => Err(Error::Timer(TimerError::NotArmed)),
        }
    }
}

/// Button pressed during scripted spans of simulated time
pub struct MockButton {
    journal: Journal,
    /// (pressed from ms, released at ms)
    presses: Vec<(u64, u64)>,
}

impl MockButton {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            presses: Vec::new(),
        }
    }

    /// Hold the button down from `from_ms` until `until_ms`
    pub fn with_press(mut self, from_ms: u64, until_ms: u64) -> Self {
        self.presses.push((from_ms, until_ms));
        self
    }
}

impl Button for MockButton {
    fn read_state(&mut self, channel: u8) -> Result<ButtonState> {
        if channel != 0 {
            return Err(Error::Button(ButtonError::UnknownChannel));
        }
        let now = self.journal.now_ms();
        let pressed = self
            .presses
            .iter()
            .any(|&(from, until)| now >= from && now < until);
        Ok(if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        })
    }
}

/// Distance sensor reading whatever the journal was last told
pub struct MockSensor {
    journal: Journal,
}

impl MockSensor {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl DistanceSensor for MockSensor {
    fn latest_sample(&mut self) -> Result<f64> {
        self.journal
            .distance
            .get()
            .ok_or(Error::Sensor(SensorError::NoSample))
    }
}
