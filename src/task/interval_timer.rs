//! Interval Timer
//!
//! Timer service of the avoidance core. Fixed waits go straight to
//! embassy-time; the one-shot timeout runs in its own task so that it keeps
//! counting while the controller is busy elsewhere.
//!
//! Arming sends the duration to the task, which restarts its countdown. When
//! the countdown runs out the task raises the sticky fired flag and wakes any
//! waiter. Only [`IntervalTimer`]'s `clear_timeout` lowers it again.

use avoidance_robot::system::error::Result;
use avoidance_robot::system::peripherals;
use core::cell::Cell;
use defmt::debug;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;

/// Countdown durations for the timeout task (ms)
static TIMEOUT_ARM: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Wakes waiters once the flag went up
static TIMEOUT_RAISED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// The sticky fired flag
static TIMEOUT_FIRED: Mutex<CriticalSectionRawMutex, Cell<bool>> = Mutex::new(Cell::new(false));

fn set_fired(fired: bool) {
    TIMEOUT_FIRED.lock(|flag| flag.set(fired));
}

/// One-shot timeout task
#[embassy_executor::task]
pub async fn interval_timer() {
    let mut duration_ms = TIMEOUT_ARM.wait().await;
    loop {
        match select(Timer::after_millis(duration_ms.into()), TIMEOUT_ARM.wait()).await {
            Either::First(_) => {
                debug!("timeout fired after {} ms", duration_ms);
                set_fired(true);
                TIMEOUT_RAISED.signal(());
                duration_ms = TIMEOUT_ARM.wait().await;
            }
            // re-armed before it ran out, start over
            Either::Second(rearmed_ms) => duration_ms = rearmed_ms,
        }
    }
}

/// Handle the controller and calibration wait on
pub struct IntervalTimer;

impl peripherals::Timer for IntervalTimer {
    async fn delay_ms(&mut self, ms: u32) -> Result<()> {
        Timer::after_millis(ms.into()).await;
        Ok(())
    }

    async fn delay_us(&mut self, us: u32) -> Result<()> {
        Timer::after_micros(us.into()).await;
        Ok(())
    }

    fn start_timeout(&mut self, ms: u32) -> Result<()> {
        TIMEOUT_ARM.signal(ms);
        Ok(())
    }

    fn timeout_fired(&self) -> bool {
        TIMEOUT_FIRED.lock(|flag| flag.get())
    }

    fn clear_timeout(&mut self) {
        set_fired(false);
    }

    async fn wait_timeout(&mut self) -> Result<()> {
        while !self.timeout_fired() {
            TIMEOUT_RAISED.wait().await;
        }
        Ok(())
    }
}
