//! Rotation Calibration
//!
//! Runs once at startup, before the avoidance loop. The operator picks the
//! rotation sense used when searching for a free path:
//!
//! 1. The prompt and the current sense are shown, then a warm-up wait gives
//!    the operator time to get ready.
//! 2. An observation window opens, bounded by the one-shot timeout. Every
//!    press-then-release of the rotation button flips the sense and shows it.
//! 3. When the timeout fires the window closes, a settle wait follows and the
//!    display is cleared.
//!
//! Without any press the sense stays what it was.

use crate::system::command::RotationSense;
use crate::system::error::Result;
use crate::system::peripherals::{Button, ButtonState, Display, Timer};

/// Prompt shown on the top row while calibrating
const PROMPT: &str = "Set Def. Rot.";

/// Time given to the operator before presses are accepted (ms)
const WARM_UP_MS: u32 = 5000;

/// Length of the observation window (ms)
const WINDOW_MS: u32 = 5000;

/// Pause after the window closed, before handing over (ms)
const SETTLE_MS: u32 = 2000;

/// Interval between button polls, keeps the executor running (ms)
const POLL_INTERVAL_MS: u32 = 10;

/// Button channel wired to the rotation selector
pub const ROTATION_BUTTON_CHANNEL: u8 = 0;

/// Where the observation window stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    /// Open; closes on the timeout unless a press is in progress
    WaitingForTimeoutOrPress,
    /// Button is down; the edge completes on release
    WaitingForRelease,
}

/// Runs the calibration sequence and returns the chosen rotation sense
pub async fn calibrate<D, T, B>(
    display: &mut D,
    timer: &mut T,
    button: &mut B,
    initial: RotationSense,
) -> Result<RotationSense>
where
    D: Display,
    T: Timer,
    B: Button,
{
    let mut sense = initial;

    display.clear()?;
    display.set_cursor(0, 0)?;
    display.write_text(PROMPT)?;
    show_sense(display, sense)?;
    timer.delay_ms(WARM_UP_MS).await?;

    timer.clear_timeout();
    timer.start_timeout(WINDOW_MS)?;
    log_info!("calibration window open, sense {:?}", sense);

    let mut window = Window::WaitingForTimeoutOrPress;
    loop {
        if window == Window::WaitingForTimeoutOrPress && timer.timeout_fired() {
            break;
        }

        let level = button.read_state(ROTATION_BUTTON_CHANNEL)?;
        window = match (window, level) {
            (Window::WaitingForTimeoutOrPress, ButtonState::Pressed) => Window::WaitingForRelease,
            (Window::WaitingForRelease, ButtonState::Released) => {
                sense = sense.toggled();
                log_info!("rotation sense set to {:?}", sense);
                show_sense(display, sense)?;
                Window::WaitingForTimeoutOrPress
            }
            (window, _) => window,
        };

        timer.delay_ms(POLL_INTERVAL_MS).await?;
    }

    timer.clear_timeout();
    timer.start_timeout(SETTLE_MS)?;
    timer.delay_ms(SETTLE_MS).await?;
    timer.wait_timeout().await?;
    timer.clear_timeout();
    display.clear()?;

    log_info!("calibration done, sense {:?}", sense);
    Ok(sense)
}

/// Shows the sense label on the bottom row
fn show_sense<D: Display>(display: &mut D, sense: RotationSense) -> Result<()> {
    display.set_cursor(1, 0)?;
    display.write_text(sense.label())
}
