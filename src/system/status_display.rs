//! Status display rendering
//!
//! Lays out speed, direction and distance on the 2x16 character display:
//!
//! ```text
//! Speed: 30% Dir:F
//! Dist:42 Cm
//! ```
//!
//! Rendering keeps no state of its own, so the same inputs always produce the
//! same sequence of writes.

use crate::system::command::MotionCommand;
use crate::system::error::Result;
use crate::system::peripherals::Display;

/// Message shown after a halt request
pub const STOPPED_MESSAGE: &str = "ROBOT STOPPED";

/// Characters per display row
const COLUMNS: usize = 16;

/// Trailing blanks used to wipe what a longer distance left behind
const BLANKS: &str = "                ";

/// Renders a motion command and the distance it was decided on
///
/// Every column of both rows is written, so whatever was on screen before
/// (a longer distance, the stopped message) is fully replaced.
pub fn render<D: Display>(display: &mut D, command: MotionCommand, distance: f64) -> Result<()> {
    display.set_cursor(0, 0)?;
    display.write_text("Speed: ")?;
    display.set_cursor(0, 7)?;
    display.write_text(command.speed.label())?;
    display.set_cursor(0, 10)?;
    display.write_text(" Dir:")?;
    display.set_cursor(0, 15)?;
    display.write_text(command.direction.label())?;

    let centimeters = libm::round(distance) as i32;
    display.set_cursor(1, 0)?;
    display.write_text("Dist:")?;
    display.set_cursor(1, 5)?;
    display.write_number(centimeters)?;
    display.write_text(" Cm")?;
    let used = "Dist:".len() + decimal_width(centimeters) + " Cm".len();
    let padding = COLUMNS.saturating_sub(used);
    if padding > 0 {
        display.write_text(&BLANKS[..padding])?;
    }
    Ok(())
}

/// Number of characters `write_number` produces for `number`
fn decimal_width(number: i32) -> usize {
    let mut width = if number < 0 { 2 } else { 1 };
    let mut rest = number.unsigned_abs() / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

/// Replaces the top row with the stopped message
pub fn render_stopped<D: Display>(display: &mut D) -> Result<()> {
    display.set_cursor(0, 0)?;
    display.write_text(STOPPED_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::command::Speed;
    use crate::system::mock::{Journal, MockDisplay, Record};

    #[test]
    fn test_render_layout() {
        let journal = Journal::new();
        let mut display = MockDisplay::new(&journal);

        render(&mut display, MotionCommand::forward(Speed::Cruise), 42.4).unwrap();

        assert_eq!(
            journal.records(),
            vec![
                Record::Cursor(0, 0),
                Record::Text("Speed: ".into()),
                Record::Cursor(0, 7),
                Record::Text("30%".into()),
                Record::Cursor(0, 10),
                Record::Text(" Dir:".into()),
                Record::Cursor(0, 15),
                Record::Text("F".into()),
                Record::Cursor(1, 0),
                Record::Text("Dist:".into()),
                Record::Cursor(1, 5),
                Record::Number(42),
                Record::Text(" Cm".into()),
                Record::Text("      ".into()),
            ]
        );
    }

    #[test]
    fn test_render_twice_writes_the_same() {
        let first = Journal::new();
        let second = Journal::new();
        let command = MotionCommand::rotate(Speed::Fast);

        let mut display = MockDisplay::new(&first);
        render(&mut display, command, 25.0).unwrap();
        let mut display = MockDisplay::new(&second);
        render(&mut display, command, 25.0).unwrap();
        render(&mut display, command, 25.0).unwrap();

        let once = first.records();
        let twice = second.records();
        assert_eq!(twice.len(), once.len() * 2);
        assert_eq!(&twice[..once.len()], &once[..]);
        assert_eq!(&twice[once.len()..], &once[..]);
    }

    #[test]
    fn test_render_rounds_distance() {
        let journal = Journal::new();
        let mut display = MockDisplay::new(&journal);

        render(&mut display, MotionCommand::STOP, 70.6).unwrap();

        assert!(journal.records().contains(&Record::Number(71)));
        assert_eq!(display.row(0), "Speed: 00% Dir:S");
        assert_eq!(display.row(1), "Dist:71 Cm");
    }

    #[test]
    fn test_render_stopped_overrides_top_row() {
        let journal = Journal::new();
        let mut display = MockDisplay::new(&journal);

        render(&mut display, MotionCommand::backward(Speed::Cruise), 10.0).unwrap();
        render_stopped(&mut display).unwrap();

        assert!(display.row(0).starts_with(STOPPED_MESSAGE));
        assert_eq!(display.row(1), "Dist:10 Cm");
    }

    #[test]
    fn test_render_propagates_display_error() {
        let journal = Journal::new();
        let mut display = MockDisplay::new(&journal);
        display.fail_next_write();

        assert!(render(&mut display, MotionCommand::STOP, 5.0).is_err());
    }

    #[test]
    fn test_render_replaces_stopped_message() {
        let journal = Journal::new();
        let mut display = MockDisplay::new(&journal);

        render_stopped(&mut display).unwrap();
        render(&mut display, MotionCommand::forward(Speed::Cruise), 50.0).unwrap();

        assert_eq!(display.row(0), "Speed: 30% Dir:F");
    }

    #[test]
    fn test_shorter_distance_wipes_longer_one() {
        let journal = Journal::new();
        let mut display = MockDisplay::new(&journal);

        for distance in [150.0, 50.0, 40.0, 150.0, 9.0] {
            render(&mut display, MotionCommand::STOP, distance).unwrap();
        }

        assert_eq!(display.row(1), "Dist:9 Cm");
    }

    #[test]
    fn test_decimal_width() {
        assert_eq!(decimal_width(0), 1);
        assert_eq!(decimal_width(9), 1);
        assert_eq!(decimal_width(10), 2);
        assert_eq!(decimal_width(400), 3);
        assert_eq!(decimal_width(-7), 2);
    }
}
