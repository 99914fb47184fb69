//! Status display
//!
//! SSD1306 128x64 OLED on I2C0, driven as a character display of two rows
//! with sixteen columns. Writes land in a text grid; every write redraws the
//! grid and flushes the frame buffer.

use crate::task::resources::DisplayResources;
use avoidance_robot::system::error::{DisplayError, Error, Result};
use avoidance_robot::system::peripherals;
use core::fmt::Write;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embedded_graphics::{
    mono_font::{ascii::FONT_8X13, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use heapless::String;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

const ROWS: usize = 2;
const COLUMNS: usize = 16;

/// Vertical distance between text rows (px)
const ROW_PITCH: i32 = 16;

type Oled = Ssd1306<
    I2CInterface<I2c<'static, I2C0, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

pub struct StatusDisplay {
    oled: Oled,
    grid: [[u8; COLUMNS]; ROWS],
    row: usize,
    col: usize,
}

impl StatusDisplay {
    pub fn new(r: DisplayResources) -> Self {
        let i2c = I2c::new_blocking(r.i2c, r.scl, r.sda, i2c::Config::default());
        let interface = I2CDisplayInterface::new(i2c);
        let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        oled.init().unwrap();

        Self {
            oled,
            grid: [[b' '; COLUMNS]; ROWS],
            row: 0,
            col: 0,
        }
    }

    fn text_style() -> MonoTextStyle<'static, BinaryColor> {
        MonoTextStyleBuilder::new()
            .font(&FONT_8X13)
            .text_color(BinaryColor::On)
            .build()
    }

    /// Puts text into the grid, dropping what runs past the last column
    fn put(&mut self, text: &str) {
        for byte in text.bytes() {
            if self.col >= COLUMNS {
                break;
            }
            self.grid[self.row][self.col] = if byte.is_ascii() { byte } else { b'?' };
            self.col += 1;
        }
    }

    fn redraw(&mut self) -> Result<()> {
        self.oled.clear_buffer();
        let style = Self::text_style();
        for (index, row) in self.grid.iter().enumerate() {
            // grid only ever holds ascii
            let line = core::str::from_utf8(row).unwrap_or("");
            Text::with_baseline(line, Point::new(0, index as i32 * ROW_PITCH), style, Baseline::Top)
                .draw(&mut self.oled)
                .map_err(|_| Error::Display(DisplayError::BusError))?;
        }
        self.oled
            .flush()
            .map_err(|_| Error::Display(DisplayError::BusError))
    }
}

impl peripherals::Display for StatusDisplay {
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<()> {
        if row as usize >= ROWS || col as usize >= COLUMNS {
            return Err(Error::Display(DisplayError::CursorOutOfRange));
        }
        self.row = row as usize;
        self.col = col as usize;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.put(text);
        self.redraw()
    }

    fn write_number(&mut self, number: i32) -> Result<()> {
        let mut digits: String<12> = String::new();
        // an i32 fits in 11 characters
        let _ = write!(digits, "{}", number);
        self.put(&digits);
        self.redraw()
    }

    fn clear(&mut self) -> Result<()> {
        self.grid = [[b' '; COLUMNS]; ROWS];
        self.row = 0;
        self.col = 0;
        self.redraw()
    }
}
