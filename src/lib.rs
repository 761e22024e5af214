//! A simple Driver for SSD1306 OLED Displays via I2C
//!
//! This driver was built using [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1.0
//!
//! The controller organises its memory in _pages_: horizontal bands of 8 rows in which
//! every byte holds one column of 8 vertically stacked pixels (LSB on top). The driver keeps
//! a copy of that memory in a [`Framebuffer`](framebuffer::Framebuffer), tracks the
//! rectangle that changed since the last refresh and only streams the affected column/page
//! window to the controller.
//!
//! # Requirements
//!
//! ### I2C
//!
//! - Address is usually `0x3C` (or `0x3D` with SA0 pulled high)
//! - 100kHz and 400kHz both work; the refresh path sends at most `width * height / 8` bytes
//!
//! ### Other....
//!
//! - Buffersize: The framebuffer storage always needs to be of the size `width * height / 8`,
//!   see [`buffer_len`]. The height needs to be a multiple of 8.
//!
//! # Examples
//!
//! ```rust, no_run
//!# use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
//!# fn main() -> Result<(), ssd1306_driver::error::Error<embedded_hal::i2c::ErrorKind>> {
//!# let expectations: [Transaction; 0] = [];
//!# let i2c = Mock::new(&expectations);
//! use ssd1306_driver::prelude::*;
//!
//! let interface = I2cInterface::new(i2c, DEFAULT_ADDRESS);
//! let buffer = [0u8; buffer_len(128, 64)];
//! let mut oled = Ssd1306::new(interface, buffer, Config::default(), FontTable::builtin())?;
//!
//! // draw something into the buffer
//! oled.draw_rectangle(0, 0, 128, 64, Color::White);
//! oled.draw_string(4, 4, "Hello");
//!
//! // only the touched region is sent
//! oled.refresh(false)?;
//!
//! // power the panel down and get the bus back
//! let (interface, _buffer) = oled.release()?;
//!# let mut i2c = interface.release();
//!# i2c.done();
//!# Ok(())
//!# }
//! ```
//!
//! # Crate Features
//!
//! - **`graphics`** *(default)*: [`embedded-graphics`](https://docs.rs/embedded-graphics) support
//! - **`defmt`**: logging and `defmt::Format` for the public types
//!
#![no_std]

// must come first, the macros are used by every module below
mod fmt;

#[cfg(feature = "graphics")]
pub mod graphics;

pub mod color;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod interface;
pub mod rect;

mod primitives;
mod refresh;
mod text;

pub mod prelude {
    pub use crate::buffer_len;
    pub use crate::color::Color;
    pub use crate::command::ComPins;
    pub use crate::config::{Config, DEFAULT_ADDRESS};
    pub use crate::display::Ssd1306;
    pub use crate::error::Error;
    pub use crate::font::{Font, FontTable};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::interface::{DisplayInterface, I2cInterface};
}

/// Computes the needed framebuffer length: one byte per column for every page of 8 rows.
///
/// A height that is not a multiple of 8 is rounded up to the next full page.
pub const fn buffer_len(width: usize, height: usize) -> usize {
    (height + 7) / 8 * width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_len_full_pages() {
        assert_eq!(buffer_len(128, 64), 1024);
        assert_eq!(buffer_len(128, 32), 512);
        assert_eq!(buffer_len(64, 48), 384);
    }

    #[test]
    fn buffer_len_rounds_up_partial_page() {
        assert_eq!(buffer_len(10, 1), 10);
        assert_eq!(buffer_len(10, 9), 20);
    }
}
