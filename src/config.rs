//! Per panel settings

use crate::command::ComPins;
use crate::error::Error;

/// Address of most modules, the other one is 0x3D
pub const DEFAULT_ADDRESS: u8 = 0x3C;
/// Columns of the controller RAM
pub const MAX_WIDTH: u32 = 128;
/// Rows of the controller RAM
pub const MAX_HEIGHT: u32 = 64;
/// Contrast set at startup
pub const DEFAULT_CONTRAST: u8 = 0x7F;

/// Everything that differs between panels driven by this controller
///
/// ```
/// use ssd1306_driver::prelude::*;
///
/// let config = Config::default()
///     .with_height(32)
///     .with_com_pins(ComPins::SEQUENTIAL)
///     .with_address(0x3D);
/// assert_eq!(config.buffer_len(), 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels, a multiple of 8
    pub height: u32,
    /// 7-bit I2C address
    pub address: u8,
    /// First controller column wired to the panel (2 for the 132 column SH1106 clones)
    pub col_offset: u8,
    /// COM pins hardware configuration
    pub com_pins: ComPins,
    /// Contrast set at startup
    pub contrast: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: MAX_WIDTH,
            height: MAX_HEIGHT,
            address: DEFAULT_ADDRESS,
            col_offset: 0,
            com_pins: ComPins::ALTERNATIVE,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

impl Config {
    /// Sets the width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Sets the height
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Sets the I2C address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Sets the column offset
    pub fn with_col_offset(mut self, col_offset: u8) -> Self {
        self.col_offset = col_offset;
        self
    }

    /// Sets the COM pins configuration
    pub fn with_com_pins(mut self, com_pins: ComPins) -> Self {
        self.com_pins = com_pins;
        self
    }

    /// Sets the startup contrast
    pub fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast;
        self
    }

    /// Bytes of framebuffer storage the panel needs
    pub fn buffer_len(&self) -> usize {
        crate::buffer_len(self.width as usize, self.height as usize)
    }

    /// Checks the dimensions fit the controller
    pub fn validate<E>(&self) -> Result<(), Error<E>> {
        if self.width == 0
            || self.width > MAX_WIDTH
            || self.height == 0
            || self.height > MAX_HEIGHT
            || self.height % 8 != 0
        {
            return Err(Error::InvalidDimensions);
        }
        Ok(())
    }
}
