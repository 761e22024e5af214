//! The driver session: one panel, its framebuffer and the active font

use embedded_hal::i2c::I2c;

use crate::color::Color;
use crate::command::Command;
use crate::config::Config;
use crate::error::Error;
use crate::font::{Font, FontTable};
use crate::framebuffer::{Framebuffer, FramebufferError};
use crate::interface::{DisplayInterface, I2cInterface, InterfaceExt};
use crate::rect::DirtyRect;
use crate::refresh;

/// Clock divide ratio 1, oscillator frequency 8 (reset value)
const CLOCK_DIV: u8 = 0x80;
/// V_COMH deselect level of about 0.77 x Vcc
const VCOM_DESELECT: u8 = 0x20;
/// Pre-charge period for the internal charge pump, 0x22 for external Vcc
const PRECHARGE: u8 = 0xF1;
/// Horizontal addressing mode
const HORIZONTAL_ADDRESSING: u8 = 0x00;
const CHARGE_PUMP_ON: u8 = 0x14;
const CHARGE_PUMP_OFF: u8 = 0x10;

fn framebuffer_error<E>(err: FramebufferError) -> Error<E> {
    match err {
        FramebufferError::InvalidDimensions => Error::InvalidDimensions,
        FramebufferError::BufferTooSmall => Error::BufferTooSmall,
    }
}

/// SSD1306 driver
///
/// Drawing goes into the framebuffer only, [`refresh`](Ssd1306::refresh) sends the changes.
/// Bus errors of commands and refreshes are returned, drawing never fails.
pub struct Ssd1306<DI, BUF> {
    /// Connection Interface
    interface: DI,
    framebuffer: Framebuffer<BUF>,
    config: Config,
    fonts: FontTable,
    /// Active font, none if the table had no font 0
    font: Option<&'static Font>,
}

impl<I2C, BUF> Ssd1306<I2cInterface<I2C>, BUF>
where
    I2C: I2c,
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Talk to the panel at `config.address` on `i2c`, see [`new`](Ssd1306::new)
    pub fn new_i2c(
        i2c: I2C,
        buffer: BUF,
        config: Config,
        fonts: FontTable,
    ) -> Result<Self, Error<I2C::Error>> {
        Ssd1306::new(I2cInterface::new(i2c, config.address), buffer, config, fonts)
    }
}

impl<DI, BUF> Ssd1306<DI, BUF>
where
    DI: DisplayInterface,
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Creates a new driver and initialises the panel
    ///
    /// `buffer` must hold at least [`Config::buffer_len`] bytes. The panel is configured,
    /// cleared, and switched on, and font 0 of `fonts` becomes the active font.
    pub fn new(
        interface: DI,
        buffer: BUF,
        config: Config,
        fonts: FontTable,
    ) -> Result<Self, Error<DI::Error>> {
        config.validate::<DI::Error>()?;
        let framebuffer = Framebuffer::new(config.width, config.height, buffer)
            .map_err(framebuffer_error::<DI::Error>)?;

        let mut display = Ssd1306 {
            interface,
            framebuffer,
            config,
            fonts,
            font: None,
        };
        display.init()?;
        Ok(display)
    }

    fn init(&mut self) -> Result<(), Error<DI::Error>> {
        debug!("sending controller startup sequence");
        let multiplex = (self.config.height - 1) as u8;
        let i = &mut self.interface;
        i.cmd(Command::DisplayOff)?;
        i.cmd_with_params(Command::SetMultiplexRatio, &[multiplex])?;
        i.cmd_with_params(Command::SetDisplayOffset, &[0x00])?;
        i.cmd(Command::SetStartLine)?;
        i.cmd(Command::SegmentRemapFlipped)?;
        i.cmd(Command::ComScanDecrement)?;
        i.cmd_with_params(Command::SetComPins, &[self.config.com_pins.value()])?;
        i.cmd_with_params(Command::SetContrast, &[self.config.contrast])?;
        i.cmd(Command::DisplayAllOnResume)?;
        i.cmd(Command::NormalDisplay)?;
        i.cmd_with_params(Command::SetDisplayClockDiv, &[CLOCK_DIV])?;
        i.cmd_with_params(Command::SetVcomDeselect, &[VCOM_DESELECT])?;
        i.cmd_with_params(Command::ChargePump, &[CHARGE_PUMP_ON])?;
        i.cmd_with_params(Command::MemoryMode, &[HORIZONTAL_ADDRESSING])?;
        i.cmd_with_params(Command::SetPrecharge, &[PRECHARGE])?;

        debug!("clearing screen buffer");
        self.framebuffer.clear();
        self.refresh(true)?;
        self.select_font(0);

        debug!("turning on display");
        self.interface.cmd(Command::DeactivateScroll)?;
        self.interface.cmd(Command::DisplayOn)?;

        info!(
            "init ok (width: {}, height: {}, address: {})",
            self.config.width,
            self.config.height,
            self.config.address
        );
        Ok(())
    }

    /// Powers the panel down and gives back the interface and the framebuffer storage
    pub fn release(mut self) -> Result<(DI, BUF), Error<DI::Error>> {
        debug!("display off, charge pump off");
        self.interface.cmd(Command::DisplayOff)?;
        self.interface
            .cmd_with_params(Command::ChargePump, &[CHARGE_PUMP_OFF])?;
        Ok((self.interface, self.framebuffer.release()))
    }

    /// Width of the panel in pixels
    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    /// Height of the panel in pixels
    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    /// Settings the panel was set up with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Region that changed since the last refresh
    pub fn dirty(&self) -> DirtyRect {
        self.framebuffer.dirty()
    }

    /// The framebuffer bytes, in controller layout
    pub fn buffer(&self) -> &[u8] {
        self.framebuffer.buffer()
    }

    /// The framebuffer the driver draws into
    pub fn framebuffer(&self) -> &Framebuffer<BUF> {
        &self.framebuffer
    }

    /// Mutable access to the framebuffer, for drawing without the driver
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<BUF> {
        &mut self.framebuffer
    }

    /// Send the changes since the last refresh to the panel, everything with `force`
    ///
    /// The dirty region is reset even if sending fails.
    pub fn refresh(&mut self, force: bool) -> Result<(), Error<DI::Error>> {
        refresh::flush(
            &mut self.interface,
            &mut self.framebuffer,
            self.config.col_offset,
            force,
        )?;
        Ok(())
    }

    /// Copy pre-rendered bytes into the framebuffer and mark the whole panel dirty
    pub fn update_buffer(&mut self, data: &[u8]) {
        self.framebuffer.update_buffer(data);
    }

    /// Blank the framebuffer
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Grow the dirty region so it includes (`x`, `y`)
    pub fn mark_dirty(&mut self, x: i32, y: i32) {
        self.framebuffer.mark_dirty(x, y);
    }

    /// Set a single pixel, see [`Framebuffer::set_pixel`]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.set_pixel(x, y, color);
    }

    /// Draw a horizontal line, see [`Framebuffer::draw_hline`]
    pub fn draw_hline(&mut self, x: i32, y: i32, w: u32, color: Color) {
        self.framebuffer.draw_hline(x, y, w, color);
    }

    /// Draw a vertical line, see [`Framebuffer::draw_vline`]
    pub fn draw_vline(&mut self, x: i32, y: i32, h: u32, color: Color) {
        self.framebuffer.draw_vline(x, y, h, color);
    }

    /// Draw a rectangle outline, see [`Framebuffer::draw_rectangle`]
    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        self.framebuffer.draw_rectangle(x, y, w, h, color);
    }

    /// Fill a rectangle, see [`Framebuffer::fill_rectangle`]
    pub fn fill_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        self.framebuffer.fill_rectangle(x, y, w, h, color);
    }

    /// Draw a circle outline, see [`Framebuffer::draw_circle`]
    pub fn draw_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) {
        self.framebuffer.draw_circle(x0, y0, r, color);
    }

    /// Fill a circle, see [`Framebuffer::fill_circle`]
    pub fn fill_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) {
        self.framebuffer.fill_circle(x0, y0, r, color);
    }

    /// Make font `id` of the font table the active font
    ///
    /// Unknown ids are ignored, the active font stays as it was.
    pub fn select_font(&mut self, id: usize) {
        match self.fonts.get(id) {
            Some(font) => self.font = Some(font),
            None => warn!("no font with id {}", id),
        }
    }

    /// The font text is drawn with, `None` if none was selected
    pub fn active_font(&self) -> Option<&'static Font> {
        self.font
    }

    /// Height of the active font, 0 without one
    pub fn font_height(&self) -> u32 {
        self.font.map_or(0, |font| font.height.into())
    }

    /// Spacing between characters of the active font, 0 without one
    pub fn font_spacing(&self) -> u32 {
        self.font.map_or(0, |font| font.spacing.into())
    }

    /// Draw `c` with the active font, returns its width or 0 without a font
    ///
    /// See [`Framebuffer::draw_char`] for how `fg` and `bg` are used.
    pub fn draw_char(&mut self, x: i32, y: i32, c: char, fg: Color, bg: Color) -> u32 {
        match self.font {
            Some(font) => self.framebuffer.draw_char(font, x, y, c, fg, bg),
            None => 0,
        }
    }

    /// Draw `s` with the active font, returns its width or 0 without a font
    pub fn draw_string_color(&mut self, x: i32, y: i32, s: &str, fg: Color, bg: Color) -> u32 {
        match self.font {
            Some(font) => self.framebuffer.draw_string(font, x, y, s, fg, bg),
            None => 0,
        }
    }

    /// Draw `s` in white on a transparent background
    pub fn draw_string(&mut self, x: i32, y: i32, s: &str) -> u32 {
        self.draw_string_color(x, y, s, Color::White, Color::Transparent)
    }

    /// Width `s` would take with the active font
    pub fn measure_string(&self, s: &str) -> u32 {
        self.font.map_or(0, |font| font.measure(s))
    }

    /// Send a raw command byte
    pub fn command(&mut self, byte: u8) -> Result<(), Error<DI::Error>> {
        self.interface.write_command(byte)?;
        Ok(())
    }

    /// Wake the panel up
    pub fn display_on(&mut self) -> Result<(), Error<DI::Error>> {
        self.interface.cmd(Command::DisplayOn)?;
        Ok(())
    }

    /// Put the panel to sleep, the RAM content is kept
    pub fn display_off(&mut self) -> Result<(), Error<DI::Error>> {
        self.interface.cmd(Command::DisplayOff)?;
        Ok(())
    }

    /// Set the brightness, higher is brighter
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<DI::Error>> {
        self.interface
            .cmd_with_params(Command::SetContrast, &[contrast])?;
        Ok(())
    }

    /// Light up cleared bits instead of set ones. Only the output changes, not the RAM.
    pub fn invert_display(&mut self, invert: bool) -> Result<(), Error<DI::Error>> {
        let command = if invert {
            Command::InvertDisplay
        } else {
            Command::NormalDisplay
        };
        self.interface.cmd(command)?;
        Ok(())
    }

    /// Mirror the output
    ///
    /// `horizontal` sets the left/right remap of the COM pins on top of the configured
    /// value, `vertical` selects the COM scan direction.
    pub fn flip_display(&mut self, horizontal: bool, vertical: bool) -> Result<(), Error<DI::Error>> {
        let com_pins = if horizontal {
            self.config.com_pins.with_lr_remap(true)
        } else {
            self.config.com_pins
        };
        let scan = if vertical {
            Command::ComScanIncrement
        } else {
            Command::ComScanDecrement
        };
        self.interface
            .cmd_with_params(Command::SetComPins, &[com_pins.value()])?;
        self.interface.cmd(scan)?;
        Ok(())
    }

    /// `alt` is the orientation set up at startup, otherwise the panel is turned by 180°
    pub fn rotate_display(&mut self, alt: bool) -> Result<(), Error<DI::Error>> {
        if alt {
            self.interface.cmd(Command::SegmentRemapFlipped)?;
            self.interface.cmd(Command::ComScanDecrement)?;
        } else {
            self.interface.cmd(Command::SegmentRemapNormal)?;
            self.interface.cmd(Command::ComScanIncrement)?;
        }
        Ok(())
    }

    /// Internal charge pump, off for panels with an external Vcc
    pub fn set_charge_pump(&mut self, enabled: bool) -> Result<(), Error<DI::Error>> {
        let setting = if enabled {
            CHARGE_PUMP_ON
        } else {
            CHARGE_PUMP_OFF
        };
        self.interface
            .cmd_with_params(Command::ChargePump, &[setting])?;
        Ok(())
    }
}
