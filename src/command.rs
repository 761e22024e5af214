//! I2C Commands for the SSD1306 controller

use bit_field::BitField;

/// All commands need to have this trait which gives the byte that is sent
/// with the command control byte on the bus
pub(crate) trait CommandByte: Copy {
    fn address(self) -> u8;
}

/// SSD1306 commands
///
/// Should rarely be needed directly, [`Ssd1306`](crate::display::Ssd1306) exposes the useful ones.
///
/// For more infos about the addresses and what they are doing look into the datasheet.
/// Commands with parameters take them as separate command bytes right after the opcode.
#[allow(dead_code)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set memory addressing mode
    ///     1 Parameter:
    ///     0x00: horizontal, 0x01: vertical, 0x02: page
    MemoryMode = 0x20,
    /// Set column start and end address, 2 Parameters
    ColumnAddress = 0x21,
    /// Set page start and end address, 2 Parameters
    PageAddress = 0x22,
    /// Stop any running scroll
    DeactivateScroll = 0x2E,
    /// Set display RAM start line 0 (add 0..63 for other lines)
    SetStartLine = 0x40,
    /// Set contrast, 1 Parameter: 0x00..0xFF
    SetContrast = 0x81,
    /// Charge pump setting
    ///     1 Parameter:
    ///     0x14: enabled, 0x10: disabled (external Vcc)
    ChargePump = 0x8D,
    /// Column address 0 is mapped to SEG0
    SegmentRemapNormal = 0xA0,
    /// Column address 127 is mapped to SEG0
    SegmentRemapFlipped = 0xA1,
    /// Output follows RAM content
    DisplayAllOnResume = 0xA4,
    /// Output ignores RAM content
    DisplayAllOn = 0xA5,
    /// A set bit lights up the pixel
    NormalDisplay = 0xA6,
    /// A cleared bit lights up the pixel
    InvertDisplay = 0xA7,
    /// Set multiplex ratio, 1 Parameter: height - 1
    SetMultiplexRatio = 0xA8,
    /// Sleep mode
    DisplayOff = 0xAE,
    /// Normal operation
    DisplayOn = 0xAF,
    /// Scan from COM0 to COM[N-1]
    ComScanIncrement = 0xC0,
    /// Scan from COM[N-1] to COM0
    ComScanDecrement = 0xC8,
    /// Set vertical shift, 1 Parameter: 0..63
    SetDisplayOffset = 0xD3,
    /// Set clock divide ratio and oscillator frequency, 1 Parameter
    SetDisplayClockDiv = 0xD5,
    /// Set pre-charge period, 1 Parameter
    SetPrecharge = 0xD9,
    /// Set COM pins hardware configuration, 1 Parameter, see [`ComPins`]
    SetComPins = 0xDA,
    /// Set V_COMH deselect level, 1 Parameter
    SetVcomDeselect = 0xDB,
    /// No operation
    Nop = 0xE3,
}

impl CommandByte for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}

/// COM pins hardware configuration (parameter of [`Command::SetComPins`])
///
/// Depends on how the panel is wired to the controller, 128x32 panels usually use the
/// sequential configuration and 128x64 panels the alternative one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComPins(pub u8);

impl ComPins {
    /// Sequential COM pin configuration, no left/right remap
    pub const SEQUENTIAL: ComPins = ComPins(0x02);
    /// Alternative COM pin configuration, no left/right remap
    pub const ALTERNATIVE: ComPins = ComPins(0x12);

    /// Builds the parameter byte from its two flags
    pub fn new(alternative: bool, lr_remap: bool) -> Self {
        ComPins(*0u8.set_bit(1, true).set_bit(4, alternative).set_bit(5, lr_remap))
    }

    /// Is the alternative pin configuration selected
    pub fn is_alternative(self) -> bool {
        self.0.get_bit(4)
    }

    /// Is the left/right remap enabled
    pub fn is_lr_remapped(self) -> bool {
        self.0.get_bit(5)
    }

    /// Same configuration with the left/right remap bit replaced
    pub fn with_lr_remap(self, lr_remap: bool) -> Self {
        let mut value = self.0;
        value.set_bit(5, lr_remap);
        ComPins(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for ComPins {
    fn default() -> Self {
        ComPins::ALTERNATIVE
    }
}
