//! Pixel colors of the monochrome panel

/// Drawing color of a single pixel
///
/// A set bit in the framebuffer lights the pixel up (`White`), a cleared bit leaves it dark
/// (`Black`). `Invert` toggles whatever is there and `Transparent` leaves the pixel alone, which
/// is only meaningful as a background color for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off
    #[default]
    Black,
    /// Pixel on (white, blue or yellow depending on the panel)
    White,
    /// Toggle the pixel (XOR)
    Invert,
    /// Don't touch the pixel
    Transparent,
}

impl Color {
    /// Gets a full byte (one column of a page) of black or white pixels
    ///
    /// `None` for the colors that depend on what is already drawn.
    pub fn get_byte_value(&self) -> Option<u8> {
        match self {
            Color::White => Some(0xff),
            Color::Black => Some(0x00),
            Color::Invert | Color::Transparent => None,
        }
    }

    /// Applies the color to every bit of `byte` that is set in `mask`
    #[inline]
    pub(crate) fn apply(self, byte: u8, mask: u8) -> u8 {
        match self {
            Color::White => byte | mask,
            Color::Black => byte & !mask,
            Color::Invert => byte ^ mask,
            Color::Transparent => byte,
        }
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::White
        } else {
            Color::Black
        }
    }
}
