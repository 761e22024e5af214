//! Bitmap fonts and the table the active font is picked from
//!
//! Glyphs are stored row major: every row takes `(width + 7) / 8` bytes, the leftmost pixel
//! is the MSB of the first byte. A glyph is `height` rows, starting at its descriptor's
//! `offset` into the font bitmap.

mod glcd;

pub use glcd::{GLCD_10X14, GLCD_5X7};

/// Where to find one glyph and how wide it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CharDescriptor {
    /// Width in pixels
    pub width: u8,
    /// Start of the glyph in [`Font::bitmap`]
    pub offset: u16,
}

impl CharDescriptor {
    /// Bytes taken by one row of the glyph
    pub fn row_bytes(&self) -> usize {
        (self.width as usize + 7) / 8
    }
}

/// Read-only description of a bitmap font
#[derive(Debug)]
pub struct Font {
    /// Height of every glyph in pixels
    pub height: u8,
    /// Pixels between two characters of a string
    pub spacing: u8,
    /// First character code with a glyph
    pub char_start: u8,
    /// Last character code with a glyph
    pub char_end: u8,
    /// One descriptor per character in `char_start..=char_end`
    pub descriptors: &'static [CharDescriptor],
    /// Glyph rows of all characters
    pub bitmap: &'static [u8],
}

impl Font {
    /// Descriptor and rows of the glyph used for `c`
    ///
    /// Characters without a glyph are drawn as a space. `None` only if the font has no
    /// glyph for the space either, or its tables are inconsistent.
    pub fn glyph(&self, c: char) -> Option<(CharDescriptor, &'static [u8])> {
        self.lookup(c).or_else(|| self.lookup(' '))
    }

    fn lookup(&self, c: char) -> Option<(CharDescriptor, &'static [u8])> {
        let code = u32::from(c);
        if code < u32::from(self.char_start) || code > u32::from(self.char_end) {
            return None;
        }
        let descriptor = *self
            .descriptors
            .get((code - u32::from(self.char_start)) as usize)?;
        let start = descriptor.offset as usize;
        let len = descriptor.row_bytes() * self.height as usize;
        let rows = self.bitmap.get(start..start + len)?;
        Some((descriptor, rows))
    }

    /// Advance of `c` in pixels, without spacing
    pub fn char_width(&self, c: char) -> u32 {
        self.glyph(c).map_or(0, |(descriptor, _)| descriptor.width.into())
    }

    /// Width in pixels `s` takes when drawn with this font
    ///
    /// The width of every character plus `spacing` between two characters, no spacing after
    /// the last one.
    pub fn measure(&self, s: &str) -> u32 {
        let mut width = 0u32;
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            width = width.saturating_add(self.char_width(c));
            if chars.peek().is_some() {
                width = width.saturating_add(self.spacing.into());
            }
        }
        width
    }
}

/// Fonts a display can switch between, indexed by id
#[derive(Debug, Clone, Copy)]
pub struct FontTable {
    fonts: &'static [&'static Font],
}

static BUILTIN: [&Font; 2] = [&GLCD_5X7, &GLCD_10X14];

impl FontTable {
    /// Table of custom fonts, id `n` is `fonts[n]`
    pub const fn new(fonts: &'static [&'static Font]) -> Self {
        FontTable { fonts }
    }

    /// Id 0 is [`GLCD_5X7`], id 1 is [`GLCD_10X14`]
    pub fn builtin() -> Self {
        FontTable::new(&BUILTIN)
    }

    /// The font with id `id`
    pub fn get(&self, id: usize) -> Option<&'static Font> {
        self.fonts.get(id).copied()
    }

    /// Number of fonts
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Table without a font
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl Default for FontTable {
    fn default() -> Self {
        FontTable::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static NARROW_DESCRIPTORS: [CharDescriptor; 2] = [
        CharDescriptor {
            width: 2,
            offset: 0,
        },
        CharDescriptor {
            width: 3,
            offset: 2,
        },
    ];
    static NARROW_BITMAP: [u8; 4] = [0xC0, 0xC0, 0xE0, 0xA0];

    /// 2 row font with glyphs for 'a' and 'b' only
    static NO_SPACE: Font = Font {
        height: 2,
        spacing: 1,
        char_start: b'a',
        char_end: b'b',
        descriptors: &NARROW_DESCRIPTORS,
        bitmap: &NARROW_BITMAP,
    };

    #[test]
    fn builtin_table() {
        let fonts = FontTable::builtin();
        assert_eq!(fonts.len(), 2);
        assert_eq!(fonts.get(0).map(|font| font.height), Some(8));
        assert_eq!(fonts.get(1).map(|font| font.height), Some(14));
        assert!(fonts.get(2).is_none());
    }

    #[test]
    fn glyph_lookup() {
        let (descriptor, rows) = GLCD_5X7.glyph('A').unwrap();
        assert_eq!(descriptor.width, 5);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], 0x70);

        let (descriptor, rows) = GLCD_10X14.glyph('A').unwrap();
        assert_eq!(descriptor.row_bytes(), 2);
        assert_eq!(rows.len(), 28);
    }

    #[test]
    fn unknown_characters_fall_back_to_space() {
        let space = GLCD_5X7.glyph(' ');
        assert_eq!(GLCD_5X7.glyph('\u{7F}'), space);
        assert_eq!(GLCD_5X7.glyph('\n'), space);
        assert_eq!(GLCD_5X7.glyph('é'), space);
        assert_eq!(NO_SPACE.glyph('z'), None);
        assert_eq!(NO_SPACE.char_width('z'), 0);
    }

    #[test]
    fn measure_adds_spacing_between_characters() {
        assert_eq!(GLCD_5X7.measure(""), 0);
        assert_eq!(GLCD_5X7.measure("A"), 5);
        assert_eq!(GLCD_5X7.measure("AB"), 11);
        assert_eq!(GLCD_10X14.measure("Hi!"), 34);
        assert_eq!(NO_SPACE.measure("ab"), 6);
        assert_eq!(NO_SPACE.measure("abz"), 7);
    }
}
