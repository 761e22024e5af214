//! Rendering characters and strings of a [`Font`] into the framebuffer

use crate::color::Color;
use crate::font::Font;
use crate::framebuffer::Framebuffer;

impl<BUF> Framebuffer<BUF>
where
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Draw `c` with its top left corner at (`x`, `y`), returns its width in pixels
    ///
    /// Set glyph bits are drawn with `fg`. Clear bits are drawn with `bg`, unless `bg` is
    /// [`Color::Transparent`] or [`Color::Invert`]: then the background is left alone.
    /// Characters the font has no glyph for are drawn as a space.
    pub fn draw_char(&mut self, font: &Font, x: i32, y: i32, c: char, fg: Color, bg: Color) -> u32 {
        let Some((descriptor, rows)) = font.glyph(c) else {
            return 0;
        };
        let row_bytes = descriptor.row_bytes();
        let paint_bg = matches!(bg, Color::White | Color::Black);

        for j in 0..font.height as usize {
            let mut line = 0u8;
            for i in 0..descriptor.width as usize {
                if i % 8 == 0 {
                    line = rows[row_bytes * j + i / 8];
                }
                let (px, py) = (x.saturating_add(i as i32), y.saturating_add(j as i32));
                if line & 0x80 != 0 {
                    self.set_pixel(px, py, fg);
                } else if paint_bg {
                    self.set_pixel(px, py, bg);
                }
                line <<= 1;
            }
        }
        descriptor.width.into()
    }

    /// Draw `s` starting at (`x`, `y`), returns the width in pixels
    ///
    /// Characters are separated by the font spacing; the returned width is what
    /// [`Font::measure`] gives for the same string.
    pub fn draw_string(
        &mut self,
        font: &Font,
        x: i32,
        y: i32,
        s: &str,
        fg: Color,
        bg: Color,
    ) -> u32 {
        let mut advance = 0u32;
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            let cursor = x.saturating_add(i32::try_from(advance).unwrap_or(i32::MAX));
            advance = advance.saturating_add(self.draw_char(font, cursor, y, c, fg, bg));
            if chars.peek().is_some() {
                advance = advance.saturating_add(font.spacing.into());
            }
        }
        advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{GLCD_10X14, GLCD_5X7};
    use crate::framebuffer::tests::framebuffer;
    use crate::rect::DirtyRect;

    #[test]
    fn small_a_lands_column_major() {
        let mut fb = framebuffer();
        let width = fb.draw_char(&GLCD_5X7, 0, 0, 'A', Color::White, Color::Transparent);
        assert_eq!(width, 5);
        assert_eq!(&fb.buffer()[..6], &[0x7E, 0x11, 0x11, 0x11, 0x7E, 0x00]);
        assert_eq!(fb.dirty(), DirtyRect::new(0, 0, 4, 6));
    }

    #[test]
    fn large_a_spans_two_pages() {
        let mut fb = framebuffer();
        let width = fb.draw_char(&GLCD_10X14, 0, 0, 'A', Color::White, Color::Transparent);
        assert_eq!(width, 10);
        for x in 0..2 {
            assert_eq!(fb.buffer()[x], 0xFC);
            assert_eq!(fb.buffer()[128 + x], 0x3F);
        }
    }

    #[test]
    fn unaligned_characters() {
        let mut fb = framebuffer();
        fb.draw_char(&GLCD_5X7, 10, 4, 'A', Color::White, Color::Transparent);
        // column 0x7E shifted down by 4 rows
        assert_eq!(fb.buffer()[10], 0xE0);
        assert_eq!(fb.buffer()[128 + 10], 0x07);
    }

    #[test]
    fn out_of_range_is_drawn_as_space() {
        let mut space = framebuffer();
        let mut unknown = framebuffer();
        let w1 = space.draw_char(&GLCD_5X7, 3, 3, ' ', Color::White, Color::Black);
        let w2 = unknown.draw_char(&GLCD_5X7, 3, 3, '\u{1F600}', Color::White, Color::Black);
        assert_eq!(w1, w2);
        assert_eq!(space.buffer(), unknown.buffer());
        assert_eq!(space.dirty(), unknown.dirty());
    }

    #[test]
    fn background_colors() {
        let mut fb = framebuffer();
        fb.fill_rectangle(0, 0, 6, 8, Color::White);
        fb.draw_char(&GLCD_5X7, 0, 0, 'A', Color::Black, Color::Transparent);
        // background left on, glyph cleared
        assert_eq!(&fb.buffer()[..5], &[0x81, 0xEE, 0xEE, 0xEE, 0x81]);

        let mut fb = framebuffer();
        fb.fill_rectangle(0, 0, 6, 8, Color::White);
        fb.draw_char(&GLCD_5X7, 0, 0, 'A', Color::White, Color::Invert);
        assert_eq!(&fb.buffer()[..5], &[0xFF; 5]);

        let mut fb = framebuffer();
        fb.fill_rectangle(0, 0, 6, 8, Color::White);
        fb.draw_char(&GLCD_5X7, 0, 0, 'A', Color::White, Color::Black);
        assert_eq!(&fb.buffer()[..6], &[0x7E, 0x11, 0x11, 0x11, 0x7E, 0xFF]);
    }

    #[test]
    fn inverted_glyph_toggles_only_set_bits() {
        let mut fb = framebuffer();
        fb.fill_rectangle(0, 0, 5, 8, Color::White);
        fb.draw_char(&GLCD_5X7, 0, 0, 'A', Color::Invert, Color::Transparent);
        assert_eq!(&fb.buffer()[..5], &[0x81, 0xEE, 0xEE, 0xEE, 0x81]);
    }

    #[test]
    fn strings_advance_by_width_and_spacing() {
        let mut fb = framebuffer();
        let width = fb.draw_string(&GLCD_5X7, 0, 0, "AA", Color::White, Color::Transparent);
        assert_eq!(width, 11);
        assert_eq!(&fb.buffer()[..11], &[
            0x7E, 0x11, 0x11, 0x11, 0x7E, 0x00, 0x7E, 0x11, 0x11, 0x11, 0x7E
        ]);
        assert_eq!(fb.dirty(), DirtyRect::new(0, 0, 10, 6));
    }

    #[test]
    fn drawn_width_matches_measure() {
        for s in ["", "A", "Hello, world!", "~}|{", "ünïcödé"] {
            for font in [&GLCD_5X7, &GLCD_10X14] {
                let mut fb = framebuffer();
                let drawn = fb.draw_string(font, 0, 20, s, Color::White, Color::Black);
                assert_eq!(drawn, font.measure(s), "{:?}", s);
            }
        }
    }

    #[test]
    fn empty_string_draws_nothing() {
        let mut fb = framebuffer();
        assert_eq!(
            fb.draw_string(&GLCD_5X7, 0, 0, "", Color::White, Color::Black),
            0
        );
        assert!(fb.dirty().is_empty());
    }

    #[test]
    fn text_is_clipped() {
        let mut fb = framebuffer();
        let width = fb.draw_string(&GLCD_5X7, 125, 60, "AB", Color::White, Color::Transparent);
        assert_eq!(width, 11);
        assert_eq!(fb.buffer()[7 * 128 + 125], 0xE0);
        assert_eq!(fb.dirty(), DirtyRect::new(125, 60, 127, 63));
    }
}
