//! Lines, rectangles and circles drawn straight into the page layout

use crate::color::Color;
use crate::framebuffer::Framebuffer;

/// Selects the `n` highest bits of a byte, for the partial byte at the top of a vertical line
const PREMASK: [u8; 8] = [0x00, 0x80, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC, 0xFE];
/// Selects the `n` lowest bits of a byte, for the partial byte at the bottom of a vertical line
const POSTMASK: [u8; 8] = [0x00, 0x01, 0x03, 0x07, 0x0F, 0x1F, 0x3F, 0x7F];

/// Radii above this are clamped, no panel driven by this controller gets anywhere close
const MAX_RADIUS: u32 = i16::MAX as u32;

/// The part of the span `start..start + len` that lies within `0..limit`, as inclusive bounds
fn clip_span(start: i32, len: u32, limit: u32) -> Option<(u32, u32)> {
    if len == 0 || limit == 0 {
        return None;
    }
    let first = i64::from(start).max(0);
    let last = (i64::from(start) + i64::from(len) - 1).min(i64::from(limit) - 1);
    if first > last {
        None
    } else {
        Some((first as u32, last as u32))
    }
}

/// `base + len - 1`, saturated to the coordinate range
fn span_end(base: i32, len: u32) -> i32 {
    coord(i64::from(base) + i64::from(len) - 1)
}

/// Saturates a wide coordinate into `i32`
///
/// Radii are at most [`MAX_RADIUS`], so a saturated start stays far enough off the panel that
/// no span starting there reaches it.
fn coord(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl<BUF> Framebuffer<BUF>
where
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Draw a horizontal line of `w` pixels starting at (`x`, `y`)
    ///
    /// All pixels of the row share the same bit, so this touches one bit in each of `w`
    /// consecutive bytes.
    pub fn draw_hline(&mut self, x: i32, y: i32, w: u32, color: Color) {
        if color == Color::Transparent || y < 0 || y as u32 >= self.height() {
            return;
        }
        let Some((x0, x1)) = clip_span(x, w, self.width()) else {
            return;
        };
        let y = y as u32;
        let mask = 1 << (y & 7);
        let start = self.index(x0, y);
        let end = self.index(x1, y);
        for byte in &mut self.buffer_mut()[start..=end] {
            *byte = color.apply(*byte, mask);
        }
        self.mark_dirty_area(x0 as i32, y as i32, x1 as i32, y as i32);
    }

    /// Draw a vertical line of `h` pixels starting at (`x`, `y`) and going down
    ///
    /// Works a page at a time: a partial byte at the top, whole bytes for every page the
    /// line fully covers and a partial byte at the bottom. The result is the same as setting
    /// every pixel on its own.
    pub fn draw_vline(&mut self, x: i32, y: i32, h: u32, color: Color) {
        if color == Color::Transparent || x < 0 || x as u32 >= self.width() {
            return;
        }
        let Some((y0, y1)) = clip_span(y, h, self.height()) else {
            return;
        };
        let x = x as u32;
        let stride = self.width() as usize;
        let mut index = self.index(x, y0);
        let mut remaining = y1 - y0 + 1;
        let buffer = self.buffer_mut();

        // partial line that does not fit into byte at top
        let offset = y0 & 7;
        if offset != 0 {
            let top = 8 - offset;
            let mut mask = PREMASK[top as usize];
            if remaining < top {
                mask &= 0xFF >> (top - remaining);
            }
            buffer[index] = color.apply(buffer[index], mask);
            remaining = remaining.saturating_sub(top);
            index += stride;
        }

        // byte aligned pages in the middle, whole bytes at once
        while remaining >= 8 {
            buffer[index] = match color.get_byte_value() {
                Some(byte) => byte,
                None => color.apply(buffer[index], 0xFF),
            };
            index += stride;
            remaining -= 8;
        }

        // partial line at bottom
        if remaining > 0 {
            let mask = POSTMASK[remaining as usize];
            buffer[index] = color.apply(buffer[index], mask);
        }

        self.mark_dirty_area(x as i32, y0 as i32, x as i32, y1 as i32);
    }

    /// Draw the outline of a `w` x `h` rectangle with its top left corner at (`x`, `y`)
    ///
    /// The corners belong to both the horizontal and the vertical edge, so with
    /// [`Color::Invert`] they are toggled twice and stay as they were.
    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        if w == 0 || h == 0 {
            return;
        }
        self.draw_hline(x, y, w, color);
        self.draw_hline(x, span_end(y, h), w, color);
        self.draw_vline(x, y, h, color);
        self.draw_vline(span_end(x, w), y, h, color);
    }

    /// Fill a `w` x `h` rectangle with its top left corner at (`x`, `y`), one column at a time
    pub fn fill_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let Some((x0, x1)) = clip_span(x, w, self.width()) else {
            return;
        };
        for column in x0..=x1 {
            self.draw_vline(column as i32, y, h, color);
        }
    }

    /// Draw the outline of a circle around (`x0`, `y0`)
    ///
    /// Midpoint circle algorithm, see <http://en.wikipedia.org/wiki/Midpoint_circle_algorithm>.
    /// Every pixel of the outline is plotted exactly once so [`Color::Invert`] works.
    pub fn draw_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) {
        if r == 0 {
            return;
        }
        let (x0, y0) = (i64::from(x0), i64::from(y0));
        let r = i64::from(r.min(MAX_RADIUS));
        let mut x = r;
        let mut y = 1;
        let mut radius_err = 1 - x;

        self.plot(x0 - r, y0, color);
        self.plot(x0 + r, y0, color);
        self.plot(x0, y0 - r, color);
        self.plot(x0, y0 + r, color);

        while x >= y {
            self.plot(x0 + x, y0 + y, color);
            self.plot(x0 - x, y0 + y, color);
            self.plot(x0 + x, y0 - y, color);
            self.plot(x0 - x, y0 - y, color);
            // on the diagonal the mirrored points are the same pixels as above
            if x != y {
                self.plot(x0 + y, y0 + x, color);
                self.plot(x0 - y, y0 + x, color);
                self.plot(x0 + y, y0 - x, color);
                self.plot(x0 - y, y0 - x, color);
            }
            y += 1;
            if radius_err < 0 {
                radius_err += 2 * y + 1;
            } else {
                x -= 1;
                radius_err += 2 * (y - x + 1);
            }
        }
    }

    /// Draw a filled circle around (`x0`, `y0`)
    ///
    /// Fills with vertical spans walking the midpoint recurrence. Those spans overlap, which
    /// is fine for Black and White. For [`Color::Invert`] only the inner columns are drawn
    /// with vertical spans; the outer columns are filled afterwards by a second walk of the
    /// recurrence with horizontal spans starting at the column where the first walk stopped,
    /// so every pixel is toggled exactly once.
    pub fn fill_circle(&mut self, x0: i32, y0: i32, r: u32, color: Color) {
        if r == 0 {
            return;
        }
        let (x0, y0) = (i64::from(x0), i64::from(y0));
        let r = i64::from(r.min(MAX_RADIUS));
        let mut x = 1;
        let mut y = r;
        let mut radius_err = 1 - y;

        // center column
        self.draw_vline(coord(x0), coord(y0 - r), (2 * r + 1) as u32, color);
        while y >= x {
            self.draw_vline(coord(x0 - x), coord(y0 - y), (2 * y + 1) as u32, color);
            self.draw_vline(coord(x0 + x), coord(y0 - y), (2 * y + 1) as u32, color);
            if color != Color::Invert {
                self.draw_vline(coord(x0 - y), coord(y0 - x), (2 * x + 1) as u32, color);
                self.draw_vline(coord(x0 + y), coord(y0 - x), (2 * x + 1) as u32, color);
            }
            x += 1;
            if radius_err < 0 {
                radius_err += 2 * x + 1;
            } else {
                y -= 1;
                radius_err += 2 * (x - y + 1);
            }
        }

        if color == Color::Invert {
            // first column the vertical spans did not reach
            let x1 = x;

            let mut y = 1;
            let mut x = r;
            let mut radius_err = 1 - x;
            let span = |to: i64| u32::try_from(to - x1 + 1).unwrap_or(0);

            self.draw_hline(coord(x0 + x1), coord(y0), span(r), color);
            self.draw_hline(coord(x0 - r), coord(y0), span(r), color);
            while x >= y {
                self.draw_hline(coord(x0 + x1), coord(y0 - y), span(x), color);
                self.draw_hline(coord(x0 + x1), coord(y0 + y), span(x), color);
                self.draw_hline(coord(x0 - x), coord(y0 - y), span(x), color);
                self.draw_hline(coord(x0 - x), coord(y0 + y), span(x), color);
                y += 1;
                if radius_err < 0 {
                    radius_err += 2 * y + 1;
                } else {
                    x -= 1;
                    radius_err += 2 * (y - x + 1);
                }
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, color: Color) {
        self.set_pixel(coord(x), coord(y), color);
    }
}
