//! Packed 1 bit per pixel framebuffer with dirty region tracking
//!
//! The memory layout mirrors the controller RAM: the panel is split in pages of 8 rows, each
//! page holds one byte per column and bit `y & 7` of that byte is the pixel in row `y`.
//!
//! ```text
//!            x=0      x=1            x=W-1
//! page 0   [byte 0] [byte 1]  ...  [byte W-1]      rows 0..=7,  LSB on top
//! page 1   [byte W] [byte W+1] ... [byte 2W-1]     rows 8..=15
//! ...
//! ```
//!
//! Drawing is infallible: coordinates outside the panel are silently clipped.

use crate::color::Color;
use crate::rect::DirtyRect;

/// Errors found while setting up a [`Framebuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramebufferError {
    /// Width or height is zero, or the height isn't a multiple of 8
    InvalidDimensions,
    /// The provided buffer was too small
    BufferTooSmall,
}

/// Framebuffer of a `width` x `height` panel
///
/// `BUF` is anything that can be viewed as a byte slice, usually an owned array
/// (`[u8; buffer_len(128, 64)]`) or a borrowed `&mut [u8]`.
pub struct Framebuffer<BUF> {
    width: u32,
    height: u32,
    buffer: BUF,
    dirty: DirtyRect,
}

impl<BUF> Framebuffer<BUF>
where
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    /// You must allocate the buffer by yourself, it must be large enough to contain all pixels.
    ///
    /// The buffer content is kept, call [`clear`](Framebuffer::clear) for a blank panel.
    pub fn new(width: u32, height: u32, buffer: BUF) -> Result<Self, FramebufferError> {
        if width == 0 || height == 0 || height % 8 != 0 {
            return Err(FramebufferError::InvalidDimensions);
        }
        let myself = Framebuffer {
            width,
            height,
            buffer,
            dirty: DirtyRect::EMPTY,
        };
        // the storage must hold every page
        if myself.buffer_size() > myself.buffer.as_ref().len() {
            return Err(FramebufferError::BufferTooSmall);
        }
        Ok(myself)
    }

    /// get the number of used bytes in the buffer
    fn buffer_size(&self) -> usize {
        crate::buffer_len(self.width as usize, self.height as usize)
    }

    /// Width of the panel in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the panel in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of 8 row pages
    pub fn pages(&self) -> u32 {
        self.height / 8
    }

    /// get internal buffer to use it (to send it to the controller)
    pub fn buffer(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.buffer_size()]
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut [u8] {
        let size = self.buffer_size();
        &mut self.buffer.as_mut()[..size]
    }

    /// The `len` bytes of `page`, starting at column `column`
    pub(crate) fn page_slice(&self, page: u32, column: u32, len: u32) -> &[u8] {
        let start = (page * self.width + column) as usize;
        &self.buffer()[start..start + len as usize]
    }

    /// Region that changed since the last refresh
    pub fn dirty(&self) -> DirtyRect {
        self.dirty
    }

    /// Returns the dirty region and resets it to empty
    pub(crate) fn take_dirty(&mut self) -> DirtyRect {
        core::mem::replace(&mut self.dirty, DirtyRect::EMPTY)
    }

    /// Gives the underlying storage back
    pub fn release(self) -> BUF {
        self.buffer
    }

    /// Is (`x`, `y`) on the panel
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (x + (y / 8) * self.width) as usize
    }

    /// Blank the whole panel and mark all of it dirty
    pub fn clear(&mut self) {
        self.buffer_mut().fill(0);
        self.dirty = DirtyRect::full(self.width, self.height);
    }

    /// Copy pre-rendered bytes into the bitmap
    ///
    /// At most the framebuffer length is copied, the whole panel is marked dirty.
    pub fn update_buffer(&mut self, data: &[u8]) {
        let buffer = self.buffer_mut();
        let len = core::cmp::min(data.len(), buffer.len());
        buffer[..len].copy_from_slice(&data[..len]);
        self.dirty = DirtyRect::full(self.width, self.height);
    }

    /// Grow the dirty region so it includes (`x`, `y`), clipped to the panel
    pub fn mark_dirty(&mut self, x: i32, y: i32) {
        let x = x.clamp(0, self.width as i32 - 1) as u32;
        let y = y.clamp(0, self.height as i32 - 1) as u32;
        self.dirty.include(x, y);
    }

    /// Grow the dirty region by the box from (`x0`, `y0`) to (`x1`, `y1`), both inclusive
    pub(crate) fn mark_dirty_area(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.mark_dirty(x0, y0);
        self.mark_dirty(x1, y1);
    }

    /// Set a specific pixel color on this display
    ///
    /// Pixels outside of the panel are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        // Out of range check
        if !self.contains(x, y) || color == Color::Transparent {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let index = self.index(x, y);
        let buffer = self.buffer_mut();
        buffer[index] = color.apply(buffer[index], 1 << (y & 7));
        self.dirty.include(x, y);
    }

    /// Is the pixel at (`x`, `y`) lit, `None` outside of the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        if !self.contains(x, y) {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        Some(self.buffer()[self.index(x, y)] & (1 << (y & 7)) != 0)
    }
}
