//! Dirty rectangle bookkeeping
use core::cmp;

/// A rectangle with inclusive bounds, in pixels
///
/// Describes the part of the framebuffer that changed since the last refresh. The empty
/// rectangle is any rectangle with `top > bottom` or `left > right`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyRect {
    /// First dirty row
    pub top: u32,
    /// First dirty column
    pub left: u32,
    /// Last dirty column
    pub right: u32,
    /// Last dirty row
    pub bottom: u32,
}

impl DirtyRect {
    /// Nothing to refresh
    pub const EMPTY: DirtyRect = DirtyRect {
        top: u32::MAX,
        left: u32::MAX,
        right: 0,
        bottom: 0,
    };

    /// Construct a new rectangle from its corners
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> DirtyRect {
        DirtyRect {
            top,
            left,
            right,
            bottom,
        }
    }

    /// The whole panel
    pub const fn full(width: u32, height: u32) -> DirtyRect {
        if width == 0 || height == 0 {
            return DirtyRect::EMPTY;
        }
        DirtyRect::new(0, 0, width - 1, height - 1)
    }

    /// Test whether the rectangle is empty.
    pub fn is_empty(&self) -> bool {
        self.top > self.bottom || self.left > self.right
    }

    /// Grow the rectangle so it includes the pixel at (`x`, `y`)
    pub fn include(&mut self, x: u32, y: u32) {
        self.left = cmp::min(self.left, x);
        self.right = cmp::max(self.right, x);
        self.top = cmp::min(self.top, y);
        self.bottom = cmp::max(self.bottom, y);
    }

    /// Smallest rectangle containing both rectangles
    pub fn union(&self, other: DirtyRect) -> DirtyRect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return other;
        }
        DirtyRect {
            top: cmp::min(self.top, other.top),
            left: cmp::min(self.left, other.left),
            right: cmp::max(self.right, other.right),
            bottom: cmp::max(self.bottom, other.bottom),
        }
    }

    /// Does the rectangle cover a whole `width` x `height` panel
    pub fn covers(&self, width: u32, height: u32) -> bool {
        !self.is_empty()
            && self.top == 0
            && self.left == 0
            && self.right + 1 >= width
            && self.bottom + 1 >= height
    }

    /// Number of dirty columns
    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.right - self.left + 1
        }
    }

    /// Number of dirty rows
    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.bottom - self.top + 1
        }
    }

    /// First and last page (band of 8 rows) touched by the rectangle
    pub fn pages(&self) -> Option<(u32, u32)> {
        if self.is_empty() {
            None
        } else {
            Some((self.top / 8, self.bottom / 8))
        }
    }
}

impl Default for DirtyRect {
    fn default() -> Self {
        DirtyRect::EMPTY
    }
}
