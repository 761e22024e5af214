//! Turns the dirty region into the command and data transfers that update the panel
//!
//! The controller is put in horizontal addressing mode at startup. After a column window and
//! a page window are set every data byte lands in the next column of the window, wrapping to
//! the next page at the right edge, so a window is filled with one run of bytes per page.

use crate::command::Command;
use crate::framebuffer::Framebuffer;
use crate::interface::{DisplayInterface, InterfaceExt};
use crate::rect::DirtyRect;

/// Column and page window of the controller RAM, inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    /// First and last controller column
    pub columns: (u8, u8),
    /// First and last page
    pub pages: (u8, u8),
}

/// What a refresh has to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Plan {
    /// Nothing changed
    Idle,
    /// The whole framebuffer in one transfer
    Full(Window),
    /// Framebuffer columns `left..=right` of every page in the window, one transfer per page
    Partial {
        /// Window on the controller side, shifted by the column offset
        window: Window,
        /// First framebuffer column
        left: u32,
        /// Last framebuffer column
        right: u32,
    },
}

/// Controller column of framebuffer column `x`
fn column(col_offset: u8, x: u32) -> u8 {
    (u32::from(col_offset) + x).min(u32::from(u8::MAX)) as u8
}

fn page(page: u32) -> u8 {
    page.min(u32::from(u8::MAX)) as u8
}

impl Plan {
    /// Decide how to refresh a `width` x `height` panel with the given dirty region
    ///
    /// The full frame is sent when `force` is set or everything is dirty. Otherwise only the
    /// dirty columns of the pages the region touches: rows are always sent in whole pages.
    pub fn new(dirty: DirtyRect, width: u32, height: u32, col_offset: u8, force: bool) -> Plan {
        if force || dirty.covers(width, height) {
            return Plan::Full(Window {
                columns: (
                    column(col_offset, 0),
                    column(col_offset, width.saturating_sub(1)),
                ),
                pages: (0, page((height / 8).saturating_sub(1))),
            });
        }
        match dirty.pages() {
            None => Plan::Idle,
            Some((first, last)) => Plan::Partial {
                window: Window {
                    columns: (column(col_offset, dirty.left), column(col_offset, dirty.right)),
                    pages: (page(first), page(last)),
                },
                left: dirty.left,
                right: dirty.right,
            },
        }
    }
}

fn set_window<DI: DisplayInterface>(interface: &mut DI, window: Window) -> Result<(), DI::Error> {
    interface.cmd_with_params(
        Command::ColumnAddress,
        &[window.columns.0, window.columns.1],
    )?;
    interface.cmd_with_params(Command::PageAddress, &[window.pages.0, window.pages.1])
}

/// Send the changed part of `framebuffer`, or all of it with `force`
///
/// The dirty region is reset before anything is sent, so it is empty afterwards even when a
/// transfer fails. The first bus error stops the refresh and is returned.
pub(crate) fn flush<DI, BUF>(
    interface: &mut DI,
    framebuffer: &mut Framebuffer<BUF>,
    col_offset: u8,
    force: bool,
) -> Result<(), DI::Error>
where
    DI: DisplayInterface,
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    let dirty = framebuffer.take_dirty();
    let plan = Plan::new(
        dirty,
        framebuffer.width(),
        framebuffer.height(),
        col_offset,
        force,
    );

    match plan {
        Plan::Idle => Ok(()),
        Plan::Full(window) => {
            trace!("full refresh");
            set_window(interface, window)?;
            interface.write_data(framebuffer.buffer())
        }
        Plan::Partial {
            window,
            left,
            right,
        } => {
            trace!(
                "partial refresh columns {}..={} pages {}..={}",
                left,
                right,
                window.pages.0,
                window.pages.1
            );
            set_window(interface, window)?;
            let len = right - left + 1;
            for page in u32::from(window.pages.0)..=u32::from(window.pages.1) {
                interface.write_data(framebuffer.page_slice(page, left, len))?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::color::Color;
    use crate::framebuffer::tests::framebuffer;
    use crate::interface::mock::{BusFault, Op, RecordingInterface};

    #[test]
    fn plans() {
        assert_eq!(Plan::new(DirtyRect::EMPTY, 128, 64, 0, false), Plan::Idle);
        assert_eq!(
            Plan::new(DirtyRect::EMPTY, 128, 64, 0, true),
            Plan::Full(Window {
                columns: (0, 127),
                pages: (0, 7)
            })
        );
        assert_eq!(
            Plan::new(DirtyRect::full(128, 32), 128, 32, 2, false),
            Plan::Full(Window {
                columns: (2, 129),
                pages: (0, 3)
            })
        );
        assert_eq!(
            Plan::new(DirtyRect::new(10, 7, 20, 9), 128, 64, 0, false),
            Plan::Partial {
                window: Window {
                    columns: (10, 20),
                    pages: (0, 1)
                },
                left: 10,
                right: 20,
            }
        );
    }

    #[test]
    fn single_pixel() {
        let mut fb = framebuffer();
        let mut interface = RecordingInterface::new();
        fb.set_pixel(0, 0, Color::White);

        flush(&mut interface, &mut fb, 0, false).unwrap();

        assert_eq!(interface.commands(), vec![0x21, 0, 0, 0x22, 0, 0]);
        assert_eq!(interface.data(), vec![vec![0x01]]);
        assert!(fb.dirty().is_empty());
    }

    #[test]
    fn nothing_dirty_sends_nothing() {
        let mut fb = framebuffer();
        let mut interface = RecordingInterface::new();

        flush(&mut interface, &mut fb, 0, false).unwrap();

        assert!(interface.ops.is_empty());
    }

    #[test]
    fn cleared_panel_refreshes_like_forced() {
        let mut fb = framebuffer();
        let mut forced = RecordingInterface::new();
        flush(&mut forced, &mut fb, 0, true).unwrap();

        fb.clear();
        let mut dirty = RecordingInterface::new();
        flush(&mut dirty, &mut fb, 0, false).unwrap();

        assert_eq!(forced.ops, dirty.ops);
        assert_eq!(dirty.commands(), vec![0x21, 0, 127, 0x22, 0, 7]);
        assert_eq!(dirty.data().len(), 1);
        assert_eq!(dirty.data()[0].len(), 1024);
    }

    #[test]
    fn partial_refresh_sends_one_run_per_page() {
        let mut fb = framebuffer();
        let mut interface = RecordingInterface::new();
        fb.draw_vline(5, 6, 12, Color::White);
        fb.draw_hline(3, 12, 4, Color::White);

        flush(&mut interface, &mut fb, 0, false).unwrap();

        assert_eq!(interface.commands(), vec![0x21, 3, 6, 0x22, 0, 2]);
        assert_eq!(
            interface.ops[6..],
            [
                Op::Data(vec![0x00, 0x00, 0xC0, 0x00]),
                Op::Data(vec![0x10, 0x10, 0xFF, 0x10]),
                Op::Data(vec![0x00, 0x00, 0x03, 0x00]),
            ]
        );
    }

    #[test]
    fn column_offset_shifts_the_window() {
        let mut fb = framebuffer();
        let mut interface = RecordingInterface::new();
        fb.set_pixel(127, 63, Color::White);

        flush(&mut interface, &mut fb, 2, false).unwrap();

        assert_eq!(interface.commands(), vec![0x21, 129, 129, 0x22, 7, 7]);
        assert_eq!(interface.data(), vec![vec![0x80]]);

        interface.clear();
        flush(&mut interface, &mut fb, 2, true).unwrap();
        assert_eq!(interface.commands(), vec![0x21, 2, 129, 0x22, 0, 7]);
    }

    #[test]
    fn bus_failure_is_returned_and_dirty_reset() {
        let mut fb = framebuffer();
        // the window commands go through, the first data transfer fails
        let mut interface = RecordingInterface::failing_after(6);
        fb.draw_vline(0, 0, 20, Color::White);

        assert_eq!(flush(&mut interface, &mut fb, 0, false), Err(BusFault));
        assert!(fb.dirty().is_empty());
        assert_eq!(interface.commands().len(), 6);
        assert!(interface.data().is_empty());

        let mut interface = RecordingInterface::failing_after(0);
        fb.clear();
        assert_eq!(flush(&mut interface, &mut fb, 0, false), Err(BusFault));
        assert!(fb.dirty().is_empty());
        assert!(interface.ops.is_empty());
    }
}
