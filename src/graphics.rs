//! [`embedded-graphics`](https://docs.rs/embedded-graphics) support for the framebuffer and the driver

use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::prelude::*;
use embedded_graphics_core::primitives::Rectangle;

use crate::color::Color;
use crate::display::Ssd1306;
use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Color {
        match color {
            BinaryColor::On => Color::White,
            BinaryColor::Off => Color::Black,
        }
    }
}

/// Lets embedded-graphics draw into the framebuffer
impl<BUF> DrawTarget for Framebuffer<BUF>
where
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        let color = Color::from(color);
        for column in 0..area.size.width as i32 {
            self.draw_vline(
                area.top_left.x + column,
                area.top_left.y,
                area.size.height,
                color,
            );
        }
        Ok(())
    }
}

/// Size of the framebuffer for embedded-graphics
impl<BUF> OriginDimensions for Framebuffer<BUF>
where
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// Draws into the framebuffer, call [`Ssd1306::refresh`] to show the result
impl<DI, BUF> DrawTarget for Ssd1306<DI, BUF>
where
    DI: DisplayInterface,
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer_mut().draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer_mut().fill_solid(area, color)
    }
}

impl<DI, BUF> OriginDimensions for Ssd1306<DI, BUF>
where
    DI: DisplayInterface,
    BUF: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        self.framebuffer().size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::font::FontTable;
    use crate::framebuffer::tests::{framebuffer, HEIGHT, WIDTH};
    use crate::interface::mock::RecordingInterface;
    use crate::rect::DirtyRect;
    use embedded_graphics::{
        prelude::*,
        primitives::{Circle, Line, PointsIter, PrimitiveStyle, Rectangle},
    };

    #[test]
    fn graphics_size() {
        let fb = framebuffer();
        assert_eq!(fb.size(), Size::new(WIDTH, HEIGHT));
    }

    #[test]
    fn binary_colors() {
        assert_eq!(Color::from(BinaryColor::On), Color::White);
        assert_eq!(Color::from(BinaryColor::Off), Color::Black);
    }

    #[test]
    fn horizontal_line() {
        let mut fb = framebuffer();
        let _ = Line::new(Point::new(0, 0), Point::new(7, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb);

        assert_eq!(&fb.buffer()[..9], &[1, 1, 1, 1, 1, 1, 1, 1, 0]);
        assert_eq!(fb.dirty(), DirtyRect::new(0, 0, 7, 0));
    }

    #[test]
    fn vertical_line() {
        let mut fb = framebuffer();
        let _ = Line::new(Point::new(2, 0), Point::new(2, 15))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb);

        assert_eq!(fb.buffer()[2], 0xFF);
        assert_eq!(fb.buffer()[128 + 2], 0xFF);
        assert_eq!(fb.buffer()[256 + 2], 0x00);
    }

    #[test]
    fn off_panel_pixels_are_clipped() {
        let mut fb = framebuffer();
        let _ = Circle::new(Point::new(-10, -10), 30)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb);

        assert!(fb.buffer().iter().any(|&byte| byte != 0));
        assert_eq!(fb.dirty().left, 0);
        assert_eq!(fb.dirty().top, 0);
    }

    #[test]
    fn fill_solid_matches_pixels() {
        let area = Rectangle::new(Point::new(-3, 5), Size::new(20, 13));

        let mut solid = framebuffer();
        solid.fill_solid(&area, BinaryColor::On).unwrap();

        let mut pixels = framebuffer();
        pixels
            .draw_iter(area.points().map(|point| Pixel(point, BinaryColor::On)))
            .unwrap();

        assert_eq!(solid.buffer(), pixels.buffer());
        assert_eq!(solid.dirty(), pixels.dirty());
        assert_eq!(solid.dirty(), DirtyRect::new(0, 5, 16, 17));
    }

    #[test]
    fn fill_solid_outside_is_a_noop() {
        let mut fb = framebuffer();
        fb.fill_solid(
            &Rectangle::new(Point::new(200, 0), Size::new(10, 10)),
            BinaryColor::On,
        )
        .unwrap();
        assert!(fb.dirty().is_empty());
    }

    #[test]
    fn styled_rectangle_fill_and_clear() {
        let mut fb = framebuffer();
        let _ = Rectangle::new(Point::new(0, 0), Size::new(4, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb);
        assert_eq!(&fb.buffer()[..5], &[0xFF, 0xFF, 0xFF, 0xFF, 0x00]);

        DrawTarget::clear(&mut fb, BinaryColor::Off).unwrap();
        assert!(fb.buffer().iter().all(|&byte| byte == 0));
        assert!(fb.dirty().covers(WIDTH, HEIGHT));
    }

    #[test]
    fn draw_through_the_driver() {
        let mut display = Ssd1306::new(
            RecordingInterface::new(),
            [0u8; 1024],
            Config::default(),
            FontTable::builtin(),
        )
        .unwrap();
        assert_eq!(display.size(), Size::new(128, 64));

        let _ = Line::new(Point::new(0, 0), Point::new(0, 7))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut display);
        assert_eq!(display.buffer()[0], 0xFF);
        assert_eq!(display.dirty(), DirtyRect::new(0, 0, 0, 7));
    }
}
