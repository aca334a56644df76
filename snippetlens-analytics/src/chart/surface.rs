//! Single-use raster drawing surface

use super::RenderError;
use ab_glyph::{FontRef, PxScale};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::io::Cursor;

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Horizontal placement of text relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// An owned RGBA canvas.
///
/// [`DrawingSurface::into_png`] consumes the surface, so a surface is
/// encoded at most once and its buffer is freed on every path out of a
/// render, including early returns on error.
pub struct DrawingSurface {
    image: RgbaImage,
    font: FontRef<'static>,
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32, font: FontRef<'static>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, BACKGROUND),
            font,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Draw `text` vertically centred on `y`, placed horizontally on `x`
    /// according to `align`
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        align: TextAlign,
        color: Rgba<u8>,
    ) {
        let scale = PxScale::from(size);
        let (width, height) = text_size(scale, &self.font, text);

        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width as f32 / 2.0,
            TextAlign::Right => x - width as f32,
        };
        let top = y - height as f32 / 2.0;

        draw_text_mut(
            &mut self.image,
            color,
            left.round() as i32,
            top.round() as i32,
            scale,
            &self.font,
            text,
        );
    }

    /// Encode as PNG, releasing the surface
    pub fn into_png(self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::load_font;

    #[test]
    fn test_new_surface_is_blank() {
        let surface = DrawingSurface::new(20, 10, load_font().unwrap());
        assert_eq!((surface.width(), surface.height()), (20, 10));
        assert!(surface.image.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_out_of_bounds_pixels_are_ignored() {
        let mut surface = DrawingSurface::new(4, 4, load_font().unwrap());
        surface.put_pixel(10, 10, TEXT_COLOR);
        surface.put_pixel(1, 1, TEXT_COLOR);
        assert_eq!(*surface.image.get_pixel(1, 1), TEXT_COLOR);
    }

    #[test]
    fn test_text_marks_pixels_near_anchor() {
        let mut surface = DrawingSurface::new(200, 60, load_font().unwrap());
        surface.draw_text("Hello", 100.0, 30.0, 24.0, TextAlign::Center, TEXT_COLOR);

        let inked: Vec<(u32, u32)> = surface
            .image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != BACKGROUND)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|&(x, y)| (50..150).contains(&x) && (10..50).contains(&y)));
    }

    #[test]
    fn test_png_signature() {
        let surface = DrawingSurface::new(8, 8, load_font().unwrap());
        let png = surface.into_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
