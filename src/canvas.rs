// The persistent overlay the strokes accumulate on.
// Visual: starts fully black (invisible after the 50/50 blend darkens it into the
// video), keeps every stroke until cleared, and is exactly what gets saved — the
// fingertip marker and skeleton live only on the display frame, never here.

use crate::draw;
use crate::error::Error;
use crate::stroke::StrokeStyle;
use crate::types::{FrameBuffer, Point};
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

pub struct Canvas {
    buffer: FrameBuffer,
}

impl Canvas {
    /// Allocate an all-black canvas. Called once, with the first frame's
    /// dimensions; the size never changes afterwards.
    pub fn new(width: usize, height: usize) -> Self {
        Self { buffer: FrameBuffer::zeroed(width, height) }
    }

    pub fn width(&self) -> usize {
        self.buffer.width
    }

    pub fn height(&self) -> usize {
        self.buffer.height
    }

    /// Read-only view for compositing.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Paint one stroke segment in the fixed style.
    /// Visual: a solid line joins the previous fingertip position to the current one.
    pub fn draw_segment(&mut self, from: Point, to: Point, style: StrokeStyle) {
        draw::draw_line_thick(
            &mut self.buffer,
            from.x,
            from.y,
            to.x,
            to.y,
            style.thickness,
            style.color,
        );
    }

    /// Wipe every pixel back to black. Dimensions stay as they are.
    pub fn clear(&mut self) {
        for px in &mut self.buffer.pixels {
            *px = 0;
        }
    }

    /// Unpack the 0x00RRGGBB buffer into an 8-bit RGB image, pixel for pixel.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img: RgbImage =
            ImageBuffer::new(self.buffer.width as u32, self.buffer.height as u32);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let px = self.buffer.pixels[y as usize * self.buffer.width + x as usize];
            let r = ((px >> 16) & 0xFF) as u8;
            let g = ((px >> 8) & 0xFF) as u8;
            let b = (px & 0xFF) as u8;
            *pixel = Rgb([r, g, b]);
        }
        img
    }

    /// Write the canvas (not the composite) to disk; format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.to_rgb_image()
            .save(path.as_ref())
            .map_err(|e| Error::SaveImage(format!("Write {}: {e}", path.as_ref().display())))
    }
}
