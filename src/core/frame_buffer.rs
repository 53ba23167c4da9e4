use crate::core::color::{self, Color4};
use crate::core::error::RenderError;

/// The visible side of the pipeline: a pixel surface that can hand out and take back
/// whole RGBA frames.
pub trait DisplaySurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Resets a rectangle to transparent black.
    fn clear_rect(&mut self, x: usize, y: usize, width: usize, height: usize);
    fn acquire_pixels(&self) -> Vec<u8>;
    /// Replaces the visible contents with `data` (tightly packed RGBA).
    fn put_pixels(&mut self, data: &[u8]) -> Result<(), RenderError>;
}

pub trait PixelSink {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn put_pixel(&mut self, x: f32, y: f32, color: &Color4) -> Result<(), RenderError>;
}

/// Off-screen RGBA back buffer bound to one display surface.
///
/// Lifecycle per frame: `clear` -> any number of `put_pixel` -> `present`.
pub struct FrameBuffer<S: DisplaySurface> {
    pub width: usize,
    pub height: usize,
    surface: S,
    background: Color4,
    back_buffer: Option<Vec<u8>>,
}

impl<S: DisplaySurface> FrameBuffer<S> {
    pub fn new(surface: S) -> Self {
        FrameBuffer {
            width: surface.width(),
            height: surface.height(),
            surface,
            background: color::black(),
            back_buffer: None,
        }
    }

    pub fn set_background(&mut self, background: Color4) {
        self.background = background;
    }

    /// Clears the surface and acquires a fresh back buffer filled with the background color,
    /// sized to the surface's current dimensions.
    pub fn clear(&mut self) {
        self.width = self.surface.width();
        self.height = self.surface.height();
        self.surface.clear_rect(0, 0, self.width, self.height);

        let mut buffer = self.surface.acquire_pixels();
        let background = color::to_rgba_u8(&self.background);
        for pixel in buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&background);
        }
        self.back_buffer = Some(buffer);
    }

    /// Copies the back buffer verbatim to the display surface. Does not clear.
    pub fn present(&mut self) -> Result<(), RenderError> {
        let buffer = self
            .back_buffer
            .as_ref()
            .ok_or(RenderError::UninitializedBuffer)?;
        self.surface.put_pixels(buffer)
    }

    pub fn is_ready(&self) -> bool {
        self.back_buffer.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn get_color_buffer_bytes(&self) -> Option<&[u8]> {
        self.back_buffer.as_deref()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y * self.width + x) * 4;
        self.back_buffer
            .as_ref()
            .and_then(|buffer| buffer.get(index..index + 4))
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Number of back buffer pixels that differ from the background.
    pub fn lit_pixels(&self) -> usize {
        let background = color::to_rgba_u8(&self.background);
        self.get_color_buffer_bytes().map_or(0, |buffer| {
            buffer
                .chunks_exact(4)
                .filter(|px| **px != background)
                .count()
        })
    }
}

impl<S: DisplaySurface> PixelSink for FrameBuffer<S> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    /// Writes at linear index `(trunc(x) + trunc(y) * width) * 4`.
    ///
    /// Callers cull first. Writes landing past the end of the buffer are dropped.
    fn put_pixel(&mut self, x: f32, y: f32, color: &Color4) -> Result<(), RenderError> {
        let width = self.width as i64;
        let buffer = self
            .back_buffer
            .as_mut()
            .ok_or(RenderError::UninitializedBuffer)?;

        let index = (y as i64)
            .checked_mul(width)
            .and_then(|row| row.checked_add(x as i64))
            .and_then(|cell| cell.checked_mul(4))
            .and_then(|index| usize::try_from(index).ok());

        if let Some(px) = index.and_then(|i| buffer.get_mut(i..i + 4)) {
            px.copy_from_slice(&color::to_rgba_u8(color));
        }
        Ok(())
    }
}
