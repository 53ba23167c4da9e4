use crate::core::error::RenderError;
use crate::core::frame_buffer::DisplaySurface;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Display surface backed by an in-memory RGBA image; frames are written out as PNG.
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32) -> Self {
        ImageSurface {
            image: RgbaImage::new(width, height),
        }
    }

    /// Raw RGBA bytes currently visible.
    #[cfg(test)]
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| format!("Failed to save image to {}: {}", path.display(), e))
    }
}

impl DisplaySurface for ImageSurface {
    fn width(&self) -> usize {
        self.image.width() as usize
    }

    fn height(&self) -> usize {
        self.image.height() as usize
    }

    fn clear_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        let x_end = (x + width).min(self.width());
        let y_end = (y + height).min(self.height());
        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px as u32, py as u32, Rgba([0, 0, 0, 0]));
            }
        }
    }

    fn acquire_pixels(&self) -> Vec<u8> {
        self.image.as_raw().clone()
    }

    fn put_pixels(&mut self, data: &[u8]) -> Result<(), RenderError> {
        let expected = self.image.as_raw().len();
        if data.len() != expected {
            return Err(RenderError::SurfaceSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        self.image.copy_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_pixels_rejects_wrong_size() {
        let mut surface = ImageSurface::new(2, 2);
        assert_eq!(
            surface.put_pixels(&[0u8; 4]),
            Err(RenderError::SurfaceSizeMismatch {
                expected: 16,
                actual: 4
            })
        );
    }

    #[test]
    fn test_clear_rect_is_clipped() {
        let mut surface = ImageSurface::new(2, 2);
        surface.put_pixels(&[255u8; 16]).unwrap();
        surface.clear_rect(1, 0, 10, 10);
        let raw = surface.as_raw();
        assert_eq!(&raw[0..4], &[255, 255, 255, 255]);
        assert_eq!(&raw[4..8], &[0, 0, 0, 0]);
        assert_eq!(&raw[12..16], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_save_png_round_trip() {
        let mut surface = ImageSurface::new(3, 3);
        let mut data = vec![0u8; 36];
        data[16..20].copy_from_slice(&[255, 255, 255, 255]);
        surface.put_pixels(&data).unwrap();

        let path = std::env::temp_dir().join("softengine_surface_test.png");
        surface.save_png(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
        let _ = std::fs::remove_file(path);
    }
}
