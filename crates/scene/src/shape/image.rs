use std::sync::Arc;

use glam::Vec2;
use vellum_core::{Point, Rect};

/// Decoded image pixels shared between scene nodes and painter backends.
///
/// Pixels are premultiplied RGBA8, row-major, `width * height * 4` bytes.
#[derive(Clone)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
}

impl ImageData {
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: Arc::new(pixels),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl PartialEq for ImageData {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// An image drawn into a destination rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub data: ImageData,
}

impl Image {
    pub fn new(x: f32, y: f32, width: f32, height: f32, data: ImageData) -> Self {
        Self {
            x,
            y,
            width,
            height,
            data,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::from_origin_size(
            Vec2::new(self.x, self.y),
            Vec2::new(self.width, self.height),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        self.bounding_rect().contains_point(p.to_vec2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_data_validates_length() {
        assert!(ImageData::new(2, 2, vec![0; 16]).is_some());
        assert!(ImageData::new(2, 2, vec![0; 15]).is_none());
        assert!(ImageData::new(0, 2, vec![]).is_none());
    }

    #[test]
    fn test_image_containment_is_box() {
        let data = ImageData::new(1, 1, vec![255; 4]).unwrap();
        let img = Image::new(10.0, 10.0, 20.0, 20.0, data);
        assert!(img.contains(Point::new(15.0, 15.0)));
        assert!(!img.contains(Point::new(5.0, 15.0)));
    }
}
