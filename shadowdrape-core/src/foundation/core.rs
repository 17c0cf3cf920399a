pub use kurbo::{Affine, Point, Rect, Vec2};

/// Pixel size of the active frame. Every buffer in a render shares it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Zero-area frames render nothing.
    pub fn is_empty(self) -> bool {
        self.pixel_count() == 0
    }

    /// Whether the signed pixel coordinate lies inside the frame.
    pub fn contains(self, x: i64, y: i64) -> bool {
        (0..i64::from(self.width)).contains(&x) && (0..i64::from(self.height)).contains(&y)
    }

    /// Row-major index of an in-frame pixel.
    pub fn index(self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// The frame as a rectangle in pixel space, origin at the top-left.
    pub fn bounds(self) -> Rect {
        Rect::from_origin_size(
            Point::ORIGIN,
            (f64::from(self.width), f64::from(self.height)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
