//! Flat, row-major pixel planes shared by every render stage.

use crate::foundation::core::Canvas;
use crate::foundation::error::{ShadeError, ShadeResult};
use crate::foundation::math::premultiply;

fn expected_len(width: u32, height: u32, channels: usize) -> ShadeResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| ShadeError::validation("buffer size overflow"))
}

/// Premultiplied RGBA8 image, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Wrap premultiplied RGBA8 bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ShadeResult<Self> {
        if data.len() != expected_len(width, height, 4)? {
            return Err(ShadeError::validation(
                "RgbaImage expects data matching width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying in place.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> ShadeResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::new(width, height, data)
    }

    /// Fully transparent image of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image, returning its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Premultiplied pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// The alpha channel as its own plane.
    pub fn alpha_mask(&self) -> AlphaMask {
        AlphaMask {
            width: self.width,
            height: self.height,
            data: self.data.chunks_exact(4).map(|px| px[3]).collect(),
        }
    }

    /// Straight-alpha copy, suitable for PNG encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }
}

/// Single-channel 8-bit alpha plane. Shadow layers carry implicit black RGB.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    /// Wrap an alpha plane; `data` must hold `width * height` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ShadeResult<Self> {
        if data.len() != expected_len(width, height, 1)? {
            return Err(ShadeError::validation(
                "AlphaMask expects data matching width*height",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// All-zero mask covering `canvas`.
    pub fn zeroed(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.pixel_count()],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Alpha bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable alpha bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Alpha at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Number of pixels with non-zero alpha.
    pub fn coverage(&self) -> u64 {
        self.data.iter().filter(|&&a| a != 0).count() as u64
    }

    /// True when no pixel has any coverage.
    pub fn is_clear(&self) -> bool {
        self.data.iter().all(|&a| a == 0)
    }

    /// Premultiplied black RGBA with this plane as alpha.
    pub fn to_black_rgba(&self) -> RgbaImage {
        let mut data = vec![0u8; self.data.len() * 4];
        for (px, &a) in data.chunks_exact_mut(4).zip(&self.data) {
            px[3] = a;
        }
        RgbaImage {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Normalized height proxy: 255 is nearest/highest, 0 farthest/lowest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl DepthBuffer {
    /// Wrap already-normalized depth; `data` must hold `width * height` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ShadeResult<Self> {
        if data.len() != expected_len(width, height, 1)? {
            return Err(ShadeError::validation(
                "DepthBuffer expects data matching width*height",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Min-max normalize raw model output into `[0, 255]`.
    ///
    /// A constant (or empty) input maps to all zeros. Non-finite samples are
    /// ignored for the range and written as 0.
    pub fn normalized_min_max(width: u32, height: u32, raw: &[f32]) -> ShadeResult<Self> {
        if raw.len() != expected_len(width, height, 1)? {
            return Err(ShadeError::validation(
                "DepthBuffer expects raw samples matching width*height",
            ));
        }
        let (lo, hi) = raw
            .iter()
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let span = hi - lo;
        let data = raw
            .iter()
            .map(|&v| {
                if !v.is_finite() || span.is_nan() || span <= 0.0 {
                    return 0;
                }
                (((v - lo) / span) * 255.0).round().clamp(0.0, 255.0) as u8
            })
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Depth bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Normalized depth at `(x, y)`.
    pub fn value(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Bilinear resample to `canvas`; a no-op clone when sizes already match.
    pub fn resized_to(&self, canvas: Canvas) -> ShadeResult<Self> {
        if self.canvas() == canvas {
            return Ok(self.clone());
        }
        if canvas.is_empty() || self.canvas().is_empty() {
            return Ok(Self {
                width: canvas.width,
                height: canvas.height,
                data: vec![0; canvas.pixel_count()],
            });
        }
        let gray = image::GrayImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ShadeError::evaluation("depth buffer does not fit a GrayImage"))?;
        let resized = image::imageops::resize(
            &gray,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        );
        Self::new(canvas.width, canvas.height, resized.into_raw())
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = premultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/buffer.rs"]
mod tests;
