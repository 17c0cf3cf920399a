use std::path::Path;

use anyhow::Context;

use crate::{
    assets::buffer::{DepthBuffer, RgbaImage},
    foundation::error::{ShadeError, ShadeResult},
};

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> ShadeResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ShadeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RgbaImage::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Decode an encoded depth map (any grayscale or color format) and min-max
/// normalize its luminance into `[0, 255]`.
pub fn decode_depth(bytes: &[u8]) -> ShadeResult<DepthBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ShadeError::decode(format!("decode depth map from memory: {e}")))?;
    let luma = dyn_img.to_luma32f();
    let (width, height) = luma.dimensions();
    DepthBuffer::normalized_min_max(width, height, luma.as_raw())
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> ShadeResult<RgbaImage> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Read and decode a grayscale depth map file.
pub fn load_depth(path: impl AsRef<Path>) -> ShadeResult<DepthBuffer> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read depth map '{}'", path.display()))?;
    decode_depth(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
