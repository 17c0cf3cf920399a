//! Final frame assembly for the three export layers.

use rayon::prelude::*;

use crate::assets::buffer::{AlphaMask, RgbaImage};
use crate::foundation::core::Canvas;
use crate::foundation::math::premultiply;
use crate::render::blend::over;
use crate::render::raster::{draw_image_over, placement_transform, rasterize_alpha};
use crate::scene::params::{DisplayMode, LayerMode};
use crate::scene::transform::Placement;

const OUTLINE_COLOR: [u8; 4] = [255, 255, 255, 140];
const HANDLE_COLOR: [u8; 4] = [59, 130, 246, 230];
const HANDLE_RADIUS_PX: f64 = 5.0;

/// A render target: premultiplied RGBA8 tagged with the layer it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    image: RgbaImage,
    mode: LayerMode,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn new(canvas: Canvas, mode: LayerMode) -> Self {
        Self {
            image: RgbaImage::transparent(canvas.width, canvas.height),
            mode,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Frame size.
    pub fn canvas(&self) -> Canvas {
        self.image.canvas()
    }

    /// Which layer this frame holds.
    pub fn mode(&self) -> LayerMode {
        self.mode
    }

    /// Frames always carry premultiplied alpha.
    pub fn premultiplied(&self) -> bool {
        true
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        self.image.data()
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.pixel(x, y)
    }

    /// Borrow the underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the frame, returning its image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Straight-alpha bytes for PNG encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        self.image.to_straight_rgba8()
    }

    /// Resize (if needed) and clear to transparent, retagging the layer.
    pub(crate) fn reset(&mut self, canvas: Canvas, mode: LayerMode) {
        if self.image.canvas() != canvas {
            self.image = RgbaImage::transparent(canvas.width, canvas.height);
        } else {
            self.image.data_mut().fill(0);
        }
        self.mode = mode;
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }
}

/// Copy the background into the target; the target must already match its size.
pub(crate) fn draw_background(target: &mut FrameRGBA, background: &RgbaImage) {
    let dst = target.image_mut().data_mut();
    if dst.len() == background.data().len() {
        dst.copy_from_slice(background.data());
    } else {
        tracing::warn!("background size differs from frame; left transparent");
    }
}

/// Composite a black shadow plane with straight source-over.
pub(crate) fn draw_shadow(target: &mut FrameRGBA, shadow: &AlphaMask) {
    let canvas = target.canvas();
    if shadow.canvas() != canvas || canvas.is_empty() {
        return;
    }
    let width = canvas.width as usize;
    target
        .image_mut()
        .data_mut()
        .par_chunks_mut(width * 4)
        .zip(shadow.data().par_chunks(width))
        .for_each(|(row, alpha)| {
            for (px, &a) in row.chunks_exact_mut(4).zip(alpha) {
                if a == 0 {
                    continue;
                }
                let out = over([px[0], px[1], px[2], px[3]], [0, 0, 0, a], 1.0);
                px.copy_from_slice(&out);
            }
        });
}

/// Draw the subject sprite at its placement rectangle.
pub(crate) fn draw_subject(target: &mut FrameRGBA, cutout: &RgbaImage, placement: &Placement) {
    if placement.is_empty() {
        return;
    }
    let transform = placement_transform(placement.rect, placement.scale);
    draw_image_over(target.image_mut(), cutout, transform, 1.0);
}

/// Subject silhouette as a white, alpha-preserving plane.
pub(crate) fn draw_silhouette(target: &mut FrameRGBA, cutout: &RgbaImage, placement: &Placement) {
    if placement.is_empty() {
        return;
    }
    let transform = placement_transform(placement.rect, placement.scale);
    let mask = rasterize_alpha(cutout, transform, target.canvas());
    for (px, &a) in target
        .image_mut()
        .data_mut()
        .chunks_exact_mut(4)
        .zip(mask.data())
    {
        px.copy_from_slice(&[a, a, a, a]);
    }
}

/// Bounding outline and pivot handle for live preview.
pub(crate) fn draw_affordances(target: &mut FrameRGBA, placement: &Placement) {
    let canvas = target.canvas();
    if canvas.is_empty() || !placement.scale.is_finite() {
        return;
    }
    let outline = premultiply(OUTLINE_COLOR);
    let handle = premultiply(HANDLE_COLOR);

    let image = target.image_mut();
    let r = placement.rect;
    if r.width() > 0.0 && r.height() > 0.0 && !r.is_nan() {
        // Edges are pinned at most one pixel outside the frame.
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let (x0, y0) = (edge(r.x0.floor(), w), edge(r.y0.floor(), h));
        let (x1, y1) = (edge(r.x1.ceil() - 1.0, w), edge(r.y1.ceil() - 1.0, h));
        for x in x0.max(0)..=x1.min(i64::from(canvas.width) - 1) {
            blend_pixel(image, canvas, x, y0, outline);
            blend_pixel(image, canvas, x, y1, outline);
        }
        for y in (y0 + 1).max(0)..y1.min(i64::from(canvas.height)) {
            blend_pixel(image, canvas, x0, y, outline);
            blend_pixel(image, canvas, x1, y, outline);
        }
    }

    let p = placement.pivot;
    let handle_zone = canvas.bounds().inflate(HANDLE_RADIUS_PX, HANDLE_RADIUS_PX);
    if !handle_zone.contains(p) {
        return;
    }
    let reach = HANDLE_RADIUS_PX.ceil() as i64;
    let (cx, cy) = (p.x.floor() as i64, p.y.floor() as i64);
    for y in (cy - reach)..=(cy + reach) {
        for x in (cx - reach)..=(cx + reach) {
            let dx = x as f64 + 0.5 - p.x;
            let dy = y as f64 + 0.5 - p.y;
            if dx * dx + dy * dy <= HANDLE_RADIUS_PX * HANDLE_RADIUS_PX {
                blend_pixel(image, canvas, x, y, handle);
            }
        }
    }
}

fn edge(v: f64, extent: f64) -> i64 {
    v.clamp(-1.0, extent) as i64
}

fn blend_pixel(image: &mut RgbaImage, canvas: Canvas, x: i64, y: i64, color: [u8; 4]) {
    if !canvas.contains(x, y) {
        return;
    }
    let idx = canvas.index(x as u32, y as u32) * 4;
    let px = &mut image.data_mut()[idx..idx + 4];
    let out = over([px[0], px[1], px[2], px[3]], color, 1.0);
    px.copy_from_slice(&out);
}

/// Assemble a composite frame: background, shadow, subject, then (interactive
/// only) the UI affordances.
pub fn compose_composite(
    target: &mut FrameRGBA,
    background: &RgbaImage,
    shadow: &AlphaMask,
    cutout: &RgbaImage,
    placement: &Placement,
    display: DisplayMode,
) {
    target.reset(background.canvas(), LayerMode::Composite);
    draw_background(target, background);
    draw_shadow(target, shadow);
    draw_subject(target, cutout, placement);
    if display == DisplayMode::Interactive {
        draw_affordances(target, placement);
    }
}

/// Shadow alone on a transparent frame.
pub fn compose_shadow_only(target: &mut FrameRGBA, shadow: &AlphaMask) {
    target.image = shadow.to_black_rgba();
    target.mode = LayerMode::ShadowOnly;
}

/// Subject silhouette alone on a transparent frame; no shadow work runs.
pub fn compose_mask_only(
    target: &mut FrameRGBA,
    canvas: Canvas,
    cutout: &RgbaImage,
    placement: &Placement,
) {
    target.reset(canvas, LayerMode::MaskOnly);
    draw_silhouette(target, cutout, placement);
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
