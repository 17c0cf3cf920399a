//! Backward-mapped affine image drawing.
//!
//! Destination pixel centers are pulled through the inverse transform and the
//! source is sampled bilinearly, with texels outside the source treated as
//! transparent so edges come out antialiased.

use rayon::prelude::*;

use crate::assets::buffer::{AlphaMask, RgbaImage};
use crate::foundation::core::{Affine, Canvas, Point, Rect};
use crate::render::blend::over;

/// Transforms this close to singular draw nothing.
const MIN_DETERMINANT: f64 = 1e-9;

/// Destination rows/columns touched by a transformed source, plus the inverse map.
struct Footprint {
    inverse: Affine,
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl Footprint {
    fn new(src_w: u32, src_h: u32, transform: Affine, canvas: Canvas) -> Option<Self> {
        if src_w == 0 || src_h == 0 || canvas.is_empty() {
            return None;
        }
        let det = transform.determinant();
        if !det.is_finite() || det.abs() < MIN_DETERMINANT {
            tracing::warn!(det, "skipping draw with singular transform");
            return None;
        }
        let bbox = transform
            .transform_rect_bbox(Rect::new(0.0, 0.0, f64::from(src_w), f64::from(src_h)))
            .intersect(canvas.bounds());
        if bbox.area() <= 0.0 {
            return None;
        }
        Some(Self {
            inverse: transform.inverse(),
            x0: bbox.x0.floor().max(0.0) as usize,
            x1: (bbox.x1.ceil() as usize).min(canvas.width as usize),
            y0: bbox.y0.floor().max(0.0) as usize,
            y1: (bbox.y1.ceil() as usize).min(canvas.height as usize),
        })
    }

    fn source_point(&self, x: usize, y: usize) -> Point {
        self.inverse * Point::new(x as f64 + 0.5, y as f64 + 0.5)
    }
}

/// Bilinear premultiplied sample at source-space position `p` (pixel `i` spans `[i, i+1)`).
pub(crate) fn sample_premul(src: &RgbaImage, p: Point) -> [f32; 4] {
    let w = i64::from(src.width());
    let h = i64::from(src.height());
    let fx = p.x - 0.5;
    let fy = p.y - 0.5;
    if !(fx > -1.0 && fy > -1.0 && fx < w as f64 && fy < h as f64) {
        return [0.0; 4];
    }
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = (fx - x0) as f32;
    let ty = (fy - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let data = src.data();
    let texel = |x: i64, y: i64| -> [f32; 4] {
        if x < 0 || y < 0 || x >= w || y >= h {
            return [0.0; 4];
        }
        let idx = ((y * w + x) as usize) * 4;
        [
            f32::from(data[idx]),
            f32::from(data[idx + 1]),
            f32::from(data[idx + 2]),
            f32::from(data[idx + 3]),
        ]
    };

    let c00 = texel(x0, y0);
    let c10 = texel(x0 + 1, y0);
    let c01 = texel(x0, y0 + 1);
    let c11 = texel(x0 + 1, y0 + 1);

    let mut out = [0.0f32; 4];
    for c in 0..4 {
        let top = c00[c] + (c10[c] - c00[c]) * tx;
        let bottom = c01[c] + (c11[c] - c01[c]) * tx;
        out[c] = top + (bottom - top) * ty;
    }
    out
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Rasterize only the alpha of `src` under `transform` into a fresh mask.
pub fn rasterize_alpha(src: &RgbaImage, transform: Affine, canvas: Canvas) -> AlphaMask {
    let mut mask = AlphaMask::zeroed(canvas);
    let Some(fp) = Footprint::new(src.width(), src.height(), transform, canvas) else {
        return mask;
    };
    let stride = canvas.width as usize;
    mask.data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .filter(|(y, _)| *y >= fp.y0 && *y < fp.y1)
        .for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate().take(fp.x1).skip(fp.x0) {
                *px = to_u8(sample_premul(src, fp.source_point(x, y))[3]);
            }
        });
    mask
}

/// Draw `src` under `transform` over `dst` (premultiplied source-over).
pub fn draw_image_over(dst: &mut RgbaImage, src: &RgbaImage, transform: Affine, opacity: f32) {
    let canvas = dst.canvas();
    let Some(fp) = Footprint::new(src.width(), src.height(), transform, canvas) else {
        return;
    };
    let stride = canvas.width as usize * 4;
    dst.data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .filter(|(y, _)| *y >= fp.y0 && *y < fp.y1)
        .for_each(|(y, row)| {
            for x in fp.x0..fp.x1 {
                let s = sample_premul(src, fp.source_point(x, y));
                if s[3] <= 0.0 {
                    continue;
                }
                let d = &mut row[x * 4..x * 4 + 4];
                let out = over(
                    [d[0], d[1], d[2], d[3]],
                    [to_u8(s[0]), to_u8(s[1]), to_u8(s[2]), to_u8(s[3])],
                    opacity,
                );
                d.copy_from_slice(&out);
            }
        });
}

/// Maps cutout pixel space onto its placement rectangle.
pub fn placement_transform(rect: Rect, scale: f64) -> Affine {
    Affine::translate((rect.x0, rect.y0)) * Affine::scale(scale)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
