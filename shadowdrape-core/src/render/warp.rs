//! Height-field warping of the flat shadow.
//!
//! The depth buffer is read as surface height. For every destination pixel the
//! local height relative to the subject's ground contact is turned into a
//! displacement along the light direction, and the flat silhouette is sampled
//! backward at that offset. One height sample per pixel stands in for a real
//! ray/height-field intersection search, which keeps the cost O(1) per pixel
//! and avoids the holes and double writes of forward scattering.

use rayon::prelude::*;

use crate::assets::buffer::{AlphaMask, DepthBuffer};
use crate::foundation::core::Vec2;
use crate::scene::light::LightModel;
use crate::scene::params::Tunables;

/// Outcome of the warp stage, surfaced upward as a status flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarpStatus {
    /// The silhouette was resampled over the height field.
    Applied,
    /// No depth buffer is available; the flat shadow is used.
    DisabledNoDepth,
    /// `depth_strength` is zero; the flat shadow is used.
    DisabledZeroStrength,
    /// The depth buffer does not match the frame size; the flat shadow is used.
    DisabledDepthMismatch,
    /// The shadow pipeline did not run for this render.
    #[default]
    NotRun,
}

impl WarpStatus {
    /// True when the height field displaced the silhouette.
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Warp inputs that stay fixed across all pixels of one render.
#[derive(Clone, Copy, Debug)]
pub struct WarpParams {
    /// Ground-contact pixel whose depth is the reference ground level.
    pub pivot: (u32, u32),
    /// Displacement strength in pixels per unit of normalized depth.
    pub depth_strength: f64,
}

/// Destination-to-source offset for a surface sample: the source lies at
/// `destination - offset`.
pub fn backward_offset(raw_depth: u8, ground: u8, depth_strength: f64, light: &LightModel) -> Vec2 {
    let height_scale = depth_strength / 255.0;
    let pixel_height = (f64::from(raw_depth) - f64::from(ground)) * height_scale;
    light.direction() * light.shift_for_height(pixel_height)
}

/// Resample `flat` over the height field in `depth`.
///
/// Identity (a copy of `flat`) when there is no usable depth or the strength is zero.
pub fn warp_height_field(
    flat: &AlphaMask,
    depth: Option<&DepthBuffer>,
    light: &LightModel,
    params: WarpParams,
    tunables: &Tunables,
) -> (AlphaMask, WarpStatus) {
    let Some(depth) = depth else {
        return (flat.clone(), WarpStatus::DisabledNoDepth);
    };
    let strength = if params.depth_strength.is_finite() {
        params.depth_strength.max(0.0)
    } else {
        0.0
    };
    if strength == 0.0 {
        return (flat.clone(), WarpStatus::DisabledZeroStrength);
    }
    if depth.canvas() != flat.canvas() {
        tracing::warn!(
            depth_w = depth.width(),
            depth_h = depth.height(),
            frame_w = flat.width(),
            frame_h = flat.height(),
            "depth buffer size mismatch; warp disabled"
        );
        return (flat.clone(), WarpStatus::DisabledDepthMismatch);
    }
    let canvas = flat.canvas();
    if canvas.is_empty() {
        return (flat.clone(), WarpStatus::Applied);
    }

    let (px, py) = params.pivot;
    let ground = depth.value(px.min(canvas.width - 1), py.min(canvas.height - 1));
    let width = canvas.width as usize;
    let max_x = f64::from(canvas.width) - 1.0;
    let max_y = f64::from(canvas.height) - 1.0;
    let noise_floor = f32::from(tunables.noise_floor);

    let mut out = AlphaMask::zeroed(canvas);
    let depth_data = depth.data();
    out.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(ry, row)| {
            let depth_row = &depth_data[ry * width..(ry + 1) * width];
            for (rx, dst) in row.iter_mut().enumerate() {
                let raw = depth_row[rx];
                let sky = tunables.sky_opacity(raw);
                if sky <= 0.0 {
                    continue;
                }
                let offset = backward_offset(raw, ground, strength, light);
                let sx = rx as f64 - offset.x;
                let sy = ry as f64 - offset.y;
                if !(sx >= 0.0 && sy >= 0.0 && sx < max_x && sy < max_y) {
                    continue;
                }
                let alpha = sample_alpha_bilinear(flat, sx, sy);
                if alpha > noise_floor {
                    *dst = (alpha * sky).round().clamp(0.0, 255.0) as u8;
                }
            }
        });

    tracing::debug!(ground, coverage = out.coverage(), "height-field warp applied");
    (out, WarpStatus::Applied)
}

/// Bilinear alpha at integer-addressed position `(x, y)`; the caller keeps
/// `x < width - 1` and `y < height - 1`.
pub(crate) fn sample_alpha_bilinear(mask: &AlphaMask, x: f64, y: f64) -> f32 {
    let w = mask.width() as usize;
    let data = mask.data();
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let i00 = y0 * w + x0;
    let a00 = f32::from(data[i00]);
    let a10 = f32::from(data[i00 + 1]);
    let a01 = f32::from(data[i00 + w]);
    let a11 = f32::from(data[i00 + w + 1]);

    a00 * (1.0 - fx) * (1.0 - fy) + a10 * fx * (1.0 - fy) + a01 * (1.0 - fx) * fy + a11 * fx * fy
}

#[cfg(test)]
#[path = "../../tests/unit/render/warp.rs"]
mod tests;
