//! Umbra/penumbra blending and the directional contact fade.

use rayon::prelude::*;

use crate::assets::buffer::AlphaMask;
use crate::foundation::core::Point;
use crate::foundation::math::scale_alpha;
use crate::render::blend::alpha_over_in_place;
use crate::render::blur::blur_alpha;
use crate::render::gradient::{GradientStop, GradientStops, LinearGradient};
use crate::scene::light::LightModel;
use crate::scene::params::Tunables;

/// Per-render inputs of the compositor.
#[derive(Clone, Copy, Debug)]
pub struct PenumbraParams {
    /// Ground-contact point in frame pixels.
    pub pivot: Point,
    /// `subject height * K`, in pixels.
    pub shadow_length: f64,
    /// Global opacity in `[0, 1]`.
    pub opacity: f32,
    /// Penumbra blur radius; `0` skips the penumbra layer.
    pub light_size_px: f32,
}

fn shadow_gradient(params: &PenumbraParams, light: &LightModel, stops: GradientStops) -> LinearGradient {
    let end = params.pivot + light.direction() * params.shadow_length;
    LinearGradient::new(params.pivot, end, stops)
}

/// Multiply every alpha by the gradient evaluated at the pixel center.
fn mask_with_gradient(mask: &mut AlphaMask, gradient: &LinearGradient, extra: f32) {
    let width = mask.width() as usize;
    if width == 0 {
        return;
    }
    mask.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, a) in row.iter_mut().enumerate() {
                if *a == 0 {
                    continue;
                }
                let g = gradient.alpha_at(Point::new(x as f64 + 0.5, y as f64 + 0.5));
                *a = scale_alpha(*a, g * extra);
            }
        });
}

/// Turn the warped silhouette into the final shadow alpha.
///
/// 1. A small contact blur forms the umbra.
/// 2. With a light size, a wider blur forms the penumbra, masked to ramp in
///    from the pivot, and is blended over the umbra.
/// 3. The contact fade runs along the shadow vector, then global opacity applies.
///
/// A zero-length shadow (light straight overhead) has no fade axis and yields an
/// empty layer.
pub fn composite_penumbra(
    warped: &AlphaMask,
    light: &LightModel,
    params: PenumbraParams,
    tunables: &Tunables,
) -> AlphaMask {
    let mut layer = blur_alpha(warped, tunables.contact_blur_px);

    if params.light_size_px > 0.0 {
        let mut penumbra = blur_alpha(warped, params.light_size_px);
        let ramp = GradientStops::new([
            GradientStop::new(0.0, 0.0),
            GradientStop::new(tunables.penumbra_ramp_end, 1.0),
        ]);
        mask_with_gradient(&mut penumbra, &shadow_gradient(&params, light, ramp), 1.0);
        if let Err(err) =
            alpha_over_in_place(layer.data_mut(), penumbra.data(), tunables.penumbra_opacity)
        {
            tracing::warn!(%err, "penumbra blend skipped");
        }
    }

    let fade = shadow_gradient(&params, light, tunables.contact_fade.clone());
    let opacity = if params.opacity.is_nan() {
        0.0
    } else {
        params.opacity.clamp(0.0, 1.0)
    };
    mask_with_gradient(&mut layer, &fade, opacity);
    layer
}

#[cfg(test)]
#[path = "../../tests/unit/render/penumbra.rs"]
mod tests;
