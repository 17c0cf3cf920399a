//! Flat (un-warped) shadow projection of the subject silhouette.

use crate::assets::buffer::{AlphaMask, RgbaImage};
use crate::foundation::core::{Affine, Canvas};
use crate::render::raster::{placement_transform, rasterize_alpha};
use crate::scene::light::LightModel;
use crate::scene::transform::Placement;

/// Cutout pixel space -> frame space for the projected shadow.
///
/// The cutout is placed at its rectangle, moved into pivot-local space, pushed
/// through the ground-projection matrix and moved back.
pub fn shadow_transform(placement: &Placement, light: &LightModel, ground_squash: f64) -> Affine {
    let pivot = placement.pivot.to_vec2();
    Affine::translate(pivot)
        * light.shadow_matrix(ground_squash).to_affine()
        * Affine::translate(-pivot)
        * placement_transform(placement.rect, placement.scale)
}

/// Project `cutout` onto the ground and flatten it to a black occlusion mask.
///
/// Only alpha survives: every covered pixel keeps its coverage and loses its
/// colour. Empty placements yield an all-zero mask.
pub fn project_flat(
    cutout: &RgbaImage,
    placement: &Placement,
    light: &LightModel,
    ground_squash: f64,
    canvas: Canvas,
) -> AlphaMask {
    if placement.is_empty() {
        return AlphaMask::zeroed(canvas);
    }
    let transform = shadow_transform(placement, light, ground_squash);
    let mask = rasterize_alpha(cutout, transform, canvas);
    tracing::debug!(coverage = mask.coverage(), "flat shadow projected");
    mask
}

#[cfg(test)]
#[path = "../../tests/unit/render/project.rs"]
mod tests;
