//! One render: projection, warp, penumbra, then frame assembly.

use crate::assets::buffer::{AlphaMask, DepthBuffer, RgbaImage};
use crate::foundation::core::Canvas;
use crate::render::compose::{FrameRGBA, compose_composite, compose_mask_only, compose_shadow_only};
use crate::render::penumbra::{PenumbraParams, composite_penumbra};
use crate::render::project::project_flat;
use crate::render::warp::{WarpParams, WarpStatus, warp_height_field};
use crate::scene::config::ShadowConfig;
use crate::scene::light::{LightModel, LightParams};
use crate::scene::params::{DisplayMode, LayerMode, ShadowParams, Tunables};
use crate::scene::transform::SceneTransform;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Every parameter one render reads. Replaced as a whole between renders.
pub struct RenderRequest {
    /// Subject anchor and scale.
    pub transform: SceneTransform,
    /// Light azimuth and elevation.
    pub light: LightParams,
    /// Opacity, light size and depth strength.
    pub physics: ShadowParams,
    /// Empirical constants.
    pub tunables: Tunables,
    /// Which layer to produce.
    pub mode: LayerMode,
    /// Whether preview affordances are drawn.
    pub display: DisplayMode,
}

impl RenderRequest {
    /// Build a request from a persisted config.
    pub fn from_config(config: &ShadowConfig, mode: LayerMode, display: DisplayMode) -> Self {
        Self {
            transform: config.transform,
            light: config.light,
            physics: config.physics,
            tunables: config.tunables.clone(),
            mode,
            display,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Borrowed inputs for one render; any of them may still be pending upstream.
pub struct SceneAssets<'a> {
    /// Frame background; defines the canvas.
    pub background: Option<&'a RgbaImage>,
    /// Subject cutout (premultiplied).
    pub cutout: Option<&'a RgbaImage>,
    /// Normalized depth matching the background size.
    pub depth: Option<&'a DepthBuffer>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Whether a render produced a frame.
pub enum RenderStatus {
    /// The target holds a fresh frame.
    Rendered,
    /// Background or cutout missing; nothing was written.
    #[default]
    NothingToDraw,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Upstream-visible summary of a render.
pub struct RenderReport {
    /// Whether a frame was produced.
    pub status: RenderStatus,
    /// Height-field warp outcome.
    pub warp: WarpStatus,
    /// Non-zero pixels in the final shadow layer.
    pub coverage: u64,
}

impl RenderReport {
    fn nothing_to_draw() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug)]
/// Result of [`render`].
pub struct RenderOutput {
    /// The frame, when one was drawn.
    pub frame: Option<FrameRGBA>,
    /// Render summary.
    pub report: RenderReport,
}

#[derive(Clone, Debug)]
/// Final shadow alpha (black RGB implied) and how it was warped.
pub struct ShadowLayer {
    /// Shadow density per pixel.
    pub alpha: AlphaMask,
    /// Height-field warp outcome.
    pub warp: WarpStatus,
}

/// Run projection, height-field warp and penumbra compositing for `cutout` on
/// a frame of size `canvas`.
pub fn build_shadow_layer(
    request: &RenderRequest,
    cutout: &RgbaImage,
    depth: Option<&DepthBuffer>,
    canvas: Canvas,
) -> ShadowLayer {
    let tunables = &request.tunables;
    let light = LightModel::new(request.light, tunables.elevation_floor_deg);
    let placement = request
        .transform
        .placement(canvas, (cutout.width(), cutout.height()));

    let flat = project_flat(cutout, &placement, &light, tunables.ground_squash, canvas);
    let (warped, warp) = warp_height_field(
        &flat,
        depth,
        &light,
        WarpParams {
            pivot: placement.pivot_pixel(),
            depth_strength: request.physics.depth_strength(),
        },
        tunables,
    );
    let alpha = composite_penumbra(
        &warped,
        &light,
        PenumbraParams {
            pivot: placement.pivot,
            shadow_length: light.shadow_length(placement.height()),
            opacity: request.physics.opacity_clamped(),
            light_size_px: request.physics.light_size_px(),
        },
        tunables,
    );
    tracing::debug!(
        k = light.k(),
        coverage = alpha.coverage(),
        ?warp,
        "shadow layer built"
    );
    ShadowLayer { alpha, warp }
}

/// Render into a caller-owned frame, resizing it to the background if needed.
///
/// Missing background or cutout leaves `target` untouched and reports
/// [`RenderStatus::NothingToDraw`].
#[tracing::instrument(skip(request, assets, target), fields(mode = ?request.mode))]
pub fn render_into(
    request: &RenderRequest,
    assets: SceneAssets<'_>,
    target: &mut FrameRGBA,
) -> RenderReport {
    let (Some(background), Some(cutout)) = (assets.background, assets.cutout) else {
        tracing::debug!("background or cutout missing; nothing to draw");
        return RenderReport::nothing_to_draw();
    };
    let canvas = background.canvas();
    if canvas.is_empty() {
        return RenderReport::nothing_to_draw();
    }

    if request.mode == LayerMode::MaskOnly {
        let placement = request
            .transform
            .placement(canvas, (cutout.width(), cutout.height()));
        compose_mask_only(target, canvas, cutout, &placement);
        return RenderReport {
            status: RenderStatus::Rendered,
            warp: WarpStatus::NotRun,
            coverage: 0,
        };
    }

    let shadow = build_shadow_layer(request, cutout, assets.depth, canvas);
    match request.mode {
        LayerMode::ShadowOnly => compose_shadow_only(target, &shadow.alpha),
        _ => {
            let placement = request
                .transform
                .placement(canvas, (cutout.width(), cutout.height()));
            compose_composite(
                target,
                background,
                &shadow.alpha,
                cutout,
                &placement,
                request.display,
            );
        }
    }
    RenderReport {
        status: RenderStatus::Rendered,
        warp: shadow.warp,
        coverage: shadow.alpha.coverage(),
    }
}

/// Render into a freshly allocated frame.
#[tracing::instrument(skip(request, assets), fields(mode = ?request.mode))]
pub fn render(request: &RenderRequest, assets: SceneAssets<'_>) -> RenderOutput {
    let mut frame = FrameRGBA::new(Canvas::new(0, 0), request.mode);
    let report = render_into(request, assets, &mut frame);
    let frame = (report.status == RenderStatus::Rendered).then_some(frame);
    RenderOutput { frame, report }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
