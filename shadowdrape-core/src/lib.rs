//! Shadowdrape casts a directional shadow of a cut-out subject onto a photo.
//!
//! A subject cutout (RGBA) is placed on a background frame and lit by a single
//! directional light. The shadow it throws is projected onto a flat ground
//! plane, draped over the scene using a depth map as a height field, softened
//! into umbra and penumbra, and composited back under the subject.
//!
//! # Pipeline overview
//!
//! 1. **Project**: `Cutout + SceneTransform + LightParams -> flat silhouette` (affine ground projection)
//! 2. **Warp**: `flat silhouette + DepthBuffer -> warped silhouette` (backward height-field mapping)
//! 3. **Soften**: `warped silhouette -> shadow layer` (contact blur, penumbra, contact fade, opacity)
//! 4. **Compose**: `background + shadow layer + cutout -> FrameRGBA` (composite, shadow-only or mask-only)
//!
//! [`render`] runs the whole pipeline for one [`RenderRequest`];
//! [`RenderController`] re-runs it whenever inputs change, coalescing edits and
//! tracking asynchronously produced assets.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No failure on parameters**: degenerate inputs produce an empty or
//!   degraded frame, never an error. Errors only come from buffer
//!   construction, decoding and config parsing.
//! - **Premultiplied RGBA8** end-to-end; convert with
//!   [`FrameRGBA::to_straight_rgba8`] before encoding.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod render;
mod scene;
mod session;

pub use assets::buffer::{AlphaMask, DepthBuffer, RgbaImage};
pub use assets::decode::{decode_depth, decode_image, load_depth, load_image};
pub use foundation::core::{Affine, Canvas, Point, Rect, Vec2};
pub use foundation::error::{InferenceError, ShadeError, ShadeResult};
pub use render::blend::{PremulRgba8, over};
pub use render::blur::blur_alpha;
pub use render::compose::{FrameRGBA, compose_composite, compose_mask_only, compose_shadow_only};
pub use render::gradient::{GradientStop, GradientStops, LinearGradient};
pub use render::penumbra::{PenumbraParams, composite_penumbra};
pub use render::pipeline::{
    RenderOutput, RenderReport, RenderRequest, RenderStatus, SceneAssets, ShadowLayer,
    build_shadow_layer, render, render_into,
};
pub use render::project::{project_flat, shadow_transform};
pub use render::raster::{draw_image_over, placement_transform, rasterize_alpha};
pub use render::warp::{WarpParams, WarpStatus, backward_offset, warp_height_field};
pub use scene::config::ShadowConfig;
pub use scene::light::{
    DEFAULT_ELEVATION_FLOOR_DEG, DEFAULT_GROUND_SQUASH, LightModel, LightParams, ShadowMatrix,
};
pub use scene::params::{DisplayMode, LayerMode, ShadowParams, Tunables};
pub use scene::transform::{Placement, SceneTransform};
pub use session::controller::{
    AssetSlot, RenderController, RequestTicket, SlotState, SlotUpdate,
};
