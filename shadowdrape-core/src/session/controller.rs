//! Input-change driven rendering with explicit asset generations.
//!
//! The control surface replaces whole parameter values and feeds inference
//! results into [`AssetSlot`]s; [`RenderController::take_render`] then renders
//! the latest state once, however many edits arrived in between.

use crate::assets::buffer::{DepthBuffer, RgbaImage};
use crate::foundation::core::Canvas;
use crate::foundation::error::InferenceError;
use crate::foundation::math::Fingerprint;
use crate::render::compose::FrameRGBA;
use crate::render::pipeline::{RenderReport, RenderRequest, SceneAssets, render_into};
use crate::scene::light::LightParams;
use crate::scene::params::{DisplayMode, LayerMode, ShadowParams, Tunables};
use crate::scene::transform::SceneTransform;

/// Identifies one upstream request for a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    /// Generation this ticket was issued for.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// What a slot currently holds.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotState<T> {
    /// Nothing requested yet.
    Empty,
    /// A request is in flight; the asset counts as absent.
    Pending,
    /// Asset available.
    Ready(T),
    /// The latest request failed; the asset counts as absent.
    Failed(InferenceError),
}

/// Outcome of [`AssetSlot::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotUpdate {
    /// The asset was stored.
    Ready,
    /// The failure was recorded.
    Failed,
    /// A newer request or upload superseded this ticket; dropped.
    Stale,
}

/// A generation-counted optional asset fed by a long-running producer.
#[derive(Clone, Debug)]
pub struct AssetSlot<T> {
    state: SlotState<T>,
    generation: u64,
    revision: u64,
}

impl<T> Default for AssetSlot<T> {
    fn default() -> Self {
        Self {
            state: SlotState::Empty,
            generation: 0,
            revision: 0,
        }
    }
}

impl<T> AssetSlot<T> {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any in flight.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.generation += 1;
        self.set_state(SlotState::Pending);
        RequestTicket {
            generation: self.generation,
        }
    }

    /// Deliver the result for `ticket`. Results for superseded tickets are dropped.
    pub fn resolve(&mut self, ticket: RequestTicket, result: Result<T, InferenceError>) -> SlotUpdate {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale asset result dropped"
            );
            return SlotUpdate::Stale;
        }
        match result {
            Ok(asset) => {
                self.set_state(SlotState::Ready(asset));
                SlotUpdate::Ready
            }
            Err(err) => {
                tracing::warn!(%err, "asset request failed; treating as absent");
                self.set_state(SlotState::Failed(err));
                SlotUpdate::Failed
            }
        }
    }

    /// Store an asset directly (user upload), cancelling any pending request.
    pub fn replace(&mut self, asset: T) {
        self.generation += 1;
        self.set_state(SlotState::Ready(asset));
    }

    /// Drop the asset and cancel any pending request.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.set_state(SlotState::Empty);
    }

    /// Current state.
    pub fn state(&self) -> &SlotState<T> {
        &self.state
    }

    /// The asset, when ready.
    pub fn get(&self) -> Option<&T> {
        match &self.state {
            SlotState::Ready(asset) => Some(asset),
            _ => None,
        }
    }

    /// True while a request is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SlotState::Pending)
    }

    /// Bumped on every state change; feeds the render fingerprint.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn set_state(&mut self, state: SlotState<T>) {
        self.state = state;
        self.revision += 1;
    }
}

/// Owns the latest render request, the asset slots and the display frame.
#[derive(Debug)]
pub struct RenderController {
    request: RenderRequest,
    background: AssetSlot<RgbaImage>,
    cutout: AssetSlot<RgbaImage>,
    depth: AssetSlot<DepthBuffer>,
    frame: FrameRGBA,
    last_fingerprint: Option<u64>,
    last_report: RenderReport,
}

impl Default for RenderController {
    fn default() -> Self {
        Self::new(RenderRequest::default())
    }
}

impl RenderController {
    /// Controller starting from `request` with empty asset slots.
    pub fn new(request: RenderRequest) -> Self {
        Self {
            frame: FrameRGBA::new(Canvas::new(0, 0), request.mode),
            request,
            background: AssetSlot::new(),
            cutout: AssetSlot::new(),
            depth: AssetSlot::new(),
            last_fingerprint: None,
            last_report: RenderReport::default(),
        }
    }

    /// Current render request.
    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    /// Move or rescale the subject.
    pub fn set_transform(&mut self, transform: SceneTransform) {
        self.request.transform = transform;
    }

    /// Change the light direction.
    pub fn set_light(&mut self, light: LightParams) {
        self.request.light = light;
    }

    /// Change the shadow look.
    pub fn set_physics(&mut self, physics: ShadowParams) {
        self.request.physics = physics;
    }

    /// Replace the empirical constants.
    pub fn set_tunables(&mut self, tunables: Tunables) {
        self.request.tunables = tunables;
    }

    /// Switch the exported layer.
    pub fn set_mode(&mut self, mode: LayerMode) {
        self.request.mode = mode;
    }

    /// Toggle preview affordances.
    pub fn set_display(&mut self, display: DisplayMode) {
        self.request.display = display;
    }

    /// Background slot, for updates.
    pub fn background_mut(&mut self) -> &mut AssetSlot<RgbaImage> {
        &mut self.background
    }

    /// Segmentation output.
    pub fn cutout_mut(&mut self) -> &mut AssetSlot<RgbaImage> {
        &mut self.cutout
    }

    /// Depth-estimation output.
    pub fn depth_mut(&mut self) -> &mut AssetSlot<DepthBuffer> {
        &mut self.depth
    }

    /// Background slot.
    pub fn background(&self) -> &AssetSlot<RgbaImage> {
        &self.background
    }

    /// Cutout slot.
    pub fn cutout(&self) -> &AssetSlot<RgbaImage> {
        &self.cutout
    }

    /// Depth slot.
    pub fn depth(&self) -> &AssetSlot<DepthBuffer> {
        &self.depth
    }

    /// True when the current inputs differ from the last rendered ones.
    pub fn is_dirty(&self) -> bool {
        self.last_fingerprint != Some(self.fingerprint())
    }

    /// Render the latest state if anything changed since the last render.
    ///
    /// Returns `None` when the previous frame is still current.
    pub fn take_render(&mut self) -> Option<RenderReport> {
        let fingerprint = self.fingerprint();
        if self.last_fingerprint == Some(fingerprint) {
            return None;
        }
        let assets = SceneAssets {
            background: self.background.get(),
            cutout: self.cutout.get(),
            depth: self.depth.get(),
        };
        let report = render_into(&self.request, assets, &mut self.frame);
        self.last_fingerprint = Some(fingerprint);
        self.last_report = report;
        Some(report)
    }

    /// The most recently drawn frame.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    /// Report from the last render that ran.
    pub fn last_report(&self) -> RenderReport {
        self.last_report
    }

    fn fingerprint(&self) -> u64 {
        let r = &self.request;
        let mut fp = Fingerprint::default();
        fp.float(r.transform.x)
            .float(r.transform.y)
            .float(r.transform.scale)
            .float(r.light.angle)
            .float(r.light.elevation)
            .float(r.physics.opacity)
            .float(r.physics.light_size)
            .float(r.physics.depth_strength);
        hash_tunables(&mut fp, &r.tunables);
        fp.byte(r.mode as u8)
            .byte(r.display as u8)
            .word(self.background.revision())
            .word(self.cutout.revision())
            .word(self.depth.revision());
        fp.value()
    }
}

fn hash_tunables(fp: &mut Fingerprint, t: &Tunables) {
    fp.float(t.elevation_floor_deg)
        .byte(t.sky_threshold)
        .byte(t.sky_fade_range)
        .byte(t.noise_floor)
        .float(f64::from(t.contact_blur_px))
        .float(f64::from(t.penumbra_opacity))
        .float(f64::from(t.penumbra_ramp_end))
        .float(t.ground_squash);
    for stop in t.contact_fade.stops() {
        fp.float(f64::from(stop.offset)).float(f64::from(stop.alpha));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
