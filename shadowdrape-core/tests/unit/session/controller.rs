use super::*;
use crate::render::pipeline::RenderStatus;
use crate::render::warp::WarpStatus;

fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::new(w, h, px.repeat((w * h) as usize)).unwrap()
}

fn loaded_controller() -> RenderController {
    let mut c = RenderController::default();
    c.background_mut().replace(solid(32, 32, [255, 255, 255, 255]));
    c.cutout_mut().replace(solid(4, 8, [0, 0, 0, 255]));
    c
}

#[test]
fn stale_ticket_is_dropped() {
    let mut slot: AssetSlot<u32> = AssetSlot::new();
    let first = slot.begin_request();
    let second = slot.begin_request();

    assert_eq!(slot.resolve(first, Ok(1)), SlotUpdate::Stale);
    assert!(slot.is_pending());
    assert_eq!(slot.resolve(second, Ok(2)), SlotUpdate::Ready);
    assert_eq!(slot.get(), Some(&2));
}

#[test]
fn upload_cancels_pending_request() {
    let mut slot: AssetSlot<&str> = AssetSlot::new();
    let ticket = slot.begin_request();
    slot.replace("uploaded");
    assert_eq!(slot.resolve(ticket, Ok("inferred")), SlotUpdate::Stale);
    assert_eq!(slot.get(), Some(&"uploaded"));
}

#[test]
fn failure_is_recorded_as_absent() {
    let mut slot: AssetSlot<u8> = AssetSlot::new();
    let ticket = slot.begin_request();
    let update = slot.resolve(ticket, Err(InferenceError::Failed("oom".into())));
    assert_eq!(update, SlotUpdate::Failed);
    assert_eq!(slot.get(), None);
    assert_eq!(
        slot.state(),
        &SlotState::Failed(InferenceError::Failed("oom".into()))
    );
}

#[test]
fn revision_tracks_every_change() {
    let mut slot: AssetSlot<u8> = AssetSlot::new();
    assert_eq!(slot.revision(), 0);
    let t = slot.begin_request();
    slot.resolve(t, Ok(3));
    slot.clear();
    assert_eq!(slot.revision(), 3);
    assert_eq!(slot.state(), &SlotState::Empty);
}

#[test]
fn renders_once_per_change() {
    let mut c = loaded_controller();
    assert!(c.is_dirty());
    let report = c.take_render().expect("first render");
    assert_eq!(report.status, RenderStatus::Rendered);
    assert!(c.take_render().is_none());

    c.set_light(LightParams {
        angle: 30.0,
        elevation: 20.0,
    });
    assert!(c.is_dirty());
    assert!(c.take_render().is_some());
    assert!(c.take_render().is_none());
}

#[test]
fn edits_coalesce_into_latest_state() {
    let mut c = loaded_controller();
    c.take_render();
    for i in 0..5 {
        c.set_transform(SceneTransform::new(0.1 * f64::from(i), 0.9, 1.0));
    }
    c.set_mode(LayerMode::ShadowOnly);
    let report = c.take_render().expect("render");
    assert_eq!(report.status, RenderStatus::Rendered);
    assert_eq!(c.frame().mode(), LayerMode::ShadowOnly);
    assert_eq!(c.request().transform, SceneTransform::new(0.1 * 4.0, 0.9, 1.0));
    assert!(c.take_render().is_none());
}

#[test]
fn setting_equal_value_does_not_rerender() {
    let mut c = loaded_controller();
    c.take_render();
    let physics = c.request().physics;
    c.set_physics(physics);
    assert!(!c.is_dirty());
}

#[test]
fn pending_cutout_reports_nothing_to_draw() {
    let mut c = loaded_controller();
    let ticket = c.cutout_mut().begin_request();
    let report = c.take_render().expect("render");
    assert_eq!(report.status, RenderStatus::NothingToDraw);

    c.cutout_mut()
        .resolve(ticket, Ok(solid(4, 8, [0, 0, 0, 255])));
    let report = c.take_render().expect("render");
    assert_eq!(report.status, RenderStatus::Rendered);
    assert_eq!(report.warp, WarpStatus::DisabledNoDepth);
}

#[test]
fn failed_depth_degrades_to_flat_shadow() {
    let mut c = loaded_controller();
    let ticket = c.depth_mut().begin_request();
    c.depth_mut().resolve(ticket, Err(InferenceError::Cancelled));
    let report = c.take_render().expect("render");
    assert_eq!(report.status, RenderStatus::Rendered);
    assert_eq!(report.warp, WarpStatus::DisabledNoDepth);
    assert_eq!(c.last_report(), report);
}
