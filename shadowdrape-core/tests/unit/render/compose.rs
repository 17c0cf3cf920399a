use super::*;
use crate::foundation::core::{Point, Rect};
use crate::scene::transform::SceneTransform;

fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::new(w, h, px.repeat((w * h) as usize)).unwrap()
}

fn centered_placement(canvas: Canvas) -> Placement {
    // 4x4 cutout standing on the frame center: rect (8,6)-(12,10) on 20x20.
    SceneTransform::new(0.5, 0.5, 1.0).placement(canvas, (4, 4))
}

#[test]
fn composite_without_shadow_is_background_plus_subject() {
    let canvas = Canvas::new(20, 20);
    let background = solid(20, 20, [40, 40, 40, 255]);
    let cutout = solid(4, 4, [255, 0, 0, 255]);
    let placement = centered_placement(canvas);
    let mut frame = FrameRGBA::new(Canvas::new(1, 1), LayerMode::MaskOnly);

    compose_composite(
        &mut frame,
        &background,
        &AlphaMask::zeroed(canvas),
        &cutout,
        &placement,
        DisplayMode::Export,
    );

    assert_eq!(frame.mode(), LayerMode::Composite);
    assert_eq!(frame.canvas(), canvas);
    assert_eq!(frame.pixel(8, 6), [255, 0, 0, 255]);
    assert_eq!(frame.pixel(11, 9), [255, 0, 0, 255]);
    assert_eq!(frame.pixel(2, 2), [40, 40, 40, 255]);
    assert_eq!(frame.pixel(12, 10), [40, 40, 40, 255]);
}

#[test]
fn shadow_darkens_background_under_subject() {
    let canvas = Canvas::new(20, 20);
    let background = solid(20, 20, [255, 255, 255, 255]);
    let cutout = solid(4, 4, [255, 0, 0, 255]);
    let mut shadow = AlphaMask::zeroed(canvas);
    shadow.data_mut()[15 * 20 + 3] = 255;
    shadow.data_mut()[15 * 20 + 4] = 128;
    shadow.data_mut()[7 * 20 + 9] = 255;

    let mut frame = FrameRGBA::new(canvas, LayerMode::Composite);
    compose_composite(
        &mut frame,
        &background,
        &shadow,
        &cutout,
        &centered_placement(canvas),
        DisplayMode::Export,
    );

    assert_eq!(frame.pixel(3, 15), [0, 0, 0, 255]);
    assert_eq!(frame.pixel(4, 15), [127, 127, 127, 255]);
    // The subject is drawn after the shadow.
    assert_eq!(frame.pixel(9, 7), [255, 0, 0, 255]);
}

#[test]
fn shadow_only_is_black_on_transparent() {
    let canvas = Canvas::new(6, 3);
    let mut shadow = AlphaMask::zeroed(canvas);
    shadow.data_mut()[7] = 200;

    let mut frame = FrameRGBA::new(canvas, LayerMode::Composite);
    compose_shadow_only(&mut frame, &shadow);

    assert_eq!(frame.mode(), LayerMode::ShadowOnly);
    assert_eq!(frame.pixel(1, 1), [0, 0, 0, 200]);
    assert_eq!(frame.pixel(0, 0), [0, 0, 0, 0]);
    assert_eq!(frame.image(), &shadow.to_black_rgba());
}

#[test]
fn mask_only_draws_white_silhouette() {
    let canvas = Canvas::new(20, 20);
    let cutout = RgbaImage::new(
        4,
        4,
        [[10, 20, 30, 255], [0, 0, 0, 0]].concat().repeat(8),
    )
    .unwrap();
    let mut frame = FrameRGBA::new(canvas, LayerMode::Composite);
    compose_mask_only(&mut frame, canvas, &cutout, &centered_placement(canvas));

    assert_eq!(frame.mode(), LayerMode::MaskOnly);
    assert_eq!(frame.pixel(8, 6), [255, 255, 255, 255]);
    assert_eq!(frame.pixel(9, 6), [0, 0, 0, 0]);
    assert_eq!(frame.pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn interactive_mode_adds_affordances_only_there() {
    let canvas = Canvas::new(20, 20);
    let background = solid(20, 20, [0, 0, 0, 255]);
    let cutout = solid(4, 4, [0, 0, 0, 0]);
    let placement = centered_placement(canvas);
    let shadow = AlphaMask::zeroed(canvas);

    let mut export = FrameRGBA::new(canvas, LayerMode::Composite);
    compose_composite(&mut export, &background, &shadow, &cutout, &placement, DisplayMode::Export);
    let mut live = FrameRGBA::new(canvas, LayerMode::Composite);
    compose_composite(&mut live, &background, &shadow, &cutout, &placement, DisplayMode::Interactive);

    assert_eq!(export.data(), background.data());
    // Outline corner and pivot handle.
    assert_ne!(live.pixel(8, 6), [0, 0, 0, 255]);
    assert_ne!(live.pixel(10, 10), [0, 0, 0, 255]);
    assert_eq!(live.pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
fn oversized_subject_outline_is_clipped_to_frame() {
    let canvas = Canvas::new(20, 20);
    let background = solid(20, 20, [0, 0, 0, 255]);
    let cutout = solid(4, 4, [0, 0, 0, 0]);
    let shadow = AlphaMask::zeroed(canvas);

    for scale in [2.5e7, 1e300] {
        let placement = SceneTransform::new(0.5, 0.9, scale).placement(canvas, (4, 4));
        let mut frame = FrameRGBA::new(canvas, LayerMode::Composite);
        compose_composite(
            &mut frame,
            &background,
            &shadow,
            &cutout,
            &placement,
            DisplayMode::Interactive,
        );

        // Only the bottom edge (row 17) falls inside the frame.
        assert_ne!(frame.pixel(0, 17), [0, 0, 0, 255], "scale={scale}");
        assert_ne!(frame.pixel(19, 17), [0, 0, 0, 255], "scale={scale}");
        assert_eq!(frame.pixel(0, 5), [0, 0, 0, 255], "scale={scale}");
        assert_eq!(frame.pixel(19, 0), [0, 0, 0, 255], "scale={scale}");
    }
}

#[test]
fn off_frame_pivot_skips_handle() {
    let canvas = Canvas::new(20, 20);
    let mut frame = FrameRGBA::new(canvas, LayerMode::Composite);
    let mut placement = centered_placement(canvas);
    placement.rect = Rect::new(-50.0, -50.0, -40.0, -40.0);
    placement.pivot = Point::new(-1e18, 1e18);

    draw_affordances(&mut frame, &placement);

    assert!(frame.data().iter().all(|&b| b == 0));
}

#[test]
fn reset_reallocates_on_size_change() {
    let mut frame = FrameRGBA::new(Canvas::new(2, 2), LayerMode::Composite);
    frame.image_mut().data_mut().fill(9);
    frame.reset(Canvas::new(3, 1), LayerMode::ShadowOnly);
    assert_eq!(frame.canvas(), Canvas::new(3, 1));
    assert!(frame.data().iter().all(|&b| b == 0));
    assert!(frame.premultiplied());
}
