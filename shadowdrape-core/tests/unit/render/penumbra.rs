use super::*;
use crate::scene::light::{DEFAULT_ELEVATION_FLOOR_DEG, LightParams};

fn light_down() -> LightModel {
    LightModel::new(
        LightParams {
            angle: 90.0,
            elevation: 45.0,
        },
        DEFAULT_ELEVATION_FLOOR_DEG,
    )
}

fn block(size: u32, lo: u32, hi: u32) -> AlphaMask {
    let mut data = vec![0u8; (size * size) as usize];
    for y in lo..hi {
        for x in lo..hi {
            data[(y * size + x) as usize] = 255;
        }
    }
    AlphaMask::new(size, size, data).unwrap()
}

fn sharp_tunables() -> Tunables {
    Tunables {
        contact_blur_px: 0.0,
        ..Tunables::default()
    }
}

fn params(pivot: (f64, f64), shadow_length: f64, opacity: f32, light_size_px: f32) -> PenumbraParams {
    PenumbraParams {
        pivot: Point::new(pivot.0, pivot.1),
        shadow_length,
        opacity,
        light_size_px,
    }
}

#[test]
fn pivot_side_keeps_umbra_scaled_by_opacity() {
    let warped = block(40, 10, 30);
    let out = composite_penumbra(
        &warped,
        &light_down(),
        params((20.0, 30.0), 20.0, 0.5, 0.0),
        &sharp_tunables(),
    );
    // Behind the pivot the fade sits at its first stop.
    assert_eq!(out.get(20, 25), 128);
    assert_eq!(out.get(12, 12), 128);
    assert_eq!(out.get(5, 5), 0);
}

#[test]
fn far_end_of_shadow_fades_out() {
    let warped = block(40, 0, 40);
    let out = composite_penumbra(
        &warped,
        &light_down(),
        params((20.0, 5.0), 20.0, 1.0, 0.0),
        &sharp_tunables(),
    );
    assert_eq!(out.get(20, 2), 255);
    assert_eq!(out.get(20, 26), 0);
    assert_eq!(out.get(20, 39), 0);
    let mid = out.get(20, 15);
    assert!(mid > 200 && mid < 255, "mid={mid}");
}

#[test]
fn zero_length_shadow_is_empty() {
    let warped = block(24, 4, 20);
    let out = composite_penumbra(
        &warped,
        &light_down(),
        params((12.0, 20.0), 0.0, 1.0, 4.0),
        &Tunables::default(),
    );
    assert!(out.is_clear());
}

#[test]
fn light_size_adds_soft_fringe() {
    let warped = block(40, 10, 30);
    let p = |light_size| params((20.0, 10.0), 30.0, 1.0, light_size);

    let hard = composite_penumbra(&warped, &light_down(), p(0.0), &sharp_tunables());
    let soft = composite_penumbra(&warped, &light_down(), p(4.0), &sharp_tunables());

    assert_eq!(hard.get(8, 20), 0);
    assert!(soft.get(8, 20) > 0);
    // The ramp keeps the penumbra off the contact point.
    assert_eq!(soft.get(20, 8), hard.get(20, 8));
}

#[test]
fn zero_opacity_clears_layer() {
    let warped = block(16, 2, 14);
    let out = composite_penumbra(
        &warped,
        &light_down(),
        params((8.0, 14.0), 10.0, 0.0, 3.0),
        &Tunables::default(),
    );
    assert!(out.is_clear());
}
