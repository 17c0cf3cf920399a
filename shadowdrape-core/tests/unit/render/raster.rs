use super::*;

fn opaque(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::new(w, h, px.repeat((w * h) as usize)).unwrap()
}

#[test]
fn identity_blit_reproduces_source() {
    let src = RgbaImage::new(2, 1, vec![10, 20, 30, 255, 0, 0, 0, 128]).unwrap();
    let mut dst = RgbaImage::transparent(2, 1);
    draw_image_over(&mut dst, &src, Affine::IDENTITY, 1.0);
    assert_eq!(dst, src);
}

#[test]
fn integer_translation_moves_pixels() {
    let src = opaque(2, 2, [255, 255, 255, 255]);
    let mask = rasterize_alpha(&src, Affine::translate((3.0, 1.0)), Canvas::new(6, 4));
    for y in 0..4 {
        for x in 0..6 {
            let inside = (3..5).contains(&x) && (1..3).contains(&y);
            assert_eq!(mask.get(x, y), if inside { 255 } else { 0 }, "({x},{y})");
        }
    }
}

#[test]
fn singular_transform_draws_nothing() {
    let src = opaque(4, 4, [0, 0, 0, 255]);
    let mask = rasterize_alpha(&src, Affine::scale_non_uniform(1.0, 0.0), Canvas::new(8, 8));
    assert!(mask.is_clear());
}

#[test]
fn fully_offscreen_draws_nothing() {
    let src = opaque(4, 4, [0, 0, 0, 255]);
    let mask = rasterize_alpha(&src, Affine::translate((100.0, 0.0)), Canvas::new(8, 8));
    assert!(mask.is_clear());
}

#[test]
fn grid_aligned_sample_is_exact() {
    let src = RgbaImage::new(3, 1, vec![0, 0, 0, 10, 0, 0, 0, 200, 0, 0, 0, 30]).unwrap();
    let s = sample_premul(&src, Point::new(1.5, 0.5));
    assert_eq!(s[3], 200.0);
}

#[test]
fn half_texel_sample_averages() {
    let src = RgbaImage::new(2, 1, vec![0, 0, 0, 100, 0, 0, 0, 200]).unwrap();
    let s = sample_premul(&src, Point::new(1.0, 0.5));
    assert!((s[3] - 150.0).abs() < 1e-4);
}

#[test]
fn placement_transform_scales_then_translates() {
    let t = placement_transform(Rect::new(10.0, 20.0, 30.0, 60.0), 0.5);
    let p = t * Point::new(40.0, 80.0);
    assert_eq!(p, Point::new(30.0, 60.0));
}

#[test]
fn upscaled_draw_covers_whole_rect() {
    let src = opaque(2, 2, [50, 60, 70, 255]);
    let mut dst = RgbaImage::transparent(8, 8);
    draw_image_over(&mut dst, &src, Affine::scale(4.0), 1.0);
    // Interior pixels are fully covered.
    assert_eq!(dst.pixel(2, 5), [50, 60, 70, 255]);
    assert_eq!(dst.pixel(5, 2), [50, 60, 70, 255]);
}
