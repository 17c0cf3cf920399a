use super::*;

#[test]
fn constructors_reject_mismatched_lengths() {
    assert!(RgbaImage::new(2, 2, vec![0; 15]).is_err());
    assert!(AlphaMask::new(2, 2, vec![0; 3]).is_err());
    assert!(DepthBuffer::new(2, 2, vec![0; 5]).is_err());
    assert!(RgbaImage::new(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn straight_constructor_premultiplies() {
    let img = RgbaImage::from_straight_rgba8(1, 1, vec![200, 100, 50, 128]).unwrap();
    assert_eq!(img.pixel(0, 0), [100, 50, 25, 128]);
}

#[test]
fn straight_export_reverses_premultiply_for_opaque_and_clear() {
    let img = RgbaImage::new(2, 1, vec![10, 20, 30, 255, 0, 0, 0, 0]).unwrap();
    assert_eq!(img.to_straight_rgba8(), img.data());
}

#[test]
fn straight_export_unpremultiplies_partial_alpha() {
    let img = RgbaImage::from_straight_rgba8(1, 1, vec![200, 100, 50, 128]).unwrap();
    let straight = img.to_straight_rgba8();
    for (got, want) in straight.iter().zip([200u8, 100, 50, 128]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 2);
    }
}

#[test]
fn alpha_mask_extracts_alpha_and_counts_coverage() {
    let img = RgbaImage::new(3, 1, vec![0, 0, 0, 0, 1, 1, 1, 9, 2, 2, 2, 255]).unwrap();
    let m = img.alpha_mask();
    assert_eq!(m.data(), &[0, 9, 255]);
    assert_eq!(m.coverage(), 2);
    assert!(!m.is_clear());
    assert!(AlphaMask::zeroed(Canvas::new(3, 3)).is_clear());
}

#[test]
fn black_rgba_keeps_alpha() {
    let m = AlphaMask::new(2, 1, vec![0, 77]).unwrap();
    assert_eq!(m.to_black_rgba().data(), &[0, 0, 0, 0, 0, 0, 0, 77]);
}

#[test]
fn min_max_normalization_spans_full_range() {
    let d = DepthBuffer::normalized_min_max(4, 1, &[2.0, 4.0, 6.0, f32::NAN]).unwrap();
    assert_eq!(d.data(), &[0, 128, 255, 0]);
}

#[test]
fn constant_depth_normalizes_to_zero() {
    let d = DepthBuffer::normalized_min_max(2, 1, &[3.0, 3.0]).unwrap();
    assert_eq!(d.data(), &[0, 0]);
}

#[test]
fn resize_matches_target_canvas() {
    let d = DepthBuffer::new(2, 2, vec![100; 4]).unwrap();
    let r = d.resized_to(Canvas::new(5, 3)).unwrap();
    assert_eq!(r.canvas(), Canvas::new(5, 3));
    assert!(r.data().iter().all(|&v| v == 100));
    assert_eq!(d.resized_to(d.canvas()).unwrap(), d);
}
