use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
    assert_eq!(over(dst, src, f32::NAN), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn black_shadow_darkens_opaque_background() {
    let out = over([200, 100, 50, 255], [0, 0, 0, 128], 1.0);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 100);
    assert_eq!(out[1], 50);
    assert_eq!(out[2], 25);
}

#[test]
fn alpha_over_rejects_mismatched_planes() {
    let mut dst = vec![0u8; 8];
    assert!(alpha_over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn alpha_over_accumulates() {
    let mut dst = vec![0u8, 255, 100];
    alpha_over_in_place(&mut dst, &[255, 0, 100], 0.6).unwrap();
    assert_eq!(dst[0], 153);
    assert_eq!(dst[1], 255);
    // 60 + 100 * (255 - 60) / 255
    assert_eq!(dst[2], 60 + 76);
}

#[test]
fn alpha_over_zero_opacity_is_noop() {
    let mut dst = vec![7u8, 8];
    alpha_over_in_place(&mut dst, &[255, 255], 0.0).unwrap();
    assert_eq!(dst, vec![7, 8]);
}
