use super::*;

fn mask(w: u32, h: u32, data: Vec<u8>) -> AlphaMask {
    AlphaMask::new(w, h, data).unwrap()
}

#[test]
fn kernel_taps_sum_to_one() {
    for sigma in [0.3f32, 1.0, 2.5, 8.0] {
        let k = GaussianKernel::new(sigma).unwrap();
        assert_eq!(k.taps.len(), 2 * k.radius() + 1);
        assert_eq!(k.taps.iter().sum::<u32>(), Q16_ONE, "sigma={sigma}");
    }
}

#[test]
fn kernel_is_symmetric_and_peaked() {
    let k = GaussianKernel::new(1.5).unwrap();
    let taps = &k.taps;
    let r = k.radius();
    for d in 1..=r {
        assert_eq!(taps[r - d], taps[r + d]);
        assert!(taps[r + d] <= taps[r + d - 1]);
    }
}

#[test]
fn constant_plane_is_unchanged() {
    let m = mask(5, 3, vec![40; 15]);
    assert_eq!(blur_alpha(&m, 2.0), m);
}

#[test]
fn single_pixel_spreads_symmetrically() {
    let (w, h) = (9u32, 9u32);
    let mut data = vec![0u8; (w * h) as usize];
    data[(4 * w + 4) as usize] = 255;
    let out = blur_alpha(&mask(w, h, data), 1.0);

    let center = out.get(4, 4);
    assert!(center < 255 && center > 0);
    assert!(out.data().iter().all(|&a| a <= center));
    assert_eq!(out.get(3, 4), out.get(5, 4));
    assert_eq!(out.get(4, 3), out.get(4, 5));

    let sum: i32 = out.data().iter().map(|&a| i32::from(a)).sum();
    assert!((sum - 255).abs() <= 20, "sum={sum}");
}

#[test]
fn non_blurring_sigma_is_copy() {
    let m = mask(2, 1, vec![0, 255]);
    assert_eq!(blur_alpha(&m, 0.0), m);
    assert_eq!(blur_alpha(&m, -3.0), m);
    assert_eq!(blur_alpha(&m, f32::NAN), m);
    assert!(GaussianKernel::new(0.0).is_none());
}

#[test]
fn radius_tracks_three_sigma() {
    assert_eq!(radius_for_sigma(1.0), 3);
    assert_eq!(radius_for_sigma(0.1), 1);
    assert_eq!(radius_for_sigma(8.0), 24);
}
