//! Separable Gaussian blur on alpha planes with Q16 fixed-point taps.

use rayon::prelude::*;

use crate::assets::buffer::AlphaMask;

const Q16_ONE: u32 = 1 << 16;

/// Normalized Gaussian taps `[-radius, radius]`, summing to exactly `1.0` in Q16.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GaussianKernel {
    taps: Vec<u32>,
}

impl GaussianKernel {
    /// `None` for sigmas that do not blur (non-positive or non-finite).
    pub(crate) fn new(sigma: f32) -> Option<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return None;
        }
        let radius = radius_for_sigma(sigma) as i32;
        let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
        let weights: Vec<f64> = (-radius..=radius)
            .map(|i| (-f64::from(i * i) / two_sigma_sq).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        let mut taps: Vec<u32> = weights
            .iter()
            .map(|w| ((w / total) * f64::from(Q16_ONE)).round() as u32)
            .collect();
        // Rounding drift goes to the center tap.
        let drift = i64::from(Q16_ONE) - taps.iter().map(|&t| i64::from(t)).sum::<i64>();
        let center = &mut taps[radius as usize];
        *center = (i64::from(*center) + drift).clamp(0, i64::from(Q16_ONE)) as u32;
        Some(Self { taps })
    }

    pub(crate) fn radius(&self) -> usize {
        self.taps.len() / 2
    }

    /// Weighted sum of `sample(d)` for every offset `d` in `[-radius, radius]`.
    fn apply(&self, sample: impl Fn(isize) -> u8) -> u8 {
        let r = self.radius() as isize;
        let acc: u64 = self
            .taps
            .iter()
            .enumerate()
            .map(|(i, &w)| u64::from(w) * u64::from(sample(i as isize - r)))
            .sum();
        ((acc + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8
    }
}

/// CSS `blur()` reach: three sigmas, at least one pixel.
pub(crate) fn radius_for_sigma(sigma: f32) -> usize {
    ((sigma * 3.0).ceil() as usize).clamp(1, 256)
}

fn clamped(i: usize, delta: isize, len: usize) -> usize {
    (i as isize + delta).clamp(0, len as isize - 1) as usize
}

/// Gaussian blur of an alpha plane, `sigma_px` following CSS `blur()` semantics.
/// Edges are clamped.
///
/// Non-positive or non-finite sigmas return an unchanged copy.
pub fn blur_alpha(src: &AlphaMask, sigma_px: f32) -> AlphaMask {
    let canvas = src.canvas();
    let Some(kernel) = GaussianKernel::new(sigma_px) else {
        return src.clone();
    };
    if canvas.is_empty() {
        return src.clone();
    }
    let (w, h) = (canvas.width as usize, canvas.height as usize);

    let mut rows = vec![0u8; canvas.pixel_count()];
    rows.par_chunks_mut(w)
        .zip(src.data().par_chunks(w))
        .for_each(|(out, row)| {
            for (x, o) in out.iter_mut().enumerate() {
                *o = kernel.apply(|d| row[clamped(x, d, w)]);
            }
        });

    let mut out = AlphaMask::zeroed(canvas);
    out.data_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            for (x, o) in out_row.iter_mut().enumerate() {
                *o = kernel.apply(|d| rows[clamped(y, d, h) * w + x]);
            }
        });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
