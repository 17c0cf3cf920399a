use crate::foundation::error::{ShadeError, ShadeResult};
use crate::foundation::math::mul_div255;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

fn opacity_u8(opacity: f32) -> u8 {
    if opacity.is_nan() {
        return 0;
    }
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Premultiplied source-over with an extra source opacity.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = opacity_u8(opacity);
    let sa = mul_div255(src[3], op);
    if sa == 0 {
        return dst;
    }
    let inv = 255 - sa;
    let mut out = [0u8; 4];
    for (o, (&s, &d)) in out.iter_mut().zip(src.iter().zip(&dst)).take(3) {
        *o = mul_div255(s, op).saturating_add(mul_div255(d, inv));
    }
    out[3] = sa.saturating_add(mul_div255(dst[3], inv));
    out
}

/// Source-over on alpha planes only (both layers are black).
pub fn alpha_over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> ShadeResult<()> {
    if dst.len() != src.len() {
        return Err(ShadeError::evaluation(
            "alpha_over_in_place expects equal-length alpha planes",
        ));
    }
    let op = opacity_u8(opacity);
    if op == 0 {
        return Ok(());
    }
    for (d, &s) in dst.iter_mut().zip(src) {
        let sa = mul_div255(s, op);
        *d = sa.saturating_add(mul_div255(*d, 255 - sa));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
