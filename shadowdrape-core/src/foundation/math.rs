//! Integer channel arithmetic and input fingerprinting.

/// `x * y / 255` on 8-bit channels, rounded to nearest.
pub(crate) fn mul_div255(x: u8, y: u8) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}

/// Premultiply one straight-alpha RGBA8 pixel.
pub(crate) fn premultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    [
        mul_div255(px[0], a),
        mul_div255(px[1], a),
        mul_div255(px[2], a),
        a,
    ]
}

/// Scale an 8-bit alpha by a unit factor, clamping the product into `[0, 255]`.
pub(crate) fn scale_alpha(a: u8, factor: f32) -> u8 {
    let v = f32::from(a) * factor;
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// FNV-1a over the bit patterns of render inputs.
///
/// Floats hash by bits, so `0.0` and `-0.0` differ.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fingerprint(u64);

impl Default for Fingerprint {
    fn default() -> Self {
        Self(0xcbf2_9ce4_8422_2325)
    }
}

impl Fingerprint {
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    pub(crate) fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.0 = bytes
            .iter()
            .fold(self.0, |h, &b| (h ^ u64::from(b)).wrapping_mul(Self::PRIME));
        self
    }

    pub(crate) fn byte(&mut self, v: u8) -> &mut Self {
        self.bytes(&[v])
    }

    pub(crate) fn word(&mut self, v: u64) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub(crate) fn float(&mut self, v: f64) -> &mut Self {
        self.word(v.to_bits())
    }

    pub(crate) fn value(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
