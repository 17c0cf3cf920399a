//! Ordered alpha stop lists and linear gradients over frame space.

use crate::foundation::core::{Point, Vec2};

/// One `(offset, alpha)` stop. Both components are unit floats.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Position along the gradient axis in `[0, 1]`.
    pub offset: f32,
    /// Alpha at this stop in `[0, 1]`.
    pub alpha: f32,
}

impl GradientStop {
    /// Stop at `offset` with `alpha`.
    pub const fn new(offset: f32, alpha: f32) -> Self {
        Self { offset, alpha }
    }
}

/// Stops sorted by offset; evaluation interpolates linearly and holds the end
/// values outside the first/last stop.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<GradientStop>", into = "Vec<GradientStop>")]
pub struct GradientStops {
    stops: Vec<GradientStop>,
}

impl GradientStops {
    /// Collect stops into offset order. Non-finite stops are dropped; the rest are
    /// clamped into `[0, 1]`.
    pub fn new(stops: impl IntoIterator<Item = GradientStop>) -> Self {
        let mut stops: Vec<GradientStop> = stops
            .into_iter()
            .filter(|s| s.offset.is_finite() && s.alpha.is_finite())
            .map(|s| GradientStop::new(s.offset.clamp(0.0, 1.0), s.alpha.clamp(0.0, 1.0)))
            .collect();
        // Stable sort keeps insertion order for equal offsets (hard edges).
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { stops }
    }

    /// Stops in offset order.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Alpha at axis position `t`, linearly interpolated between neighbouring stops.
    pub fn eval(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return 0.0;
        };
        if t.is_nan() || t <= first.offset {
            return first.alpha;
        }
        if t >= last.offset {
            return last.alpha;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.alpha;
                }
                let u = (t - a.offset) / span;
                return a.alpha + (b.alpha - a.alpha) * u;
            }
        }
        last.alpha
    }
}

impl From<Vec<GradientStop>> for GradientStops {
    fn from(v: Vec<GradientStop>) -> Self {
        Self::new(v)
    }
}

impl From<GradientStops> for Vec<GradientStop> {
    fn from(g: GradientStops) -> Self {
        g.stops
    }
}

/// A linear gradient from `start` (offset 0) to `end` (offset 1).
#[derive(Clone, Debug)]
pub struct LinearGradient {
    start: Point,
    axis: Vec2,
    inv_len_sq: f64,
    stops: GradientStops,
}

impl LinearGradient {
    /// Gradient running from `start` (offset 0) to `end` (offset 1).
    pub fn new(start: Point, end: Point, stops: GradientStops) -> Self {
        let axis = end - start;
        let len_sq = axis.hypot2();
        let inv_len_sq = if len_sq > 1e-12 && len_sq.is_finite() {
            1.0 / len_sq
        } else {
            0.0
        };
        Self {
            start,
            axis,
            inv_len_sq,
            stops,
        }
    }

    /// Zero-length gradients paint nothing.
    pub fn is_degenerate(&self) -> bool {
        self.inv_len_sq == 0.0
    }

    /// Projected offset of `p` along the gradient axis (unclamped).
    pub fn offset_at(&self, p: Point) -> f64 {
        (p - self.start).dot(self.axis) * self.inv_len_sq
    }

    /// Alpha at `p`, projected onto the gradient axis. A degenerate axis yields 0.
    pub fn alpha_at(&self, p: Point) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.stops.eval(self.offset_at(p) as f32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
