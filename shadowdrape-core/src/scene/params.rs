use crate::render::gradient::{GradientStop, GradientStops};
use crate::scene::light::{DEFAULT_ELEVATION_FLOOR_DEG, DEFAULT_GROUND_SQUASH};

/// Physical look of the shadow, driven by interactive sliders.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowParams {
    /// Global shadow opacity in `[0, 1]`.
    pub opacity: f64,
    /// Penumbra blur radius in pixels; `0` disables the penumbra layer.
    pub light_size: f64,
    /// Height-field displacement magnitude; `0` disables warping.
    pub depth_strength: f64,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            opacity: 0.7,
            light_size: 8.0,
            depth_strength: 60.0,
        }
    }
}

impl ShadowParams {
    /// Opacity clamped into `[0, 1]`; NaN reads as 0.
    pub fn opacity_clamped(&self) -> f32 {
        if self.opacity.is_nan() {
            return 0.0;
        }
        self.opacity.clamp(0.0, 1.0) as f32
    }

    /// Penumbra blur radius, never negative.
    pub fn light_size_px(&self) -> f32 {
        non_negative(self.light_size) as f32
    }

    /// Warp strength, never negative.
    pub fn depth_strength(&self) -> f64 {
        non_negative(self.depth_strength)
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Empirical constants of the shadow model, kept as named tunables.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Minimum light elevation in degrees.
    pub elevation_floor_deg: f64,
    /// Depth values below this are sky/horizon and never receive shadow.
    pub sky_threshold: u8,
    /// Width of the linear 0 -> 1 ramp above `sky_threshold`.
    pub sky_fade_range: u8,
    /// Warped samples at or below this alpha are dropped.
    pub noise_floor: u8,
    /// Blur radius (px) of the umbra base.
    pub contact_blur_px: f32,
    /// Opacity of the penumbra layer when blended over the umbra.
    pub penumbra_opacity: f32,
    /// Offset along the shadow where the penumbra mask becomes fully opaque.
    pub penumbra_ramp_end: f32,
    /// Vertical squash of the flat projection.
    pub ground_squash: f64,
    /// Contact/occlusion fade along the shadow vector.
    pub contact_fade: GradientStops,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            elevation_floor_deg: DEFAULT_ELEVATION_FLOOR_DEG,
            sky_threshold: 25,
            sky_fade_range: 25,
            noise_floor: 10,
            contact_blur_px: 1.0,
            penumbra_opacity: 0.6,
            penumbra_ramp_end: 0.3,
            ground_squash: DEFAULT_GROUND_SQUASH,
            contact_fade: GradientStops::new([
                GradientStop::new(0.0, 1.0),
                GradientStop::new(0.6, 0.9),
                GradientStop::new(1.0, 0.0),
            ]),
        }
    }
}

impl Tunables {
    /// Apply `SHADOWDRAPE_*` environment overrides on top of `self`.
    ///
    /// Unparseable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|v| v.trim().parse::<T>().ok())
        }

        if let Some(v) = parsed::<u8>(&lookup, "SHADOWDRAPE_SKY_THRESHOLD") {
            self.sky_threshold = v;
        }
        if let Some(v) = parsed::<u8>(&lookup, "SHADOWDRAPE_SKY_FADE_RANGE") {
            self.sky_fade_range = v;
        }
        if let Some(v) = parsed::<u8>(&lookup, "SHADOWDRAPE_NOISE_FLOOR") {
            self.noise_floor = v;
        }
        if let Some(v) = parsed::<f32>(&lookup, "SHADOWDRAPE_PENUMBRA_OPACITY")
            .filter(|v| v.is_finite() && (0.0..=1.0).contains(v))
        {
            self.penumbra_opacity = v;
        }
        if let Some(v) = parsed::<f64>(&lookup, "SHADOWDRAPE_ELEVATION_FLOOR")
            .filter(|v| v.is_finite() && *v > 0.0 && *v < 90.0)
        {
            self.elevation_floor_deg = v;
        }
        self
    }

    /// Sky-mask opacity for a raw depth value.
    pub fn sky_opacity(&self, depth: u8) -> f32 {
        if depth < self.sky_threshold {
            return 0.0;
        }
        if self.sky_fade_range == 0 {
            return 1.0;
        }
        let above = f32::from(depth - self.sky_threshold);
        (above / f32::from(self.sky_fade_range)).min(1.0)
    }
}

/// Which layer a render produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerMode {
    /// Background, shadow and subject.
    #[default]
    Composite,
    /// Shadow alone on a transparent frame.
    ShadowOnly,
    /// Subject silhouette alone on a transparent frame.
    MaskOnly,
}

/// Whether UI affordances are drawn on top of a composite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Live preview: bounding outline and pivot handle are drawn.
    Interactive,
    /// Exported output: no affordances.
    #[default]
    Export,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/params.rs"]
mod tests;
