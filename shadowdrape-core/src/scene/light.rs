//! Directional light geometry.
//!
//! Angles are in degrees in image space (y grows downward), so increasing
//! `angle` turns the shadow direction clockwise on screen. The shadow falls
//! along `(cos(angle), sin(angle))` from the subject's ground-contact point.

use crate::foundation::core::{Affine, Vec2};

/// Lowest elevation the engine accepts, in degrees. Lower values are raised to it.
pub const DEFAULT_ELEVATION_FLOOR_DEG: f64 = 5.0;

/// Vertical squash applied to the flat shadow; negative flips the sprite onto the ground.
pub const DEFAULT_GROUND_SQUASH: f64 = -0.5;

/// Raw light parameters as supplied by the control surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightParams {
    /// Azimuth in degrees, any value (wrapped into `[0, 360)`).
    pub angle: f64,
    /// Elevation in degrees, clamped into `[floor, 90]`.
    pub elevation: f64,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            angle: 120.0,
            elevation: 45.0,
        }
    }
}

/// Light parameters with every derived constant resolved once per render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightModel {
    angle_deg: f64,
    elevation_deg: f64,
    k: f64,
    shear_x: f64,
    shear_y: f64,
    dir: Vec2,
}

impl LightModel {
    /// Normalize `params`, raising the elevation to at least `elevation_floor_deg`.
    pub fn new(params: LightParams, elevation_floor_deg: f64) -> Self {
        let floor = if elevation_floor_deg.is_finite() {
            elevation_floor_deg.clamp(0.01, 90.0)
        } else {
            DEFAULT_ELEVATION_FLOOR_DEG
        };
        let angle_deg = if params.angle.is_finite() {
            params.angle.rem_euclid(360.0)
        } else {
            0.0
        };
        // `f64::max` drops NaN, so a NaN elevation lands on the floor.
        let elevation_deg = params.elevation.max(floor).min(90.0);

        let k = shadow_length_factor(elevation_deg);
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Self {
            angle_deg,
            elevation_deg,
            k,
            shear_x: -k * cos,
            shear_y: -k * sin,
            dir: Vec2::new(cos, sin),
        }
    }

    /// Azimuth wrapped into `[0, 360)` degrees.
    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Elevation after clamping.
    pub fn elevation_deg(&self) -> f64 {
        self.elevation_deg
    }

    /// `K = 1 / tan(elevation)`: shadow length per unit of occluder height.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Horizontal shear: `-K * cos(angle)`.
    pub fn shear_x(&self) -> f64 {
        self.shear_x
    }

    /// Vertical shear: `-K * sin(angle)`.
    pub fn shear_y(&self) -> f64 {
        self.shear_y
    }

    /// Unit vector pointing from the pivot toward the shadow tip.
    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    /// Shadow length for an occluder of `height` pixels.
    pub fn shadow_length(&self, height: f64) -> f64 {
        (height * self.k).max(0.0)
    }

    /// Ground displacement for a surface `height` pixels above the reference ground.
    pub fn shift_for_height(&self, height: f64) -> f64 {
        height / self.elevation_deg.to_radians().tan()
    }

    /// Flat-shadow matrix for the given ground squash.
    pub fn shadow_matrix(&self, ground_squash: f64) -> ShadowMatrix {
        ShadowMatrix {
            rows: [[1.0, 0.0, self.shear_x], [0.0, ground_squash, self.shear_y]],
        }
    }
}

fn shadow_length_factor(elevation_deg: f64) -> f64 {
    if elevation_deg >= 90.0 {
        return 0.0;
    }
    1.0 / elevation_deg.to_radians().tan()
}

/// The 2x3 ground-projection matrix in pivot-local space.
///
/// Rows produce `(x', y')`; columns weigh the local `x`, the fixed ground squash
/// on `y`, and the light shear on `y`:
///
/// ```text
/// x' = 1 * x + 0 * y + shear_x * y
/// y' = 0 * x + squash * y + shear_y * y
/// ```
///
/// A point `h` pixels above the pivot (`y = -h`) therefore travels `h * K`
/// along the light direction in addition to the squashed flip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowMatrix {
    /// `[[1, 0, shear_x], [0, squash, shear_y]]`, acting on `(x, y, y)`.
    pub rows: [[f64; 3]; 2],
}

impl ShadowMatrix {
    /// Same matrix as a kurbo transform about the origin.
    pub fn to_affine(&self) -> Affine {
        let [[xx, _, xs], [yx, squash, ys]] = self.rows;
        Affine::new([xx, yx, xs, squash + ys, 0.0, 0.0])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/light.rs"]
mod tests;
