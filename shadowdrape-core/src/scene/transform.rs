use crate::foundation::core::{Canvas, Point, Rect};

/// Normalized placement of the subject within the frame.
///
/// `x`/`y` locate the subject's bottom-center anchor as a fraction of the frame
/// width/height; `scale` multiplies the cutout's native pixel size. Values are
/// replaced as a whole (the type is `Copy`), never edited field by field while a
/// render reads them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneTransform {
    /// Anchor x as a fraction of frame width.
    pub x: f64,
    /// Anchor y (ground contact) as a fraction of frame height.
    pub y: f64,
    /// Multiplier on the cutout's native size.
    pub scale: f64,
}

impl Default for SceneTransform {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.85,
            scale: 1.0,
        }
    }
}

impl SceneTransform {
    /// Transform from raw fields.
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// Anchor in absolute frame pixels. Fractions are clamped into `[0, 1]`.
    pub fn anchor_px(&self, canvas: Canvas) -> Point {
        Point::new(
            unit_or_center(self.x) * f64::from(canvas.width),
            unit_or_center(self.y) * f64::from(canvas.height),
        )
    }

    /// Resolve the subject's rectangle and ground-contact pivot for a cutout of
    /// `native` pixel size.
    pub fn placement(&self, canvas: Canvas, native: (u32, u32)) -> Placement {
        let pivot = self.anchor_px(canvas);
        let scale = if self.scale.is_finite() {
            self.scale
        } else {
            0.0
        };
        let w = f64::from(native.0) * scale;
        let h = f64::from(native.1) * scale;
        let rect = if w > 0.0 && h > 0.0 {
            Rect::new(pivot.x - w / 2.0, pivot.y - h, pivot.x + w / 2.0, pivot.y)
        } else {
            Rect::new(pivot.x, pivot.y, pivot.x, pivot.y)
        };
        Placement {
            rect,
            pivot,
            scale,
            canvas,
        }
    }
}

fn unit_or_center(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 }
}

/// Absolute subject rectangle and pivot for one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Where the scaled cutout is drawn, in frame pixels.
    pub rect: Rect,
    /// Ground-contact point (bottom-center of `rect`).
    pub pivot: Point,
    /// Effective cutout scale; `<= 0` means nothing is drawn.
    pub scale: f64,
    canvas: Canvas,
}

impl Placement {
    /// Rendered subject height in pixels.
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// True when the subject cannot contribute any pixel to the frame.
    pub fn is_empty(&self) -> bool {
        if self.scale <= 0.0 || self.rect.width() <= 0.0 || self.rect.height() <= 0.0 {
            return true;
        }
        self.rect.intersect(self.canvas.bounds()).area() <= 0.0
    }

    /// Pivot snapped to the in-frame pixel grid.
    pub fn pivot_pixel(&self) -> (u32, u32) {
        let max_x = self.canvas.width.saturating_sub(1);
        let max_y = self.canvas.height.saturating_sub(1);
        let x = (self.pivot.x.floor().max(0.0) as u32).min(max_x);
        let y = (self.pivot.y.floor().max(0.0) as u32).min(max_y);
        (x, y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/transform.rs"]
mod tests;
