// view.rs
// Pan/zoom transform between canvas (screen) pixels and world coordinates,
// and the visible world rectangle the boundary reflector and visualisers use.

use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

pub const ZOOM_IN_FACTOR: f64 = 1.1;
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Axis-aligned rectangle in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub min: DVec2,
    pub max: DVec2,
}

impl WorldRect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(DVec2::zero(), DVec2::new(width, height))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Shrink every side by `margin`. The result may be inverted for tiny rects.
    pub fn inset(&self, margin: f64) -> Self {
        let m = DVec2::new(margin, margin);
        Self::new(self.min + m, self.max - m)
    }
}

/// `screen = world * scale + offset`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset: DVec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: DVec2::zero(),
        }
    }
}

impl ViewTransform {
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        (screen - self.offset) / self.scale
    }

    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        world * self.scale + self.offset
    }

    /// Zoom one wheel notch about the cursor, keeping the world point under it fixed.
    pub fn zoom_at(&mut self, screen: DVec2, zoom_in: bool) {
        let anchor = self.screen_to_world(screen);
        let previous = self.scale;
        self.scale *= if zoom_in { ZOOM_IN_FACTOR } else { ZOOM_OUT_FACTOR };
        self.offset -= anchor * (self.scale - previous);
    }

    pub fn pan_by(&mut self, delta: DVec2) {
        self.offset += delta;
    }

    /// World-space rectangle covered by a `width` x `height` canvas.
    pub fn visible_rect(&self, width: f64, height: f64) -> WorldRect {
        WorldRect::new(
            self.screen_to_world(DVec2::zero()),
            self.screen_to_world(DVec2::new(width, height)),
        )
    }
}
