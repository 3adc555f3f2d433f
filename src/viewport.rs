//! Logical viewport: the simulation's coordinate space.

use glam::Vec2;

/// Device pixel ratios above this are capped to keep the backing store small.
pub const MAX_DPR: f32 = 2.0;
/// Fraction of the height taken by the sky; the grass starts here.
pub const HORIZON_RATIO: f32 = 0.4;

/// Y of the horizon line for a logical height.
pub fn horizon_y(height: f32) -> f32 {
    height * HORIZON_RATIO
}

/// Logical size, capped device pixel ratio, and the previous logical size
/// (needed to rescale everything proportionally on resize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub dpr: f32,
    pub width: f32,
    pub height: f32,
    prev: Option<Vec2>,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            dpr: 1.0,
            width: 0.0,
            height: 0.0,
            prev: None,
        }
    }

    /// Apply a resize. Returns the per-axis `new / old` ratio when a usable
    /// previous size exists, which the scene multiplies into every position.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> Option<Vec2> {
        self.dpr = if device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_DPR)
        } else {
            1.0
        };
        self.width = width;
        self.height = height;

        let ratio = self
            .prev
            .filter(|p| p.x > 0.0 && p.y > 0.0)
            .map(|p| Vec2::new(width / p.x, height / p.y));
        self.prev = Some(Vec2::new(width, height));
        ratio
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn horizon(&self) -> f32 {
        horizon_y(self.height)
    }

    /// Backing-store size in physical pixels (`logical × capped dpr`).
    pub fn backing_size(&self) -> (u32, u32) {
        (
            ((self.width * self.dpr).round() as u32).max(1),
            ((self.height * self.dpr).round() as u32).max(1),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
