//! Surface sizing.
//!
//! Converts the host's reported layout box and pixel ratio into the logical
//! viewport the simulation runs in and the backing-buffer size the canvas
//! is given.

/// Upper bound on the device pixel scale. Keeps backing buffers bounded on
/// very dense displays.
pub const MAX_PIXEL_SCALE: f32 = 2.0;

/// Raw surface measurements reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    /// Viewport offset of the surface's left edge.
    pub left: f32,
    /// Viewport offset of the surface's top edge.
    pub top: f32,
    /// Displayed width in CSS pixels.
    pub width: f32,
    /// Displayed height in CSS pixels.
    pub height: f32,
    /// Device pixel ratio, if the host reports one.
    pub pixel_ratio: Option<f32>,
}

impl SurfaceMetrics {
    /// Metrics for a surface at the viewport origin.
    pub fn sized(width: f32, height: f32, pixel_ratio: Option<f32>) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
            pixel_ratio,
        }
    }
}

/// Logical surface size and device pixel scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Viewport {
    /// Derive the viewport from host metrics.
    ///
    /// Sizes are floored and never below 1 on either axis.
    pub fn from_metrics(metrics: &SurfaceMetrics) -> Self {
        Self {
            width: metrics.width.floor().max(1.0),
            height: metrics.height.floor().max(1.0),
            scale: pixel_scale(metrics.pixel_ratio),
        }
    }

    /// Backing pixel-buffer size: logical size times scale, floored.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.scale).floor() as u32,
            (self.height * self.scale).floor() as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            scale: 1.0,
        }
    }
}

/// Device pixel scale: the reported ratio capped at `MAX_PIXEL_SCALE`, or 1
/// when the ratio is missing or unusable.
pub fn pixel_scale(ratio: Option<f32>) -> f32 {
    match ratio {
        Some(r) if r.is_finite() && r > 0.0 => r.min(MAX_PIXEL_SCALE),
        _ => 1.0,
    }
}
