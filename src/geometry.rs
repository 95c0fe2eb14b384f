//! Unit Conversion & Placement System
//!
//! Two coordinate domains: physical inches (drives pricing) and render-space
//! pixels (drives the mockup preview). Conversion is exact linear scaling at
//! a fixed pixels-per-inch resolution; placement is a center-anchored offset
//! clamped against the mockup bounds.

use serde::{Deserialize, Serialize};

/// Pixels-per-inch used to project physical size into render space.
///
/// Supplied by the embedding context, constant per session. A non-positive
/// value is a precondition violation, not a recoverable error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resolution(f64);

impl Resolution {
    pub fn new(pixels_per_inch: f64) -> Self {
        assert!(
            pixels_per_inch > 0.0,
            "resolution must be a positive pixels-per-inch value"
        );
        Self(pixels_per_inch)
    }

    pub fn pixels_per_inch(&self) -> f64 {
        self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        // Matches the preview surface's CSS pixel density.
        Self(96.0)
    }
}

/// Design dimensions in inches. Both axes strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl PhysicalSize {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self { width_in, height_in }
    }

    /// Printed area in square inches, the cost driver.
    pub fn print_area(&self) -> f64 {
        self.width_in * self.height_in
    }

    /// Project into render space. Recomputed on every read; resolution is
    /// constant per session but physical size changes frequently.
    pub fn to_render(&self, resolution: Resolution) -> RenderSize {
        RenderSize {
            width_px: self.width_in * resolution.pixels_per_inch(),
            height_px: self.height_in * resolution.pixels_per_inch(),
        }
    }
}

/// A bounding box size in render-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSize {
    pub width_px: f64,
    pub height_px: f64,
}

impl RenderSize {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self { width_px, height_px }
    }
}

/// Translation of the design relative to the mockup's center anchor,
/// in render-space pixels. (0, 0) means centered.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementOffset {
    pub x: f64,
    pub y: f64,
}

impl PlacementOffset {
    pub const CENTERED: PlacementOffset = PlacementOffset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A drag movement in render-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragDelta {
    pub dx: f64,
    pub dy: f64,
}

impl DragDelta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Clamp policy: the reachable offset magnitude on an axis is half the
/// absolute size difference between container and content.
///
/// Content smaller than the container stays fully inside it; content larger
/// than the container keeps the container fully covered while every content
/// edge can still be revealed. Equal sizes pin the axis at 0.
fn clamp_axis(offset: f64, container: f64, content: f64) -> f64 {
    let reach = (container - content).abs() / 2.0;
    offset.clamp(-reach, reach)
}

/// Apply a drag to the current offset, clamping each axis independently so
/// the containment policy above holds for any input delta. Never fails.
pub fn apply_drag(
    current: PlacementOffset,
    delta: DragDelta,
    container: RenderSize,
    content: RenderSize,
) -> PlacementOffset {
    PlacementOffset {
        x: clamp_axis(current.x + delta.dx, container.width_px, content.width_px),
        y: clamp_axis(current.y + delta.dy, container.height_px, content.height_px),
    }
}

/// Re-clamp an existing offset against new geometry (e.g. after a size
/// change) without applying any movement.
pub fn constrain(
    current: PlacementOffset,
    container: RenderSize,
    content: RenderSize,
) -> PlacementOffset {
    apply_drag(current, DragDelta::default(), container, content)
}
