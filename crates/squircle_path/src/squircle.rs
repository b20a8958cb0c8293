//! Squircle outline construction
//!
//! A squircle is a rounded rectangle whose corner curves are pulled beyond
//! standard circular rounding by a smoothing factor. Corners are cubic
//! Bezier curves; smoothing only moves the control points along the
//! adjacent straight edges, it never changes the curve topology.

use crate::path::{Path, PathBuilder};

/// Control-point ratio of the standard 4-cubic-Bezier circle approximation,
/// 4/3 * tan(pi/8).
pub const CIRCLE_ARC_K: f32 = 0.552284749831;

/// Build a closed squircle outline for a `width` x `height` box.
///
/// The effective corner radius is clamped to half the smaller dimension, so
/// corners never overlap regardless of the requested radius. Each corner's
/// two control points sit `r * (1 - smoothing * K)` from the arc endpoints,
/// along the adjacent edges toward the corner: at `smoothing = 0` both
/// controls collapse onto the corner point, at `smoothing = 1` they pull
/// back to `r * (1 - K)`.
///
/// Pure computation; identical inputs produce identical paths. Non-positive
/// dimensions degenerate the radius to zero and yield a plain rectangle
/// outline rather than an error.
pub fn squircle_outline(width: f32, height: f32, corner_radius: f32, smoothing: f32) -> Path {
    let r = corner_radius
        .min(width / 2.0)
        .min(height / 2.0)
        .max(0.0);
    let cp = r * (1.0 - smoothing * CIRCLE_ARC_K);

    let w = width;
    let h = height;

    PathBuilder::new()
        .move_to(r, 0.0)
        .line_to(w - r, 0.0)
        .cubic_to(w - r + cp, 0.0, w, r - cp, w, r)
        .line_to(w, h - r)
        .cubic_to(w, h - r + cp, w - r + cp, h, w - r, h)
        .line_to(r, h)
        .cubic_to(r - cp, h, 0.0, h - r + cp, 0.0, h - r)
        .line_to(0.0, r)
        .cubic_to(0.0, r - cp, r - cp, 0.0, r, 0.0)
        .close()
        .build()
}
