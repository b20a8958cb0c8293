//! Squircle outline generation
//!
//! Builds smoothed rounded-rectangle ("squircle") outlines as closed vector
//! paths and serializes them as SVG path data, suitable for embedding in a
//! `path("...")` clip value.
//!
//! # Features
//!
//! - Path building (lines, cubic curves)
//! - Squircle outlines with a uniform radius and a smoothing factor
//! - Deterministic SVG path data serialization

pub mod path;
pub mod squircle;

pub use path::{Path, PathBuilder, PathCommand, Point};
pub use squircle::{squircle_outline, CIRCLE_ARC_K};
