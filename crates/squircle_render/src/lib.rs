//! Squircle surface renderer
//!
//! Keeps an element's clip region (and, in border mode, a second inset clip
//! region) synchronized with the element's current box size and a small set
//! of shape parameters. The styling surface and the size-change notification
//! mechanism are external capabilities supplied by the host through traits;
//! a headless in-memory implementation is included for embedders and tests.
//!
//! # Overview
//!
//! - [`SquircleRenderer::render`] applies a squircle clip to one element.
//! - [`SquircleRenderer::observe`] renders immediately, then re-renders on
//!   every size-change notification delivered via
//!   [`SquircleRenderer::handle_size_change`].
//! - [`SquircleRenderer::disconnect`] reverses everything a render applied.
//! - [`scan`](scan::scan) discovers elements declaratively marked for corner
//!   smoothing and observes each of them.

pub mod capabilities;
pub mod color;
pub mod element;
pub mod error;
pub mod headless;
pub mod renderer;
pub mod scan;
pub mod style;
pub mod surface;
pub mod values;

pub use capabilities::Capabilities;
pub use color::Color;
pub use element::{ElementId, Positioning, Size};
pub use error::{ObservationError, ObserveError};
pub use headless::HeadlessSurface;
pub use renderer::{ObserverHandle, SquircleRenderer, INNER_BACKGROUND_PROPERTY};
pub use scan::{scan, CORNER_RADIUS_OVERRIDE_ATTR, ENABLE_CORNER_SMOOTHING_ATTR};
pub use style::SquircleStyle;
pub use surface::{ElementScan, SizeObservation, StylingSurface, SubscriptionId};
