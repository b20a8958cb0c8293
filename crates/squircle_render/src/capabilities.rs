//! Styling-surface capability detection

use crate::surface::StylingSurface;

/// What the styling surface can do, probed once at startup
///
/// Held by value in the renderer rather than read from ambient global
/// state, so hosts with several surfaces can carry one per surface.
#[derive(Clone, Copy, Debug)]
pub struct Capabilities {
    /// Surface accepts vector-path clip regions
    pub path_clipping: bool,
}

impl Capabilities {
    pub fn probe<S: StylingSurface>(surface: &S) -> Self {
        let path_clipping = surface.supports_path_clipping();
        if !path_clipping {
            tracing::warn!("styling surface lacks vector-path clipping; squircle renders will be skipped");
        }
        Self { path_clipping }
    }
}
