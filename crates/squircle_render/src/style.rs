//! Shape parameters

/// Shape parameters for one squircle render
///
/// Immutable once supplied; `observe` captures a copy at subscription time
/// and re-renders with it on every size change.
#[derive(Clone, Debug, PartialEq)]
pub struct SquircleStyle {
    /// Requested corner radius in surface units; the renderer clamps it to
    /// half the smaller box dimension.
    pub corner_radius: f32,
    /// 0.0 = plain circular rounding, 1.0 = maximum smoothing.
    pub corner_smoothing: f32,
    /// Reserved; accepted everywhere but never changes the computed outline.
    pub preserve_smoothing: bool,
    /// A positive width selects border mode (outer clip + inset overlay).
    pub border_width: Option<f32>,
    /// Paint for the inset overlay in border mode. Falls back to the
    /// element's inherited background when absent.
    pub inner_background: Option<String>,
}

impl SquircleStyle {
    pub fn new(corner_radius: f32, corner_smoothing: f32) -> Self {
        Self {
            corner_radius,
            corner_smoothing,
            preserve_smoothing: false,
            border_width: None,
            inner_background: None,
        }
    }

    pub fn with_border_width(mut self, width: f32) -> Self {
        self.border_width = Some(width);
        self
    }

    pub fn with_inner_background(mut self, paint: impl Into<String>) -> Self {
        self.inner_background = Some(paint.into());
        self
    }

    pub fn with_preserve_smoothing(mut self, preserve: bool) -> Self {
        self.preserve_smoothing = preserve;
        self
    }

    /// Border mode is selected by a present, positive border width
    pub fn is_border_mode(&self) -> bool {
        self.border_width.is_some_and(|w| w > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_mode_requires_positive_width() {
        assert!(!SquircleStyle::new(16.0, 1.0).is_border_mode());
        assert!(!SquircleStyle::new(16.0, 1.0).with_border_width(0.0).is_border_mode());
        assert!(!SquircleStyle::new(16.0, 1.0).with_border_width(-2.0).is_border_mode());
        assert!(SquircleStyle::new(16.0, 1.0).with_border_width(4.0).is_border_mode());
    }
}
