//! Element handles and box geometry

use slotmap::new_key_type;

new_key_type! {
    /// Generation-checked handle to a host element
    ///
    /// Keys are never reused for a different element, so a stale handle held
    /// after the element is gone can only miss, never alias.
    pub struct ElementId;
}

/// Computed box size of an element, in surface units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the element has resolved to a drawable size
    ///
    /// A zero or negative dimension means "not yet measurable"; renders are
    /// skipped until a later size notification resolves it.
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Positioning mode of an element on the styling surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Positioning {
    /// Default, non-positioned mode
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurable_requires_both_dimensions_positive() {
        assert!(Size::new(100.0, 50.0).is_measurable());
        assert!(!Size::new(0.0, 50.0).is_measurable());
        assert!(!Size::new(100.0, 0.0).is_measurable());
        assert!(!Size::new(-1.0, 50.0).is_measurable());
        assert!(!Size::ZERO.is_measurable());
    }
}
