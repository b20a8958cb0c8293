//! Capability seams to the host styling surface
//!
//! The renderer never touches a platform API directly. Everything it needs
//! from the host is expressed as three traits: the styling surface itself,
//! the size-change observation mechanism, and (for declarative discovery)
//! read access to element attributes and computed styles.

use slotmap::new_key_type;

use crate::element::{ElementId, Positioning, Size};
use crate::error::ObservationError;

new_key_type! {
    /// Handle to an active size-change subscription
    pub struct SubscriptionId;
}

/// Styling surface consumed by the renderer
///
/// Clip regions are SVG path data strings (`M`/`L`/`C`/`Z` commands),
/// suitable for embedding in a `path("...")` clip value. `insert_rule` is a
/// named upsert: inserting under an existing name replaces that rule, so at
/// most one rule per name is ever live.
pub trait StylingSurface {
    /// Whether the surface can apply vector-path clip regions at all
    fn supports_path_clipping(&self) -> bool;

    /// Current computed box size of the element
    fn box_size(&self, element: ElementId) -> Size;

    fn set_clip_path(&mut self, element: ElementId, path_data: &str);
    fn clear_clip_path(&mut self, element: ElementId);

    fn set_custom_property(&mut self, element: ElementId, name: &str, value: &str);
    fn remove_custom_property(&mut self, element: ElementId, name: &str);

    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);

    fn positioning(&self, element: ElementId) -> Positioning;
    fn set_positioning(&mut self, element: ElementId, positioning: Positioning);

    /// Create or replace a named global style rule
    fn insert_rule(&mut self, name: &str, rule: &str);
    /// Remove a named rule; no-op when absent
    fn remove_rule(&mut self, name: &str);
}

/// Size-change observation mechanism
///
/// The host owns the notification loop: it batches size changes per frame
/// and delivers them by calling
/// [`SquircleRenderer::handle_size_change`](crate::SquircleRenderer::handle_size_change)
/// once per changed element, so renders for a given element are strictly
/// sequential.
pub trait SizeObservation {
    /// Start watching an element for size changes
    fn subscribe(&mut self, element: ElementId) -> Result<SubscriptionId, ObservationError>;

    /// Stop delivering notifications for a subscription
    ///
    /// Cancellation only silences future notifications; styling already
    /// applied stays in place.
    fn cancel(&mut self, subscription: SubscriptionId);
}

/// Read access to declarative attributes and computed styles
///
/// Only the auto-discovery scan needs this; direct `render`/`observe`
/// callers supply their own shape parameters.
pub trait ElementScan {
    /// All elements under `root`, in document order
    fn descendants(&self, root: ElementId) -> Vec<ElementId>;

    /// Raw attribute value, if the attribute is present
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Existing rounded-corner radius from the element's computed style
    fn computed_corner_radius(&self, element: ElementId) -> Option<f32>;

    /// Computed border shorthand, e.g. `"2px solid #333"`
    fn computed_border(&self, element: ElementId) -> Option<String>;

    /// Computed background or gradient paint value
    fn computed_background(&self, element: ElementId) -> Option<String>;
}
