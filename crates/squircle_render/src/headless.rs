//! In-memory styling surface
//!
//! A flat, headless document implementing every capability seam the
//! renderer consumes. Embedders use it as a reference implementation;
//! the test suites drive the full render protocol through it without a
//! platform. Size-change notifications are queued and drained per "frame"
//! via [`HeadlessSurface::take_resize_events`], which models the
//! batch-and-serialize delivery the renderer assumes.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::element::{ElementId, Positioning, Size};
use crate::error::ObservationError;
use crate::surface::{ElementScan, SizeObservation, StylingSurface, SubscriptionId};

/// One element of the headless document
#[derive(Clone, Debug, Default)]
pub struct ElementRecord {
    pub size: Size,
    pub attributes: FxHashMap<String, String>,
    pub classes: Vec<String>,
    pub clip_path: Option<String>,
    pub custom_properties: FxHashMap<String, String>,
    pub positioning: Positioning,
    pub corner_radius: Option<f32>,
    pub border: Option<String>,
    pub background: Option<String>,
}

/// Flat in-memory document; every element is a descendant of every other
/// element passed as a scan root
pub struct HeadlessSurface {
    elements: SlotMap<ElementId, ElementRecord>,
    order: Vec<ElementId>,
    rules: FxHashMap<String, String>,
    subscriptions: SlotMap<SubscriptionId, ElementId>,
    pending_resizes: Vec<ElementId>,
    path_clipping: bool,
    refuse_subscriptions: bool,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
            order: Vec::new(),
            rules: FxHashMap::default(),
            subscriptions: SlotMap::with_key(),
            pending_resizes: Vec::new(),
            path_clipping: true,
            refuse_subscriptions: false,
        }
    }

    /// A surface that cannot apply vector-path clips
    pub fn without_path_clipping() -> Self {
        Self {
            path_clipping: false,
            ..Self::new()
        }
    }

    /// Make every future `subscribe` call fail, simulating a broken
    /// platform observation API
    pub fn refuse_subscriptions(&mut self) {
        self.refuse_subscriptions = true;
    }

    pub fn create_element(&mut self, size: Size) -> ElementId {
        let id = self.elements.insert(ElementRecord {
            size,
            ..ElementRecord::default()
        });
        self.order.push(id);
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementRecord> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut ElementRecord> {
        self.elements.get_mut(id)
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(record) = self.elements.get_mut(id) {
            record.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Update an element's box size, queueing a notification when the
    /// element is observed and the size actually changed
    pub fn set_box_size(&mut self, id: ElementId, size: Size) {
        let Some(record) = self.elements.get_mut(id) else {
            return;
        };
        if record.size == size {
            return;
        }
        record.size = size;

        let observed = self.subscriptions.values().any(|target| *target == id);
        if observed && !self.pending_resizes.contains(&id) {
            self.pending_resizes.push(id);
        }
    }

    /// Drain the queued size-change notifications for this frame
    pub fn take_resize_events(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.pending_resizes)
    }

    pub fn rule(&self, name: &str) -> Option<&str> {
        self.rules.get(name).map(String::as_str)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl StylingSurface for HeadlessSurface {
    fn supports_path_clipping(&self) -> bool {
        self.path_clipping
    }

    fn box_size(&self, element: ElementId) -> Size {
        self.elements
            .get(element)
            .map(|record| record.size)
            .unwrap_or(Size::ZERO)
    }

    fn set_clip_path(&mut self, element: ElementId, path_data: &str) {
        if let Some(record) = self.elements.get_mut(element) {
            record.clip_path = Some(path_data.to_string());
        }
    }

    fn clear_clip_path(&mut self, element: ElementId) {
        if let Some(record) = self.elements.get_mut(element) {
            record.clip_path = None;
        }
    }

    fn set_custom_property(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(record) = self.elements.get_mut(element) {
            record
                .custom_properties
                .insert(name.to_string(), value.to_string());
        }
    }

    fn remove_custom_property(&mut self, element: ElementId, name: &str) {
        if let Some(record) = self.elements.get_mut(element) {
            record.custom_properties.remove(name);
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(record) = self.elements.get_mut(element) {
            if !record.classes.iter().any(|c| c == class) {
                record.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(record) = self.elements.get_mut(element) {
            record.classes.retain(|c| c != class);
        }
    }

    fn positioning(&self, element: ElementId) -> Positioning {
        self.elements
            .get(element)
            .map(|record| record.positioning)
            .unwrap_or_default()
    }

    fn set_positioning(&mut self, element: ElementId, positioning: Positioning) {
        if let Some(record) = self.elements.get_mut(element) {
            record.positioning = positioning;
        }
    }

    fn insert_rule(&mut self, name: &str, rule: &str) {
        self.rules.insert(name.to_string(), rule.to_string());
    }

    fn remove_rule(&mut self, name: &str) {
        self.rules.remove(name);
    }
}

impl SizeObservation for HeadlessSurface {
    fn subscribe(&mut self, element: ElementId) -> Result<SubscriptionId, ObservationError> {
        if self.refuse_subscriptions {
            return Err(ObservationError("subscriptions refused".to_string()));
        }
        if !self.elements.contains_key(element) {
            return Err(ObservationError("unknown element".to_string()));
        }
        Ok(self.subscriptions.insert(element))
    }

    fn cancel(&mut self, subscription: SubscriptionId) {
        self.subscriptions.remove(subscription);
    }
}

impl ElementScan for HeadlessSurface {
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        self.order.iter().copied().filter(|id| *id != root).collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.elements
            .get(element)
            .and_then(|record| record.attributes.get(name).cloned())
    }

    fn computed_corner_radius(&self, element: ElementId) -> Option<f32> {
        self.elements.get(element).and_then(|record| record.corner_radius)
    }

    fn computed_border(&self, element: ElementId) -> Option<String> {
        self.elements
            .get(element)
            .and_then(|record| record.border.clone())
    }

    fn computed_background(&self, element: ElementId) -> Option<String> {
        self.elements
            .get(element)
            .and_then(|record| record.background.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_events_only_queue_for_observed_elements() {
        let mut surface = HeadlessSurface::new();
        let watched = surface.create_element(Size::new(10.0, 10.0));
        let ignored = surface.create_element(Size::new(10.0, 10.0));

        let _sub = surface.subscribe(watched).unwrap();
        surface.set_box_size(watched, Size::new(20.0, 10.0));
        surface.set_box_size(ignored, Size::new(20.0, 10.0));

        assert_eq!(surface.take_resize_events(), vec![watched]);
        assert!(surface.take_resize_events().is_empty());
    }

    #[test]
    fn unchanged_size_does_not_queue() {
        let mut surface = HeadlessSurface::new();
        let element = surface.create_element(Size::new(10.0, 10.0));
        let _sub = surface.subscribe(element).unwrap();

        surface.set_box_size(element, Size::new(10.0, 10.0));
        assert!(surface.take_resize_events().is_empty());
    }

    #[test]
    fn cancelled_subscription_stops_queueing() {
        let mut surface = HeadlessSurface::new();
        let element = surface.create_element(Size::new(10.0, 10.0));
        let sub = surface.subscribe(element).unwrap();
        surface.cancel(sub);

        surface.set_box_size(element, Size::new(30.0, 30.0));
        assert!(surface.take_resize_events().is_empty());
    }

    #[test]
    fn named_rules_upsert() {
        let mut surface = HeadlessSurface::new();
        surface.insert_rule("squircle-0", "a");
        surface.insert_rule("squircle-0", "b");
        assert_eq!(surface.rule_count(), 1);
        assert_eq!(surface.rule("squircle-0"), Some("b"));
    }
}
