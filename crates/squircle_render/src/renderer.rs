//! Render protocol and per-element state
//!
//! One `SquircleRenderer` tracks any number of elements. Per-element state
//! lives in a `SecondaryMap` keyed by the element's generational handle, so
//! the association is weak: dropping an element elsewhere can never be kept
//! alive by render bookkeeping, and a stale handle can only miss.

use slotmap::SecondaryMap;
use squircle_path::squircle_outline;
use tracing::{debug, warn};

use crate::capabilities::Capabilities;
use crate::element::{ElementId, Positioning, Size};
use crate::error::ObserveError;
use crate::style::SquircleStyle;
use crate::surface::{SizeObservation, StylingSurface, SubscriptionId};

/// Custom property carrying the inset overlay's paint in border mode
pub const INNER_BACKGROUND_PROPERTY: &str = "--squircle-inner-background";

const MARKER_PREFIX: &str = "squircle";

/// Per-element render bookkeeping
///
/// Created on the first successful render for an element, destroyed by
/// `disconnect`.
#[derive(Clone, Debug, Default)]
struct RenderState {
    last_size: Option<Size>,
    overlay_id: Option<u64>,
    has_overlay_rule: bool,
    observed: Option<Observed>,
}

/// Subscription bookkeeping; parameters are captured at observe time and
/// never re-read from the element.
#[derive(Clone, Debug)]
struct Observed {
    subscription: SubscriptionId,
    style: SquircleStyle,
}

/// Handle to an active observation
///
/// Cancelling stops future re-renders but leaves applied styling in place;
/// cleanup is a separate explicit `disconnect`.
#[derive(Clone, Copy, Debug)]
pub struct ObserverHandle {
    pub element: ElementId,
    pub subscription: SubscriptionId,
}

/// Applies squircle clip regions to elements and keeps them synchronized
/// with element sizes
pub struct SquircleRenderer {
    capabilities: Capabilities,
    states: SecondaryMap<ElementId, RenderState>,
    next_overlay: u64,
}

impl SquircleRenderer {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            states: SecondaryMap::new(),
            next_overlay: 0,
        }
    }

    /// Whether the element currently has render state
    pub fn is_tracked(&self, element: ElementId) -> bool {
        self.states.contains_key(element)
    }

    /// Render the element's clip region(s) from its current box size
    ///
    /// Skips without touching prior styling when the surface cannot clip to
    /// vector paths or the element is not yet measurable. A border-mode
    /// render creates (or updates) exactly one auxiliary rule; a simple-mode
    /// render reverses any border bookkeeping left by an earlier render.
    pub fn render<S: StylingSurface>(
        &mut self,
        surface: &mut S,
        element: ElementId,
        style: &SquircleStyle,
    ) {
        if !self.capabilities.path_clipping {
            warn!(?element, "squircle render skipped: surface lacks vector-path clipping");
            return;
        }

        let size = surface.box_size(element);
        if !size.is_measurable() {
            debug!(?element, ?size, "squircle render skipped: box not yet measurable");
            return;
        }

        let outer = squircle_outline(
            size.width,
            size.height,
            style.corner_radius,
            style.corner_smoothing,
        );
        surface.set_clip_path(element, &outer.to_path_data());

        if !self.states.contains_key(element) {
            self.states.insert(element, RenderState::default());
        }

        match style.border_width.filter(|w| *w > 0.0) {
            Some(border_width) => {
                self.render_border(surface, element, style, size, border_width)
            }
            None => self.clear_border_bookkeeping(surface, element),
        }

        self.states[element].last_size = Some(size);
    }

    /// Render immediately, then re-render on every size-change notification
    ///
    /// Parameters are captured now; later notifications re-use them. On a
    /// subscription failure the element is left untracked (styling from the
    /// immediate render, if any, stays in place).
    pub fn observe<H>(
        &mut self,
        host: &mut H,
        element: ElementId,
        style: SquircleStyle,
    ) -> Result<ObserverHandle, ObserveError>
    where
        H: StylingSurface + SizeObservation,
    {
        let was_tracked = self.states.contains_key(element);
        self.render(host, element, &style);

        let subscription = match host.subscribe(element) {
            Ok(subscription) => subscription,
            Err(err) => {
                if !was_tracked {
                    self.states.remove(element);
                }
                return Err(ObserveError::Subscription(err));
            }
        };

        if !self.states.contains_key(element) {
            self.states.insert(element, RenderState::default());
        }
        // Re-observing replaces the old subscription rather than leaking it.
        if let Some(previous) = self.states[element].observed.take() {
            host.cancel(previous.subscription);
        }
        self.states[element].observed = Some(Observed {
            subscription,
            style,
        });

        Ok(ObserverHandle {
            element,
            subscription,
        })
    }

    /// Deliver one size-change notification for an element
    ///
    /// Re-renders with the parameters captured at observe time. Skips when
    /// the notified size equals the last rendered size; recomputing would
    /// produce byte-identical output.
    pub fn handle_size_change<S: StylingSurface>(&mut self, surface: &mut S, element: ElementId) {
        let Some(state) = self.states.get(element) else {
            return;
        };
        let Some(observed) = state.observed.as_ref() else {
            return;
        };
        let style = observed.style.clone();

        let size = surface.box_size(element);
        if state.last_size == Some(size) {
            debug!(?element, "size unchanged; skipping recompute");
            return;
        }

        self.render(surface, element, &style);
    }

    /// Stop future notifications for a handle without touching styling
    pub fn cancel_observation<O: SizeObservation>(
        &mut self,
        observation: &mut O,
        handle: ObserverHandle,
    ) {
        observation.cancel(handle.subscription);
        if let Some(state) = self.states.get_mut(handle.element) {
            let matches = state
                .observed
                .as_ref()
                .is_some_and(|o| o.subscription == handle.subscription);
            if matches {
                state.observed = None;
            }
        }
    }

    /// Remove everything this renderer applied to an element
    ///
    /// Cancels the observer, clears the clip region and inner-background
    /// property, removes the marker class and auxiliary rule, and discards
    /// the render state. No-op for untracked elements. The positioning
    /// upgrade applied in border mode is deliberately not reverted.
    pub fn disconnect<H>(&mut self, host: &mut H, element: ElementId)
    where
        H: StylingSurface + SizeObservation,
    {
        let Some(state) = self.states.remove(element) else {
            return;
        };

        if let Some(observed) = state.observed {
            host.cancel(observed.subscription);
        }

        host.clear_clip_path(element);
        host.remove_custom_property(element, INNER_BACKGROUND_PROPERTY);

        if let Some(id) = state.overlay_id {
            let marker = marker_name(id);
            if state.has_overlay_rule {
                host.remove_rule(&marker);
            }
            host.remove_class(element, &marker);
        }
    }

    fn render_border<S: StylingSurface>(
        &mut self,
        surface: &mut S,
        element: ElementId,
        style: &SquircleStyle,
        size: Size,
        border_width: f32,
    ) {
        // Stable marker: allocated on the first border-mode render, reused
        // for every later one.
        let overlay_id = match self.states[element].overlay_id {
            Some(id) => id,
            None => {
                let id = self.next_overlay;
                self.next_overlay += 1;
                self.states[element].overlay_id = Some(id);
                id
            }
        };
        let marker = marker_name(overlay_id);
        surface.add_class(element, &marker);

        let inner_width = (size.width - 2.0 * border_width).max(0.0);
        let inner_height = (size.height - 2.0 * border_width).max(0.0);
        let inner_radius = (style.corner_radius - border_width).max(0.0);
        let inner = squircle_outline(
            inner_width,
            inner_height,
            inner_radius,
            style.corner_smoothing,
        );

        // The overlay rule reads the property with an `inherit` fallback,
        // so a missing paint shows the element's inherited background.
        match &style.inner_background {
            Some(paint) => surface.set_custom_property(element, INNER_BACKGROUND_PROPERTY, paint),
            None => surface.remove_custom_property(element, INNER_BACKGROUND_PROPERTY),
        }

        let rule = overlay_rule(
            &marker,
            border_width,
            inner_width,
            inner_height,
            &inner.to_path_data(),
        );
        surface.insert_rule(&marker, &rule);
        self.states[element].has_overlay_rule = true;

        // One-way upgrade so the inset overlay has an anchor.
        if surface.positioning(element) == Positioning::Static {
            surface.set_positioning(element, Positioning::Relative);
        }
    }

    /// Reverse border-mode side effects after a switch back to simple mode
    fn clear_border_bookkeeping<S: StylingSurface>(&mut self, surface: &mut S, element: ElementId) {
        let state = &mut self.states[element];
        let overlay_id = state.overlay_id.take();
        let had_rule = std::mem::take(&mut state.has_overlay_rule);

        if let Some(id) = overlay_id {
            let marker = marker_name(id);
            if had_rule {
                surface.remove_rule(&marker);
            }
            surface.remove_class(element, &marker);
            surface.remove_custom_property(element, INNER_BACKGROUND_PROPERTY);
        }
    }
}

fn marker_name(id: u64) -> String {
    format!("{MARKER_PREFIX}-{id}")
}

/// Auxiliary rule positioning the inset overlay inside the border frame
fn overlay_rule(
    marker: &str,
    border_width: f32,
    inner_width: f32,
    inner_height: f32,
    inner_path: &str,
) -> String {
    format!(
        ".{marker}::before {{ content: \"\"; position: absolute; top: {border_width}px; \
         left: {border_width}px; width: {inner_width}px; height: {inner_height}px; \
         background: var({INNER_BACKGROUND_PROPERTY}, inherit); \
         clip-path: path(\"{inner_path}\"); pointer-events: none; }}"
    )
}
