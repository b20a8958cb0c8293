//! Declarative element discovery
//!
//! Elements opt in to corner smoothing with a marker attribute; the scan
//! derives shape parameters from attributes and computed styles, then hands
//! each new element to the renderer's observe protocol. Re-scanning is
//! idempotent: already-tracked elements are skipped.

use tracing::{debug, warn};

use crate::element::ElementId;
use crate::renderer::SquircleRenderer;
use crate::style::SquircleStyle;
use crate::surface::{ElementScan, SizeObservation, StylingSurface};
use crate::values::{parse_border, parse_factor, parse_length};

/// Marker attribute enabling corner smoothing; its value is the smoothing
/// factor
pub const ENABLE_CORNER_SMOOTHING_ATTR: &str = "enable-corner-smoothing";

/// Optional numeric attribute overriding the derived corner radius
pub const CORNER_RADIUS_OVERRIDE_ATTR: &str = "corner-radius-override";

/// Radius used when neither an override attribute nor an existing
/// rounded-corner style is present
pub const DEFAULT_CORNER_RADIUS: f32 = 16.0;

const DEFAULT_CORNER_SMOOTHING: f32 = 1.0;

/// Discover and observe every marked element under `root`
///
/// Returns the number of newly observed elements. Subscription failures are
/// logged and the element is skipped; a later re-scan may pick it up again.
pub fn scan<H>(renderer: &mut SquircleRenderer, host: &mut H, root: ElementId) -> usize
where
    H: StylingSurface + SizeObservation + ElementScan,
{
    let mut discovered = 0;

    for element in host.descendants(root) {
        let Some(raw_smoothing) = host.attribute(element, ENABLE_CORNER_SMOOTHING_ATTR) else {
            continue;
        };
        if renderer.is_tracked(element) {
            continue;
        }

        let corner_smoothing =
            parse_factor(&raw_smoothing).unwrap_or(DEFAULT_CORNER_SMOOTHING);

        let corner_radius = host
            .attribute(element, CORNER_RADIUS_OVERRIDE_ATTR)
            .as_deref()
            .and_then(parse_length)
            .or_else(|| host.computed_corner_radius(element))
            .unwrap_or(DEFAULT_CORNER_RADIUS);

        let mut style = SquircleStyle::new(corner_radius, corner_smoothing);

        // A visible solid border switches the element into border mode.
        if let Some(border) = host.computed_border(element).as_deref().and_then(parse_border)
        {
            if border.width > 0.0 && !border.color.is_transparent() {
                style = style.with_border_width(border.width);
            }
        }

        if let Some(background) = host.computed_background(element) {
            style = style.with_inner_background(background);
        }

        match renderer.observe(host, element, style) {
            Ok(_) => {
                debug!(?element, "corner smoothing enabled");
                discovered += 1;
            }
            Err(err) => {
                warn!(?element, %err, "skipping element: could not wire size observation");
            }
        }
    }

    discovered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;
    use crate::element::Size;
    use crate::headless::HeadlessSurface;

    fn renderer_for(surface: &HeadlessSurface) -> SquircleRenderer {
        SquircleRenderer::new(Capabilities::probe(surface))
    }

    #[test]
    fn discovers_only_marked_elements() {
        let mut surface = HeadlessSurface::new();
        let root = surface.create_element(Size::new(800.0, 600.0));
        let marked = surface.create_element(Size::new(100.0, 100.0));
        let _plain = surface.create_element(Size::new(100.0, 100.0));
        surface.set_attribute(marked, ENABLE_CORNER_SMOOTHING_ATTR, "1");

        let mut renderer = renderer_for(&surface);
        assert_eq!(scan(&mut renderer, &mut surface, root), 1);
        assert!(renderer.is_tracked(marked));
        assert!(surface.element(marked).unwrap().clip_path.is_some());
    }

    #[test]
    fn rescan_is_idempotent() {
        let mut surface = HeadlessSurface::new();
        let root = surface.create_element(Size::new(800.0, 600.0));
        let marked = surface.create_element(Size::new(100.0, 100.0));
        surface.set_attribute(marked, ENABLE_CORNER_SMOOTHING_ATTR, "0.5");

        let mut renderer = renderer_for(&surface);
        assert_eq!(scan(&mut renderer, &mut surface, root), 1);
        assert_eq!(scan(&mut renderer, &mut surface, root), 0);
        assert_eq!(surface.subscription_count(), 1);
    }

    #[test]
    fn radius_override_attribute_wins() {
        let mut surface = HeadlessSurface::new();
        let root = surface.create_element(Size::new(800.0, 600.0));
        let marked = surface.create_element(Size::new(200.0, 200.0));
        surface.set_attribute(marked, ENABLE_CORNER_SMOOTHING_ATTR, "1");
        surface.set_attribute(marked, CORNER_RADIUS_OVERRIDE_ATTR, "32px");
        surface.element_mut(marked).unwrap().corner_radius = Some(8.0);

        let mut renderer = renderer_for(&surface);
        scan(&mut renderer, &mut surface, root);

        // Radius 32: outline starts at (32, 0).
        let clip = surface.element(marked).unwrap().clip_path.clone().unwrap();
        assert!(clip.starts_with("M 32 0"), "clip was {clip}");
    }

    #[test]
    fn computed_radius_then_default() {
        let mut surface = HeadlessSurface::new();
        let root = surface.create_element(Size::new(800.0, 600.0));
        let styled = surface.create_element(Size::new(200.0, 200.0));
        let bare = surface.create_element(Size::new(200.0, 200.0));
        surface.set_attribute(styled, ENABLE_CORNER_SMOOTHING_ATTR, "1");
        surface.set_attribute(bare, ENABLE_CORNER_SMOOTHING_ATTR, "1");
        surface.element_mut(styled).unwrap().corner_radius = Some(24.0);

        let mut renderer = renderer_for(&surface);
        scan(&mut renderer, &mut surface, root);

        let styled_clip = surface.element(styled).unwrap().clip_path.clone().unwrap();
        assert!(styled_clip.starts_with("M 24 0"), "clip was {styled_clip}");

        // DEFAULT_CORNER_RADIUS = 16
        let bare_clip = surface.element(bare).unwrap().clip_path.clone().unwrap();
        assert!(bare_clip.starts_with("M 16 0"), "clip was {bare_clip}");
    }

    #[test]
    fn unparsable_smoothing_defaults_to_one() {
        let mut surface = HeadlessSurface::new();
        let root = surface.create_element(Size::new(800.0, 600.0));
        let marked = surface.create_element(Size::new(100.0, 100.0));
        surface.set_attribute(marked, ENABLE_CORNER_SMOOTHING_ATTR, "");

        let mut renderer = renderer_for(&surface);
        assert_eq!(scan(&mut renderer, &mut surface, root), 1);

        // Smoothing 1 with radius 16: first corner control sits at
        // 16 * (1 - K) past the edge end, x = 84 + 7.163 = 91.163.
        let clip = surface.element(marked).unwrap().clip_path.clone().unwrap();
        assert!(clip.contains("C 91.163 0"), "clip was {clip}");
    }

    #[test]
    fn solid_border_selects_border_mode() {
        let mut surface = HeadlessSurface::new();
        let root = surface.create_element(Size::new(800.0, 600.0));
        let bordered = surface.create_element(Size::new(100.0, 50.0));
        surface.set_attribute(bordered, ENABLE_CORNER_SMOOTHING_ATTR, "1");
        surface.element_mut(bordered).unwrap().border = Some("4px solid #333".to_string());
        surface.element_mut(bordered).unwrap().background =
            Some("linear-gradient(#fff, #eee)".to_string());

        let mut renderer = renderer_for(&surface);
        scan(&mut renderer, &mut surface, root);

        let record = surface.element(bordered).unwrap();
        assert_eq!(record.classes.len(), 1);
        assert_eq!(surface.rule_count(), 1);
        assert_eq!(
            record
                .custom_properties
                .get(crate::renderer::INNER_BACKGROUND_PROPERTY)
                .map(String::as_str),
            Some("linear-gradient(#fff, #eee)")
        );
    }

    #[test]
    fn transparent_border_stays_simple() {
        let mut surface = HeadlessSurface::new();
        let root = surface.create_element(Size::new(800.0, 600.0));
        let marked = surface.create_element(Size::new(100.0, 50.0));
        surface.set_attribute(marked, ENABLE_CORNER_SMOOTHING_ATTR, "1");
        surface.element_mut(marked).unwrap().border = Some("4px solid transparent".to_string());

        let mut renderer = renderer_for(&surface);
        scan(&mut renderer, &mut surface, root);

        assert_eq!(surface.rule_count(), 0);
        assert!(surface.element(marked).unwrap().classes.is_empty());
    }

    #[test]
    fn subscription_failure_leaves_element_untracked() {
        let mut surface = HeadlessSurface::new();
        let root = surface.create_element(Size::new(800.0, 600.0));
        let marked = surface.create_element(Size::new(100.0, 100.0));
        surface.set_attribute(marked, ENABLE_CORNER_SMOOTHING_ATTR, "1");
        surface.refuse_subscriptions();

        let mut renderer = renderer_for(&surface);
        assert_eq!(scan(&mut renderer, &mut surface, root), 0);
        assert!(!renderer.is_tracked(marked));
    }
}
