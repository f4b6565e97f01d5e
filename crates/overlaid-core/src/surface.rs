//! The editable surface: a base image plus the overlays placed on it.

use crate::image::BaseImage;
use crate::overlay::{Overlay, OverlayId};
use kurbo::Point;
use std::collections::HashMap;

/// Live surface state rendered by the shell.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    /// Base image reference, if one has been loaded.
    pub image: Option<BaseImage>,
    /// All overlays, keyed by ID.
    overlays: HashMap<OverlayId, Overlay>,
    /// Paint order of overlays (back to front).
    order: Vec<OverlayId>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an overlay on top of the others.
    pub fn add_overlay(&mut self, overlay: Overlay) {
        let id = overlay.id();
        if self.overlays.insert(id, overlay).is_none() {
            self.order.push(id);
        }
    }

    pub fn remove_overlay(&mut self, id: OverlayId) -> Option<Overlay> {
        self.order.retain(|&overlay_id| overlay_id != id);
        self.overlays.remove(&id)
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id)
    }

    pub fn overlay_mut(&mut self, id: OverlayId) -> Option<&mut Overlay> {
        self.overlays.get_mut(&id)
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.overlays.contains_key(&id)
    }

    /// Overlays in paint order (back to front).
    pub fn overlays(&self) -> impl Iterator<Item = &Overlay> {
        self.order.iter().filter_map(|id| self.overlays.get(id))
    }

    pub(crate) fn overlays_mut(&mut self) -> impl Iterator<Item = &mut Overlay> {
        self.overlays.values_mut()
    }

    pub fn ids(&self) -> &[OverlayId] {
        &self.order
    }

    /// Topmost overlay under `point`.
    pub fn overlay_at(&self, point: Point) -> Option<OverlayId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.overlays.get(id).is_some_and(|o| o.hit_test(point)))
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.overlays.is_empty()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayFactory;
    use crate::style::StyleProfile;

    fn overlay_at(x: f64, y: f64, text: &str) -> Overlay {
        let mut overlay = OverlayFactory::default().create(&StyleProfile::default(), Point::new(x, y));
        overlay.content = text.to_string();
        overlay
    }

    #[test]
    fn test_add_and_remove() {
        let mut surface = Surface::new();
        assert!(surface.is_empty());

        let overlay = overlay_at(0.0, 0.0, "a");
        let id = overlay.id();
        surface.add_overlay(overlay);
        assert_eq!(surface.len(), 1);
        assert!(surface.contains(id));

        assert!(surface.remove_overlay(id).is_some());
        assert!(surface.is_empty());
        assert!(surface.ids().is_empty());
    }

    #[test]
    fn test_paint_order() {
        let mut surface = Surface::new();
        let a = overlay_at(0.0, 0.0, "a");
        let b = overlay_at(0.0, 0.0, "b");
        let (id_a, id_b) = (a.id(), b.id());
        surface.add_overlay(a);
        surface.add_overlay(b);

        let ids: Vec<_> = surface.overlays().map(|o| o.id()).collect();
        assert_eq!(ids, vec![id_a, id_b]);
    }

    #[test]
    fn test_overlay_at_prefers_front() {
        let mut surface = Surface::new();
        let back = overlay_at(0.0, 0.0, "back");
        let front = overlay_at(10.0, 10.0, "front");
        let (back_id, front_id) = (back.id(), front.id());
        surface.add_overlay(back);
        surface.add_overlay(front);

        assert_eq!(surface.overlay_at(Point::new(20.0, 20.0)), Some(front_id));
        assert_eq!(surface.overlay_at(Point::new(2.0, 2.0)), Some(back_id));
        assert_eq!(surface.overlay_at(Point::new(900.0, 900.0)), None);
    }
}
