//! Immutable captures of the surface for undo/redo.
//!
//! A snapshot keeps only what the user edits: the base image and, per
//! overlay, its id, position, text and style. Transient visual state
//! (selection border, drag opacity, bound handlers) is dropped on capture, so
//! restoring a snapshot never brings back a stale highlight.

use crate::image::BaseImage;
use crate::overlay::{Overlay, OverlayId};
use crate::style::StyleProfile;
use crate::surface::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot serialization errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted attributes of one overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRecord {
    pub id: OverlayId,
    pub position: Point,
    pub content: String,
    pub style: StyleProfile,
    pub min_width: f64,
    pub padding: f64,
}

impl From<&Overlay> for OverlayRecord {
    fn from(overlay: &Overlay) -> Self {
        Self {
            id: overlay.id(),
            position: overlay.position,
            content: overlay.content.clone(),
            style: overlay.style.clone(),
            min_width: overlay.min_width,
            padding: overlay.padding,
        }
    }
}

/// The surface at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub image: Option<BaseImage>,
    /// Overlays in paint order (back to front).
    pub overlays: Vec<OverlayRecord>,
}

impl Snapshot {
    /// Deep-copy the editable state of `surface`.
    pub fn capture(surface: &Surface) -> Self {
        Self {
            image: surface.image.clone(),
            overlays: surface.overlays().map(OverlayRecord::from).collect(),
        }
    }

    /// Build a fresh surface from this snapshot.
    ///
    /// The restored overlays have no handlers bound; callers must rebind them
    /// through the selection tracker.
    pub fn restore(&self) -> Surface {
        let mut surface = Surface::new();
        surface.image = self.image.clone();
        for record in &self.overlays {
            surface.add_overlay(Overlay::restore(
                record.id,
                record.position,
                record.content.clone(),
                record.style.clone(),
                record.min_width,
                record.padding,
            ));
        }
        surface
    }

    pub fn record(&self, id: OverlayId) -> Option<&OverlayRecord> {
        self.overlays.iter().find(|r| r.id == id)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to an opaque blob.
    pub fn to_blob(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_blob(blob: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(blob)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayFactory;

    fn surface_with_text(text: &str) -> (Surface, OverlayId) {
        let mut surface = Surface::new();
        let mut overlay =
            OverlayFactory::default().create(&StyleProfile::default(), Point::new(12.0, 34.0));
        overlay.content = text.to_string();
        let id = overlay.id();
        surface.add_overlay(overlay);
        (surface, id)
    }

    #[test]
    fn test_capture_excludes_transient_state() {
        let (mut surface, id) = surface_with_text("hello");
        let overlay = surface.overlay_mut(id).unwrap();
        overlay.border = crate::overlay::Border::Selected;
        overlay.opacity = 0.5;

        let restored = Snapshot::capture(&surface).restore();
        let overlay = restored.overlay(id).unwrap();
        assert!(!overlay.is_highlighted());
        assert!((overlay.opacity() - 1.0).abs() < f64::EPSILON);
        assert!(!overlay.is_interactive());
        assert_eq!(overlay.content, "hello");
        assert_eq!(overlay.position, Point::new(12.0, 34.0));
    }

    #[test]
    fn test_snapshot_is_detached_from_live_surface() {
        let (mut surface, id) = surface_with_text("before");
        let snapshot = Snapshot::capture(&surface);

        surface.overlay_mut(id).unwrap().content = "after".to_string();
        surface.overlay_mut(id).unwrap().position = Point::new(99.0, 99.0);

        let record = snapshot.record(id).unwrap();
        assert_eq!(record.content, "before");
        assert_eq!(record.position, Point::new(12.0, 34.0));
    }

    #[test]
    fn test_blob_roundtrip_preserves_order() {
        let (mut surface, first) = surface_with_text("one");
        let second = OverlayFactory::default().create(&StyleProfile::default(), Point::ZERO);
        let second_id = second.id();
        surface.add_overlay(second);

        let snapshot = Snapshot::capture(&surface);
        let back = Snapshot::from_blob(&snapshot.to_blob().unwrap()).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.restore().ids(), &[first, second_id]);
    }

    #[test]
    fn test_from_blob_rejects_garbage() {
        assert!(Snapshot::from_blob(b"not json").is_err());
    }
}
