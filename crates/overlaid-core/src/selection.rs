//! Single-overlay selection tracking.

use crate::overlay::{Border, OverlayId};
use crate::surface::Surface;

/// Tracks the one active overlay, if any.
///
/// Selection is held as an [`OverlayId`] rather than a reference, so it can
/// never dangle when the surface is replaced. The highlight lives on the
/// overlay itself and is kept in step with the tracked id.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: Option<OverlayId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<OverlayId> {
        self.selected
    }

    pub fn is_selected(&self, id: OverlayId) -> bool {
        self.selected == Some(id)
    }

    /// The delete button is shown exactly when something is selected.
    pub fn delete_affordance_visible(&self) -> bool {
        self.selected.is_some()
    }

    /// Select `id`, un-highlighting the previous selection first.
    ///
    /// Returns false (and leaves the selection alone) when `id` is not an
    /// interactive overlay on `surface`.
    pub fn select(&mut self, surface: &mut Surface, id: OverlayId) -> bool {
        if !surface.overlay(id).is_some_and(|o| o.is_interactive()) {
            log::debug!("select ignored: {id} is not an interactive overlay");
            return false;
        }

        self.clear_highlight(surface);
        if let Some(overlay) = surface.overlay_mut(id) {
            overlay.border = Border::Selected;
        }
        self.selected = Some(id);
        true
    }

    /// Clear the selection. Returns whether anything was selected.
    pub fn deselect(&mut self, surface: &mut Surface) -> bool {
        let had_selection = self.selected.is_some();
        self.clear_highlight(surface);
        self.selected = None;
        had_selection
    }

    /// Drop the selection without touching the surface, e.g. because the
    /// selected overlay has just been removed.
    pub(crate) fn forget(&mut self) {
        self.selected = None;
    }

    /// Re-attach handlers after the surface was replaced by a restore.
    ///
    /// Overlay identities on a restored surface are new objects, so the
    /// selection is invalidated and every overlay is made interactive again.
    pub fn rebind(&mut self, surface: &mut Surface) {
        self.selected = None;
        for overlay in surface.overlays_mut() {
            overlay.border = Border::Unselected;
            overlay.interactive = true;
        }
    }

    fn clear_highlight(&self, surface: &mut Surface) {
        if let Some(overlay) = self.selected.and_then(|id| surface.overlay_mut(id)) {
            overlay.border = Border::Unselected;
        }
    }
}
