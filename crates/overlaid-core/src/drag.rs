//! Pointer drags that reposition overlays.

use crate::overlay::OverlayId;
use crate::surface::Surface;
use kurbo::{Point, Vec2};

/// Opacity applied to an overlay while it is being dragged.
pub const DEFAULT_DRAG_OPACITY: f64 = 0.5;

/// State of a drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// An overlay is being dragged.
    Dragging { overlay: OverlayId },
}

/// Converts drag gestures into overlay positions.
///
/// Only the end of a drag changes anything history cares about; the dimming
/// on drag start is feedback and is never committed.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    /// Page offset of the surface's top-left corner.
    origin: Vec2,
    drag_opacity: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(Vec2::ZERO, DEFAULT_DRAG_OPACITY)
    }
}

impl DragController {
    pub fn new(origin: Vec2, drag_opacity: f64) -> Self {
        Self {
            state: DragState::Idle,
            origin,
            drag_opacity,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Returns false, leaving the origin alone, unless both components are finite.
    pub fn set_origin(&mut self, origin: Vec2) -> bool {
        if !origin.is_finite() {
            log::warn!("surface origin ignored: {origin:?} is not finite");
            return false;
        }
        self.origin = origin;
        true
    }

    /// Pointer position (page coordinates) to surface coordinates.
    pub fn to_surface(&self, pointer: Point) -> Point {
        pointer - self.origin
    }

    /// Begin dragging `id`, dimming it.
    pub fn start(&mut self, surface: &mut Surface, id: OverlayId) -> bool {
        if !surface.overlay(id).is_some_and(|o| o.is_interactive()) {
            log::debug!("drag start ignored: {id} is not an interactive overlay");
            return false;
        }

        // A second drag start without an end; undo the first dimming.
        if let DragState::Dragging { overlay } = self.state {
            if overlay != id {
                if let Some(previous) = surface.overlay_mut(overlay) {
                    previous.opacity = 1.0;
                }
            }
        }

        if let Some(overlay) = surface.overlay_mut(id) {
            overlay.opacity = self.drag_opacity;
        }
        self.state = DragState::Dragging { overlay: id };
        true
    }

    /// Drop `id` at `pointer`.
    ///
    /// Returns true when the overlay was moved and history should commit.
    /// A non-finite pointer is rejected and leaves the drag in progress.
    pub fn end(&mut self, surface: &mut Surface, id: OverlayId, pointer: Point) -> bool {
        if !pointer.is_finite() {
            log::warn!("drag end ignored: pointer {pointer:?} is not finite");
            return false;
        }

        // Whatever was being dragged is dropped, even if it is not `id`.
        if let DragState::Dragging { overlay } = std::mem::take(&mut self.state) {
            if overlay != id {
                if let Some(previous) = surface.overlay_mut(overlay) {
                    previous.opacity = 1.0;
                }
            }
        }

        let position = self.to_surface(pointer);
        match surface.overlay_mut(id) {
            Some(overlay) if overlay.is_interactive() => {
                overlay.position = position;
                overlay.opacity = 1.0;
                true
            }
            _ => {
                log::debug!("drag end ignored: {id} is not an interactive overlay");
                false
            }
        }
    }

    /// Abandon any drag in progress without moving anything.
    pub fn cancel(&mut self, surface: &mut Surface) {
        if let DragState::Dragging { overlay } = std::mem::take(&mut self.state) {
            if let Some(overlay) = surface.overlay_mut(overlay) {
                overlay.opacity = 1.0;
            }
        }
    }

    /// Forget the drag if it targets `id`, which is going away.
    pub(crate) fn forget(&mut self, id: OverlayId) {
        if self.state == (DragState::Dragging { overlay: id }) {
            self.state = DragState::Idle;
        }
    }

    /// Forget any drag; used when the surface is replaced wholesale.
    pub(crate) fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}
