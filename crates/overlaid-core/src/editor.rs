//! The editor facade: turns UI intents into surface mutations and history
//! commits.
//!
//! Every mutating intent first changes the live surface and then commits the
//! resulting state. Intents that change nothing on the surface (a style tweak
//! with no selection, a delete with nothing selected) never commit.

use crate::config::EditorConfig;
use crate::drag::DragController;
use crate::history::History;
use crate::image::BaseImage;
use crate::overlay::{OverlayFactory, OverlayId};
use crate::selection::SelectionTracker;
use crate::snapshot::Snapshot;
use crate::style::{Color, StyleProfile};
use crate::surface::Surface;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Affordance state the UI layer mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signals {
    pub undo_available: bool,
    pub redo_available: bool,
    pub delete_affordance_visible: bool,
}

/// Notifications queued for the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Emitted on every history transition and whenever a signal flips.
    SignalsChanged(Signals),
    /// A snapshot was restored; the renderer must rebuild every overlay.
    SurfaceReplaced,
    /// A new history entry was recorded.
    Committed { undo_depth: usize },
}

/// How an intent names an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverlayRef {
    Id(OverlayId),
    /// Position in paint order (0 = backmost). Handy in scripts, where ids
    /// are not known in advance.
    Index(usize),
}

impl From<OverlayId> for OverlayRef {
    fn from(id: OverlayId) -> Self {
        OverlayRef::Id(id)
    }
}

/// Everything the UI can ask the editor to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    AddText,
    SetFont { family: String },
    SetFontSize { px: f64 },
    SetColor { hex: String },
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    /// A finished image upload, as a data URI.
    LoadImage { data_uri: String },
    DragStart { overlay: OverlayRef },
    DragEnd { overlay: OverlayRef, x: f64, y: f64 },
    SelectOverlay { overlay: OverlayRef },
    DeleteSelected,
    ClickOutside,
    /// Click at surface coordinates; selects what is under the pointer.
    ClickAt { x: f64, y: f64 },
    EditText { overlay: OverlayRef, content: String },
    SetSurfaceOrigin { x: f64, y: f64 },
    Undo,
    Redo,
}

/// Editor state: the live surface, its history, and the interaction
/// controllers around it.
#[derive(Debug, Clone)]
pub struct Editor {
    surface: Surface,
    history: History,
    selection: SelectionTracker,
    drag: DragController,
    factory: OverlayFactory,
    /// Style applied to new overlays and to the selection on change.
    style: StyleProfile,
    spawn_position: Point,
    events: Vec<EditorEvent>,
    signals: Signals,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with an empty surface and default settings.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let surface = Surface::new();
        Self {
            history: History::new(Snapshot::capture(&surface), config.history_limit),
            surface,
            selection: SelectionTracker::new(),
            drag: DragController::new(config.surface_origin, config.drag_opacity),
            factory: config.factory(),
            style: config.default_style,
            spawn_position: config.spawn_position,
            events: Vec::new(),
            signals: Signals::default(),
        }
    }

    // --- Queries ---

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn style(&self) -> &StyleProfile {
        &self.style
    }

    pub fn selected(&self) -> Option<OverlayId> {
        self.selection.selected()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn signals(&self) -> Signals {
        Signals {
            undo_available: self.history.can_undo(),
            redo_available: self.history.can_redo(),
            delete_affordance_visible: self.selection.delete_affordance_visible(),
        }
    }

    /// Capture of the live surface, for rendering or export.
    pub fn export_surface(&self) -> Snapshot {
        Snapshot::capture(&self.surface)
    }

    /// Take pending events (drains the queue).
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resolve an overlay reference against the live surface.
    pub fn resolve(&self, overlay: OverlayRef) -> Option<OverlayId> {
        match overlay {
            OverlayRef::Id(id) => self.surface.contains(id).then_some(id),
            OverlayRef::Index(index) => self.surface.ids().get(index).copied(),
        }
    }

    // --- Intents ---

    /// Route an intent. Returns whether it changed anything.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        log::debug!("dispatch {intent:?}");
        match intent {
            Intent::AddText => {
                self.add_text();
                true
            }
            Intent::SetFont { family } => self.set_font(&family),
            Intent::SetFontSize { px } => self.set_font_size(px),
            Intent::SetColor { hex } => self.set_color(&hex),
            Intent::ToggleBold => self.toggle_bold(),
            Intent::ToggleItalic => self.toggle_italic(),
            Intent::ToggleUnderline => self.toggle_underline(),
            Intent::LoadImage { data_uri } => match BaseImage::from_data_uri(&data_uri) {
                Ok(image) => {
                    self.load_image(image);
                    true
                }
                Err(e) => {
                    log::warn!("image not loaded: {e}");
                    false
                }
            },
            Intent::DragStart { overlay } => self
                .resolve_or_log(overlay)
                .is_some_and(|id| self.drag_start(id)),
            Intent::DragEnd { overlay, x, y } => self
                .resolve_or_log(overlay)
                .is_some_and(|id| self.drag_end(id, Point::new(x, y))),
            Intent::SelectOverlay { overlay } => self
                .resolve_or_log(overlay)
                .is_some_and(|id| self.select_overlay(id)),
            Intent::DeleteSelected => self.delete_selected(),
            Intent::ClickOutside => self.click_outside(),
            Intent::ClickAt { x, y } => self.click_at(Point::new(x, y)),
            Intent::EditText { overlay, content } => self
                .resolve_or_log(overlay)
                .is_some_and(|id| self.edit_text(id, content)),
            Intent::SetSurfaceOrigin { x, y } => self.set_surface_origin(x, y),
            Intent::Undo => self.undo(),
            Intent::Redo => self.redo(),
        }
    }

    /// Place a new empty overlay using the active style and commit.
    pub fn add_text(&mut self) -> OverlayId {
        let overlay = self.factory.create(&self.style, self.spawn_position);
        let id = overlay.id();
        self.surface.add_overlay(overlay);
        self.commit();
        id
    }

    pub fn set_font(&mut self, family: &str) -> bool {
        let family = family.trim();
        if family.is_empty() {
            log::warn!("ignoring empty font family");
            return false;
        }
        self.update_style(self.style.clone().with_font_family(family))
    }

    pub fn set_font_size(&mut self, px: f64) -> bool {
        if !(px.is_finite() && px > 0.0) {
            log::warn!("ignoring invalid font size {px}");
            return false;
        }
        self.update_style(self.style.clone().with_font_size(px))
    }

    pub fn set_color(&mut self, hex: &str) -> bool {
        match Color::from_hex(hex) {
            Ok(color) => self.update_style(self.style.clone().with_color(color)),
            Err(e) => {
                log::warn!("ignoring color: {e}");
                false
            }
        }
    }

    pub fn toggle_bold(&mut self) -> bool {
        self.update_style(self.style.clone().toggled_bold())
    }

    pub fn toggle_italic(&mut self) -> bool {
        self.update_style(self.style.clone().toggled_italic())
    }

    pub fn toggle_underline(&mut self) -> bool {
        self.update_style(self.style.clone().toggled_underline())
    }

    /// Install a finished image load as the base image and commit.
    ///
    /// Loads are never cancelled: a load that completes after other edits is
    /// simply the next history entry.
    pub fn load_image(&mut self, image: BaseImage) {
        self.surface.image = Some(image);
        self.commit();
    }

    pub fn drag_start(&mut self, id: OverlayId) -> bool {
        self.drag.start(&mut self.surface, id)
    }

    /// Drop an overlay at a page-space pointer position and commit.
    pub fn drag_end(&mut self, id: OverlayId, pointer: Point) -> bool {
        let moved = self.drag.end(&mut self.surface, id, pointer);
        if moved {
            self.commit();
        }
        moved
    }

    pub fn select_overlay(&mut self, id: OverlayId) -> bool {
        let selected = self.selection.select(&mut self.surface, id);
        self.publish_signals(false);
        selected
    }

    /// Remove the selected overlay and commit. No-op without a selection.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection.selected() else {
            log::debug!("delete ignored: nothing selected");
            return false;
        };
        self.selection.forget();
        self.drag.forget(id);
        self.surface.remove_overlay(id);
        self.commit();
        true
    }

    /// A click on the bare surface or base image.
    pub fn click_outside(&mut self) -> bool {
        let deselected = self.selection.deselect(&mut self.surface);
        self.publish_signals(false);
        deselected
    }

    /// A click at surface coordinates.
    pub fn click_at(&mut self, point: Point) -> bool {
        match self.surface.overlay_at(point) {
            Some(id) => self.select_overlay(id),
            None => self.click_outside(),
        }
    }

    /// Commit text typed into an overlay.
    pub fn edit_text(&mut self, id: OverlayId, content: impl Into<String>) -> bool {
        let content = content.into();
        let Some(overlay) = self.surface.overlay_mut(id) else {
            log::debug!("edit ignored: {id} is not on the surface");
            return false;
        };
        if overlay.content == content {
            return false;
        }
        overlay.content = content;
        self.commit();
        true
    }

    /// Record the surface element's page offset. Non-finite offsets are ignored.
    pub fn set_surface_origin(&mut self, x: f64, y: f64) -> bool {
        self.drag.set_origin(Vec2::new(x, y))
    }

    /// Step back one action. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let live = Snapshot::capture(&self.surface);
        match self.history.undo(live) {
            Some(target) => {
                self.replace_surface(&target);
                true
            }
            None => {
                log::debug!("nothing to undo");
                false
            }
        }
    }

    /// Re-apply the last undone action. Returns false when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(target) => {
                self.replace_surface(&target);
                true
            }
            None => {
                log::debug!("nothing to redo");
                false
            }
        }
    }

    // --- Internals ---

    fn resolve_or_log(&self, overlay: OverlayRef) -> Option<OverlayId> {
        let id = self.resolve(overlay);
        if id.is_none() {
            log::debug!("no overlay matches {overlay:?}");
        }
        id
    }

    /// Make `style` the active profile and restyle the selection, if any.
    fn update_style(&mut self, style: StyleProfile) -> bool {
        self.style = style;

        let Some(id) = self.selection.selected() else {
            return false;
        };
        let Some(overlay) = self.surface.overlay_mut(id) else {
            return false;
        };
        if overlay.style == self.style {
            return false;
        }
        overlay.apply_style(&self.style);
        self.commit();
        true
    }

    fn replace_surface(&mut self, target: &Snapshot) {
        self.drag.reset();
        self.surface = target.restore();
        self.selection.rebind(&mut self.surface);
        self.events.push(EditorEvent::SurfaceReplaced);
        self.publish_signals(true);
    }

    fn commit(&mut self) {
        self.history.commit(Snapshot::capture(&self.surface));
        self.events.push(EditorEvent::Committed {
            undo_depth: self.history.undo_depth(),
        });
        self.publish_signals(true);
    }

    fn publish_signals(&mut self, force: bool) {
        let signals = self.signals();
        if force || signals != self.signals {
            self.signals = signals;
            self.events.push(EditorEvent::SignalsChanged(signals));
        }
    }
}
