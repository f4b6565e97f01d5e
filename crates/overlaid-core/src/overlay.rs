//! Text overlays and the factory that creates them.

use crate::style::StyleProfile;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable overlay identifier, preserved across snapshot restores.
pub type OverlayId = Uuid;

/// Border drawn around an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Border {
    /// Thin dashed outline.
    #[default]
    Unselected,
    /// Highlighted outline of the active overlay.
    Selected,
}

impl Border {
    /// CSS `border` value.
    pub fn css(&self) -> &'static str {
        match self {
            Border::Unselected => "1px dashed #ccc",
            Border::Selected => "2px solid #007bff",
        }
    }
}

/// A draggable, editable text box placed on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub(crate) id: OverlayId,
    /// Top-left corner relative to the surface origin.
    pub position: Point,
    /// The text content.
    pub content: String,
    pub style: StyleProfile,
    /// Minimum box width in pixels.
    pub min_width: f64,
    /// Inner padding in pixels.
    pub padding: f64,
    /// Drag feedback only. Never captured in history.
    pub(crate) opacity: f64,
    /// Selection highlight. Never captured in history.
    pub(crate) border: Border,
    /// Whether drag/click handlers are bound to this overlay.
    pub(crate) interactive: bool,
}

impl Overlay {
    /// Rebuild an overlay from persisted attributes.
    ///
    /// Restored overlays start without handlers; the selection tracker binds
    /// them again.
    pub(crate) fn restore(
        id: OverlayId,
        position: Point,
        content: String,
        style: StyleProfile,
        min_width: f64,
        padding: f64,
    ) -> Self {
        Self {
            id,
            position,
            content,
            style,
            min_width,
            padding,
            opacity: 1.0,
            border: Border::Unselected,
            interactive: false,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn border(&self) -> Border {
        self.border
    }

    pub fn is_highlighted(&self) -> bool {
        self.border == Border::Selected
    }

    /// Whether the overlay currently accepts drag and click intents.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Approximate bounding box.
    ///
    /// The real extent depends on font metrics known only to the renderer;
    /// this estimate is good enough for hit testing clicks.
    pub fn bounds(&self) -> Rect {
        let max_line_len = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let char_width = if self.style.bold { 0.6 } else { 0.55 };
        let text_width = max_line_len as f64 * self.style.font_size * char_width;

        let mut line_count = self.content.lines().count().max(1);
        if self.content.ends_with('\n') {
            line_count += 1;
        }
        let text_height = line_count as f64 * self.style.font_size * 1.2;

        let width = (text_width + self.padding * 2.0).max(self.min_width);
        let height = text_height + self.padding * 2.0;
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Replace the overlay's style with `profile`.
    pub fn apply_style(&mut self, profile: &StyleProfile) {
        self.style = profile.clone();
    }
}

/// Builds new overlays pre-populated with a style profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFactory {
    pub min_width: f64,
    pub padding: f64,
}

impl Default for OverlayFactory {
    fn default() -> Self {
        Self {
            min_width: Self::DEFAULT_MIN_WIDTH,
            padding: Self::DEFAULT_PADDING,
        }
    }
}

impl OverlayFactory {
    pub const DEFAULT_MIN_WIDTH: f64 = 50.0;
    pub const DEFAULT_PADDING: f64 = 5.0;

    pub fn new(min_width: f64, padding: f64) -> Self {
        Self { min_width, padding }
    }

    /// Create an empty, interactive overlay at `position`.
    ///
    /// The caller inserts it into the surface and commits.
    pub fn create(&self, style: &StyleProfile, position: Point) -> Overlay {
        Overlay {
            id: Uuid::new_v4(),
            position,
            content: String::new(),
            style: style.clone(),
            min_width: self.min_width,
            padding: self.padding,
            opacity: 1.0,
            border: Border::Unselected,
            interactive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_create_uses_profile() {
        let style = StyleProfile::default()
            .with_font_family("Georgia")
            .with_font_size(32.0)
            .with_color(Color::new(255, 0, 0, 255))
            .toggled_bold();
        let overlay = OverlayFactory::default().create(&style, Point::new(10.0, 20.0));

        assert_eq!(overlay.style, style);
        assert_eq!(overlay.position, Point::new(10.0, 20.0));
        assert!(overlay.content.is_empty());
        assert!(overlay.is_interactive());
        assert!(!overlay.is_highlighted());
        assert!((overlay.opacity() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ids_are_unique() {
        let factory = OverlayFactory::default();
        let style = StyleProfile::default();
        let a = factory.create(&style, Point::ZERO);
        let b = factory.create(&style, Point::ZERO);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_empty_overlay_has_min_width() {
        let overlay = OverlayFactory::default().create(&StyleProfile::default(), Point::ZERO);
        let bounds = overlay.bounds();
        assert!((bounds.width() - OverlayFactory::DEFAULT_MIN_WIDTH).abs() < f64::EPSILON);
        assert!(bounds.height() > 0.0);
    }

    #[test]
    fn test_hit_test() {
        let mut overlay =
            OverlayFactory::default().create(&StyleProfile::default(), Point::new(100.0, 100.0));
        overlay.content = "Hello World".to_string();
        let bounds = overlay.bounds();
        assert!(overlay.hit_test(bounds.center()));
        assert!(!overlay.hit_test(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_restored_overlay_is_not_interactive() {
        let overlay = Overlay::restore(
            Uuid::new_v4(),
            Point::ZERO,
            "hi".to_string(),
            StyleProfile::default(),
            50.0,
            5.0,
        );
        assert!(!overlay.is_interactive());
        assert_eq!(overlay.border(), Border::Unselected);
    }

    #[test]
    fn test_border_css() {
        assert_eq!(Border::Unselected.css(), "1px dashed #ccc");
        assert_eq!(Border::Selected.css(), "2px solid #007bff");
    }
}
