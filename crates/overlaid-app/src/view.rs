//! Render-ready view of the live surface.

use overlaid_core::{Overlay, Surface};
use serde::Serialize;

/// One overlay, flattened to the values a DOM renderer applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub content: String,
    pub font_family: String,
    pub font_size: String,
    pub color: String,
    pub font_weight: &'static str,
    pub font_style: &'static str,
    pub text_decoration: &'static str,
    pub border: &'static str,
    pub opacity: f64,
    pub min_width: String,
    pub padding: String,
    pub selected: bool,
}

impl From<&Overlay> for OverlayView {
    fn from(overlay: &Overlay) -> Self {
        let style = &overlay.style;
        Self {
            id: overlay.id().to_string(),
            left: overlay.position.x,
            top: overlay.position.y,
            content: overlay.content.clone(),
            font_family: style.font_family.clone(),
            font_size: format!("{}px", style.font_size),
            color: style.color.to_hex(),
            font_weight: style.font_weight(),
            font_style: style.font_style(),
            text_decoration: style.text_decoration(),
            border: overlay.border().css(),
            opacity: overlay.opacity(),
            min_width: format!("{}px", overlay.min_width),
            padding: format!("{}px", overlay.padding),
            selected: overlay.is_highlighted(),
        }
    }
}

/// The whole surface in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceView {
    /// Data URI of the base image.
    pub image: Option<String>,
    pub overlays: Vec<OverlayView>,
}

impl SurfaceView {
    pub fn of(surface: &Surface) -> Self {
        Self {
            image: surface.image.as_ref().map(|image| image.data_uri()),
            overlays: surface.overlays().map(OverlayView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use overlaid_core::Editor;

    #[test]
    fn test_view_carries_css_and_transient_state() {
        let mut editor = Editor::new();
        editor.toggle_bold();
        editor.set_font_size(32.0);
        let id = editor.add_text();
        editor.select_overlay(id);
        editor.drag_start(id);

        let view = SurfaceView::of(editor.surface());
        assert!(view.image.is_none());
        let overlay = &view.overlays[0];
        assert_eq!(overlay.id, id.to_string());
        assert_eq!(overlay.font_size, "32px");
        assert_eq!(overlay.font_weight, "bold");
        assert_eq!(overlay.text_decoration, "none");
        assert_eq!(overlay.border, "2px solid #007bff");
        assert!(overlay.selected);
        assert!((overlay.opacity - 0.5).abs() < f64::EPSILON);
        assert_eq!(overlay.color, "#000000");

        editor.drag_end(id, Point::new(12.0, 8.0));
        let view = SurfaceView::of(editor.surface());
        assert_eq!((view.overlays[0].left, view.overlays[0].top), (12.0, 8.0));
        assert!((view.overlays[0].opacity - 1.0).abs() < f64::EPSILON);
    }
}
