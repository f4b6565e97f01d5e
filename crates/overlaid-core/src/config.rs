//! Editor configuration.

use crate::drag::DEFAULT_DRAG_OPACITY;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::overlay::OverlayFactory;
use crate::style::StyleProfile;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid editor config: {0}")]
    Invalid(String),
}

/// Tunables for an [`crate::Editor`]. Every field has a default, so a
/// config file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo depth; `None` keeps the whole session.
    pub history_limit: Option<usize>,
    /// Style profile active when the editor starts.
    pub default_style: StyleProfile,
    /// Where new text overlays are placed.
    pub spawn_position: Point,
    pub min_width: f64,
    pub padding: f64,
    /// Page offset of the surface's top-left corner.
    pub surface_origin: Vec2,
    /// Opacity of an overlay while it is dragged.
    pub drag_opacity: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            default_style: StyleProfile::default(),
            spawn_position: Point::ZERO,
            min_width: OverlayFactory::DEFAULT_MIN_WIDTH,
            padding: OverlayFactory::DEFAULT_PADDING,
            surface_origin: Vec2::ZERO,
            drag_opacity: DEFAULT_DRAG_OPACITY,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.default_style.font_size.is_finite() && self.default_style.font_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default font size must be positive, got {}",
                self.default_style.font_size
            )));
        }
        if !(0.0..=1.0).contains(&self.drag_opacity) {
            return Err(ConfigError::Invalid(format!(
                "drag opacity must be within 0..=1, got {}",
                self.drag_opacity
            )));
        }
        if !(self.surface_origin.is_finite() && self.spawn_position.is_finite()) {
            return Err(ConfigError::Invalid(
                "surface origin and spawn position must be finite".to_string(),
            ));
        }
        if self.min_width < 0.0 || self.padding < 0.0 {
            return Err(ConfigError::Invalid(
                "min width and padding must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn factory(&self) -> OverlayFactory {
        OverlayFactory::new(self.min_width, self.padding)
    }
}
