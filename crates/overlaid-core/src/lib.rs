//! Overlaid Core Library
//!
//! Platform-agnostic state for the Overlaid editor: styled text overlays on a
//! base image, with snapshot-based undo/redo.

pub mod config;
pub mod drag;
pub mod editor;
pub mod history;
pub mod image;
pub mod overlay;
pub mod selection;
pub mod snapshot;
pub mod style;
pub mod surface;

pub use config::{ConfigError, EditorConfig};
pub use drag::{DragController, DragState};
pub use editor::{Editor, EditorEvent, Intent, OverlayRef, Signals};
pub use history::History;
pub use image::{BaseImage, ImageError, ImageFormat, read_image};
pub use overlay::{Border, Overlay, OverlayFactory, OverlayId};
pub use selection::SelectionTracker;
pub use snapshot::{OverlayRecord, Snapshot, SnapshotError};
pub use style::{Color, ColorError, StyleProfile};
pub use surface::Surface;
