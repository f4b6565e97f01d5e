//! Overlaid Application
//!
//! Shells around the editor core: a `wasm-bindgen` surface for the browser
//! and a script replayer for the command line.

mod replay;
mod view;

pub use replay::{ReplayError, ReplayReport, load_config, parse_script, replay, replay_file};
pub use view::{OverlayView, SurfaceView};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebEditor;
