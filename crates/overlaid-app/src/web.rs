//! WebAssembly bindings for the browser UI.
//!
//! The page owns the DOM: it forwards button, picker and pointer events here
//! as intents, and re-renders from `surface()` whenever `takeEvents()`
//! reports a commit or a replaced surface.

use crate::view::SurfaceView;
use kurbo::Point;
use overlaid_core::{Editor, EditorConfig, Intent, OverlayId, read_image};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};

/// Set up panic reporting and logging once the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Another module already installed a logger.
        return;
    }
    log::info!("Starting Overlaid (WASM)");
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_id(id: &str) -> Result<OverlayId, JsValue> {
    id.parse::<OverlayId>()
        .map_err(|e| to_js_error(format!("bad overlay id {id:?}: {e}")))
}

/// Browser handle to an [`Editor`].
///
/// The editor sits behind `Rc<RefCell<_>>` so an image upload can install
/// its result when the file read resolves. Everything runs on the page's
/// single event loop, so borrows never overlap.
#[wasm_bindgen]
pub struct WebEditor {
    inner: Rc<RefCell<Editor>>,
}

#[wasm_bindgen]
impl WebEditor {
    /// `config` is an optional plain object with any `EditorConfig` keys.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WebEditor, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            let config: EditorConfig = serde_wasm_bindgen::from_value(config)?;
            config.validate().map_err(to_js_error)?;
            config
        };
        Ok(WebEditor {
            inner: Rc::new(RefCell::new(Editor::with_config(config))),
        })
    }

    /// Returns the new overlay's id.
    #[wasm_bindgen(js_name = addText)]
    pub fn add_text(&self) -> String {
        self.inner.borrow_mut().add_text().to_string()
    }

    #[wasm_bindgen(js_name = setFont)]
    pub fn set_font(&self, family: &str) -> bool {
        self.inner.borrow_mut().set_font(family)
    }

    #[wasm_bindgen(js_name = setFontSize)]
    pub fn set_font_size(&self, px: f64) -> bool {
        self.inner.borrow_mut().set_font_size(px)
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&self, hex: &str) -> bool {
        self.inner.borrow_mut().set_color(hex)
    }

    #[wasm_bindgen(js_name = toggleBold)]
    pub fn toggle_bold(&self) -> bool {
        self.inner.borrow_mut().toggle_bold()
    }

    #[wasm_bindgen(js_name = toggleItalic)]
    pub fn toggle_italic(&self) -> bool {
        self.inner.borrow_mut().toggle_italic()
    }

    #[wasm_bindgen(js_name = toggleUnderline)]
    pub fn toggle_underline(&self) -> bool {
        self.inner.borrow_mut().toggle_underline()
    }

    /// Read `file`, install it as the base image and commit.
    ///
    /// Resolves to the image's data URI; rejects if the file cannot be read
    /// or is not an image, in which case nothing is committed.
    #[wasm_bindgen(js_name = uploadImage)]
    pub fn upload_image(&self, file: web_sys::Blob) -> js_sys::Promise {
        let editor = Rc::clone(&self.inner);
        future_to_promise(async move {
            let bytes = async move {
                JsFuture::from(file.array_buffer())
                    .await
                    .map(|buffer| js_sys::Uint8Array::new(&buffer).to_vec())
                    .map_err(|e| format!("{e:?}"))
            };
            let image = read_image(bytes).await.map_err(|e| {
                log::warn!("image upload failed: {e}");
                to_js_error(e)
            })?;
            let uri = image.data_uri();
            editor.borrow_mut().load_image(image);
            Ok(JsValue::from_str(&uri))
        })
    }

    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&self, overlay: &str) -> Result<bool, JsValue> {
        let id = parse_id(overlay)?;
        Ok(self.inner.borrow_mut().drag_start(id))
    }

    /// `x`/`y` are page coordinates of the pointer.
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&self, overlay: &str, x: f64, y: f64) -> Result<bool, JsValue> {
        let id = parse_id(overlay)?;
        Ok(self
            .inner
            .borrow_mut()
            .drag_end(id, Point::new(x, y)))
    }

    #[wasm_bindgen(js_name = selectOverlay)]
    pub fn select_overlay(&self, overlay: &str) -> Result<bool, JsValue> {
        let id = parse_id(overlay)?;
        Ok(self.inner.borrow_mut().select_overlay(id))
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&self) -> bool {
        self.inner.borrow_mut().delete_selected()
    }

    #[wasm_bindgen(js_name = clickOutside)]
    pub fn click_outside(&self) -> bool {
        self.inner.borrow_mut().click_outside()
    }

    /// Click at surface coordinates (canvas-style hit testing).
    #[wasm_bindgen(js_name = clickAt)]
    pub fn click_at(&self, x: f64, y: f64) -> bool {
        self.inner.borrow_mut().click_at(Point::new(x, y))
    }

    #[wasm_bindgen(js_name = editText)]
    pub fn edit_text(&self, overlay: &str, content: String) -> Result<bool, JsValue> {
        let id = parse_id(overlay)?;
        Ok(self.inner.borrow_mut().edit_text(id, content))
    }

    /// Report the surface element's page offset.
    #[wasm_bindgen(js_name = setSurfaceOrigin)]
    pub fn set_surface_origin(&self, x: f64, y: f64) -> bool {
        self.inner.borrow_mut().set_surface_origin(x, y)
    }

    pub fn undo(&self) -> bool {
        self.inner.borrow_mut().undo()
    }

    pub fn redo(&self) -> bool {
        self.inner.borrow_mut().redo()
    }

    /// Route a serialized intent, e.g. `{ intent: "toggle_bold" }`.
    pub fn dispatch(&self, intent: JsValue) -> Result<bool, JsValue> {
        let intent: Intent = serde_wasm_bindgen::from_value(intent)?;
        Ok(self.inner.borrow_mut().dispatch(intent))
    }

    /// `{ undo_available, redo_available, delete_affordance_visible }`.
    pub fn signals(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.borrow().signals())?)
    }

    /// Everything needed to render: base image URI and overlays in paint
    /// order, with their CSS values and transient highlight/opacity.
    pub fn surface(&self) -> Result<JsValue, JsValue> {
        let view = SurfaceView::of(self.inner.borrow().surface());
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }

    /// The live surface as snapshot JSON.
    #[wasm_bindgen(js_name = exportSurface)]
    pub fn export_surface(&self) -> Result<String, JsValue> {
        self.inner
            .borrow()
            .export_surface()
            .to_json()
            .map_err(to_js_error)
    }

    /// Id of the selected overlay, if any.
    pub fn selected(&self) -> Option<String> {
        self.inner.borrow().selected().map(|id| id.to_string())
    }

    /// Drain queued editor events.
    #[wasm_bindgen(js_name = takeEvents)]
    pub fn take_events(&self) -> Result<JsValue, JsValue> {
        let events = self.inner.borrow_mut().take_events();
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }
}
