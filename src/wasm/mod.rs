//! WASM bindings for the editor

use crate::layout::{LayoutConstraints, MeasurementOracle, MetricOracle, Page};
use crate::render::page_html;
use crate::storage::KeyValueStore;
use crate::{current_timestamp, EditOp, Editor, EditorConfig, Error, EXPORT_FILE_NAME, RESET_PROMPT};
use js_sys::Function;
use log::warn;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Host storage reached through `get(key) -> string | null` and
/// `set(key, value)` callbacks, e.g. wrappers over `localStorage`
pub struct JsStore {
    get: Function,
    set: Function,
}

impl KeyValueStore for JsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.get
            .call1(&JsValue::NULL, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_string())
    }

    fn set(&mut self, key: &str, value: &str) -> crate::Result<()> {
        self.set
            .call2(&JsValue::NULL, &JsValue::from_str(key), &JsValue::from_str(value))
            .map(|_| ())
            .map_err(|err| Error::Storage(format!("{err:?}")))
    }
}

/// Oracle backed by the real DOM: `measure(pageHtml) -> boolean`
///
/// The host renders the markup off-screen at native size and reports whether
/// its content height is within the page. A failing callback counts as a fit
/// so the pass still makes progress.
pub struct JsOracle {
    measure: Function,
    constraints: LayoutConstraints,
}

impl MeasurementOracle for JsOracle {
    fn fits(&mut self, page: &Page) -> bool {
        let html = page_html(page, &self.constraints);
        match self.measure.call1(&JsValue::NULL, &JsValue::from_str(&html)) {
            Ok(value) => value.as_bool().unwrap_or(true),
            Err(err) => {
                warn!("measure callback failed: {err:?}");
                true
            }
        }
    }
}

/// WASM-exposed editor wrapper
#[wasm_bindgen]
pub struct WasmResumeEditor {
    editor: Editor<JsStore>,
}

#[wasm_bindgen]
impl WasmResumeEditor {
    /// Open the saved resume
    ///
    /// Without `measure` the built-in metric oracle is used. `config_json` may
    /// override any part of the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(
        storage_get: Function,
        storage_set: Function,
        measure: Option<Function>,
        config_json: Option<String>,
    ) -> Result<WasmResumeEditor, JsValue> {
        let config = match config_json {
            Some(text) => EditorConfig::from_json_str(&text)?,
            None => EditorConfig::default(),
        };
        let store = JsStore {
            get: storage_get,
            set: storage_set,
        };
        let oracle: Box<dyn MeasurementOracle> = match measure {
            Some(measure) => Box::new(JsOracle {
                measure,
                constraints: config.layout,
            }),
            None => Box::new(MetricOracle::with_styles(config.layout, config.styles.clone())),
        };

        Ok(Self {
            editor: Editor::open_with_oracle(store, config, oracle),
        })
    }

    /// Apply a JSON command; returns true when the form must be rebuilt
    pub fn apply(&mut self, op_json: &str) -> Result<bool, JsValue> {
        let op = EditOp::from_json(op_json)?;
        let result = self.editor.apply_at(op, current_timestamp())?;
        Ok(result.structural)
    }

    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, text: &str) -> Result<(), JsValue> {
        Ok(self.editor.import_json(text)?)
    }

    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<String, JsValue> {
        Ok(self.editor.export_json()?)
    }

    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name() -> String {
        EXPORT_FILE_NAME.to_string()
    }

    /// Compact document snapshot for binding the form
    #[wasm_bindgen(js_name = documentJson)]
    pub fn document_json(&self) -> Result<String, JsValue> {
        Ok(self.editor.document().to_json()?)
    }

    #[wasm_bindgen(js_name = resetPrompt)]
    pub fn reset_prompt() -> String {
        RESET_PROMPT.to_string()
    }

    /// Reset after the host asked the user with `resetPrompt()`
    pub fn reset(&mut self, confirmed: bool) -> bool {
        self.editor.reset(|_| confirmed)
    }

    /// Drive the autosave debounce; returns true when a save ran
    pub fn tick(&mut self, now: f64) -> bool {
        self.editor.tick(now as u64)
    }

    #[wasm_bindgen(js_name = saveNow)]
    pub fn save_now(&mut self) -> Result<(), JsValue> {
        Ok(self.editor.save_now()?)
    }

    #[wasm_bindgen(js_name = setAvailableWidth)]
    pub fn set_available_width(&mut self, width: f32) -> f32 {
        self.editor.set_available_width(width)
    }

    #[wasm_bindgen(js_name = setScrollTop)]
    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.editor.set_scroll_top(scroll_top);
    }

    #[wasm_bindgen(js_name = scrollTop)]
    pub fn scroll_top(&self) -> f32 {
        self.editor.scroll_top()
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.editor.page_count()
    }

    #[wasm_bindgen(js_name = pageLabel)]
    pub fn page_label(&self) -> String {
        self.editor.page_label()
    }

    pub fn scale(&self) -> f32 {
        self.editor.scale()
    }

    #[wasm_bindgen(js_name = stackGap)]
    pub fn stack_gap(&self) -> f32 {
        self.editor.stack_gap()
    }

    pub fn revision(&self) -> f64 {
        self.editor.revision() as f64
    }

    /// Pages, scale and label for drawing the preview
    #[wasm_bindgen(js_name = previewJson)]
    pub fn preview_json(&self) -> Result<String, JsValue> {
        Ok(self.editor.preview().to_json()?)
    }

    /// Page markup for printing
    #[wasm_bindgen(js_name = printHtml)]
    pub fn print_html(&mut self) -> String {
        self.editor.print_snapshot()
    }
}
