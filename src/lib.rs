//! Resume pager: a paged resume editor core
//!
//! This crate provides the engine behind a live, print-accurate resume preview:
//! - A typed resume document edited through serializable commands
//! - A content flattener turning the document into header and section blocks
//! - A greedy flow engine packing blocks into fixed-size pages, asking a
//!   measurement oracle whether each page still fits
//! - Preview scaling, page markup and debounced persistence

pub mod config;
pub mod content;
pub mod document;
pub mod editing;
pub mod error;
pub mod layout;
pub mod render;
pub mod storage;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmResumeEditor;

// Re-export primary types
pub use config::{AutosaveConfig, EditorConfig, PreviewConfig};
pub use content::{flatten, HeaderBlock, ItemBlock, RenderBlock, SectionBlock};
pub use document::{Direction, Document, ItemField, SectionKind};
pub use editing::{Affected, ContactField, EditOp, EditResult};
pub use error::{Error, Result};
pub use layout::{
    compute_scale, paginate, stack_gap, Fragment, LayoutConstraints, LayoutState,
    MeasurementOracle, MetricOracle, Page, Pagination, SectionShell,
};
pub use render::{describe, PreviewSnapshot, PreviewState};
pub use storage::{KeyValueStore, MemoryStore, EXPORT_FILE_NAME, STORAGE_KEY};

use layout::compute_scale_with;
use log::{debug, info, warn};
use serde::Serialize;
use storage::{load_document, save_document, Autosave};

/// Confirmation text shown before a reset
pub const RESET_PROMPT: &str =
    "This will erase all your resume data on this browser. Continue?";

/// Preview coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// The editing session: document, layout, preview and persistence
///
/// Every change re-runs the whole pipeline synchronously, so the page set
/// always reflects the latest document.
pub struct Editor<S: KeyValueStore = MemoryStore> {
    document: Document,
    layout: LayoutState,
    store: S,
    config: EditorConfig,
    autosave: Autosave,
    preview: PreviewState,
    revision: u64,
}

impl<S: KeyValueStore> Editor<S> {
    /// Open the saved document, measured by the reference oracle
    pub fn open(store: S, config: EditorConfig) -> Self {
        let oracle = MetricOracle::with_styles(config.layout, config.styles.clone());
        Self::open_with_oracle(store, config, Box::new(oracle))
    }

    /// Open the saved document, measured by a host oracle
    pub fn open_with_oracle(
        store: S,
        config: EditorConfig,
        oracle: Box<dyn MeasurementOracle>,
    ) -> Self {
        let document = load_document(&store, &config.autosave.storage_key);
        let mut editor = Self {
            document,
            layout: LayoutState::with_oracle(config.layout, oracle),
            store,
            autosave: Autosave::new(config.autosave.window_ms),
            preview: PreviewState::default(),
            config,
            revision: 0,
        };
        editor.refresh();
        editor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Number of document changes so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a command, stamped with the current time
    pub fn apply(&mut self, op: EditOp) -> Result<EditResult> {
        self.apply_at(op, current_timestamp())
    }

    /// Apply a command at `now` (ms): mutate, re-lay out, schedule autosave
    ///
    /// An invalid command leaves everything untouched.
    pub fn apply_at(&mut self, op: EditOp, now: u64) -> Result<EditResult> {
        let result = self.document.apply_edit(op)?;
        if result.has_changes() {
            self.revision += 1;
            self.refresh();
            self.autosave.schedule(now);
        }
        Ok(result)
    }

    /// Recompute pages and scale, keeping the preview scroll position
    fn refresh(&mut self) {
        let scroll_top = self.preview.scroll_top;
        let pagination = self.layout.relayout(&self.document);
        debug!(
            "revision {}: {}{}",
            self.revision,
            pagination.label(),
            match pagination.overflow_count() {
                0 => String::new(),
                n => format!(", {n} overflowing"),
            }
        );
        self.update_scale();
        self.preview.scroll_top = scroll_top;
    }

    fn update_scale(&mut self) {
        self.preview.scale = compute_scale_with(
            self.config.layout.page_width,
            self.preview.available_width,
            &self.config.preview,
        );
    }

    /// Host viewing area resized; returns the new scale
    pub fn set_available_width(&mut self, width: f32) -> f32 {
        self.preview.available_width = width;
        self.update_scale();
        self.preview.scale
    }

    pub fn scale(&self) -> f32 {
        self.preview.scale
    }

    /// Spacing between stacked page previews at the current scale
    pub fn stack_gap(&self) -> f32 {
        stack_gap(self.preview.scale)
    }

    pub fn scroll_top(&self) -> f32 {
        self.preview.scroll_top
    }

    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.preview.scroll_top = scroll_top.max(0.0);
    }

    pub fn pagination(&self) -> &Pagination {
        self.layout.pagination()
    }

    /// Get total page count
    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    /// Status line text, e.g. "2 pages"
    pub fn page_label(&self) -> String {
        describe(self.page_count())
    }

    /// Re-ask the oracle which pages overflow (diagnostics)
    pub fn overflowing_pages(&mut self) -> Vec<usize> {
        self.layout.overflowing_pages()
    }

    /// Build the preview snapshot
    pub fn preview(&self) -> PreviewSnapshot {
        PreviewSnapshot::build(
            self.layout.pagination(),
            &self.config.layout,
            &self.preview,
            self.revision,
        )
    }

    /// Check if an edit is waiting to be saved
    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Save if the debounce window has passed; returns whether a save ran
    pub fn tick(&mut self, now: u64) -> bool {
        if !self.autosave.take_due(now) {
            return false;
        }
        match self.persist() {
            Ok(()) => true,
            Err(err) => {
                warn!("autosave failed: {err}");
                false
            }
        }
    }

    /// Save immediately
    pub fn save_now(&mut self) -> Result<()> {
        self.autosave.cancel();
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        save_document(
            &mut self.store,
            &self.config.autosave.storage_key,
            &self.document,
        )
    }

    /// Replace the document with an imported snapshot
    ///
    /// All or nothing: a malformed payload leaves the document, the pages and
    /// the store untouched.
    pub fn import_json(&mut self, text: &str) -> Result<()> {
        let document = Document::from_json(text)?;
        info!("imported resume ({} bytes)", text.len());
        self.replace_document(document);
        Ok(())
    }

    /// Pretty-printed snapshot for download as [`EXPORT_FILE_NAME`]
    pub fn export_json(&self) -> Result<String> {
        self.document.to_json_pretty()
    }

    /// Erase the document once `confirm` accepts [`RESET_PROMPT`]
    pub fn reset<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(RESET_PROMPT) {
            debug!("reset declined");
            return false;
        }
        info!("resetting resume");
        self.replace_document(Document::new());
        true
    }

    fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.revision += 1;
        self.autosave.cancel();
        if let Err(err) = self.persist() {
            warn!("could not save replaced resume: {err}");
        }
        self.refresh();
    }

    /// Markup of the current page set for printing; scrolls the preview to the top
    pub fn print_snapshot(&mut self) -> String {
        self.preview.scroll_top = 0.0;
        render::pages_html(self.layout.pagination(), &self.config.layout)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl Editor<MemoryStore> {
    /// Editor over an empty in-memory store with default settings
    pub fn in_memory() -> Self {
        Self::open(MemoryStore::new(), EditorConfig::default())
    }
}

/// Milliseconds since the Unix epoch
pub fn current_timestamp() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_editor() {
        let editor = Editor::in_memory();
        assert_eq!(editor.document(), &Document::new());
        assert_eq!(editor.page_count(), 1);
        assert_eq!(editor.page_label(), "1 page");
        assert_eq!(editor.scale(), 1.0);
    }

    #[test]
    fn test_apply_schedules_save() {
        let mut editor = Editor::in_memory();
        editor
            .apply_at(EditOp::set_contact(ContactField::FullName, "Ada"), 100)
            .unwrap();
        assert_eq!(editor.revision(), 1);
        assert!(editor.has_pending_save());
        assert!(!editor.tick(599));
        assert!(editor.tick(600));
        assert_eq!(editor.store().writes(), 1);
    }

    #[test]
    fn test_noop_command() {
        let mut editor = Editor::in_memory();
        editor.apply_at(EditOp::add_item(SectionKind::Awards), 0).unwrap();
        let result = editor
            .apply_at(EditOp::move_item(SectionKind::Awards, 0, Direction::Up), 10)
            .unwrap();
        assert!(!result.has_changes());
        assert_eq!(editor.revision(), 1);
    }

    #[test]
    fn test_scroll_survives_relayout() {
        let mut editor = Editor::in_memory();
        editor.set_scroll_top(320.0);
        editor.apply_at(EditOp::add_item(SectionKind::Projects), 0).unwrap();
        assert_eq!(editor.scroll_top(), 320.0);

        editor.print_snapshot();
        assert_eq!(editor.scroll_top(), 0.0);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    }
}
