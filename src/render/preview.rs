//! Preview snapshot: the stacked, scaled page set handed to the host

use crate::layout::{stack_gap, LayoutConstraints, Pagination};
use crate::render::html::page_html;
use crate::render::status::describe;
use crate::Rect;
use serde::Serialize;

/// Preview surface state kept across passes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewState {
    /// Width the host has for the page stack
    pub available_width: f32,
    /// Uniform display scale
    pub scale: f32,
    /// Vertical scroll offset of the preview surface
    pub scroll_top: f32,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            available_width: f32::INFINITY,
            scale: 1.0,
            scroll_top: 0.0,
        }
    }
}

/// One page as shown in the preview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPage {
    pub index: usize,
    /// Position in the scaled stack
    pub bounds: Rect,
    pub forced: bool,
    pub overflows: bool,
    /// Unscaled page markup
    pub html: String,
}

/// Everything the host needs to draw the preview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSnapshot {
    pub revision: u64,
    pub label: String,
    pub page_count: usize,
    pub scale: f32,
    pub gap: f32,
    pub scroll_top: f32,
    pub pages: Vec<PreviewPage>,
}

impl PreviewSnapshot {
    /// Build a snapshot from the current page set
    pub fn build(
        pagination: &Pagination,
        constraints: &LayoutConstraints,
        state: &PreviewState,
        revision: u64,
    ) -> Self {
        let scale = state.scale;
        let gap = stack_gap(scale);
        let width = constraints.page_width * scale;
        let height = constraints.page_height * scale;

        let mut y = 0.0;
        let mut pages = Vec::with_capacity(pagination.page_count());
        for page in pagination.pages() {
            pages.push(PreviewPage {
                index: page.index,
                bounds: Rect::new(0.0, y, width, height),
                forced: page.forced,
                overflows: page.overflows,
                html: page_html(page, constraints),
            });
            y += height + gap;
        }

        Self {
            revision,
            label: describe(pagination.page_count()),
            page_count: pagination.page_count(),
            scale,
            gap,
            scroll_top: state.scroll_top,
            pages,
        }
    }

    /// Height of the whole scaled stack
    pub fn total_height(&self) -> f32 {
        self.pages
            .last()
            .map(|p| p.bounds.y + p.bounds.height)
            .unwrap_or(0.0)
    }

    /// Pages intersecting a viewport in stack coordinates
    pub fn visible_pages(&self, viewport: Rect) -> impl Iterator<Item = &PreviewPage> + '_ {
        self.pages
            .iter()
            .filter(move |p| p.bounds.intersects(&viewport))
    }

    /// Serialize for the host
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Page;

    fn pagination(pages: usize) -> Pagination {
        Pagination::new((0..pages).map(Page::new).collect())
    }

    #[test]
    fn test_stack_positions() {
        let constraints = LayoutConstraints::default();
        let state = PreviewState {
            scale: 0.5,
            ..Default::default()
        };
        let snapshot = PreviewSnapshot::build(&pagination(3), &constraints, &state, 7);

        assert_eq!(snapshot.label, "3 pages");
        assert_eq!(snapshot.gap, 12.0);
        assert_eq!(snapshot.pages[1].bounds, Rect::new(0.0, 540.0, 408.0, 528.0));
        assert_eq!(snapshot.total_height(), 3.0 * 528.0 + 2.0 * 12.0);
    }

    #[test]
    fn test_visible_pages() {
        let snapshot = PreviewSnapshot::build(
            &pagination(3),
            &LayoutConstraints::default(),
            &PreviewState::default(),
            0,
        );
        let visible: Vec<_> = snapshot
            .visible_pages(Rect::new(0.0, 1100.0, 816.0, 500.0))
            .map(|p| p.index)
            .collect();
        assert_eq!(visible, vec![1]);
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = PreviewSnapshot::build(
            &pagination(1),
            &LayoutConstraints::default(),
            &PreviewState::default(),
            1,
        );
        let json = snapshot.to_json().unwrap();
        assert!(json.contains(r#""label":"1 page""#));
        assert!(json.contains(r#""pageCount":1"#));
        assert!(json.contains(r#""scrollTop":0.0"#));
    }
}
