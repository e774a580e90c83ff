//! Layout state: the page set of the current document

use crate::content::flatten;
use crate::document::Document;
use crate::layout::flow::paginate;
use crate::layout::oracle::{MeasurementOracle, MetricOracle};
use crate::layout::pagination::{Page, Pagination};
use serde::{Deserialize, Serialize};

/// Layout constraints for the document, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConstraints {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self {
            page_width: 816.0, // US Letter at 96 dpi
            page_height: 1056.0,
            margin_top: 96.0, // 1 inch
            margin_bottom: 96.0,
            margin_left: 96.0,
            margin_right: 96.0,
        }
    }
}

impl LayoutConstraints {
    /// Get usable content width
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Get usable content height per page
    pub fn content_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }
}

/// Complete layout state, rebuilt in full on every pass
pub struct LayoutState {
    constraints: LayoutConstraints,
    oracle: Box<dyn MeasurementOracle>,
    pagination: Pagination,
    /// Number of passes run so far
    passes: u64,
}

impl LayoutState {
    /// Create new layout state measured by the reference oracle
    pub fn new(constraints: LayoutConstraints) -> Self {
        Self::with_oracle(constraints, Box::new(MetricOracle::new(constraints)))
    }

    /// Create new layout state measured by a host oracle
    pub fn with_oracle(constraints: LayoutConstraints, oracle: Box<dyn MeasurementOracle>) -> Self {
        Self {
            constraints,
            oracle,
            pagination: Pagination::blank(),
            passes: 0,
        }
    }

    /// Get constraints
    pub fn constraints(&self) -> &LayoutConstraints {
        &self.constraints
    }

    /// Replace the oracle; takes effect on the next pass
    pub fn set_oracle(&mut self, oracle: Box<dyn MeasurementOracle>) {
        self.oracle = oracle;
    }

    /// Flatten and paginate the document from scratch
    pub fn relayout(&mut self, document: &Document) -> &Pagination {
        let blocks = flatten(document);
        self.pagination = paginate(&blocks, self.oracle.as_mut());
        self.passes += 1;
        &self.pagination
    }

    /// Get the current page set
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Get pages
    pub fn pages(&self) -> &[Page] {
        self.pagination.pages()
    }

    /// Get page count
    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    /// Get pass count
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Re-ask the oracle which pages overflow
    pub fn overflowing_pages(&mut self) -> Vec<usize> {
        self.pagination.overflowing_pages(self.oracle.as_mut())
    }
}
