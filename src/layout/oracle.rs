//! Measurement oracles: does a page's content fit its capacity?

use crate::content::{HeaderBlock, ItemBlock};
use crate::layout::font::{StyleSheet, TextStyle};
use crate::layout::line_break::LineBreaker;
use crate::layout::pagination::{Fragment, Page, SectionShell};
use crate::layout::LayoutConstraints;
use rustc_hash::FxHashMap;
use std::mem;

type LineCache = FxHashMap<(TextStyle, u32), FxHashMap<String, usize>>;

/// Answers whether a page's current content fits within its fixed capacity
///
/// The flow engine calls this after every tentative append. Implementations
/// should be deterministic for a given page.
pub trait MeasurementOracle {
    fn fits(&mut self, page: &Page) -> bool;

    /// Called once before each pagination pass
    fn begin_pass(&mut self) {}
}

impl<F> MeasurementOracle for F
where
    F: FnMut(&Page) -> bool,
{
    fn fits(&mut self, page: &Page) -> bool {
        self(page)
    }
}

/// Tolerance for float accumulation when comparing against capacity
const EPSILON: f32 = 0.01;

/// Reference oracle estimating heights from font metrics and line wrapping
pub struct MetricOracle {
    constraints: LayoutConstraints,
    styles: StyleSheet,
    breaker: LineBreaker,
    /// Wrapped line counts, per style and wrap width, measured this pass
    line_cache: LineCache,
    /// Counts from the previous pass; only entries hit again survive
    previous: LineCache,
}

impl MetricOracle {
    pub fn new(constraints: LayoutConstraints) -> Self {
        Self::with_styles(constraints, StyleSheet::default())
    }

    pub fn with_styles(constraints: LayoutConstraints, styles: StyleSheet) -> Self {
        Self {
            constraints,
            styles,
            breaker: LineBreaker::new(),
            line_cache: LineCache::default(),
            previous: LineCache::default(),
        }
    }

    /// Get constraints
    pub fn constraints(&self) -> &LayoutConstraints {
        &self.constraints
    }

    /// Height available for content on one page
    pub fn capacity(&self) -> f32 {
        self.constraints.content_height()
    }

    /// Estimated content height of a page
    pub fn page_height(&mut self, page: &Page) -> f32 {
        let mut height = 0.0;
        for (i, fragment) in page.fragments.iter().enumerate() {
            if i > 0 {
                height += self.styles.block_gap;
            }
            height += self.fragment_height(fragment);
        }
        height
    }

    /// Estimated height of one placed fragment
    pub fn fragment_height(&mut self, fragment: &Fragment) -> f32 {
        match fragment {
            Fragment::Header(header) => self.header_height(header),
            Fragment::Section(shell) => self.shell_height(shell),
        }
    }

    fn header_height(&mut self, header: &HeaderBlock) -> f32 {
        let width = self.constraints.content_width();
        // Name and title rows are always printed, even when blank
        let mut height = self.text_height(&header.name, TextStyle::Name, width, 1)
            + self.text_height(&header.title, TextStyle::Title, width, 1);

        let contact = header.contact_line();
        let skills = header.skills_line();
        let summary = header.summary.as_deref().unwrap_or("");
        for (text, style) in [
            (contact.as_str(), TextStyle::Contact),
            (summary, TextStyle::Body),
            (skills.as_str(), TextStyle::Body),
        ] {
            let rows = self.text_height(text, style, width, 0);
            if rows > 0.0 {
                height += self.styles.header_gap + rows;
            }
        }
        height
    }

    fn shell_height(&mut self, shell: &SectionShell) -> f32 {
        let width = self.constraints.content_width();
        let mut height = self.text_height(&shell.title, TextStyle::SectionTitle, width, 1);
        for (i, item) in shell.items.iter().enumerate() {
            height += if i == 0 {
                self.styles.title_gap
            } else {
                self.styles.item_gap
            };
            height += self.item_height(item);
        }
        height
    }

    fn item_height(&mut self, item: &ItemBlock) -> f32 {
        let width = self.constraints.content_width();
        let mut height = self.text_height(&item.role, TextStyle::Role, width, 0);
        if let Some(meta) = &item.meta {
            height += self.text_height(meta, TextStyle::Meta, width, 0);
        }
        if let Some(summary) = &item.summary {
            height += self.text_height(summary, TextStyle::Body, width, 0);
        }
        let bullet_width = width - self.styles.bullet_indent;
        for bullet in &item.bullets {
            height += self.text_height(bullet, TextStyle::Body, bullet_width, 1);
        }
        height
    }

    /// Height of `text` wrapped at `width`, at least `min_lines` rows
    fn text_height(&mut self, text: &str, style: TextStyle, width: f32, min_lines: usize) -> f32 {
        let lines = if text.trim().is_empty() {
            0
        } else {
            self.line_count(text, style, width)
        };
        lines.max(min_lines) as f32 * self.styles.metrics(style).line_height
    }

    fn line_count(&mut self, text: &str, style: TextStyle, width: f32) -> usize {
        let key = (style, width.to_bits());
        if let Some(&count) = self.line_cache.get(&key).and_then(|by_text| by_text.get(text)) {
            return count;
        }

        let count = match self
            .previous
            .get_mut(&key)
            .and_then(|by_text| by_text.remove(text))
        {
            Some(count) => count,
            None => self
                .breaker
                .line_count(text, self.styles.metrics(style), width),
        };
        self.line_cache
            .entry(key)
            .or_default()
            .insert(text.to_string(), count);
        count
    }

    /// Number of memoized line counts
    pub fn cached_entries(&self) -> usize {
        self.line_cache
            .values()
            .chain(self.previous.values())
            .map(FxHashMap::len)
            .sum()
    }
}

impl MeasurementOracle for MetricOracle {
    fn fits(&mut self, page: &Page) -> bool {
        self.page_height(page) <= self.capacity() + EPSILON
    }

    fn begin_pass(&mut self) {
        self.previous = mem::take(&mut self.line_cache);
    }
}
