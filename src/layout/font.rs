//! Font metrics for layout

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Metrics needed for text layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    /// Line height in CSS pixels
    pub line_height: f32,
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // 13px body text, 1.35 line height
        Self::uniform(17.5, 6.6)
    }
}

impl FontMetrics {
    pub fn new(line_height: f32, char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
        }
    }

    /// Every character the same width
    pub fn uniform(line_height: f32, width: f32) -> Self {
        Self::new(line_height, vec![width; 128], width)
    }

    /// Same face at a different size
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            line_height: self.line_height * factor,
            char_widths: self.char_widths.iter().map(|w| w * factor).collect(),
            default_width: self.default_width * factor,
        }
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }

    /// Get width of a grapheme cluster
    pub fn cluster_width(&self, grapheme: &str) -> f32 {
        if grapheme == "\t" {
            self.default_width * 4.0
        } else if grapheme.chars().all(|c| c.is_control()) {
            0.0
        } else {
            grapheme.chars().map(|c| self.width(c)).sum()
        }
    }

    /// Get width of a run of text
    pub fn text_width(&self, text: &str) -> f32 {
        text.graphemes(true).map(|g| self.cluster_width(g)).sum()
    }
}

/// Text roles on a printed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Name,
    Title,
    Contact,
    SectionTitle,
    Role,
    Meta,
    Body,
}

/// Metrics for each text role plus the vertical rhythm between blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleSheet {
    pub body: FontMetrics,
    pub name: FontMetrics,
    pub title: FontMetrics,
    pub contact: FontMetrics,
    pub section_title: FontMetrics,
    pub role: FontMetrics,
    pub meta: FontMetrics,
    /// Space between fragments on a page
    pub block_gap: f32,
    /// Space under a section title
    pub title_gap: f32,
    /// Space between items of a section
    pub item_gap: f32,
    /// Space between header rows
    pub header_gap: f32,
    /// Left indent of bullet lists
    pub bullet_indent: f32,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let body = FontMetrics::default();
        Self {
            name: body.scaled(1.7),
            title: body.scaled(1.15),
            contact: body.scaled(0.92),
            section_title: body.scaled(1.1),
            role: body.scaled(1.05),
            meta: body.scaled(0.92),
            body,
            block_gap: 14.0,
            title_gap: 6.0,
            item_gap: 8.0,
            header_gap: 4.0,
            bullet_indent: 18.0,
        }
    }
}

impl StyleSheet {
    /// Get metrics for a text role
    pub fn metrics(&self, style: TextStyle) -> &FontMetrics {
        match style {
            TextStyle::Name => &self.name,
            TextStyle::Title => &self.title,
            TextStyle::Contact => &self.contact,
            TextStyle::SectionTitle => &self.section_title,
            TextStyle::Role => &self.role,
            TextStyle::Meta => &self.meta,
            TextStyle::Body => &self.body,
        }
    }
}
