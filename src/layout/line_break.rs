//! Line breaking algorithm

use crate::layout::font::FontMetrics;
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// One wrapped line of a text run
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Byte range within the text this line covers
    pub byte_range: Range<usize>,
    /// Advance width of the line
    pub width: f32,
}

/// Greedy line breaker over UAX #14 break opportunities
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Wrap `text` into lines no wider than `max_width`
    ///
    /// A segment wider than a whole line is split at grapheme boundaries.
    /// Empty text still yields one empty line.
    pub fn break_lines(&self, text: &str, metrics: &FontMetrics, max_width: f32) -> Vec<TextLine> {
        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut segment_start = 0;
        let mut x: f32 = 0.0;

        for (end, opportunity) in linebreaks(text) {
            let segment = &text[segment_start..end];
            let visible = metrics.text_width(segment.trim_end());

            // Soft wrap before this segment
            if x > 0.0 && x + visible > max_width {
                lines.push(TextLine {
                    byte_range: line_start..segment_start,
                    width: x,
                });
                line_start = segment_start;
                x = 0.0;
            }

            if visible > max_width {
                // Emergency break inside the segment
                for (offset, grapheme) in segment.grapheme_indices(true) {
                    let width = metrics.cluster_width(grapheme);
                    if x > 0.0 && x + width > max_width {
                        lines.push(TextLine {
                            byte_range: line_start..segment_start + offset,
                            width: x,
                        });
                        line_start = segment_start + offset;
                        x = 0.0;
                    }
                    x += width;
                }
            } else {
                x += metrics.text_width(segment);
            }

            if opportunity == BreakOpportunity::Mandatory && end < text.len() {
                lines.push(TextLine {
                    byte_range: line_start..end,
                    width: x,
                });
                line_start = end;
                x = 0.0;
            }
            segment_start = end;
        }

        if line_start < text.len() || lines.is_empty() {
            lines.push(TextLine {
                byte_range: line_start..text.len(),
                width: x,
            });
        }

        lines
    }

    /// Number of lines `text` wraps to
    pub fn line_count(&self, text: &str, metrics: &FontMetrics, max_width: f32) -> usize {
        self.break_lines(text, metrics, max_width).len()
    }
}
