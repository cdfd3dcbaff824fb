use std::ops::Range;

use super::coords::CornerPoints;

/// A word located inside its line's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within the line.
    pub start: usize,
    pub end: usize,
}

impl WordSpan<'_> {
    pub fn byte_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Decides the geometry of each word given its line's geometry.
pub trait ElementGeometry {
    fn element_corners(
        &self,
        line_text: &str,
        line_corners: &CornerPoints,
        word: &WordSpan<'_>,
    ) -> CornerPoints;
}

/// Every word reuses the full box of its line.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritLineGeometry;

impl ElementGeometry for InheritLineGeometry {
    fn element_corners(
        &self,
        _line_text: &str,
        line_corners: &CornerPoints,
        _word: &WordSpan<'_>,
    ) -> CornerPoints {
        *line_corners
    }
}

/// Splits on runs of Unicode whitespace, left to right, skipping empties.
pub fn split_words(line: &str) -> Vec<WordSpan<'_>> {
    let mut words = Vec::new();
    let mut start = None;
    for (offset, ch) in line.char_indices() {
        match (start, ch.is_whitespace()) {
            (None, false) => start = Some(offset),
            (Some(from), true) => {
                words.push(span(line, from, offset));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(from) = start {
        words.push(span(line, from, line.len()));
    }
    words
}

fn span(line: &str, start: usize, end: usize) -> WordSpan<'_> {
    WordSpan {
        text: &line[start..end],
        start,
        end,
    }
}
