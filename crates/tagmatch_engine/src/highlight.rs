//! Renders match results back onto the source text.

use crate::eval::MatchResults;

/// Wraps matched character ranges of a text in labelled `<span>` markers.
///
/// The text itself is copied verbatim (no escaping), with a line-break
/// marker inserted before every newline.
#[derive(Clone, Debug)]
pub struct Highlighter {
    class: String,
    line_break: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter emitting `<span class="match LABEL">` and `<br/>`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            class: "match".to_string(),
            line_break: "<br/>".to_string(),
        }
    }

    /// Builder method to set the CSS class placed before the label.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Builder method to set the marker inserted before newlines.
    #[must_use]
    pub fn with_line_break(mut self, line_break: impl Into<String>) -> Self {
        self.line_break = line_break.into();
        self
    }

    /// Highlight `text` using character offsets from `results`.
    ///
    /// At each character index, ranges ending there are closed before ranges
    /// starting there are opened, so adjacent matches do not nest. Empty
    /// ranges are skipped.
    #[must_use]
    pub fn highlight(&self, text: &str, results: &MatchResults) -> String {
        let ranges: Vec<_> = results
            .iter()
            .filter(|r| r.char_start < r.char_end)
            .collect();
        let mut out = String::with_capacity(text.len() + ranges.len() * 32);
        let mut len = 0;

        for (i, c) in text.chars().enumerate() {
            for _ in ranges.iter().filter(|r| r.char_end == i) {
                out.push_str("</span>");
            }
            for range in ranges.iter().filter(|r| r.char_start == i) {
                out.push_str("<span class=\"");
                out.push_str(&self.class);
                out.push(' ');
                out.push_str(&range.label);
                out.push_str("\">");
            }
            if c == '\n' {
                out.push_str(&self.line_break);
            }
            out.push(c);
            len = i + 1;
        }

        for _ in ranges.iter().filter(|r| r.char_end >= len && r.char_start < len) {
            out.push_str("</span>");
        }
        out
    }
}
