//! Shared rendering utilities: the frame buffer, text sanitizing, width-aware
//! fitting and wrapping, and query highlighting.
//!
//! All widths are terminal display columns (`unicode-width`), so Arabic text,
//! emoji and CJK titles line up with ASCII chrome.
//!
//! # Example
//!
//! ```rust
//! use maktaba::ui::helpers::{fit, sanitize};
//!
//! assert_eq!(sanitize("a\u{1b}[31mb"), "a[31mb");
//! assert_eq!(fit("📚 Books", 5), "📚 B…");
//! ```

use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// An in-memory frame: one ANSI-styled string per pane line.
///
/// Components write whole lines; overlays replace the lines they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self {
            lines: vec![String::new(); rows],
        }
    }

    /// Replaces line `row`. Writes outside the frame are dropped.
    pub fn set(&mut self, row: usize, line: String) {
        if let Some(slot) = self.lines.get_mut(row) {
            *slot = line;
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines with all escape sequences removed, for assertions and logs.
    #[must_use]
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(|line| strip_ansi(line)).collect()
    }

    /// The whole frame as plain text, one line per row.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.plain_lines().join("\n")
    }

    /// Serializes the frame with absolute cursor positioning per line.
    #[must_use]
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for (row, line) in self.lines.iter().enumerate() {
            out.push_str(&position_cursor(row + 1, 1));
            out.push_str(line);
        }
        out
    }
}

/// ANSI sequence moving the cursor to `row`, `col` (both 1-indexed).
#[must_use]
pub fn position_cursor(row: usize, col: usize) -> String {
    format!("\u{1b}[{row};{col}H")
}

/// Removes CSI escape sequences produced by the theme helpers.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Neutralizes server-provided text for single-line display.
///
/// Control characters (including ESC, so no escape sequence survives) are
/// dropped; line breaks and tabs become spaces.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Truncates `text` to `width` columns, ending with `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Truncates or right-pads `text` to exactly `width` columns.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let used = out.width();
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Centers `text` in `width` columns, truncating if needed.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let used = text.width();
    let left = (width.saturating_sub(used)) / 2;
    let right = width.saturating_sub(left + used);
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Neutralizes server-provided text for multi-line display.
///
/// Like [`sanitize`], but line breaks survive and tabs become a single space,
/// so indentation and runs of spaces are kept.
#[must_use]
pub fn sanitize_block(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Wraps server text to `width` columns, keeping line breaks and spacing.
///
/// Words wider than a line are split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let clean = sanitize_block(text);
    let options = textwrap::Options::new(width.max(1)).break_words(true);

    textwrap::wrap(&clean, options)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Limits highlight ranges to the first `kept` characters.
///
/// Used after [`truncate`] so a match past the cut never lands on the `…`.
#[must_use]
pub fn clamp_ranges(ranges: &[(usize, usize)], kept: usize) -> Vec<(usize, usize)> {
    ranges
        .iter()
        .filter(|(start, _)| *start < kept)
        .map(|&(start, end)| (start, end.min(kept)))
        .collect()
}

/// Coalesces sorted character indices into `(start, end)` ranges, end exclusive.
#[must_use]
pub fn index_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Styles `text` with highlighted character ranges.
///
/// `base` is the escape prefix of the surrounding text and is restored after
/// every highlighted run. Ranges are character indices.
#[must_use]
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut current = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current || start >= end {
            continue;
        }
        out.extend(&chars[current..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(base);
        current = end;
    }

    out.extend(&chars[current..]);
    out
}
