//! Greedy word-wrap against measured glyph widths.
//!
//! Whitespace collapses the way it does in the preview: runs of spaces, tabs and
//! newlines become single separators. A word wider than the line is split between
//! characters so that no emitted line exceeds `max_width`.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width` at font `size`.
///
/// Blank text yields a single empty line, since an empty paragraph still takes up
/// one line of the block.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, size: f32, max_width: f32) -> Vec<String> {
    let space_w = metrics.space_width * size;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_at(word, size);
        let needs_space = !current.is_empty();
        let sep_w = if needs_space { space_w } else { 0.0 };

        if current_width + sep_w + word_w <= max_width {
            if needs_space {
                current.push(' ');
            }
            current.push_str(word);
            current_width += sep_w + word_w;
            continue;
        }

        // Doesn't fit: close the current line first.
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_w <= max_width {
            current.push_str(word);
            current_width = word_w;
        } else {
            for piece in split_long_word(word, metrics, size, max_width) {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_width = metrics.measure_at(&piece, size);
                current = piece;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits a single over-wide word into pieces that each fit `max_width`.
/// A piece always holds at least one character.
fn split_long_word(word: &str, metrics: &FontMetricTable, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c) * size;
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
