//! Cover title layout
//!
//! Titles are stored upper-cased. Long titles shrink, then truncate:
//!
//! | Length   | Font size                      | Text                 |
//! |----------|--------------------------------|----------------------|
//! | ≤ 20     | 19 px                          | unchanged            |
//! | 21..=29  | `max(13, 19 - 0.6 * (len-20))` | unchanged            |
//! | ≥ 30     | 13 px                          | first 29 chars + `…` |
//!
//! The displayed text is then wrapped greedily into at most two lines using
//! an approximate glyph advance, since no font shaping happens here.

use folio_core::{Point, Rect, Size};
use smallvec::SmallVec;

pub const BASE_FONT_SIZE: f32 = 19.0;
pub const MIN_FONT_SIZE: f32 = 13.0;
/// Titles longer than this start shrinking
pub const SHRINK_AFTER: usize = 20;
pub const SHRINK_PER_CHAR: f32 = 0.6;
/// Titles this long are cut
pub const TRUNCATE_AT: usize = 30;
pub const KEPT_CHARS: usize = 29;
pub const ELLIPSIS: char = '…';

pub const MAX_LINES: usize = 2;
pub const LINE_HEIGHT: f32 = 1.3;
pub const HORIZONTAL_PADDING: f32 = 20.0;
pub const LETTER_SPACING: f32 = 0.5;
/// Average advance of an upper-case glyph, in em
const ADVANCE_EM: f32 = 0.6;

/// Trim and upper-case a raw title
pub fn normalize_title(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Font size for a normalized title of `len` characters
pub fn font_size_for(len: usize) -> f32 {
    if len >= TRUNCATE_AT {
        MIN_FONT_SIZE
    } else if len > SHRINK_AFTER {
        (BASE_FONT_SIZE - (len - SHRINK_AFTER) as f32 * SHRINK_PER_CHAR).max(MIN_FONT_SIZE)
    } else {
        BASE_FONT_SIZE
    }
}

/// Display text for a normalized title, truncated when too long
pub fn display_title(title: &str) -> String {
    if title.chars().count() >= TRUNCATE_AT {
        let mut shown: String = title.chars().take(KEPT_CHARS).collect();
        shown.push(ELLIPSIS);
        shown
    } else {
        title.to_string()
    }
}

/// Positioned title text for a cover
#[derive(Clone, Debug, PartialEq)]
pub struct TitleLayout {
    /// Text shown on the cover, after truncation
    pub text: String,
    pub font_size: f32,
    /// Wrapped lines, at most [`MAX_LINES`]
    pub lines: SmallVec<[String; 2]>,
    /// Whether wrapping dropped text and ellipsized the last line
    pub clamped: bool,
    /// Box the lines are centered in
    pub bounds: Rect,
}

impl TitleLayout {
    /// Lay out a normalized title centered on a cover of `size`
    pub fn new(title: &str, size: Size) -> Self {
        let text = display_title(title);
        let font_size = font_size_for(title.chars().count());
        let available = (size.width - 2.0 * HORIZONTAL_PADDING).max(0.0);
        let (lines, clamped) = wrap(&text, max_chars_per_line(available, font_size));
        Self {
            text,
            font_size,
            lines,
            clamped,
            bounds: Rect::new(HORIZONTAL_PADDING, 0.0, available, size.height),
        }
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT
    }

    /// Baseline-centered origin of each line, vertically centered as a block
    pub fn line_origins(&self) -> impl Iterator<Item = Point> + '_ {
        let line_height = self.line_height();
        let block = line_height * self.lines.len() as f32;
        let top = self.bounds.y() + (self.bounds.height() - block) / 2.0;
        let x = self.bounds.center().x;
        (0..self.lines.len()).map(move |i| Point::new(x, top + line_height * (i as f32 + 0.5)))
    }
}

fn char_advance(font_size: f32) -> f32 {
    font_size * ADVANCE_EM + LETTER_SPACING
}

fn max_chars_per_line(available: f32, font_size: f32) -> usize {
    ((available / char_advance(font_size)).floor() as usize).max(1)
}

/// Greedy word wrap, breaking words that do not fit on a line of their own
fn wrap(text: &str, max_chars: usize) -> (SmallVec<[String; 2]>, bool) {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let used = current.chars().count();
            let needed = if used == 0 { word.len() } else { used + 1 + word.len() };
            if needed <= max_chars {
                if used > 0 {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            // Word longer than a whole line
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
            if word.is_empty() {
                break;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let clamped = lines.len() > MAX_LINES;
    if clamped {
        lines.truncate(MAX_LINES);
        if let Some(last) = lines.last_mut() {
            let mut kept: Vec<char> = last.chars().collect();
            kept.truncate(max_chars.saturating_sub(1));
            while kept.last() == Some(&' ') {
                kept.pop();
            }
            *last = kept.into_iter().collect();
            last.push(ELLIPSIS);
        }
    }
    (lines.into_iter().collect(), clamped)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COVER: Size = Size::new(200.0, 268.0);

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_title("  caiet de teme "), "CAIET DE TEME");
        assert_eq!(normalize_title("română"), "ROMÂNĂ");
    }

    #[test]
    fn test_font_size_is_monotonic() {
        assert_eq!(font_size_for(1), 19.0);
        assert_eq!(font_size_for(20), 19.0);
        assert!((font_size_for(21) - 18.4).abs() < 1e-4);
        let mut previous = font_size_for(20);
        for len in 21..=40 {
            let size = font_size_for(len);
            assert!(size <= previous, "font grew at {len}");
            assert!(size >= MIN_FONT_SIZE);
            previous = size;
        }
        assert_eq!(font_size_for(30), 13.0);
    }

    #[test]
    fn test_truncation() {
        let long = "MATEMATICA AVANSATA SUPER LUNG";
        assert_eq!(long.chars().count(), 30);
        let shown = display_title(long);
        assert_eq!(shown.chars().count(), KEPT_CHARS + 1);
        assert!(shown.ends_with(ELLIPSIS));
        assert_eq!(shown, "MATEMATICA AVANSATA SUPER LUN…");

        assert_eq!(display_title("SHORT"), "SHORT");
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let title = "Ă".repeat(35);
        let shown = display_title(&title);
        assert_eq!(shown.chars().count(), 30);
    }

    #[test]
    fn test_layout_wraps_two_lines() {
        let layout = TitleLayout::new("MATEMATICA AVANSATA SUPER LUNG", COVER);
        assert_eq!(layout.font_size, 13.0);
        assert_eq!(layout.lines.as_slice(), ["MATEMATICA AVANSATA", "SUPER LUN…"]);
        assert!(!layout.clamped);
    }

    #[test]
    fn test_short_title_is_one_centered_line() {
        let layout = TitleLayout::new("ISTORIE", COVER);
        assert_eq!(layout.lines.as_slice(), ["ISTORIE"]);
        let origin = layout.line_origins().next().expect("one line");
        assert_eq!(origin.x, 100.0);
        assert!((origin.y - 134.0).abs() < 1e-3);
    }

    #[test]
    fn test_narrow_box_clamps_to_two_lines() {
        let layout = TitleLayout::new("UNU DOI TREI PATRU CINCI", Size::new(120.0, 200.0));
        assert_eq!(layout.lines.len(), MAX_LINES);
        assert!(layout.clamped);
        assert!(layout.lines[1].ends_with(ELLIPSIS));
    }

    #[test]
    fn test_long_word_is_broken() {
        let (lines, clamped) = wrap("ABCDEFGHIJ", 4);
        assert_eq!(lines.as_slice(), ["ABCD", "EFG…"]);
        assert!(clamped);
    }
}
