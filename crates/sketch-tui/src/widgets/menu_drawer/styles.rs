//! Row geometry and glyphs for the drawer

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Accent bar plus padding before each row's label
pub const INDICATOR_WIDTH: u16 = 3;

/// Gap kept between a label and its right-aligned value
pub const VALUE_GAP: u16 = 2;

pub const CHECKED: &str = "[x]";
pub const UNCHECKED: &str = "[ ]";

/// Checkbox glyph for a toggle row's `"true"`/`"false"` value
pub fn checkbox(value: &str) -> &'static str {
    if value == "true" {
        CHECKED
    } else {
        UNCHECKED
    }
}

/// Cut `s` to at most `max_width` terminal columns, ending in `…` when cut
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_keeps_short_text() {
        assert_eq!(truncate_str("GIF Menu", 20), "GIF Menu");
    }

    #[test]
    fn test_truncate_str_marks_cut() {
        let cut = truncate_str("Show GIF Flag In List", 10);
        assert_eq!(cut, "Show GIF …");
        assert_eq!(cut.width(), 10);
    }

    #[test]
    fn test_truncate_str_zero_width() {
        assert_eq!(truncate_str("abc", 0), "");
    }

    #[test]
    fn test_checkbox() {
        assert_eq!(checkbox("true"), CHECKED);
        assert_eq!(checkbox("false"), UNCHECKED);
    }
}
