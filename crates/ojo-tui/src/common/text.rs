//! Text helpers for fitting values into fixed-width cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with a trailing ellipsis if it exceeds `max_width`
/// terminal columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width += ch_width;
    }
    truncated.push('…');
    truncated
}

/// Keeps the end of `text` visible, replacing the start with an ellipsis.
///
/// Used for input lines where the cursor sits at the end.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        kept.push(ch);
        width += ch_width;
    }
    let mut truncated = String::from("…");
    truncated.extend(kept.into_iter().rev());
    truncated
}

/// One bullet per character, so the length is visible but not the value.
pub fn mask_secret(text: &str) -> String {
    "•".repeat(text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("bob", 10), "bob");
        assert_eq!(truncate_with_ellipsis("carolina_99", 6), "carol…");
        assert_eq!(truncate_with_ellipsis("anything", 1), "…");
    }

    #[test]
    fn test_truncate_start_keeps_tail() {
        assert_eq!(truncate_start_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_start_with_ellipsis("abcdefgh", 5), "…efgh");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_with_ellipsis("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn test_mask_secret_counts_chars() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("pässwd"), "••••••");
    }
}
