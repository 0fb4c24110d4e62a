use unicode_segmentation::UnicodeSegmentation;

/// Truncate to at most `max` grapheme clusters, appending an ellipsis when
/// anything was cut. Grapheme-aware so combined emoji and accents never get
/// split mid-cluster.
pub fn truncate_graphemes(text: &str, max: usize) -> String {
    let mut graphemes = text.grapheme_indices(true);
    match graphemes.nth(max) {
        Some((byte_idx, _)) => format!("{}…", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_graphemes("hello", 20), "hello");
        assert_eq!(truncate_graphemes("", 5), "");
    }

    #[test]
    fn long_text_is_cut_at_grapheme_boundaries() {
        assert_eq!(truncate_graphemes("abcdef", 3), "abc…");
        // Family emoji is one grapheme cluster of several code points.
        let family = "👨‍👩‍👧‍👦";
        let text = format!("{}{}", family.repeat(2), "xy");
        assert_eq!(truncate_graphemes(&text, 2), format!("{}…", family.repeat(2)));
    }

    #[test]
    fn exact_length_has_no_ellipsis() {
        assert_eq!(truncate_graphemes("abc", 3), "abc");
    }
}
