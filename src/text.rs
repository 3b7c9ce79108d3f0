// Fixed-width text fitting for list rows. Operates on characters, never
// bytes, so multi-byte filenames survive truncation intact.

const ELLIPSIS: &str = "...";

/// Fit `text` into exactly `width` characters: right-pad when it is short
/// enough, otherwise keep the head and tail around an ellipsis.
///
/// The tail is taken from just before the final character, which is dropped,
/// matching how the row templates cut long filenames. Widths of 3 or less
/// degenerate to the bare ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        let mut out = String::with_capacity(width);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(width - chars.len()));
        return out;
    }

    let prefix = (width / 2).saturating_sub(1);
    if prefix == 0 {
        return ELLIPSIS.to_string();
    }
    let suffix = width - prefix - ELLIPSIS.len();

    let mut out: String = chars[..prefix].iter().collect();
    out.push_str(ELLIPSIS);
    out.extend(&chars[chars.len() - 1 - suffix..chars.len() - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_text_to_width() {
        assert_eq!(fit("abc", 6), "abc   ");
        assert_eq!(fit("", 4), "    ");
    }

    #[test]
    fn text_at_exact_width_is_unchanged() {
        assert_eq!(fit("abcdef", 6), "abcdef");
    }

    #[test]
    fn truncates_even_width() {
        // prefix 2, suffix 1, final char dropped
        assert_eq!(fit("abcdefghij", 6), "ab...i");
        assert_eq!(fit("abcdefghij", 6).chars().count(), 6);
    }

    #[test]
    fn truncates_odd_width() {
        // prefix 2, suffix 2
        assert_eq!(fit("abcdefghij", 7), "ab...hi");
        assert_eq!(fit("abcdefghij", 7).chars().count(), 7);
    }

    #[test]
    fn output_width_is_exact_for_all_widths() {
        let long = "the-quick-brown-fox-jumps-over-the-lazy-dog.pdf";
        for w in 4..40 {
            assert_eq!(fit(long, w).chars().count(), w, "width {w}");
        }
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let s = "日本語のドキュメント翻訳テスト.pdf";
        let out = fit(s, 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.contains("..."));

        // short multibyte text pads like anything else
        assert_eq!(fit("日本語", 5).chars().count(), 5);
    }

    #[test]
    fn degenerate_widths_yield_bare_ellipsis() {
        assert_eq!(fit("abcdefgh", 3), "...");
        assert_eq!(fit("abcdefgh", 2), "...");
        assert_eq!(fit("abcdefgh", 1), "...");
    }

    #[test]
    fn width_four_keeps_one_leading_char() {
        assert_eq!(fit("abcdefgh", 4), "a...");
    }
}
