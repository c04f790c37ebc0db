// Naive separator-based tokenizer.
//
// Both scorers work on whitespace/punctuation fragments rather than
// linguistic tokens. Japanese and Latin commas, full stops, the katakana
// middle dot and newlines are turned into spaces, the text is split on
// single spaces and each fragment is trimmed. `tokenize` additionally
// lowercases for the connection scorer; `split_keywords` keeps case because
// the alignment scorer does its own case-insensitive containment check.

/// Characters treated as word boundaries in addition to the space itself.
pub const SEPARATORS: [char; 6] = ['、', '。', ',', '.', '・', '\n'];

/// Lowercased, non-empty fragments of `text` in their original order.
pub fn tokenize(text: &str) -> Vec<String> {
    fragments(text).map(str::to_lowercase).collect()
}

/// Non-empty fragments of an intent field, case preserved.
pub fn split_keywords(text: &str) -> Vec<String> {
    fragments(text).map(str::to_string).collect()
}

fn fragments(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ' ' || SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_every_separator() {
        assert_eq!(
            tokenize("Alpha,beta.gamma、デルタ。イプシロン・zeta\neta theta"),
            vec!["alpha", "beta", "gamma", "デルタ", "イプシロン", "zeta", "eta", "theta"]
        );
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\n , . ").is_empty());
    }

    #[test]
    fn trims_other_whitespace() {
        assert_eq!(tokenize("  a\t  b\t"), vec!["a", "b"]);
    }

    #[test]
    fn keeps_duplicates_and_order() {
        assert_eq!(tokenize("b a b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn split_keywords_preserves_case() {
        assert_eq!(split_keywords("Space Opera、Hard SF"), vec!["Space", "Opera", "Hard", "SF"]);
    }

    #[test]
    fn tokens_are_clean() {
        let text = "The Ship.  Sails,, FAR・away\n\n。、end";
        for token in tokenize(text) {
            assert!(!token.is_empty());
            assert_eq!(token, token.to_lowercase());
            assert!(!token.contains(' '));
            assert!(!token.chars().any(|c| SEPARATORS.contains(&c)));
        }
    }
}
