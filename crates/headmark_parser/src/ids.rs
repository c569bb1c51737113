//! Automatic heading identifiers.

use std::collections::HashSet;

/// Generates unique, URL-fragment friendly identifiers for headings.
///
/// ASCII letters and digits are kept (lower-cased), ASCII whitespace,
/// `-` and `_` become `-`, and everything else, including non-ASCII
/// characters, is dropped. An empty result becomes `heading`.
/// Identifiers already handed out get a `-1`, `-2`, … suffix.
#[derive(Debug, Default)]
pub struct IdGenerator {
    used: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates an identifier from heading text.
    pub fn generate(&mut self, text: &str) -> String {
        let mut base = String::with_capacity(text.len());
        for ch in text.trim_matches(|c: char| c.is_ascii_whitespace()).chars() {
            if ch.is_ascii_alphanumeric() {
                base.push(ch.to_ascii_lowercase());
            } else if ch.is_ascii_whitespace() || ch == '-' || ch == '_' {
                base.push('-');
            }
        }
        if base.is_empty() {
            base.push_str("heading");
        }

        if self.used.insert(base.clone()) {
            return base;
        }
        (1..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| self.used.insert(candidate.clone()))
            .unwrap_or(base)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::simple("Intro", "intro")]
    #[case::spaces("Getting Started", "getting-started")]
    #[case::trimmed("  Padded  ", "padded")]
    #[case::punctuation("What's new?", "whats-new")]
    #[case::underscore("snake_case name", "snake-case-name")]
    #[case::non_ascii("Café au lait", "caf-au-lait")]
    #[case::empty("", "heading")]
    #[case::only_symbols("¶!!", "heading")]
    fn test_generate(#[case] text: &str, #[case] expected: &str) {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.generate(text), expected);
    }

    #[test]
    fn test_duplicates_get_suffixes() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.generate("Usage"), "usage");
        assert_eq!(ids.generate("Usage"), "usage-1");
        assert_eq!(ids.generate("Usage"), "usage-2");
    }
}
