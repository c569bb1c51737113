//! HTML escaping helpers.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>` and `"` so the bytes can be embedded in element
/// text or a double-quoted attribute value.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
pub fn escape_html(input: &[u8]) -> Cow<'_, [u8]> {
    let Some(first) = input.iter().position(|b| escape_byte(*b).is_some()) else {
        return Cow::Borrowed(input);
    };

    let mut out = Vec::with_capacity(input.len() + 8);
    out.extend_from_slice(&input[..first]);
    for &byte in &input[first..] {
        match escape_byte(byte) {
            Some(entity) => out.extend_from_slice(entity),
            None => out.push(byte),
        }
    }
    Cow::Owned(out)
}

/// String convenience wrapper around [`escape_html`].
pub fn escape_html_str(input: &str) -> Cow<'_, str> {
    match escape_html(input.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(input),
        // Entities are ASCII and the input was UTF-8, so the result is too.
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

#[inline]
const fn escape_byte(byte: u8) -> Option<&'static [u8]> {
    match byte {
        b'&' => Some(b"&amp;"),
        b'<' => Some(b"&lt;"),
        b'>' => Some(b"&gt;"),
        b'"' => Some(b"&quot;"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("intro", "intro")]
    #[case::quote(r#"a"b"#, "a&quot;b")]
    #[case::tags("<script>", "&lt;script&gt;")]
    #[case::ampersand("Q&A", "Q&amp;A")]
    #[case::non_ascii("¶ café", "¶ café")]
    fn test_escape_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_html_str(input), expected);
        assert_eq!(escape_html(input.as_bytes()).as_ref(), expected.as_bytes());
    }

    #[test]
    fn test_unescaped_input_is_borrowed() {
        assert!(matches!(escape_html(b"plain"), Cow::Borrowed(_)));
        assert!(matches!(escape_html(b"a<b"), Cow::Owned(_)));
    }
}
