//! Rendering of leaf values and key segments into path text.

/// Returns true if `text` reads as an integer or floating-point literal.
///
/// Only digits, a sign, a decimal point and an exponent are accepted, so
/// words like `inf` or `NaN` stay strings.
///
/// ```
/// use dpath_validator::compiler::emit::looks_like_number;
///
/// assert!(looks_like_number("42"));
/// assert!(looks_like_number("-3.14"));
/// assert!(looks_like_number("1e5"));
/// assert!(!looks_like_number("inf"));
/// assert!(!looks_like_number("4 2"));
/// ```
pub fn looks_like_number(text: &str) -> bool {
    !text.is_empty()
        && text.chars().any(|ch| ch.is_ascii_digit())
        && text
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E'))
        && text.parse::<f64>().is_ok()
}

/// Renders the comparison part of a value predicate: `== 42` for numbers,
/// `eq 'text'` for everything else.
pub fn equality_fragment(text: &str) -> String {
    if looks_like_number(text) {
        format!("== {}", text)
    } else {
        format!("eq '{}'", escape(text, '\''))
    }
}

/// Returns true if a key can appear unquoted as a path segment.
pub fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '-')
}

/// Renders a mapping key as a path segment.
///
/// Keys that are not plain identifiers are always wrapped in double quotes
/// so separators and brackets inside them stay literal. `quote_all` quotes
/// plain keys too.
pub fn key_segment(key: &str, quote_all: bool) -> String {
    if !quote_all && is_plain_key(key) {
        key.to_string()
    } else {
        format!("\"{}\"", escape(key, '"'))
    }
}

/// Backslash-escapes the quote character and backslashes.
fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == quote || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_fragments() {
        assert_eq!(equality_fragment("42"), "== 42");
        assert_eq!(equality_fragment("3.14"), "== 3.14");
        assert_eq!(equality_fragment("-7"), "== -7");
    }

    #[test]
    fn test_string_fragments() {
        assert_eq!(equality_fragment("abc"), "eq 'abc'");
        assert_eq!(equality_fragment(""), "eq ''");
        assert_eq!(equality_fragment("1.2.3"), "eq '1.2.3'");
        assert_eq!(equality_fragment("NaN"), "eq 'NaN'");
    }

    #[test]
    fn test_string_fragment_escapes_quotes() {
        assert_eq!(equality_fragment("it's"), r"eq 'it\'s'");
        assert_eq!(equality_fragment(r"a\b"), r"eq 'a\\b'");
    }

    #[test]
    fn test_key_segments() {
        assert_eq!(key_segment("foo", false), "foo");
        assert_eq!(key_segment("foo-bar_1", false), "foo-bar_1");
        assert_eq!(key_segment("a/b", false), "\"a/b\"");
        assert_eq!(key_segment("a.b", false), "\"a.b\"");
        assert_eq!(key_segment("say \"hi\"", false), r#""say \"hi\"""#);
        assert_eq!(key_segment("", false), "\"\"");
    }

    #[test]
    fn test_key_segments_quote_all() {
        assert_eq!(key_segment("foo", true), "\"foo\"");
        assert_eq!(key_segment("a b", true), "\"a b\"");
    }
}
