//! Assertion value escaping (RFC 4515 section 3)

use crate::ParseError;

/// Escape the characters that are significant inside a filter value.
///
/// `*`, `(`, `)`, `\` and NUL become a backslash followed by the two lowercase
/// hex digits of the byte; every other character is copied unchanged.
pub fn escape_value(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        push_escaped(&mut escaped, ch);
    }
    escaped
}

/// Append one character to `out`, escaped if it is significant
pub fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '*' => out.push_str("\\2a"),
        '(' => out.push_str("\\28"),
        ')' => out.push_str("\\29"),
        '\\' => out.push_str("\\5c"),
        '\0' => out.push_str("\\00"),
        other => out.push(other),
    }
}

/// Decode `\XX` octet escapes back into text
pub fn unescape_value(escaped: &str) -> Result<String, ParseError> {
    let bytes = escaped.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let hex = escaped
                .get(i + 1..i + 3)
                .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                .ok_or_else(|| ParseError::InvalidEscape(escaped.to_string()))?;
            let byte = u8::from_str_radix(hex, 16)
                .map_err(|_| ParseError::InvalidEscape(escaped.to_string()))?;
            decoded.push(byte);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).map_err(|_| ParseError::InvalidEscape(escaped.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_value("R*"), "R\\2a");
        assert_eq!(escape_value("a(b)c"), "a\\28b\\29c");
        assert_eq!(escape_value("C:\\dir"), "C:\\5cdir");
        assert_eq!(escape_value("nul\0"), "nul\\00");
        assert_eq!(escape_value("R%_ plain"), "R%_ plain");
        assert_eq!(escape_value(""), "");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape_value("R\\2a").unwrap(), "R*");
        assert_eq!(unescape_value("\\28x\\29").unwrap(), "(x)");
        assert_eq!(unescape_value("caf\\c3\\a9").unwrap(), "café");
        assert_eq!(unescape_value("\\2A").unwrap(), "*");
    }

    #[test]
    fn test_unescape_rejects_malformed() {
        assert!(matches!(unescape_value("abc\\2"), Err(ParseError::InvalidEscape(_))));
        assert!(matches!(unescape_value("\\zz"), Err(ParseError::InvalidEscape(_))));
        assert!(matches!(unescape_value("\\ff"), Err(ParseError::InvalidEscape(_))));
    }

    proptest! {
        #[test]
        fn escaped_values_never_contain_raw_specials(raw in any::<String>()) {
            let escaped = escape_value(&raw);
            prop_assert!(!escaped.contains('*'));
            prop_assert!(!escaped.contains('('));
            prop_assert!(!escaped.contains(')'));
            prop_assert!(!escaped.contains('\0'));
            // every backslash left over introduces a hex escape
            for (idx, _) in escaped.match_indices('\\') {
                let hex = &escaped[idx + 1..idx + 3];
                prop_assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
            }
        }

        #[test]
        fn escaping_is_reversible(raw in any::<String>()) {
            prop_assert_eq!(unescape_value(&escape_value(&raw)).unwrap(), raw);
        }
    }
}
