//! Value escaping and LIKE pattern translation

pub use ldapsql_filter::escape_value;
use ldapsql_filter::push_escaped;

use crate::capability::check_wildcard;
use crate::error::TranslateError;

/// Translate a SQL LIKE pattern into a filter substring value.
///
/// Unescaped `%` becomes `*` (runs of `%` collapse into one `*`); an unescaped
/// `_` fails because the filter grammar has no single-character wildcard.
/// `escape` followed by `%`, `_` or itself yields that character literally,
/// escaped like any other value character.
pub fn translate_like_pattern(pattern: &str, escape: Option<char>) -> Result<String, TranslateError> {
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut after_wildcard = false;

    while let Some(ch) = chars.next() {
        if Some(ch) == escape {
            match chars.next() {
                Some(next) if next == '%' || next == '_' || Some(next) == escape => {
                    push_escaped(&mut translated, next);
                }
                Some(next) => {
                    return Err(TranslateError::Unsupported(format!(
                        "invalid escape sequence '{ch}{next}' in LIKE pattern"
                    )))
                }
                None => {
                    return Err(TranslateError::Unsupported(format!(
                        "LIKE pattern ends with escape character '{ch}'"
                    )))
                }
            }
            after_wildcard = false;
            continue;
        }

        match ch {
            '%' | '_' => {
                check_wildcard(ch)?;
                if !after_wildcard {
                    translated.push('*');
                }
                after_wildcard = true;
            }
            other => {
                push_escaped(&mut translated, other);
                after_wildcard = false;
            }
        }
    }

    Ok(translated)
}
