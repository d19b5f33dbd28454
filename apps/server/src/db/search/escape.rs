//! `LIKE` pattern escaping.
//!
//! Patterns are used with `ESCAPE '\'`, so `\`, `%` and `_` in user input are
//! prefixed with a backslash and match literally.

pub(crate) fn escape_like_pattern(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `%value%` with `value` escaped.
pub(crate) fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like_pattern(value))
}
