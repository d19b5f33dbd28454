//! Free-text query handling.
//!
//! Case records and queries go through the same tokenizer, so the PostgreSQL
//! text index (`to_tsvector('simple', search_document)`) and the in-memory store
//! agree on what a term is: lowercase, diacritics stripped (NFKD minus combining
//! marks), split on anything that is not alphanumeric.

use docket_models::CaseData;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Remove control characters and `{`, `}`, `$`, trim, and cap at `max_chars` characters.
///
/// Returns `None` when nothing is left.
pub fn sanitize_text_query(raw: &str, max_chars: usize) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '{' | '}' | '$'))
        .take(max_chars)
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split text into normalized search terms.
pub fn tokenize(input: &str) -> Vec<String> {
    let folded: String = input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| c.to_lowercase())
        .collect();

    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// The indexed text for a case: every searchable field, tokenized and space-joined.
pub fn search_document(data: &CaseData) -> String {
    data.searchable_text()
        .into_iter()
        .flat_map(tokenize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercasing used by substring and equality filters, matching `ILIKE`/`lower()`.
pub fn casefold(input: &str) -> String {
    input.to_lowercase()
}
