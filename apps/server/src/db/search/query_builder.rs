//! SQL generation for case searches.
//!
//! Filter expressions compile to a `WHERE` clause over `legal_cases c`. Every
//! user-supplied value is pushed to the bind list and referenced as `$n`; only
//! integers computed here (limit/offset) are formatted into the SQL text.

use super::escape::contains_pattern;
use super::filter::{FilterAtom, FilterExpr, SuggestField};
use super::text::casefold;

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
}

fn push_text(bind_params: &mut Vec<BindValue>, value: String) -> usize {
    bind_params.push(BindValue::Text(value));
    bind_params.len()
}

/// Tokens are alphanumeric (see `text::tokenize`), so they carry no tsquery operators.
fn any_term_query(terms: &[String]) -> String {
    terms.join(" | ")
}

fn push_text_array(bind_params: &mut Vec<BindValue>, value: Vec<String>) -> usize {
    bind_params.push(BindValue::TextArray(value));
    bind_params.len()
}

/// A page query: filter plus window. Ordering is fixed (see [`CaseQuery::build_sql`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseQuery {
    pub filter: FilterExpr,
    pub offset: u64,
    pub limit: u64,
}

impl CaseQuery {
    pub fn new(filter: FilterExpr, offset: u64, limit: u64) -> Self {
        Self {
            filter,
            offset,
            limit,
        }
    }

    /// `SELECT` for one page of matching cases.
    ///
    /// Order: text relevance descending when a text clause is present, then
    /// `filed_date` descending, then `id` ascending.
    pub fn build_sql(&self) -> (String, Vec<BindValue>) {
        let mut bind_params = Vec::new();
        let where_sql = self.filter.build_sql(&mut bind_params);

        let mut sql = format!("SELECT c.id, c.body FROM legal_cases c WHERE {where_sql}");
        sql.push_str(" ORDER BY ");
        if let Some(terms) = self.filter.text_terms() {
            let idx = push_text(&mut bind_params, any_term_query(terms));
            sql.push_str(&format!(
                "ts_rank(to_tsvector('simple', c.search_document), to_tsquery('simple', ${idx})) DESC, "
            ));
        }
        sql.push_str("c.filed_date DESC NULLS LAST, c.id ASC");
        // Postgres OFFSET is a signed bigint.
        let offset = self.offset.min(i64::MAX as u64);
        sql.push_str(&format!(" LIMIT {} OFFSET {}", self.limit, offset));

        (sql, bind_params)
    }
}

/// `SELECT COUNT(*)` over the same filter.
pub fn build_count_sql(filter: &FilterExpr) -> (String, Vec<BindValue>) {
    let mut bind_params = Vec::new();
    let where_sql = filter.build_sql(&mut bind_params);
    (
        format!("SELECT COUNT(*) FROM legal_cases c WHERE {where_sql}"),
        bind_params,
    )
}

/// Sorted distinct non-empty values of a suggestion field.
pub fn build_distinct_sql(field: SuggestField) -> String {
    let key = field.json_key();
    format!(
        "SELECT DISTINCT c.body->>'{key}' AS value FROM legal_cases c \
         WHERE COALESCE(c.body->>'{key}', '') <> '' ORDER BY value"
    )
}

impl FilterExpr {
    pub(crate) fn build_sql(&self, bind_params: &mut Vec<BindValue>) -> String {
        match self {
            FilterExpr::MatchAll => "TRUE".to_string(),
            FilterExpr::Atom(atom) => atom.build_sql(bind_params),
            FilterExpr::And(parts) => join_sql(parts, " AND ", "TRUE", bind_params),
            FilterExpr::Or(parts) => join_sql(parts, " OR ", "FALSE", bind_params),
        }
    }
}

fn join_sql(
    parts: &[FilterExpr],
    separator: &str,
    empty: &str,
    bind_params: &mut Vec<BindValue>,
) -> String {
    if parts.is_empty() {
        return empty.to_string();
    }
    let compiled: Vec<String> = parts.iter().map(|p| p.build_sql(bind_params)).collect();
    format!("({})", compiled.join(separator))
}

impl FilterAtom {
    fn build_sql(&self, bind_params: &mut Vec<BindValue>) -> String {
        match self {
            FilterAtom::Text { terms } => {
                let idx = push_text(bind_params, any_term_query(terms));
                format!("to_tsvector('simple', c.search_document) @@ to_tsquery('simple', ${idx})")
            }
            FilterAtom::StatusIn(statuses) => {
                let values = statuses.iter().map(|s| s.as_str().to_string()).collect();
                let idx = push_text_array(bind_params, values);
                format!("c.body->>'status' = ANY(${idx})")
            }
            FilterAtom::FieldContains { field, value } => {
                let idx = push_text(bind_params, contains_pattern(value));
                format!(
                    "c.body->>'{}' ILIKE ${idx} ESCAPE '\\'",
                    field.json_key()
                )
            }
            FilterAtom::FieldEqualsAny { field, values } => {
                let folded = values.iter().map(|v| casefold(v)).collect();
                let idx = push_text_array(bind_params, folded);
                format!("lower(c.body->>'{}') = ANY(${idx})", field.json_key())
            }
            FilterAtom::PartyContains { field, value } => {
                let idx = push_text(bind_params, contains_pattern(value));
                format!(
                    "EXISTS (SELECT 1 FROM jsonb_array_elements(COALESCE(c.body->'parties', '[]'::jsonb)) p \
                     WHERE p->>'{}' ILIKE ${idx} ESCAPE '\\')",
                    field.json_key()
                )
            }
            FilterAtom::FiledOnOrAfter(date) => {
                let idx = push_text(bind_params, date.format("%Y-%m-%d").to_string());
                format!("c.filed_date >= ${idx}::date")
            }
            FilterAtom::FiledOnOrBefore(date) => {
                let idx = push_text(bind_params, date.format("%Y-%m-%d").to_string());
                format!("c.filed_date <= ${idx}::date")
            }
        }
    }
}
