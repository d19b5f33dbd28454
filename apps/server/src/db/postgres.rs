//! PostgreSQL case store.
//!
//! One row per case: the case document in `body` (JSONB), with `case_number`,
//! `filed_date` and the normalized `search_document` copied into columns for the
//! unique constraint, ordering and the full-text index.

use crate::{
    config::DatabaseConfig,
    db::{
        search::{
            query_builder::{build_count_sql, build_distinct_sql},
            text::search_document,
            BindValue, CaseQuery, FilterExpr, SuggestField,
        },
        traits::CaseStore,
    },
    Error, Result,
};
use async_trait::async_trait;
use docket_models::{CaseData, CaseId, LegalCase};
use serde_json::Value as JsonValue;
use sqlx::{
    postgres::{PgArguments, PgPoolOptions, PgRow},
    query::{Query, QueryScalar},
    PgPool, Postgres, Row,
};
use std::future::Future;
use std::time::{Duration, Instant};

const BACKEND: &str = "postgres";
const CASE_NUMBER_CONSTRAINT: &str = "legal_cases_case_number_key";

#[derive(Clone)]
pub struct PostgresCaseStore {
    pool: PgPool,
}

impl PostgresCaseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool sized and timed out per `config`.
    ///
    /// Every pooled connection gets the configured `statement_timeout`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let statement_timeout_ms = config.statement_timeout_seconds.saturating_mul(1000);

        let pool = PgPoolOptions::new()
            .min_connections(config.pool_min_size)
            .max_connections(config.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    sqlx::query(&format!("SET statement_timeout = {statement_timeout_ms}"))
                        .execute(conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(&config.url)
            .await
            .map_err(|e| Error::StoreUnavailable(format!("Failed to connect to database: {e}")))?;

        Ok(Self::new(pool))
    }

    /// Apply pending schema migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("Failed to run migrations: {e}")))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Record duration and failures of one store query.
    async fn observe<T, F>(&self, query_type: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let result = fut.await;

        crate::metrics::STORE_QUERY_DURATION_SECONDS
            .with_label_values(&[BACKEND, query_type])
            .observe(start.elapsed().as_secs_f64());
        if result.is_err() {
            crate::metrics::STORE_QUERY_ERRORS_TOTAL
                .with_label_values(&[BACKEND, query_type])
                .inc();
        }

        result
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    bind_values: Vec<BindValue>,
) -> Query<'q, Postgres, PgArguments> {
    for value in bind_values {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::TextArray(vs) => query.bind(vs),
        };
    }
    query
}

fn bind_all_scalar<'q, O>(
    mut query: QueryScalar<'q, Postgres, O, PgArguments>,
    bind_values: Vec<BindValue>,
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    for value in bind_values {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::TextArray(vs) => query.bind(vs),
        };
    }
    query
}

fn row_to_case(row: &PgRow) -> Result<LegalCase> {
    let id: String = row.try_get("id")?;
    let body: JsonValue = row.try_get("body")?;

    let id = CaseId::parse(&id)
        .map_err(|e| Error::Internal(format!("Stored case has invalid id: {e}")))?;
    let data: CaseData = serde_json::from_value(body)
        .map_err(|e| Error::Internal(format!("Stored case {id} is malformed: {e}")))?;

    Ok(LegalCase::new(id, data))
}

fn case_body(case: &LegalCase) -> Result<JsonValue> {
    serde_json::to_value(&case.data)
        .map_err(|e| Error::Internal(format!("Failed to serialize case: {e}")))
}

/// Map unique violations to `Conflict`; pass everything else through.
fn map_write_error(err: sqlx::Error, case_number: &str) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return if db.constraint() == Some(CASE_NUMBER_CONSTRAINT) {
                Error::Conflict(format!("Case with number {case_number} already exists"))
            } else {
                Error::Conflict("Case identifier already exists".to_string())
            };
        }
    }
    Error::Database(err)
}

#[async_trait]
impl CaseStore for PostgresCaseStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    async fn insert(&self, case: &LegalCase) -> Result<()> {
        self.observe("insert", async {
            sqlx::query(
                "INSERT INTO legal_cases (id, case_number, filed_date, body, search_document)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(case.id.as_str())
            .bind(&case.data.case_number)
            .bind(case.data.filed_date)
            .bind(case_body(case)?)
            .bind(search_document(&case.data))
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &case.data.case_number))?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &CaseId) -> Result<Option<LegalCase>> {
        self.observe("find_by_id", async {
            let row = sqlx::query("SELECT id, body FROM legal_cases WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;
            row.as_ref().map(row_to_case).transpose()
        })
        .await
    }

    async fn find_by_case_number(&self, case_number: &str) -> Result<Option<LegalCase>> {
        self.observe("find_by_case_number", async {
            let row = sqlx::query("SELECT id, body FROM legal_cases WHERE case_number = $1")
                .bind(case_number)
                .fetch_optional(&self.pool)
                .await?;
            row.as_ref().map(row_to_case).transpose()
        })
        .await
    }

    async fn replace(&self, case: &LegalCase) -> Result<bool> {
        self.observe("replace", async {
            let result = sqlx::query(
                "UPDATE legal_cases
                 SET case_number = $2,
                     filed_date = $3,
                     body = $4,
                     search_document = $5,
                     updated_at = now()
                 WHERE id = $1",
            )
            .bind(case.id.as_str())
            .bind(&case.data.case_number)
            .bind(case.data.filed_date)
            .bind(case_body(case)?)
            .bind(search_document(&case.data))
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &case.data.case_number))?;
            Ok(result.rows_affected() > 0)
        })
        .await
    }

    async fn delete(&self, id: &CaseId) -> Result<bool> {
        self.observe("delete", async {
            let result = sqlx::query("DELETE FROM legal_cases WHERE id = $1")
                .bind(id.as_str())
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected() > 0)
        })
        .await
    }

    async fn search(&self, query: &CaseQuery) -> Result<Vec<LegalCase>> {
        self.observe("search", async {
            let (sql, bind_values) = query.build_sql();
            tracing::debug!(sql = %sql, binds = bind_values.len(), "Executing case search");

            let rows = bind_all(sqlx::query(&sql), bind_values)
                .fetch_all(&self.pool)
                .await?;
            rows.iter().map(row_to_case).collect()
        })
        .await
    }

    async fn count(&self, filter: &FilterExpr) -> Result<u64> {
        self.observe("count", async {
            let (sql, bind_values) = build_count_sql(filter);
            let total: i64 = bind_all_scalar(sqlx::query_scalar(&sql), bind_values)
                .fetch_one(&self.pool)
                .await?;
            Ok(u64::try_from(total).unwrap_or_default())
        })
        .await
    }

    async fn distinct(&self, field: SuggestField) -> Result<Vec<String>> {
        self.observe("distinct", async {
            let sql = build_distinct_sql(field);
            let values: Vec<String> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
            Ok(values)
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        self.observe("ping", async {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        })
        .await
    }
}
