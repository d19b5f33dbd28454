//! Metrics service for collecting application metrics

use sqlx::PgPool;

/// Samples gauges that are only meaningful at scrape time.
pub struct MetricsService {
    pool: Option<PgPool>,
    backend: &'static str,
}

impl MetricsService {
    pub fn new(pool: Option<PgPool>, backend: &'static str) -> Self {
        Self { pool, backend }
    }

    /// Update database connection pool metrics (PostgreSQL backend only)
    pub fn update_db_connection_metrics(&self) {
        let Some(pool) = &self.pool else {
            return;
        };

        let size = pool.size();
        let idle = u32::try_from(pool.num_idle()).unwrap_or(size);

        crate::metrics::DB_CONNECTIONS_ACTIVE.set(i64::from(size.saturating_sub(idle)));
        crate::metrics::DB_CONNECTIONS_IDLE.set(i64::from(idle));
    }

    /// Refresh gauges and render the service info metric.
    pub fn collect_custom_metrics(&self, server_version: &str) -> String {
        self.update_db_connection_metrics();

        let mut output = String::new();
        output.push_str("# HELP docket_server_info Case service information\n");
        output.push_str("# TYPE docket_server_info gauge\n");
        output.push_str(&format!(
            "docket_server_info{{version=\"{}\",backend=\"{}\"}} 1\n",
            server_version, self.backend
        ));
        output
    }
}
