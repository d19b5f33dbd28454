//! Shared application state

use crate::{
    config::{Config, StoreBackend},
    db::{
        search::{FilterBuilder, PageSizePolicy},
        CaseStore, InMemoryCaseStore, PostgresCaseStore,
    },
    services::{CaseService, MetricsService, SearchService},
    Result,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Startup switches that differ between the server binary and tests.
#[derive(Debug, Clone, Copy)]
pub struct AppStateOptions {
    /// Apply schema migrations after connecting (PostgreSQL backend only).
    pub run_migrations: bool,
}

impl AppStateOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            run_migrations: config.database.run_migrations,
        }
    }
}

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn CaseStore>,
    /// Present for the PostgreSQL backend.
    pub db_pool: Option<PgPool>,
    pub case_service: Arc<CaseService>,
    pub search_service: Arc<SearchService>,
    pub metrics_service: Arc<MetricsService>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let options = AppStateOptions::from_config(&config);
        Self::new_with_options(config, options).await
    }

    /// Connect the configured backend and wire the services to it.
    pub async fn new_with_options(config: Config, options: AppStateOptions) -> Result<Self> {
        match config.database.backend {
            StoreBackend::Postgres => {
                let store = PostgresCaseStore::connect(&config.database).await?;
                if options.run_migrations {
                    store.run_migrations().await?;
                    tracing::info!("Database migrations applied");
                }
                let pool = store.pool().clone();
                tracing::info!(
                    pool_max_size = config.database.pool_max_size,
                    "Connected to PostgreSQL case store"
                );
                Ok(Self::assemble(config, Arc::new(store), Some(pool)))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory case store; records are lost on shutdown");
                Ok(Self::with_store(config, Arc::new(InMemoryCaseStore::new())))
            }
        }
    }

    /// Wire the services to an already constructed store.
    pub fn with_store(config: Config, store: Arc<dyn CaseStore>) -> Self {
        Self::assemble(config, store, None)
    }

    fn assemble(config: Config, store: Arc<dyn CaseStore>, db_pool: Option<PgPool>) -> Self {
        let page_policy = PageSizePolicy::from(&config.search);
        let filter_builder = FilterBuilder::new(config.search.max_query_length);

        let case_service = Arc::new(CaseService::new(store.clone(), page_policy));
        let search_service = Arc::new(SearchService::new(
            store.clone(),
            filter_builder,
            page_policy,
        ));
        let metrics_service = Arc::new(MetricsService::new(
            db_pool.clone(),
            store.backend_name(),
        ));

        Self {
            config: Arc::new(config),
            store,
            db_pool,
            case_service,
            search_service,
            metrics_service,
        }
    }
}
