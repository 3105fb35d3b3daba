// Application state module
// Built once at startup and shared read-only by every connection

use std::path::Path;
use std::sync::Arc;

use super::types::Config;
use crate::catalog::PetCatalog;
use crate::error::AppError;
use crate::query::QueryService;
use crate::routing::Router;
use crate::store::{seed, RecordStore};
use crate::views::{self, View};

/// Application state
pub struct AppState {
    pub config: Config,
    pub router: Router<View>,
    pub queries: QueryService,
}

impl AppState {
    /// Wire routes, catalogue and the seeded store together
    pub fn build(config: Config) -> Result<Self, AppError> {
        let store = seed::load(Path::new(&config.data.seed_file), config.data.delete_policy)?;
        Self::with_store(config, Arc::new(store))
    }

    /// Build state around an already constructed store
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Result<Self, AppError> {
        let router = views::routes()?;
        let queries =
            QueryService::new(PetCatalog::builtin(), store).with_scope(config.search.scope);

        Ok(Self {
            config,
            router,
            queries,
        })
    }
}
