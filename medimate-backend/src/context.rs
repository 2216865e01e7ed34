use crate::config::Config;
use crate::db::Database;
use std::sync::Arc;

/// Handles shared by the command router, the resolver and ingestion.
///
/// Built once in `main` and passed down explicitly.
#[derive(Clone)]
pub struct AppContext {
    pub db: Arc<Database>,
    pub config: Config,
}

impl AppContext {
    pub fn new(db: Arc<Database>, config: Config) -> Self {
        Self { db, config }
    }

    /// In-memory store with default config, used by tests
    #[cfg(test)]
    pub fn in_memory(config: Config) -> Self {
        let db = Database::open(":memory:").expect("in-memory db");
        Self::new(Arc::new(db), config)
    }
}
