//! Plan operation applier
//!
//! Takes a weekly training plan plus a list of typed edit operations
//! (classified upstream from free-form feedback) and returns the edited plan
//! together with a manifest of which operations landed and which did not.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod executor;
pub mod locator;
pub mod models;
pub mod mutators;
pub mod resolver;
pub mod similarity;
pub mod temp_id;

#[cfg(test)]
mod test_utils;

pub use catalog::{CatalogMatcher, CatalogRecord, InMemoryCatalog, MatchOutcome, MatchStatus};
pub use config::ApplierConfig;
pub use error::{ApplyError, ConfigError, DbError};
pub use executor::{ApplyOutcome, OperationFailure, PlanApplier};
pub use models::{Operation, Plan};
pub use similarity::{SimilarityScorer, NAME_MATCH_THRESHOLD};

/// Apply `operations` to a copy of `plan` with the default configuration
pub fn apply_operations(
  plan: &Plan,
  operations: &[Operation],
  matcher: &dyn CatalogMatcher,
) -> ApplyOutcome {
  PlanApplier::new(matcher, &ApplierConfig::default()).apply(plan, operations)
}

/// Open the configured catalog database and build an in-memory matcher from it
pub async fn open_catalog(config: &ApplierConfig) -> Result<InMemoryCatalog, DbError> {
  let path = config
    .catalog_db
    .as_deref()
    .ok_or_else(|| DbError::Database(format!("{} is not set", config::ENV_CATALOG_DB)))?;
  let pool = db::initialize_db(path).await?;
  let catalog = catalog::load_catalog(&pool, config.scorer.build()).await;
  pool.close().await;
  catalog
}
