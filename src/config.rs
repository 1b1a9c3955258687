//! Runtime configuration for the plan applier
//!
//! Read from the process environment; `from_dotenv` also honours a `.env`
//! file in the working directory.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::similarity::ScorerKind;

pub const ENV_MAX_POPULARITY_RANK: &str = "PLAN_CATALOG_MAX_POPULARITY_RANK";
pub const ENV_SIMILARITY_SCORER: &str = "PLAN_SIMILARITY_SCORER";
pub const ENV_CATALOG_DB: &str = "PLAN_CATALOG_DB";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplierConfig {
  /// Only consider catalog entries at or above this popularity rank
  pub max_popularity_rank: Option<u32>,
  pub scorer: ScorerKind,
  /// SQLite file holding the exercise catalog
  pub catalog_db: Option<PathBuf>,
}

impl ApplierConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let max_popularity_rank = match env::var(ENV_MAX_POPULARITY_RANK) {
      Ok(raw) if !raw.trim().is_empty() => {
        let rank: u32 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
          key: ENV_MAX_POPULARITY_RANK.to_string(),
          value: raw.clone(),
        })?;
        // 0 means "no cut-off"
        (rank > 0).then_some(rank)
      }
      _ => None,
    };

    let scorer = match env::var(ENV_SIMILARITY_SCORER) {
      Ok(raw) if !raw.trim().is_empty() => raw.parse().map_err(|_| ConfigError::Invalid {
        key: ENV_SIMILARITY_SCORER.to_string(),
        value: raw.clone(),
      })?,
      _ => ScorerKind::default(),
    };

    let catalog_db = env::var(ENV_CATALOG_DB)
      .ok()
      .filter(|p| !p.trim().is_empty())
      .map(PathBuf::from);

    Ok(Self {
      max_popularity_rank,
      scorer,
      catalog_db,
    })
  }

  /// Load `.env` (if present) and then read the environment
  pub fn from_dotenv() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_env()
  }
}
