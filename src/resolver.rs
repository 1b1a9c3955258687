//! Entity resolution: free-text exercise names to catalog records
//!
//! Resolution order:
//! 1. name match (muscle/equipment as hints)
//! 2. any exercise for the muscle/equipment pair not already on the day
//!
//! Whatever comes back is re-validated against the live catalog ids before it
//! is handed to a mutator. A stale id counts as "not found" for that step.

use crate::catalog::{CatalogMatcher, CatalogRecord, MatchStatus};
use crate::error::ApplyError;

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
  pub record: CatalogRecord,
  pub score: f64,
  pub status: MatchStatus,
  pub via_fallback: bool,
}

pub struct EntityResolver<'a> {
  matcher: &'a dyn CatalogMatcher,
  max_popularity_rank: Option<u32>,
}

impl<'a> EntityResolver<'a> {
  pub fn new(matcher: &'a dyn CatalogMatcher, max_popularity_rank: Option<u32>) -> Self {
    Self {
      matcher,
      max_popularity_rank,
    }
  }

  fn is_live(&self, record: &CatalogRecord) -> bool {
    self.matcher.validate_ids(&[record.id]).valid.contains(&record.id)
  }

  /// Resolve `name` to a live catalog record.
  ///
  /// `exclude_names` are the exercises already on the target day; the
  /// fallback never proposes one of them.
  pub fn resolve(
    &self,
    name: &str,
    muscle: Option<&str>,
    equipment: Option<&str>,
    exclude_names: &[String],
  ) -> Result<Resolution, ApplyError> {
    let outcome = self
      .matcher
      .match_by_name(name, muscle, equipment, self.max_popularity_rank);

    let mut stale: Option<CatalogRecord> = None;

    if let Some(record) = outcome.record {
      if self.is_live(&record) {
        tracing::debug!(
          query = %name,
          matched = %record.name,
          score = outcome.score,
          status = ?outcome.status,
          "resolved exercise by name"
        );
        return Ok(Resolution {
          record,
          score: outcome.score,
          status: outcome.status,
          via_fallback: false,
        });
      }
      tracing::warn!(
        query = %name,
        id = record.id,
        "catalog match failed id re-validation, trying fallback"
      );
      stale = Some(record);
    }

    let fallback = self.matcher.fallback_by_muscle_equipment(
      muscle,
      equipment,
      exclude_names,
      self.max_popularity_rank,
    );

    match (fallback, stale) {
      (Some(record), _) if self.is_live(&record) => {
        tracing::debug!(
          query = %name,
          matched = %record.name,
          muscle = ?muscle,
          equipment = ?equipment,
          "resolved exercise by muscle/equipment fallback"
        );
        Ok(Resolution {
          record,
          score: outcome.score,
          status: MatchStatus::Fuzzy,
          via_fallback: true,
        })
      }
      (Some(record), _) | (None, Some(record)) => Err(ApplyError::InvalidCatalogMatch {
        id: record.id,
        name: record.name,
      }),
      (None, None) => Err(ApplyError::EntityResolutionFailed(format!(
        "'{}' (muscle: {}, equipment: {})",
        name,
        muscle.unwrap_or("-"),
        equipment.unwrap_or("-")
      ))),
    }
  }
}
