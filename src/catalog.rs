//! Exercise catalog collaborator
//!
//! The catalog is the authoritative list of known exercises. Plan editing
//! only talks to it through `CatalogMatcher`; `InMemoryCatalog` is the
//! adapter used when the catalog has been loaded from SQLite (or built by
//! hand in tests).

use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

use crate::error::DbError;
use crate::similarity::{SimilarityScorer, NAME_MATCH_THRESHOLD};

/// ---------------------------------------------------------------------------
/// Records and Match Results
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
  pub id: i64,
  pub name: String,
  pub main_muscle: String,
  pub equipment: String,
  /// 1 = most popular; `None` ranks after every ranked record
  #[serde(default)]
  pub popularity_rank: Option<u32>,
}

impl CatalogRecord {
  fn within_rank(&self, max_rank: Option<u32>) -> bool {
    match (max_rank, self.popularity_rank) {
      (None, _) => true,
      (Some(max), Some(rank)) => rank <= max,
      (Some(_), None) => false,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
  Exact,
  Fuzzy,
  NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
  pub record: Option<CatalogRecord>,
  pub score: f64,
  pub status: MatchStatus,
}

impl MatchOutcome {
  pub fn not_found(score: f64) -> Self {
    Self {
      record: None,
      score,
      status: MatchStatus::NotFound,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdValidation {
  pub valid: Vec<i64>,
  pub invalid: Vec<i64>,
}

/// ---------------------------------------------------------------------------
/// Collaborator Interface
/// ---------------------------------------------------------------------------

pub trait CatalogMatcher {
  /// Best catalog match for a free-text name, using muscle/equipment as hints
  fn match_by_name(
    &self,
    name: &str,
    muscle: Option<&str>,
    equipment: Option<&str>,
    max_popularity_rank: Option<u32>,
  ) -> MatchOutcome;

  /// Any exercise for the muscle/equipment pair, skipping `exclude_names`
  fn fallback_by_muscle_equipment(
    &self,
    muscle: Option<&str>,
    equipment: Option<&str>,
    exclude_names: &[String],
    max_popularity_rank: Option<u32>,
  ) -> Option<CatalogRecord>;

  /// Split `ids` into those that are still live in the catalog and those that are not
  fn validate_ids(&self, ids: &[i64]) -> IdValidation;
}

/// ---------------------------------------------------------------------------
/// In-Memory Catalog
/// ---------------------------------------------------------------------------

pub struct InMemoryCatalog {
  records: Vec<CatalogRecord>,
  scorer: Box<dyn SimilarityScorer>,
}

impl InMemoryCatalog {
  pub fn new(records: Vec<CatalogRecord>, scorer: Box<dyn SimilarityScorer>) -> Self {
    Self { records, scorer }
  }

  pub fn records(&self) -> &[CatalogRecord] {
    &self.records
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  fn hint_bonus(record: &CatalogRecord, muscle: Option<&str>, equipment: Option<&str>) -> u8 {
    let muscle_hit = muscle.is_some_and(|m| record.main_muscle.eq_ignore_ascii_case(m));
    let equipment_hit = equipment.is_some_and(|e| record.equipment.eq_ignore_ascii_case(e));
    muscle_hit as u8 + equipment_hit as u8
  }
}

fn rank_key(record: &CatalogRecord) -> u32 {
  record.popularity_rank.unwrap_or(u32::MAX)
}

impl CatalogMatcher for InMemoryCatalog {
  fn match_by_name(
    &self,
    name: &str,
    muscle: Option<&str>,
    equipment: Option<&str>,
    max_popularity_rank: Option<u32>,
  ) -> MatchOutcome {
    // Highest score wins; ties go to the record agreeing with more hints,
    // then to the more popular one.
    let best = self
      .records
      .iter()
      .filter(|r| r.within_rank(max_popularity_rank))
      .map(|r| (r, self.scorer.score(name, &r.name)))
      .max_by(|(ra, sa), (rb, sb)| {
        sa.total_cmp(sb)
          .then_with(|| {
            Self::hint_bonus(ra, muscle, equipment).cmp(&Self::hint_bonus(rb, muscle, equipment))
          })
          .then_with(|| rank_key(rb).cmp(&rank_key(ra)))
      });

    match best {
      Some((record, score)) if score >= NAME_MATCH_THRESHOLD => MatchOutcome {
        record: Some(record.clone()),
        score,
        status: if score >= 100.0 {
          MatchStatus::Exact
        } else {
          MatchStatus::Fuzzy
        },
      },
      Some((_, score)) => MatchOutcome::not_found(score),
      None => MatchOutcome::not_found(0.0),
    }
  }

  fn fallback_by_muscle_equipment(
    &self,
    muscle: Option<&str>,
    equipment: Option<&str>,
    exclude_names: &[String],
    max_popularity_rank: Option<u32>,
  ) -> Option<CatalogRecord> {
    if muscle.is_none() && equipment.is_none() {
      return None;
    }

    self
      .records
      .iter()
      .filter(|r| r.within_rank(max_popularity_rank))
      .filter(|r| muscle.is_none_or(|m| r.main_muscle.eq_ignore_ascii_case(m)))
      .filter(|r| equipment.is_none_or(|e| r.equipment.eq_ignore_ascii_case(e)))
      .filter(|r| !exclude_names.iter().any(|n| n.eq_ignore_ascii_case(&r.name)))
      .min_by_key(|r| rank_key(r))
      .cloned()
  }

  fn validate_ids(&self, ids: &[i64]) -> IdValidation {
    let (valid, invalid): (Vec<i64>, Vec<i64>) = ids
      .iter()
      .copied()
      .partition(|id| self.records.iter().any(|r| r.id == *id));
    IdValidation { valid, invalid }
  }
}

/// ---------------------------------------------------------------------------
/// Database Operations
/// ---------------------------------------------------------------------------

/// Load every live (not soft-deleted) catalog row
pub async fn load_catalog_records(pool: &SqlitePool) -> Result<Vec<CatalogRecord>, DbError> {
  let rows = sqlx::query(
    r#"
    SELECT id, name, main_muscle, equipment, popularity_rank
    FROM exercise_catalog
    WHERE deleted_at IS NULL
    ORDER BY id
    "#,
  )
  .fetch_all(pool)
  .await?;

  let records = rows
    .into_iter()
    .map(|row| CatalogRecord {
      id: row.get("id"),
      name: row.get("name"),
      main_muscle: row
        .get::<Option<String>, _>("main_muscle")
        .unwrap_or_default(),
      equipment: row
        .get::<Option<String>, _>("equipment")
        .unwrap_or_default(),
      popularity_rank: row
        .get::<Option<i64>, _>("popularity_rank")
        .and_then(|r| u32::try_from(r).ok()),
    })
    .collect();

  Ok(records)
}

pub async fn load_catalog(
  pool: &SqlitePool,
  scorer: Box<dyn SimilarityScorer>,
) -> Result<InMemoryCatalog, DbError> {
  let records = load_catalog_records(pool).await?;
  tracing::debug!(count = records.len(), "loaded exercise catalog");
  Ok(InMemoryCatalog::new(records, scorer))
}

/// Insert or update a catalog row
pub async fn save_catalog_record(pool: &SqlitePool, record: &CatalogRecord) -> Result<(), DbError> {
  sqlx::query(
    r#"
    INSERT INTO exercise_catalog (id, name, main_muscle, equipment, popularity_rank)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(id) DO UPDATE SET
      name = excluded.name,
      main_muscle = excluded.main_muscle,
      equipment = excluded.equipment,
      popularity_rank = excluded.popularity_rank,
      deleted_at = NULL
    "#,
  )
  .bind(record.id)
  .bind(&record.name)
  .bind(&record.main_muscle)
  .bind(&record.equipment)
  .bind(record.popularity_rank.map(i64::from))
  .execute(pool)
  .await?;

  Ok(())
}

/// Soft-delete a catalog row; it stops being loaded but keeps its id
pub async fn retire_catalog_record(pool: &SqlitePool, id: i64) -> Result<(), DbError> {
  sqlx::query("UPDATE exercise_catalog SET deleted_at = ?1 WHERE id = ?2")
    .bind(chrono::Utc::now().to_rfc3339())
    .bind(id)
    .execute(pool)
    .await?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
