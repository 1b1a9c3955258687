//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock catalog and plan factories
//! - Stub collaborators
//! - Helper assertions

use sqlx::SqlitePool;

use crate::catalog::{
  save_catalog_record, CatalogMatcher, CatalogRecord, IdValidation, InMemoryCatalog,
  MatchOutcome,
};
use crate::models::plan::REST_DAY_NOTE;
use crate::models::{Day, EnduranceSession, Plan, StrengthExercise, TrainingType, Week, Weekday};
use crate::mutators::MutationContext;
use crate::resolver::EntityResolver;
use crate::similarity::{EditDistanceScorer, SimilarityScorer};
use crate::temp_id::TempIdAllocator;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed the database with the mock catalog
pub async fn seed_test_catalog(pool: &SqlitePool) -> Vec<i64> {
  let mut ids = Vec::new();
  for record in mock_catalog_records() {
    save_catalog_record(pool, &record)
      .await
      .expect("Failed to seed catalog record");
    ids.push(record.id);
  }
  ids
}

/// ---------------------------------------------------------------------------
/// Catalog Factories
/// ---------------------------------------------------------------------------

pub fn catalog_record(id: i64, name: &str, muscle: &str, equipment: &str) -> CatalogRecord {
  CatalogRecord {
    id,
    name: name.to_string(),
    main_muscle: muscle.to_string(),
    equipment: equipment.to_string(),
    popularity_rank: None,
  }
}

fn ranked(id: i64, name: &str, muscle: &str, equipment: &str, rank: u32) -> CatalogRecord {
  CatalogRecord {
    popularity_rank: Some(rank),
    ..catalog_record(id, name, muscle, equipment)
  }
}

pub fn mock_catalog_records() -> Vec<CatalogRecord> {
  vec![
    ranked(10, "Barbell Bench Press", "Chest", "Barbell", 1),
    ranked(15, "Close Grip Bench Press", "Chest", "Barbell", 7),
    ranked(20, "Barbell Back Squat", "Quadriceps", "Barbell", 2),
    ranked(30, "Deadlift", "Back", "Barbell", 3),
    ranked(40, "Pull Up", "Back", "Bodyweight", 5),
    ranked(50, "Overhead Press", "Shoulders", "Barbell", 6),
    ranked(55, "Incline Dumbbell Press", "Chest", "Dumbbell", 12),
    ranked(56, "Dumbbell Fly", "Chest", "Dumbbell", 9),
    ranked(60, "Romanian Deadlift", "Hamstrings", "Barbell", 8),
    ranked(70, "Face Pull", "Shoulders", "Cable", 20),
    ranked(81, "Nordic Curl", "Hamstrings", "Bodyweight", 40),
    ranked(90, "Leg Press", "Quadriceps", "Machine", 15),
  ]
}

/// The mock catalog behind the default edit-distance scorer
pub fn mock_catalog() -> InMemoryCatalog {
  InMemoryCatalog::new(mock_catalog_records(), Box::new(EditDistanceScorer))
}

/// Mutation context over `catalog` with no popularity cut-off
pub fn mock_context(catalog: &InMemoryCatalog) -> MutationContext<'_> {
  MutationContext {
    scorer: &EditDistanceScorer,
    resolver: EntityResolver::new(catalog, None),
    temp_ids: TempIdAllocator::new(),
  }
}

/// ---------------------------------------------------------------------------
/// Stub Collaborators
/// ---------------------------------------------------------------------------

/// Catalog matcher returning canned answers
pub struct StubMatcher {
  pub outcome: MatchOutcome,
  pub fallback: Option<CatalogRecord>,
  pub validation: IdValidation,
}

impl CatalogMatcher for StubMatcher {
  fn match_by_name(
    &self,
    _name: &str,
    _muscle: Option<&str>,
    _equipment: Option<&str>,
    _max_popularity_rank: Option<u32>,
  ) -> MatchOutcome {
    self.outcome.clone()
  }

  fn fallback_by_muscle_equipment(
    &self,
    _muscle: Option<&str>,
    _equipment: Option<&str>,
    _exclude_names: &[String],
    _max_popularity_rank: Option<u32>,
  ) -> Option<CatalogRecord> {
    self.fallback.clone()
  }

  fn validate_ids(&self, ids: &[i64]) -> IdValidation {
    let (valid, invalid): (Vec<i64>, Vec<i64>) = ids
      .iter()
      .copied()
      .partition(|id| self.validation.valid.contains(id));
    IdValidation { valid, invalid }
  }
}

/// Scorer that rates every pair the same
pub struct FixedScorer(pub f64);

impl SimilarityScorer for FixedScorer {
  fn score(&self, _a: &str, _b: &str) -> f64 {
    self.0
  }
}

/// ---------------------------------------------------------------------------
/// Plan Factories
/// ---------------------------------------------------------------------------

/// Exercise with uniform 10 reps at 70 per set and no muscle/equipment
pub fn mock_exercise(id: i64, name: &str, sets: u32) -> StrengthExercise {
  StrengthExercise {
    id: Some(id),
    daily_training_id: None,
    exercise_id: id * 10,
    exercise_name: name.to_string(),
    main_muscle: String::new(),
    equipment: String::new(),
    sets,
    reps: vec![10; sets as usize],
    weight: vec![70.0; sets as usize],
  }
}

#[allow(clippy::too_many_arguments)]
fn exercise(
  id: i64,
  day_id: i64,
  exercise_id: i64,
  name: &str,
  muscle: &str,
  equipment: &str,
  reps: Vec<u32>,
  weight: f64,
) -> StrengthExercise {
  let sets = reps.len() as u32;
  StrengthExercise {
    id: Some(id),
    daily_training_id: Some(day_id),
    exercise_id,
    exercise_name: name.to_string(),
    main_muscle: muscle.to_string(),
    equipment: equipment.to_string(),
    sets,
    weight: vec![weight; reps.len()],
    reps,
  }
}

fn training_day(
  id: i64,
  week_id: i64,
  day_of_week: Weekday,
  exercises: Vec<StrengthExercise>,
) -> Day {
  Day {
    id: Some(id),
    weekly_schedule_id: Some(week_id),
    day_of_week,
    is_rest_day: false,
    training_type: TrainingType::Strength,
    justification: Some(format!("{} strength", day_of_week)),
    strength_exercises: exercises,
    endurance_sessions: Vec::new(),
  }
}

/// Two-week plan used across the test suite
///
/// Week 1: Monday (bench, squat), Wednesday (easy run), Friday (deadlift,
/// pull up), Sunday (rest). Week 2: Tuesday (overhead press).
pub fn mock_plan() -> Plan {
  let monday = training_day(
    101,
    1,
    Weekday::Monday,
    vec![
      exercise(1, 101, 10, "Barbell Bench Press", "Chest", "Barbell", vec![8, 8, 8], 80.0),
      exercise(2, 101, 20, "Barbell Back Squat", "Quadriceps", "Barbell", vec![6; 4], 75.0),
    ],
  );

  let wednesday = Day {
    id: Some(103),
    weekly_schedule_id: Some(1),
    day_of_week: Weekday::Wednesday,
    is_rest_day: false,
    training_type: TrainingType::Endurance,
    justification: Some("Aerobic base".to_string()),
    strength_exercises: Vec::new(),
    endurance_sessions: vec![EnduranceSession {
      id: Some(1),
      daily_training_id: Some(103),
      session_type: "Run".to_string(),
      duration_minutes: Some(45),
      distance_km: Some(8.0),
      intensity: Some("Z2".to_string()),
      notes: None,
    }],
  };

  let friday = training_day(
    105,
    1,
    Weekday::Friday,
    vec![
      exercise(3, 105, 30, "Deadlift", "Back", "Barbell", vec![5, 5, 5], 85.0),
      exercise(4, 105, 40, "Pull Up", "Back", "Bodyweight", vec![10; 3], 0.0),
    ],
  );

  let sunday = Day {
    id: Some(107),
    weekly_schedule_id: Some(1),
    day_of_week: Weekday::Sunday,
    is_rest_day: true,
    training_type: TrainingType::Rest,
    justification: Some(REST_DAY_NOTE.to_string()),
    strength_exercises: Vec::new(),
    endurance_sessions: Vec::new(),
  };

  let tuesday = training_day(
    202,
    2,
    Weekday::Tuesday,
    vec![exercise(
      5,
      202,
      50,
      "Overhead Press",
      "Shoulders",
      "Barbell",
      vec![8; 3],
      70.0,
    )],
  );

  Plan {
    id: Some(1),
    weeks: vec![
      Week {
        id: Some(1),
        week_number: 1,
        days: vec![monday, wednesday, friday, sunday],
      },
      Week {
        id: Some(2),
        week_number: 2,
        days: vec![tuesday],
      },
    ],
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'exercise_catalog'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_catalog_returns_correct_count() {
    let pool = setup_test_db().await;

    let ids = seed_test_catalog(&pool).await;
    assert_eq!(ids.len(), mock_catalog_records().len());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercise_catalog")
      .fetch_one(&pool)
      .await
      .expect("Failed to count catalog rows");

    assert_eq!(count as usize, ids.len());

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_plan_is_consistent() {
    let plan = mock_plan();
    assert!(plan.invariant_violations().is_empty());
    assert!(plan.exercises().all(|e| e.id.unwrap() > 0));

    let catalog = mock_catalog();
    let ids: Vec<i64> = plan.exercises().map(|e| e.exercise_id).collect();
    assert!(catalog.validate_ids(&ids).invalid.is_empty());
  }

  #[test]
  fn test_mock_exercise_shape() {
    let ex = mock_exercise(3, "Row", 4);
    assert!(ex.is_consistent());
    assert_eq!(ex.exercise_id, 30);
    assert_approx_eq!(ex.weight[0], 70.0, 1e-9);
  }
}
