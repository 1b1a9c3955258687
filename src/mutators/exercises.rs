use crate::error::ApplyError;
use crate::locator::{find_day_mut, find_exercise};
use crate::models::operation::{non_blank, AddExercise, RemoveExercise};
use crate::models::{Plan, StrengthExercise, TrainingType};

use super::quantity::SETS_CEILING;
use super::MutationContext;

const DEFAULT_SETS: u32 = 3;
const DEFAULT_REPS: u32 = 10;
const DEFAULT_WEIGHT: f64 = 70.0;

/// Quantities for a new exercise, filling in whatever upstream left out
fn prescription(op: &AddExercise) -> (u32, Vec<u32>, Vec<f64>) {
  let sets = match op.sets {
    Some(0) => {
      tracing::warn!(exercise = %op.new_exercise_name, "sets=0 requested, using {}", DEFAULT_SETS);
      DEFAULT_SETS
    }
    Some(s) if s > SETS_CEILING => {
      tracing::warn!(exercise = %op.new_exercise_name, sets = s, "sets above {}, capping", SETS_CEILING);
      SETS_CEILING
    }
    Some(s) => s,
    None => DEFAULT_SETS,
  };
  let len = sets as usize;

  let reps = match &op.reps {
    None => vec![DEFAULT_REPS; len],
    Some(reps) => {
      let mut reps = reps.clone();
      if reps.len() != len {
        tracing::warn!(
          exercise = %op.new_exercise_name,
          given = reps.len(),
          sets,
          "reps length does not match sets, padding/truncating with {}",
          DEFAULT_REPS
        );
        reps.resize(len, DEFAULT_REPS);
      }
      reps
    }
  };

  let weight = match &op.weight {
    None => vec![DEFAULT_WEIGHT; len],
    Some(weight) => {
      let mut weight = weight.clone();
      if weight.len() != len {
        tracing::warn!(
          exercise = %op.new_exercise_name,
          given = weight.len(),
          sets,
          "weight length does not match sets, padding/truncating with {}",
          DEFAULT_WEIGHT
        );
        weight.resize(len, DEFAULT_WEIGHT);
      }
      weight
    }
  };

  (sets, reps, weight)
}

/// Resolve a new exercise against the catalog and append it to the day
/// under a temporary id. Existing exercises are left alone.
pub fn add_exercise(
  plan: &mut Plan,
  op: &AddExercise,
  ctx: &mut MutationContext<'_>,
) -> Result<(), ApplyError> {
  let day = find_day_mut(plan, &op.day_of_week)?;
  let (sets, reps, weight) = prescription(op);

  let exclude: Vec<String> = day
    .strength_exercises
    .iter()
    .map(|e| e.exercise_name.clone())
    .collect();

  let resolved = ctx.resolver.resolve(
    &op.new_exercise_name,
    non_blank(op.new_main_muscle.as_deref()),
    non_blank(op.new_equipment.as_deref()),
    &exclude,
  )?;

  let id = ctx.temp_ids.allocate();
  tracing::debug!(
    id,
    exercise = %resolved.record.name,
    day = %day.day_of_week,
    "adding exercise"
  );

  // A day that gains strength work can no longer be a rest day
  if day.is_rest_day {
    day.is_rest_day = false;
    day.training_type = TrainingType::Strength;
    day.justification = None;
  } else if day.training_type == TrainingType::Endurance {
    day.training_type = TrainingType::Mixed;
  }

  day.strength_exercises.push(StrengthExercise {
    id: Some(id),
    daily_training_id: day.id,
    exercise_id: resolved.record.id,
    exercise_name: resolved.record.name,
    main_muscle: resolved.record.main_muscle,
    equipment: resolved.record.equipment,
    sets,
    reps,
    weight,
  });

  Ok(())
}

pub fn remove_exercise(
  plan: &mut Plan,
  op: &RemoveExercise,
  ctx: &MutationContext<'_>,
) -> Result<(), ApplyError> {
  let day = find_day_mut(plan, &op.day_of_week)?;
  let idx = find_exercise(day, &op.exercise_name, ctx.scorer)?;
  let removed = day.strength_exercises.remove(idx);
  tracing::debug!(exercise = %removed.exercise_name, day = %day.day_of_week, "removed exercise");
  Ok(())
}
