use crate::error::ApplyError;
use crate::locator::{find_day_mut, find_exercise};
use crate::models::operation::{AdjustIntensity, Direction, IntensityScope};
use crate::models::{Plan, StrengthExercise};

use super::quantity::{
  resize_repeating_last, round1, scale_reps, DEFAULT_FILL_REPS, DEFAULT_FILL_WEIGHT,
  SETS_CEILING,
};
use super::{required, MutationContext};

const MIN_SETS: u32 = 2;
const MAX_SETS: u32 = 5;
const MIN_REPS: u32 = 4;

const EASIER_REPS_FACTOR: f64 = 0.85;
const EASIER_WEIGHT_FACTOR: f64 = 0.9;
const HARDER_REPS_FACTOR: f64 = 1.15;
const HARDER_WEIGHT_FACTOR: f64 = 1.1;

pub fn adjust_intensity(
  plan: &mut Plan,
  op: &AdjustIntensity,
  ctx: &mut MutationContext<'_>,
) -> Result<(), ApplyError> {
  let apply = |ex: &mut StrengthExercise| match op.direction {
    Direction::Easier => make_easier(ex),
    Direction::Harder => make_harder(ex),
  };

  match op.scope {
    IntensityScope::Week => plan.exercises_mut().for_each(apply),
    IntensityScope::Day => {
      let name = required(op.day_of_week.as_deref(), "day_of_week", "day scope")?;
      find_day_mut(plan, name)?
        .strength_exercises
        .iter_mut()
        .for_each(apply);
    }
    IntensityScope::Exercise => {
      let name = required(op.day_of_week.as_deref(), "day_of_week", "exercise scope")?;
      let exercise = required(op.exercise_name.as_deref(), "exercise_name", "exercise scope")?;
      let day = find_day_mut(plan, name)?;
      let idx = find_exercise(day, exercise, ctx.scorer)?;
      apply(&mut day.strength_exercises[idx]);
    }
  }

  Ok(())
}

/// One set fewer (never below two), reps x0.85 (never below four), weight x0.9.
///
/// Scaled weights are rounded to one decimal place (77.77 x 0.9 gives 70.0).
/// The set count never exceeds `SETS_CEILING`.
fn make_easier(ex: &mut StrengthExercise) {
  let sets = ex.sets.saturating_sub(1).clamp(MIN_SETS, SETS_CEILING);
  let len = sets as usize;

  ex.reps.truncate(len);
  for r in &mut ex.reps {
    *r = scale_reps(*r, EASIER_REPS_FACTOR, MIN_REPS);
  }
  ex.weight.truncate(len);
  for w in &mut ex.weight {
    *w = round1(*w * EASIER_WEIGHT_FACTOR);
  }

  // A single-set exercise gains a set here; grow the arrays to match
  resize_repeating_last(&mut ex.reps, len, DEFAULT_FILL_REPS);
  resize_repeating_last(&mut ex.weight, len, DEFAULT_FILL_WEIGHT);
  ex.sets = sets;
}

/// One set more (capped at five), reps x1.15, weight x1.1, weights rounded
/// to one decimal place like `make_easier`
fn make_harder(ex: &mut StrengthExercise) {
  let sets = ex.sets.saturating_add(1).min(MAX_SETS);
  let len = sets as usize;

  for r in &mut ex.reps {
    *r = scale_reps(*r, HARDER_REPS_FACTOR, 0);
  }
  for w in &mut ex.weight {
    *w = round1(*w * HARDER_WEIGHT_FACTOR);
  }

  resize_repeating_last(&mut ex.reps, len, DEFAULT_FILL_REPS);
  resize_repeating_last(&mut ex.weight, len, DEFAULT_FILL_WEIGHT);
  ex.sets = sets;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::locator::find_day;
  use crate::test_utils::{mock_catalog, mock_context, mock_exercise, mock_plan};

  fn intensity(
    scope: IntensityScope,
    day: Option<&str>,
    name: Option<&str>,
    direction: Direction,
  ) -> AdjustIntensity {
    AdjustIntensity {
      scope,
      day_of_week: day.map(str::to_string),
      exercise_name: name.map(str::to_string),
      direction,
    }
  }

  #[test]
  fn test_make_easier() {
    let mut ex = mock_exercise(1, "Bench", 3);
    ex.reps = vec![8, 8, 8];
    ex.weight = vec![80.0, 80.0, 80.0];

    make_easier(&mut ex);
    assert_eq!(ex.sets, 2);
    assert_eq!(ex.reps, vec![6, 6]);
    assert_eq!(ex.weight, vec![72.0, 72.0]);
  }

  #[test]
  fn test_make_easier_respects_floors() {
    let mut ex = mock_exercise(1, "Bench", 2);
    ex.reps = vec![4, 5];

    make_easier(&mut ex);
    assert_eq!(ex.sets, 2);
    assert_eq!(ex.reps, vec![4, 4]);
  }

  #[test]
  fn test_make_easier_single_set_keeps_invariant() {
    let mut ex = mock_exercise(1, "Bench", 1);

    make_easier(&mut ex);
    assert_eq!(ex.sets, 2);
    assert!(ex.is_consistent());
    assert_eq!(ex.reps, vec![8, 8]);
    assert_eq!(ex.weight, vec![63.0, 63.0]);
  }

  #[test]
  fn test_make_harder() {
    let mut ex = mock_exercise(1, "Bench", 3);
    ex.reps = vec![8, 8, 8];
    ex.weight = vec![80.0, 80.0, 80.0];

    make_harder(&mut ex);
    assert_eq!(ex.sets, 4);
    assert_eq!(ex.reps, vec![9, 9, 9, 9]);
    assert_eq!(ex.weight, vec![88.0, 88.0, 88.0, 88.0]);
  }

  #[test]
  fn test_make_harder_caps_sets_and_fills_empty_arrays() {
    let mut ex = mock_exercise(1, "Bench", 5);
    ex.reps.clear();
    ex.weight.clear();

    make_harder(&mut ex);
    assert_eq!(ex.sets, 5);
    assert_eq!(ex.reps, vec![10; 5]);
    assert_eq!(ex.weight, vec![80.0; 5]);
  }

  #[test]
  fn test_make_harder_on_runaway_set_count() {
    let mut ex = mock_exercise(1, "Bench", 3);
    ex.sets = u32::MAX;

    make_harder(&mut ex);
    assert_eq!(ex.sets, 5);
    assert!(ex.is_consistent());
    assert_eq!(ex.reps, vec![11; 5]);
  }

  #[test]
  fn test_make_easier_on_runaway_set_count() {
    let mut ex = mock_exercise(1, "Bench", 3);
    ex.sets = u32::MAX;

    make_easier(&mut ex);
    assert_eq!(ex.sets, SETS_CEILING);
    assert!(ex.is_consistent());
  }

  #[test]
  fn test_scaled_weights_round_to_one_decimal() {
    let mut ex = mock_exercise(1, "Bench", 3);
    ex.weight = vec![77.77; 3];

    make_easier(&mut ex);
    assert_eq!(ex.weight, vec![70.0, 70.0]);
  }

  #[test]
  fn test_harder_then_easier_differs_from_easier_then_harder() {
    let base = mock_plan().weeks[0].days[0].strength_exercises[0].clone();

    let mut a = base.clone();
    make_harder(&mut a);
    make_easier(&mut a);

    let mut b = base.clone();
    make_easier(&mut b);
    make_harder(&mut b);

    assert_eq!(a.sets, 3);
    assert_eq!(a.reps, vec![7, 7, 7]);
    assert_eq!(a.weight, vec![79.2, 79.2, 79.2]);

    assert_eq!(b.sets, 3);
    assert_eq!(b.reps, vec![6, 6, 6]);
    assert_eq!(b.weight, vec![79.2, 79.2, 79.2]);

    assert_ne!(a, b);
    assert_ne!(a, base);
  }

  #[test]
  fn test_exercise_scope_touches_one_exercise() {
    let catalog = mock_catalog();
    let mut ctx = mock_context(&catalog);
    let mut plan = mock_plan();

    let op = intensity(
      IntensityScope::Exercise,
      Some("Monday"),
      Some("barbell squat"),
      Direction::Harder,
    );
    adjust_intensity(&mut plan, &op, &mut ctx).unwrap();

    let day = find_day(&plan, "Monday").unwrap();
    assert_eq!(day.strength_exercises[0].sets, 3);
    assert_eq!(day.strength_exercises[1].sets, 5);
  }

  #[test]
  fn test_day_scope_touches_whole_day() {
    let catalog = mock_catalog();
    let mut ctx = mock_context(&catalog);
    let mut plan = mock_plan();

    let op = intensity(IntensityScope::Day, Some("friday"), None, Direction::Easier);
    adjust_intensity(&mut plan, &op, &mut ctx).unwrap();

    let day = find_day(&plan, "Friday").unwrap();
    assert!(day.strength_exercises.iter().all(|e| e.sets == 2));
    let monday = find_day(&plan, "Monday").unwrap();
    assert_eq!(monday.strength_exercises[0].sets, 3);
  }

  #[test]
  fn test_week_scope_touches_every_exercise() {
    let catalog = mock_catalog();
    let mut ctx = mock_context(&catalog);
    let mut plan = mock_plan();

    let op = intensity(IntensityScope::Week, None, None, Direction::Harder);
    adjust_intensity(&mut plan, &op, &mut ctx).unwrap();

    let before = mock_plan();
    for (after, orig) in plan.exercises().zip(before.exercises()) {
      assert_eq!(after.sets, (orig.sets + 1).min(5));
      assert!(after.is_consistent());
    }
  }

  #[test]
  fn test_day_scope_requires_day() {
    let catalog = mock_catalog();
    let mut ctx = mock_context(&catalog);
    let mut plan = mock_plan();

    let op = intensity(IntensityScope::Day, None, None, Direction::Easier);
    let err = adjust_intensity(&mut plan, &op, &mut ctx).unwrap_err();
    assert!(matches!(err, ApplyError::MalformedOperation(_)));
  }
}
