use crate::error::ApplyError;
use crate::locator::find_day_mut;
use crate::models::operation::{AdjustVolume, VolumeChange, VolumeScope};
use crate::models::{Plan, StrengthExercise};

use super::quantity::{
  resize_repeating_last, DEFAULT_FILL_REPS, DEFAULT_FILL_WEIGHT, SETS_CEILING,
};
use super::required;

const MIN_SETS: i64 = 1;
const MIN_REPS: i64 = 1;

pub fn adjust_volume(plan: &mut Plan, op: &AdjustVolume) -> Result<(), ApplyError> {
  let apply = |ex: &mut StrengthExercise| match op.change_type {
    VolumeChange::Sets => adjust_sets(ex, op.adjustment),
    VolumeChange::Reps => adjust_reps(ex, op.adjustment),
  };

  match op.scope {
    VolumeScope::Week => plan.exercises_mut().for_each(apply),
    VolumeScope::Day => {
      let name = required(op.day_of_week.as_deref(), "day_of_week", "day scope")?;
      find_day_mut(plan, name)?
        .strength_exercises
        .iter_mut()
        .for_each(apply);
    }
  }

  Ok(())
}

/// New set count clamped to 1..=6; arrays follow
fn adjust_sets(ex: &mut StrengthExercise, adjustment: i32) {
  let sets = (ex.sets as i64 + adjustment as i64).clamp(MIN_SETS, SETS_CEILING as i64) as u32;
  resize_repeating_last(&mut ex.reps, sets as usize, DEFAULT_FILL_REPS);
  resize_repeating_last(&mut ex.weight, sets as usize, DEFAULT_FILL_WEIGHT);
  ex.sets = sets;
}

/// Shift every set's reps, never below one
fn adjust_reps(ex: &mut StrengthExercise, adjustment: i32) {
  for r in &mut ex.reps {
    *r = (*r as i64 + adjustment as i64).max(MIN_REPS) as u32;
  }
  ex.sets = ex.sets.min(SETS_CEILING);
  resize_repeating_last(&mut ex.reps, ex.sets as usize, DEFAULT_FILL_REPS);
  resize_repeating_last(&mut ex.weight, ex.sets as usize, DEFAULT_FILL_WEIGHT);
}
