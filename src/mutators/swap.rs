use crate::error::ApplyError;
use crate::locator::{find_day_mut, find_exercise};
use crate::models::operation::{non_blank, SwapExercise};
use crate::models::Plan;

use super::MutationContext;

/// Replace an exercise's identity with a newly resolved catalog entry.
/// Sets, reps and weight stay as they were.
pub fn swap_exercise(
  plan: &mut Plan,
  op: &SwapExercise,
  ctx: &mut MutationContext<'_>,
) -> Result<(), ApplyError> {
  let day = find_day_mut(plan, &op.day_of_week)?;
  let idx = find_exercise(day, &op.old_exercise_name, ctx.scorer)?;

  // Blank hints fall back to the outgoing exercise's own muscle/equipment
  let current = &day.strength_exercises[idx];
  let muscle = non_blank(op.new_main_muscle.as_deref())
    .or_else(|| non_blank(Some(&current.main_muscle)))
    .map(str::to_string);
  let equipment = non_blank(op.new_equipment.as_deref())
    .or_else(|| non_blank(Some(&current.equipment)))
    .map(str::to_string);

  let exclude: Vec<String> = day
    .strength_exercises
    .iter()
    .map(|e| e.exercise_name.clone())
    .collect();

  let resolved = ctx.resolver.resolve(
    &op.new_exercise_name,
    muscle.as_deref(),
    equipment.as_deref(),
    &exclude,
  )?;

  let exercise = &mut day.strength_exercises[idx];
  tracing::debug!(
    from = %exercise.exercise_name,
    to = %resolved.record.name,
    via_fallback = resolved.via_fallback,
    "swapping exercise"
  );
  exercise.exercise_id = resolved.record.id;
  exercise.exercise_name = resolved.record.name;
  exercise.main_muscle = resolved.record.main_muscle;
  exercise.equipment = resolved.record.equipment;

  Ok(())
}
