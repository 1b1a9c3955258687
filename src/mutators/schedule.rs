use crate::error::ApplyError;
use crate::locator::{day_position, find_day_mut};
use crate::models::operation::{AddRestDay, MoveDay};
use crate::models::Plan;

/// Swap or move training content between two days.
///
/// Day identity (weekday, ids) stays put; only content travels. A move
/// overwrites whatever the target held and turns the source into a rest day.
pub fn move_day(plan: &mut Plan, op: &MoveDay) -> Result<(), ApplyError> {
  let (sw, sd) = day_position(plan, &op.source_day)?;
  let (tw, td) = day_position(plan, &op.target_day)?;

  if (sw, sd) == (tw, td) {
    tracing::debug!(day = %op.source_day, "source and target are the same day, nothing to move");
    return Ok(());
  }

  let source = plan.weeks[sw].days[sd].content();
  let target = plan.weeks[tw].days[td].content();

  if op.swap {
    plan.weeks[sw].days[sd].set_content(target);
  } else {
    plan.weeks[sw].days[sd].make_rest_day();
  }
  plan.weeks[tw].days[td].set_content(source);

  Ok(())
}

/// Turn a day into a rest day. Applying it twice changes nothing further.
pub fn add_rest_day(plan: &mut Plan, op: &AddRestDay) -> Result<(), ApplyError> {
  find_day_mut(plan, &op.day_of_week)?.make_rest_day();
  Ok(())
}
