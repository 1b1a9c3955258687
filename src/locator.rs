//! Locating days and exercises inside a plan

use crate::error::ApplyError;
use crate::models::{Day, Plan};
use crate::similarity::SimilarityScorer;

/// First day (in week order) whose weekday matches `name`, ignoring case
pub fn find_day<'a>(plan: &'a Plan, name: &str) -> Result<&'a Day, ApplyError> {
  plan
    .days()
    .find(|d| d.day_of_week.matches(name))
    .ok_or_else(|| ApplyError::DayNotFound(name.to_string()))
}

pub fn find_day_mut<'a>(plan: &'a mut Plan, name: &str) -> Result<&'a mut Day, ApplyError> {
  plan
    .days_mut()
    .find(|d| d.day_of_week.matches(name))
    .ok_or_else(|| ApplyError::DayNotFound(name.to_string()))
}

/// (week index, day index) of the first matching day
pub fn day_position(plan: &Plan, name: &str) -> Result<(usize, usize), ApplyError> {
  plan
    .weeks
    .iter()
    .enumerate()
    .find_map(|(wi, week)| {
      week
        .days
        .iter()
        .position(|d| d.day_of_week.matches(name))
        .map(|di| (wi, di))
    })
    .ok_or_else(|| ApplyError::DayNotFound(name.to_string()))
}

/// Index of the first exercise on `day` whose name matches `name`
pub fn find_exercise(
  day: &Day,
  name: &str,
  scorer: &dyn SimilarityScorer,
) -> Result<usize, ApplyError> {
  day
    .strength_exercises
    .iter()
    .position(|ex| scorer.is_match(name, &ex.exercise_name))
    .ok_or_else(|| ApplyError::ExerciseNotFound {
      day: day.day_of_week.to_string(),
      name: name.to_string(),
    })
}
