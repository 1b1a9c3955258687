//! Weekly training plan tree
//!
//! A plan is owned whole: weeks own days, days own their exercises and
//! sessions. Back-references (`daily_training_id`, `weekly_schedule_id`)
//! are plain ids, never pointers.

use serde::{Deserialize, Serialize};

/// Justification written onto a day when it is turned into a rest day
pub const REST_DAY_NOTE: &str = "Rest day - recovery and adaptation.";

/// ---------------------------------------------------------------------------
/// Weekday
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Weekday {
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
  Saturday,
  Sunday,
}

impl Weekday {
  pub const ALL: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Weekday::Monday => "Monday",
      Weekday::Tuesday => "Tuesday",
      Weekday::Wednesday => "Wednesday",
      Weekday::Thursday => "Thursday",
      Weekday::Friday => "Friday",
      Weekday::Saturday => "Saturday",
      Weekday::Sunday => "Sunday",
    }
  }

  /// Case-insensitive comparison against a free-text day name
  pub fn matches(&self, name: &str) -> bool {
    self.as_str().eq_ignore_ascii_case(name.trim())
  }
}

impl std::fmt::Display for Weekday {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Weekday {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Weekday::ALL
      .into_iter()
      .find(|d| d.matches(s))
      .ok_or_else(|| format!("Unknown weekday: {}", s))
  }
}

impl TryFrom<String> for Weekday {
  type Error = String;
  fn try_from(s: String) -> Result<Self, Self::Error> {
    s.parse()
  }
}

impl From<Weekday> for String {
  fn from(d: Weekday) -> Self {
    d.as_str().to_string()
  }
}

/// ---------------------------------------------------------------------------
/// Training Type
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
  #[default]
  Strength,
  Endurance,
  Mixed,
  Rest,
}

/// ---------------------------------------------------------------------------
/// Plan Tree
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
  #[serde(default)]
  pub id: Option<i64>,
  #[serde(default)]
  pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
  #[serde(default)]
  pub id: Option<i64>,
  pub week_number: u32,
  #[serde(default)]
  pub days: Vec<Day>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
  /// Persistence id of this day (`daily_training_id` on its exercises)
  #[serde(default)]
  pub id: Option<i64>,
  /// Id of the owning week row
  #[serde(default)]
  pub weekly_schedule_id: Option<i64>,
  pub day_of_week: Weekday,
  #[serde(default)]
  pub is_rest_day: bool,
  #[serde(default)]
  pub training_type: TrainingType,
  #[serde(default)]
  pub justification: Option<String>,
  #[serde(default)]
  pub strength_exercises: Vec<StrengthExercise>,
  #[serde(default)]
  pub endurance_sessions: Vec<EnduranceSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthExercise {
  /// Persistence id; negative while the exercise only exists in memory
  #[serde(default)]
  pub id: Option<i64>,
  #[serde(default)]
  pub daily_training_id: Option<i64>,
  pub exercise_id: i64,
  pub exercise_name: String,
  #[serde(default)]
  pub main_muscle: String,
  #[serde(default)]
  pub equipment: String,
  pub sets: u32,
  #[serde(default)]
  pub reps: Vec<u32>,
  /// Percentage of 1RM or absolute load, one entry per set
  #[serde(default)]
  pub weight: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnduranceSession {
  #[serde(default)]
  pub id: Option<i64>,
  #[serde(default)]
  pub daily_training_id: Option<i64>,
  pub session_type: String,
  #[serde(default)]
  pub duration_minutes: Option<u32>,
  #[serde(default)]
  pub distance_km: Option<f64>,
  #[serde(default)]
  pub intensity: Option<String>,
  #[serde(default)]
  pub notes: Option<String>,
}

/// Training content of a day: everything except its identity fields
#[derive(Debug, Clone, PartialEq)]
pub struct DayContent {
  pub is_rest_day: bool,
  pub training_type: TrainingType,
  pub justification: Option<String>,
  pub strength_exercises: Vec<StrengthExercise>,
  pub endurance_sessions: Vec<EnduranceSession>,
}

impl Plan {
  pub fn days(&self) -> impl Iterator<Item = &Day> {
    self.weeks.iter().flat_map(|w| w.days.iter())
  }

  pub fn days_mut(&mut self) -> impl Iterator<Item = &mut Day> {
    self.weeks.iter_mut().flat_map(|w| w.days.iter_mut())
  }

  pub fn exercises(&self) -> impl Iterator<Item = &StrengthExercise> {
    self.days().flat_map(|d| d.strength_exercises.iter())
  }

  pub fn exercises_mut(&mut self) -> impl Iterator<Item = &mut StrengthExercise> {
    self.days_mut().flat_map(|d| d.strength_exercises.iter_mut())
  }

  /// Describe every structural invariant the plan currently breaks.
  /// An empty list means the plan is safe to persist.
  pub fn invariant_violations(&self) -> Vec<String> {
    let mut violations = Vec::new();

    for week in &self.weeks {
      let mut seen = Vec::new();
      for day in &week.days {
        if seen.contains(&day.day_of_week) {
          violations.push(format!(
            "week {}: {} appears more than once",
            week.week_number, day.day_of_week
          ));
        }
        seen.push(day.day_of_week);

        if day.is_rest_day
          && (!day.strength_exercises.is_empty()
            || !day.endurance_sessions.is_empty()
            || day.training_type != TrainingType::Rest)
        {
          violations.push(format!(
            "week {}: rest day {} still carries training",
            week.week_number, day.day_of_week
          ));
        }

        for ex in &day.strength_exercises {
          if !ex.is_consistent() {
            violations.push(format!(
              "week {}: {} '{}' has sets={} reps={} weight={}",
              week.week_number,
              day.day_of_week,
              ex.exercise_name,
              ex.sets,
              ex.reps.len(),
              ex.weight.len()
            ));
          }
        }
      }
    }

    violations
  }
}

impl Day {
  pub fn content(&self) -> DayContent {
    DayContent {
      is_rest_day: self.is_rest_day,
      training_type: self.training_type,
      justification: self.justification.clone(),
      strength_exercises: self.strength_exercises.clone(),
      endurance_sessions: self.endurance_sessions.clone(),
    }
  }

  /// Replace this day's training content, re-pointing the moved
  /// exercises and sessions at this day
  pub fn set_content(&mut self, content: DayContent) {
    self.is_rest_day = content.is_rest_day;
    self.training_type = content.training_type;
    self.justification = content.justification;
    self.strength_exercises = content.strength_exercises;
    self.endurance_sessions = content.endurance_sessions;

    for ex in &mut self.strength_exercises {
      ex.daily_training_id = self.id;
    }
    for session in &mut self.endurance_sessions {
      session.daily_training_id = self.id;
    }
  }

  pub fn make_rest_day(&mut self) {
    self.set_content(DayContent::rest());
  }
}

impl DayContent {
  pub fn rest() -> Self {
    Self {
      is_rest_day: true,
      training_type: TrainingType::Rest,
      justification: Some(REST_DAY_NOTE.to_string()),
      strength_exercises: Vec::new(),
      endurance_sessions: Vec::new(),
    }
  }
}

impl StrengthExercise {
  /// `len(reps) == len(weight) == sets`
  pub fn is_consistent(&self) -> bool {
    self.reps.len() == self.sets as usize && self.weight.len() == self.sets as usize
  }
}
