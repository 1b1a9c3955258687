//! Typed plan edit operations
//!
//! Operations arrive already classified by the upstream feedback step. On the
//! wire they are JSON objects tagged by `type`; each raw object is parsed on
//! its own so that one unreadable operation never poisons the rest of a batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApplyError;

/// ---------------------------------------------------------------------------
/// Operation
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
  SwapExercise(SwapExercise),
  AdjustIntensity(AdjustIntensity),
  MoveDay(MoveDay),
  AddRestDay(AddRestDay),
  AdjustVolume(AdjustVolume),
  AddExercise(AddExercise),
  RemoveExercise(RemoveExercise),
}

impl Operation {
  pub const KINDS: [&'static str; 7] = [
    "swap_exercise",
    "adjust_intensity",
    "move_day",
    "add_rest_day",
    "adjust_volume",
    "add_exercise",
    "remove_exercise",
  ];

  /// Wire tag of this operation
  pub fn kind(&self) -> &'static str {
    match self {
      Operation::SwapExercise(_) => "swap_exercise",
      Operation::AdjustIntensity(_) => "adjust_intensity",
      Operation::MoveDay(_) => "move_day",
      Operation::AddRestDay(_) => "add_rest_day",
      Operation::AdjustVolume(_) => "adjust_volume",
      Operation::AddExercise(_) => "add_exercise",
      Operation::RemoveExercise(_) => "remove_exercise",
    }
  }

  /// Parse one raw operation.
  ///
  /// A `type` outside the known kinds is `UnknownOperationType`; a known kind
  /// with missing or ill-typed fields is `MalformedOperation`.
  pub fn from_value(value: &Value) -> Result<Self, ApplyError> {
    let tag = value
      .get("type")
      .and_then(Value::as_str)
      .ok_or_else(|| ApplyError::MalformedOperation("missing 'type' field".to_string()))?;

    if !Self::KINDS.contains(&tag) {
      return Err(ApplyError::UnknownOperationType(tag.to_string()));
    }

    serde_json::from_value(value.clone())
      .map_err(|e| ApplyError::MalformedOperation(format!("{}: {}", tag, e)))
  }
}

/// Best-effort tag of a raw operation, for failure manifests
pub fn raw_kind(value: &Value) -> String {
  value
    .get("type")
    .and_then(Value::as_str)
    .unwrap_or("unknown")
    .to_string()
}

/// ---------------------------------------------------------------------------
/// Scopes and Directions
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityScope {
  Exercise,
  Day,
  Week,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeScope {
  Day,
  Week,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
  Easier,
  Harder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeChange {
  Sets,
  Reps,
}

/// ---------------------------------------------------------------------------
/// Payloads
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapExercise {
  pub day_of_week: String,
  pub old_exercise_name: String,
  pub new_exercise_name: String,
  #[serde(default)]
  pub new_main_muscle: Option<String>,
  #[serde(default)]
  pub new_equipment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustIntensity {
  pub scope: IntensityScope,
  #[serde(default)]
  pub day_of_week: Option<String>,
  #[serde(default)]
  pub exercise_name: Option<String>,
  pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDay {
  pub source_day: String,
  pub target_day: String,
  pub swap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRestDay {
  pub day_of_week: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustVolume {
  pub scope: VolumeScope,
  #[serde(default)]
  pub day_of_week: Option<String>,
  pub change_type: VolumeChange,
  pub adjustment: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExercise {
  pub day_of_week: String,
  pub new_exercise_name: String,
  #[serde(default)]
  pub new_main_muscle: Option<String>,
  #[serde(default)]
  pub new_equipment: Option<String>,
  #[serde(default)]
  pub sets: Option<u32>,
  #[serde(default)]
  pub reps: Option<Vec<u32>>,
  #[serde(default, rename = "weight_1rm")]
  pub weight: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveExercise {
  pub day_of_week: String,
  pub exercise_name: String,
}

/// Treat blank strings the same as absent ones
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|s| !s.is_empty())
}
