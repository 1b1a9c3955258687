//! Helpers for the per-set `reps` / `weight` arrays

/// Reps used to grow an empty array
pub const DEFAULT_FILL_REPS: u32 = 10;

/// Weight used to grow an empty array
pub const DEFAULT_FILL_WEIGHT: f64 = 80.0;

/// Most sets any mutator will leave on an exercise
pub const SETS_CEILING: u32 = 6;

/// Resize `values` to `len`, growing by repeating the last element
/// (or `default` when empty) and shrinking by truncation
pub fn resize_repeating_last<T: Clone>(values: &mut Vec<T>, len: usize, default: T) {
  if values.len() < len {
    let fill = values.last().cloned().unwrap_or(default);
    values.resize(len, fill);
  } else {
    values.truncate(len);
  }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

/// Multiply and truncate toward zero, never going below `floor`
pub fn scale_reps(reps: u32, factor: f64, floor: u32) -> u32 {
  ((reps as f64 * factor) as u32).max(floor)
}
