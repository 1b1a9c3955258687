//! Temporary ids for exercises created during a batch
//!
//! Persistence assigns positive ids. Until then, new exercises carry a
//! negative id from this allocator. The counter starts below every id already
//! in the plan, so ids left over from an earlier, unsaved batch are never
//! reused.

use crate::models::Plan;

#[derive(Debug, Clone)]
pub struct TempIdAllocator {
  next: i64,
}

impl TempIdAllocator {
  pub fn new() -> Self {
    Self { next: -1 }
  }

  /// Allocator whose first id is below every exercise and session id in `plan`
  pub fn for_plan(plan: &Plan) -> Self {
    let lowest = plan
      .days()
      .flat_map(|d| {
        d.strength_exercises
          .iter()
          .filter_map(|e| e.id)
          .chain(d.endurance_sessions.iter().filter_map(|s| s.id))
      })
      .min()
      .unwrap_or(0);

    Self {
      next: lowest.min(0) - 1,
    }
  }

  pub fn allocate(&mut self) -> i64 {
    let id = self.next;
    self.next -= 1;
    id
  }
}

impl Default for TempIdAllocator {
  fn default() -> Self {
    Self::new()
  }
}
