//! Per-operation plan mutators
//!
//! Each mutator works on the batch's private copy of the plan and either
//! finishes its change or returns an error before touching anything it
//! cannot complete. All of them leave every exercise they touch with
//! `len(reps) == len(weight) == sets`.

mod exercises;
mod intensity;
mod quantity;
mod schedule;
mod swap;
mod volume;

pub use exercises::{add_exercise, remove_exercise};
pub use intensity::adjust_intensity;
pub use quantity::{DEFAULT_FILL_REPS, DEFAULT_FILL_WEIGHT};
pub use schedule::{add_rest_day, move_day};
pub use swap::swap_exercise;
pub use volume::adjust_volume;

use crate::error::ApplyError;
use crate::resolver::EntityResolver;
use crate::similarity::SimilarityScorer;
use crate::temp_id::TempIdAllocator;

/// Collaborators and per-batch state shared by the mutators
pub struct MutationContext<'a> {
  pub scorer: &'a dyn SimilarityScorer,
  pub resolver: EntityResolver<'a>,
  pub temp_ids: TempIdAllocator,
}

/// A field that is optional on the wire but required for the chosen scope
fn required<'a>(value: Option<&'a str>, field: &str, context: &str) -> Result<&'a str, ApplyError> {
  crate::models::operation::non_blank(value)
    .ok_or_else(|| ApplyError::MalformedOperation(format!("{} requires {}", context, field)))
}
