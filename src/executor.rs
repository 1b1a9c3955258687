//! Batch executor
//!
//! Applies an ordered list of operations to a private copy of a plan. Each
//! operation either lands completely or is recorded as a failure; a failure
//! never stops the batch and never rolls back operations that already landed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::CatalogMatcher;
use crate::config::ApplierConfig;
use crate::error::ApplyError;
use crate::models::operation::raw_kind;
use crate::models::{Operation, Plan};
use crate::mutators::{self, MutationContext};
use crate::resolver::EntityResolver;
use crate::similarity::SimilarityScorer;
use crate::temp_id::TempIdAllocator;

/// ---------------------------------------------------------------------------
/// Outcome
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationFailure {
  /// Position of the operation in the submitted batch
  pub index: usize,
  pub operation_type: String,
  pub error: ApplyError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyOutcome {
  pub plan: Plan,
  pub applied_count: usize,
  /// Indices of operations that landed, in order
  pub applied: Vec<usize>,
  pub failures: Vec<OperationFailure>,
  pub applied_at: DateTime<Utc>,
}

impl ApplyOutcome {
  pub fn all_applied(&self) -> bool {
    self.failures.is_empty()
  }
}

/// ---------------------------------------------------------------------------
/// Plan Applier
/// ---------------------------------------------------------------------------

pub struct PlanApplier<'a> {
  matcher: &'a dyn CatalogMatcher,
  scorer: Box<dyn SimilarityScorer>,
  max_popularity_rank: Option<u32>,
}

impl<'a> PlanApplier<'a> {
  pub fn new(matcher: &'a dyn CatalogMatcher, config: &ApplierConfig) -> Self {
    Self {
      matcher,
      scorer: config.scorer.build(),
      max_popularity_rank: config.max_popularity_rank,
    }
  }

  /// Use a specific scorer instead of the configured one
  pub fn with_scorer(mut self, scorer: Box<dyn SimilarityScorer>) -> Self {
    self.scorer = scorer;
    self
  }

  /// Apply typed operations in order
  pub fn apply(&self, plan: &Plan, operations: &[Operation]) -> ApplyOutcome {
    self.run(plan, operations.iter().map(|op| (op.kind().to_string(), Ok(op.clone()))))
  }

  /// Apply raw JSON operations in order.
  ///
  /// Each entry is parsed on its own; unknown or malformed entries are
  /// recorded as failures at their index.
  pub fn apply_json(&self, plan: &Plan, operations: &[Value]) -> ApplyOutcome {
    self.run(
      plan,
      operations
        .iter()
        .map(|raw| (raw_kind(raw), Operation::from_value(raw))),
    )
  }

  fn run<I>(&self, plan: &Plan, operations: I) -> ApplyOutcome
  where
    I: Iterator<Item = (String, Result<Operation, ApplyError>)>,
  {
    let mut working = plan.clone();
    let mut ctx = MutationContext {
      scorer: self.scorer.as_ref(),
      resolver: EntityResolver::new(self.matcher, self.max_popularity_rank),
      temp_ids: TempIdAllocator::for_plan(&working),
    };

    let mut applied = Vec::new();
    let mut failures = Vec::new();

    for (index, (kind, parsed)) in operations.enumerate() {
      match parsed.and_then(|op| self.apply_one(&mut working, &op, &mut ctx)) {
        Ok(()) => {
          tracing::info!(index, operation = %kind, "applied plan operation");
          applied.push(index);
        }
        Err(error) => {
          tracing::warn!(index, operation = %kind, reason = %error, "skipping plan operation");
          failures.push(OperationFailure {
            index,
            operation_type: kind,
            error,
          });
        }
      }
    }

    tracing::info!(
      applied = applied.len(),
      failed = failures.len(),
      "plan operation batch finished"
    );

    ApplyOutcome {
      plan: working,
      applied_count: applied.len(),
      applied,
      failures,
      applied_at: Utc::now(),
    }
  }

  /// Run one operation against a scratch copy and commit it only on success,
  /// so a mutator that fails midway leaves no partial edit behind
  fn apply_one(
    &self,
    plan: &mut Plan,
    op: &Operation,
    ctx: &mut MutationContext<'_>,
  ) -> Result<(), ApplyError> {
    let mut scratch = plan.clone();
    dispatch(&mut scratch, op, ctx)?;
    *plan = scratch;
    Ok(())
  }
}

fn dispatch(
  plan: &mut Plan,
  op: &Operation,
  ctx: &mut MutationContext<'_>,
) -> Result<(), ApplyError> {
  match op {
    Operation::SwapExercise(op) => mutators::swap_exercise(plan, op, ctx),
    Operation::AdjustIntensity(op) => mutators::adjust_intensity(plan, op, ctx),
    Operation::MoveDay(op) => mutators::move_day(plan, op),
    Operation::AddRestDay(op) => mutators::add_rest_day(plan, op),
    Operation::AdjustVolume(op) => mutators::adjust_volume(plan, op),
    Operation::AddExercise(op) => mutators::add_exercise(plan, op, ctx),
    Operation::RemoveExercise(op) => mutators::remove_exercise(plan, op, ctx),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
