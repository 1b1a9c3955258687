//! Free-text similarity scoring
//!
//! Exercise names coming out of user feedback rarely match the plan or the
//! catalog exactly ("bench" vs "Barbell Bench Press"). Everything that has to
//! line a human-written name up with stored content goes through a
//! `SimilarityScorer`, so the matching strategy can be swapped without
//! touching the mutators.

use serde::{Deserialize, Serialize};

/// Minimum score (inclusive) for a free-text name to count as a match
pub const NAME_MATCH_THRESHOLD: f64 = 70.0;

/// Scores two strings on a 0-100 scale, 100 meaning identical
pub trait SimilarityScorer: Send + Sync {
  fn score(&self, a: &str, b: &str) -> f64;

  fn is_match(&self, a: &str, b: &str) -> bool {
    self.score(a, b) >= NAME_MATCH_THRESHOLD
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
  #[default]
  Strsim,
  Substring,
}

impl ScorerKind {
  pub fn build(self) -> Box<dyn SimilarityScorer> {
    match self {
      ScorerKind::Strsim => Box::new(EditDistanceScorer),
      ScorerKind::Substring => Box::new(SubstringScorer),
    }
  }
}

impl std::str::FromStr for ScorerKind {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "strsim" => Ok(Self::Strsim),
      "substring" => Ok(Self::Substring),
      _ => Err(format!("Unknown scorer: {}", s)),
    }
  }
}

fn normalize(s: &str) -> String {
  s.split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

/// ---------------------------------------------------------------------------
/// Edit-distance scorer (default)
/// ---------------------------------------------------------------------------

/// Best of normalized Levenshtein and Sorensen-Dice bigram overlap.
///
/// Levenshtein rewards near-identical spellings; Dice rewards a short name
/// that is contained in a longer one ("Bench Press" in "Barbell Bench Press").
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceScorer;

impl SimilarityScorer for EditDistanceScorer {
  fn score(&self, a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
      return 0.0;
    }
    if a == b {
      return 100.0;
    }

    let levenshtein = strsim::normalized_levenshtein(&a, &b);
    let dice = strsim::sorensen_dice(&a, &b);
    (levenshtein.max(dice) * 100.0).clamp(0.0, 100.0)
  }
}

/// ---------------------------------------------------------------------------
/// Substring scorer (degraded fallback)
/// ---------------------------------------------------------------------------

/// 100 for equal names, 80 when one contains the other, otherwise 0
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringScorer;

impl SimilarityScorer for SubstringScorer {
  fn score(&self, a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
      0.0
    } else if a == b {
      100.0
    } else if a.contains(&b) || b.contains(&a) {
      80.0
    } else {
      0.0
    }
  }
}
