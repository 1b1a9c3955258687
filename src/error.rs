//! Error types for plan editing, configuration and catalog storage

use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Operation Errors
/// ---------------------------------------------------------------------------

/// Reasons a single operation could not be applied.
///
/// Every variant is local to one operation: the batch executor records it
/// and moves on to the next operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ApplyError {
  #[error("day not found: {0}")]
  DayNotFound(String),

  #[error("exercise not found: '{name}' on {day}")]
  ExerciseNotFound { day: String, name: String },

  #[error("could not resolve exercise: {0}")]
  EntityResolutionFailed(String),

  #[error("catalog match '{name}' has invalid id {id}")]
  InvalidCatalogMatch { id: i64, name: String },

  #[error("unknown operation type: {0}")]
  UnknownOperationType(String),

  #[error("malformed operation: {0}")]
  MalformedOperation(String),
}

/// ---------------------------------------------------------------------------
/// Configuration Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value}")]
  Invalid { key: String, value: String },
}

/// ---------------------------------------------------------------------------
/// Database Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DbError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Migration failed: {0}")]
  Migration(String),

  #[error("IO error: {0}")]
  Io(String),
}

impl From<sqlx::Error> for DbError {
  fn from(e: sqlx::Error) -> Self {
    DbError::Database(e.to_string())
  }
}

impl From<sqlx::migrate::MigrateError> for DbError {
  fn from(e: sqlx::migrate::MigrateError) -> Self {
    DbError::Migration(e.to_string())
  }
}

impl From<std::io::Error> for DbError {
  fn from(e: std::io::Error) -> Self {
    DbError::Io(e.to_string())
  }
}
