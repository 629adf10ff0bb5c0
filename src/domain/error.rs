//! Typed failure taxonomy
//!
//! Nothing here is fatal: catalog problems exclude records or reject the
//! load, submission problems are rejected back to the caller, and stream or
//! persistence problems are surfaced as state.

use crate::domain::types::PointId;
use thiserror::Error;

/// Rejection of an entire catalog load
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate point id {id}")]
    DuplicateId { id: PointId },
}

/// Per-record exclusion reason; the rest of the load continues
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record has no id")]
    MissingId,
    #[error("missing or non-finite coordinates")]
    MissingCoordinates,
    #[error("empty question text")]
    EmptyQuestion,
    #[error("empty correct answer")]
    EmptyCorrectAnswer,
    #[error("no incorrect answers")]
    NoIncorrectAnswers,
    #[error("duplicate answer option {0:?}")]
    DuplicateOption(String),
}

/// Rejection of an answer submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("unknown point {0}")]
    UnknownPoint(PointId),
    #[error("point {0} already answered")]
    AlreadyAnswered(PointId),
}
