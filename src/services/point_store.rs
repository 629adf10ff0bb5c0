//! Catalog of points of interest and their answered status
//!
//! The store exclusively owns the `PointOfInterest` records. Scanner and
//! engine only read them; the answered flag is mutated through
//! `mark_answered` alone, called by the answer judge.

use crate::domain::error::{CatalogError, RecordError};
use crate::domain::types::{CatalogRecord, GeoPoint, PointId, PointOfInterest};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Outcome of a catalog load: how many records survived validation and why
/// the rest were excluded
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub excluded: Vec<(String, RecordError)>,
}

#[derive(Debug, Default)]
pub struct PointStore {
    /// Catalog order is insertion order; the scanner's tie-break depends on it
    points: Vec<PointOfInterest>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog with validated records
    ///
    /// Malformed records are excluded individually and reported; a duplicate
    /// id among the valid records rejects the whole load and leaves the
    /// current catalog untouched.
    pub fn load(&mut self, records: Vec<CatalogRecord>) -> Result<LoadReport, CatalogError> {
        let mut report = LoadReport::default();
        let mut points = Vec::with_capacity(records.len());
        let mut seen = HashSet::new();

        for record in records {
            let label = if record.id.is_empty() { "<no id>".to_string() } else { record.id.clone() };
            match Self::validate(record) {
                Ok(point) => {
                    if !seen.insert(point.id.clone()) {
                        return Err(CatalogError::DuplicateId { id: point.id });
                    }
                    points.push(point);
                }
                Err(e) => {
                    warn!(record = %label, reason = %e, "catalog_record_excluded");
                    report.excluded.push((label, e));
                }
            }
        }

        report.loaded = points.len();
        self.points = points;
        debug!(loaded = %report.loaded, excluded = %report.excluded.len(), "catalog_loaded");
        Ok(report)
    }

    fn validate(record: CatalogRecord) -> Result<PointOfInterest, RecordError> {
        if record.id.trim().is_empty() {
            return Err(RecordError::MissingId);
        }
        let (lat, lng) = match (record.lat, record.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => (lat, lng),
            _ => return Err(RecordError::MissingCoordinates),
        };
        if record.question.trim().is_empty() {
            return Err(RecordError::EmptyQuestion);
        }
        if record.answers.correct.trim().is_empty() {
            return Err(RecordError::EmptyCorrectAnswer);
        }
        if record.answers.incorrect.is_empty() {
            return Err(RecordError::NoIncorrectAnswers);
        }
        let mut options = HashSet::new();
        options.insert(record.answers.correct.as_str());
        for incorrect in &record.answers.incorrect {
            if !options.insert(incorrect.as_str()) {
                return Err(RecordError::DuplicateOption(incorrect.clone()));
            }
        }

        Ok(PointOfInterest {
            id: PointId(record.id),
            position: GeoPoint::new(lat, lng),
            title: record.title,
            question: record.question,
            correct_answer: record.answers.correct,
            incorrect_answers: record.answers.incorrect,
            answered: false,
            was_correct: false,
        })
    }

    /// Apply a persisted id -> correct mapping
    ///
    /// Unknown ids are ignored without error; the catalog for a dataset may
    /// have evolved since the answers were saved.
    pub fn restore(&mut self, answered: &HashMap<PointId, bool>) {
        for point in &mut self.points {
            if let Some(&correct) = answered.get(&point.id) {
                point.answered = true;
                point.was_correct = correct;
            }
        }
    }

    /// One-way answered transition; idempotent
    ///
    /// Returns the effective `was_correct`: the supplied value on the first
    /// call, the prior result on any repeat (never overwritten). None for an
    /// unknown id.
    pub fn mark_answered(&mut self, id: &PointId, correct: bool) -> Option<bool> {
        let point = self.points.iter_mut().find(|p| &p.id == id)?;
        if point.answered {
            debug!(point_id = %id, was_correct = %point.was_correct, "mark_answered_noop");
            return Some(point.was_correct);
        }
        point.answered = true;
        point.was_correct = correct;
        Some(correct)
    }

    /// Unanswered points in catalog order
    pub fn unanswered_snapshot(&self) -> Vec<&PointOfInterest> {
        self.points.iter().filter(|p| !p.answered).collect()
    }

    pub fn get(&self, id: &PointId) -> Option<&PointOfInterest> {
        self.points.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        self.points.iter().filter(|p| p.answered).count()
    }

    /// Non-empty catalog with every point answered
    pub fn is_complete(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|p| p.answered)
    }

    /// The id -> correct mapping handed to persistence
    pub fn answered_map(&self) -> HashMap<PointId, bool> {
        self.points
            .iter()
            .filter(|p| p.answered)
            .map(|p| (p.id.clone(), p.was_correct))
            .collect()
    }
}
