//! Shared types for the quiz engine

use serde::{Deserialize, Serialize};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Newtype wrapper for point IDs to provide type safety
///
/// IDs are stable catalog identifiers, never positional indices: persisted
/// answers must survive the catalog being reordered between releases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub String);

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PointId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// WGS-84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A geo-tagged quiz question
///
/// `was_correct` is only meaningful once `answered` is true. The answered
/// flag is a one-way transition; nothing in the engine ever clears it.
#[derive(Debug, Clone)]
pub struct PointOfInterest {
    pub id: PointId,
    pub position: GeoPoint,
    pub title: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub answered: bool,
    pub was_correct: bool,
}

impl PointOfInterest {
    /// Full option set shown to the user (caller shuffles per display)
    pub fn options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(1 + self.incorrect_answers.len());
        options.push(self.correct_answer.clone());
        options.extend(self.incorrect_answers.iter().cloned());
        options
    }
}

/// Raw catalog record as found in dataset JSON files
///
/// Field aliases accept the legacy Spanish field names still present in
/// older dataset files. All fields are defaulted so that one malformed
/// record cannot abort deserialization of the whole catalog; validation
/// happens in `PointStore::load`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default, alias = "titulo")]
    pub title: String,
    #[serde(default, alias = "pregunta")]
    pub question: String,
    #[serde(default, alias = "respuestas")]
    pub answers: AnswerSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerSet {
    #[serde(default, alias = "correcta")]
    pub correct: String,
    #[serde(default, alias = "incorrectas")]
    pub incorrect: Vec<String>,
}

/// Display regime derived from distance bands and timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// No unanswered point within the info radius (or no position yet)
    Away,
    /// Within info radius but outside the active radius
    Near,
    /// Within active radius, question on screen
    ActiveQuestion,
    /// Post-answer suppression window
    Cooldown,
    /// Every point in the dataset answered; terminal until a reload
    Complete,
}

impl QuizState {
    pub fn as_str(&self) -> &str {
        match self {
            QuizState::Away => "away",
            QuizState::Near => "near",
            QuizState::ActiveQuestion => "active_question",
            QuizState::Cooldown => "cooldown",
            QuizState::Complete => "complete",
        }
    }
}

/// External input consumed by the engine loop
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// New position reading from the location collaborator
    Position(GeoPoint),
    /// New heading reading, degrees clockwise from north; None = unavailable
    Heading(Option<f64>),
    /// User picked an answer for a point
    Answer { point_id: PointId, answer: String },
    /// Cooldown timer fired; stale generations are ignored
    CooldownElapsed { generation: u64 },
    /// Position stream error; terminal means no further readings will come
    PositionLost { terminal: bool },
}

/// One judged answer in the session log
#[derive(Debug, Clone, Serialize)]
pub struct AnsweredEntry {
    pub point_id: PointId,
    pub correct: bool,
    pub ts_ms: u64,
}

/// Per-process session state
///
/// The answered log is append-only and grows monotonically; the transient
/// fields reset on scan/reload.
#[derive(Debug, Default)]
pub struct QuizSession {
    pub active_point_id: Option<PointId>,
    pub cooldown_until: Option<Instant>,
    pub answered_log: Vec<AnsweredEntry>,
    pub correct_count: u32,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Current epoch time in milliseconds
pub fn epoch_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_record_aliases() {
        let json = r#"{
            "id": "p1",
            "lat": 41.38,
            "lng": 2.17,
            "titulo": "Catedral",
            "pregunta": "¿Año de construcción?",
            "respuestas": { "correcta": "1298", "incorrectas": ["1492", "1888"] }
        }"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "Catedral");
        assert_eq!(record.question, "¿Año de construcción?");
        assert_eq!(record.answers.correct, "1298");
        assert_eq!(record.answers.incorrect.len(), 2);
    }

    #[test]
    fn test_catalog_record_tolerates_missing_fields() {
        let record: CatalogRecord = serde_json::from_str(r#"{"id": "p2"}"#).unwrap();
        assert_eq!(record.id, "p2");
        assert!(record.lat.is_none());
        assert!(record.answers.correct.is_empty());
    }

    #[test]
    fn test_options_puts_correct_first_before_shuffle() {
        let point = PointOfInterest {
            id: PointId::from("p1"),
            position: GeoPoint::new(0.0, 0.0),
            title: "t".to_string(),
            question: "q".to_string(),
            correct_answer: "a".to_string(),
            incorrect_answers: vec!["b".to_string(), "c".to_string()],
            answered: false,
            was_correct: false,
        };
        assert_eq!(point.options(), vec!["a", "b", "c"]);
    }
}
