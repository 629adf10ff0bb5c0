//! Render intents emitted toward the presentation layer
//!
//! The engine never touches presentation directly; it describes what should
//! be on screen as data and a sink forwards it. Intents are idempotent from
//! the consumer's point of view (hiding an already-hidden panel is a no-op).

use crate::domain::types::PointId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum RenderIntent {
    /// Show a question panel; options are freshly shuffled per display
    ShowQuestion { point_id: PointId, text: String, options: Vec<String> },
    HideQuestion,
    /// Show the human-readable distance hint to the nearest unanswered point
    ShowDistance { text: String },
    HideDistance,
    /// Rotate the directional indicator; None hides it
    RotateIndicator { angle: Option<f64> },
    /// Post-answer feedback; carries the correct answer text on a miss
    ShowFeedback { correct: bool, correct_answer: Option<String> },
    /// Running correct-answer count
    ShowScore { correct_count: u32 },
    AppendHistoryEntry { title: String, correct: bool },
}

/// Meters below 1 km, kilometers to one decimal above
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance_meters() {
        assert_eq!(format_distance(49.4), "49 m");
        assert_eq!(format_distance(49.6), "50 m");
        assert_eq!(format_distance(999.4), "999 m");
    }

    #[test]
    fn test_format_distance_kilometers() {
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(1250.0), "1.2 km");
        assert_eq!(format_distance(12_340.0), "12.3 km");
    }

    #[test]
    fn test_intent_serializes_tagged() {
        let intent = RenderIntent::ShowDistance { text: "120 m".to_string() };
        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(json, r#"{"intent":"show_distance","text":"120 m"}"#);
    }

    #[test]
    fn test_rotate_indicator_none_serializes_null() {
        let json = serde_json::to_string(&RenderIntent::RotateIndicator { angle: None }).unwrap();
        assert_eq!(json, r#"{"intent":"rotate_indicator","angle":null}"#);
    }
}
