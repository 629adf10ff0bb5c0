//! End-to-end walk-up scenario through the public API
//!
//! Point A sits at (0, 0). The user approaches along the equator: outside
//! the info radius, into the hint band, across the 50 m boundary, answers,
//! waits out the cooldown, and the dataset completes. Answered state is
//! persisted to disk and survives a fresh engine for the same dataset.

use geoquiz::domain::render::RenderIntent;
use geoquiz::domain::types::{EngineEvent, GeoPoint, PointId, QuizState};
use geoquiz::infra::Config;
use geoquiz::io::FilePersistence;
use geoquiz::services::{AnswerJudge, Engine};
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn catalog_json() -> &'static str {
    r#"[
        {"id": "A", "lat": 0.0, "lng": 0.0, "title": "Point A",
         "question": "What is here?", "answers": {"correct": "a fountain", "incorrect": ["a statue", "a bridge"]}}
    ]"#
}

fn position(lng: f64) -> EngineEvent {
    EngineEvent::Position(GeoPoint::new(0.0, lng))
}

#[test]
fn test_full_walk_up_and_completion() {
    let dir = tempdir().unwrap();
    let answers_file = dir.path().join("answers.json");

    let records = serde_json::from_str(catalog_json()).unwrap();
    let persistence = Box::new(FilePersistence::new(answers_file.to_str().unwrap()));
    let judge = AnswerJudge::new("walk-test", persistence);
    let mut engine = Engine::new(Config::default(), judge);
    engine.load_dataset("walk-test", records).unwrap();

    let t0 = Instant::now();

    // Far away: nothing shown
    engine.process_event(position(0.01), t0);
    assert_eq!(engine.state(), QuizState::Away);

    // ~50.04 m: hint band, boundary exclusive on the near side
    engine.process_event(position(0.00045), t0);
    assert_eq!(engine.state(), QuizState::Near);

    // ~48.9 m: question for A appears, one correct + two incorrect options
    let intents = engine.process_event(position(0.00044), t0);
    assert_eq!(engine.state(), QuizState::ActiveQuestion);
    let question = intents
        .iter()
        .find_map(|i| match i {
            RenderIntent::ShowQuestion { point_id, options, .. } => Some((point_id, options)),
            _ => None,
        })
        .expect("question should render");
    assert_eq!(question.0, &PointId::from("A"));
    assert_eq!(question.1.len(), 3);
    assert!(question.1.contains(&"a fountain".to_string()));

    // Correct answer: cooldown opens, store updated, score shown
    let intents = engine.process_event(
        EngineEvent::Answer { point_id: PointId::from("A"), answer: "a fountain".to_string() },
        t0,
    );
    assert_eq!(engine.state(), QuizState::Cooldown);
    assert!(engine.store().get(&PointId::from("A")).unwrap().answered);
    assert!(intents.contains(&RenderIntent::ShowScore { correct_count: 1 }));

    // Cooldown expiry re-scans; everything answered, dataset complete
    let generation = engine.cooldown_generation();
    engine.process_event(
        EngineEvent::CooldownElapsed { generation },
        t0 + Duration::from_millis(3100),
    );
    assert_eq!(engine.state(), QuizState::Complete);

    // A fresh engine for the same dataset restores the answered flag from disk
    let records = serde_json::from_str(catalog_json()).unwrap();
    let persistence = Box::new(FilePersistence::new(answers_file.to_str().unwrap()));
    let judge = AnswerJudge::new("walk-test", persistence);
    let mut fresh = Engine::new(Config::default(), judge);
    fresh.load_dataset("walk-test", records).unwrap();

    assert_eq!(fresh.state(), QuizState::Complete);
    let point = fresh.store().get(&PointId::from("A")).unwrap();
    assert!(point.answered);
    assert!(point.was_correct);
}
