//! Answer judging and the single mutation site for answered status

use crate::domain::error::SubmitError;
use crate::domain::types::{epoch_ms, AnsweredEntry, PointId, QuizSession};
use crate::io::persistence::PersistenceAdapter;
use crate::services::point_store::PointStore;
use tracing::{info, warn};

/// Outcome of an accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    /// False when the best-effort persistence write failed; the in-memory
    /// result still stands
    pub saved: bool,
}

pub struct AnswerJudge {
    dataset_id: String,
    persistence: Box<dyn PersistenceAdapter>,
}

impl AnswerJudge {
    pub fn new(dataset_id: &str, persistence: Box<dyn PersistenceAdapter>) -> Self {
        Self { dataset_id: dataset_id.to_string(), persistence }
    }

    pub fn set_dataset(&mut self, dataset_id: &str) {
        self.dataset_id = dataset_id.to_string();
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// Apply saved answers for the current dataset to the store
    pub fn restore(&self, store: &mut PointStore) -> usize {
        let saved = self.persistence.load(&self.dataset_id);
        store.restore(&saved);
        saved.len()
    }

    /// Validate a submitted choice, mark the point answered, log it, persist
    ///
    /// Rejections are results, not silent successes: an unknown id or an
    /// already-answered point never reaches the store.
    pub fn submit(
        &mut self,
        store: &mut PointStore,
        session: &mut QuizSession,
        point_id: &PointId,
        chosen: &str,
    ) -> Result<Verdict, SubmitError> {
        let correct = {
            let point = store.get(point_id).ok_or_else(|| SubmitError::UnknownPoint(point_id.clone()))?;
            if point.answered {
                return Err(SubmitError::AlreadyAnswered(point_id.clone()));
            }
            chosen == point.correct_answer
        };

        store.mark_answered(point_id, correct);
        session.answered_log.push(AnsweredEntry {
            point_id: point_id.clone(),
            correct,
            ts_ms: epoch_ms(),
        });
        if correct {
            session.correct_count += 1;
        }

        let saved = self.persistence.save(&self.dataset_id, &store.answered_map());
        if saved {
            info!(point_id = %point_id, correct = %correct, "answer_judged");
        } else {
            warn!(point_id = %point_id, correct = %correct, "answer_judged_unsaved");
        }

        Ok(Verdict { correct, saved })
    }
}
