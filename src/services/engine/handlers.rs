//! Event handlers for the Engine
//!
//! Each handler consumes one external event and returns the render intents
//! it produced. State transitions never touch presentation directly.

use super::Engine;
use crate::domain::render::{format_distance, RenderIntent};
use crate::domain::types::{GeoPoint, PointId, QuizState};
use crate::services::{compass, scanner};
use rand::seq::SliceRandom;
use std::time::Instant;
use tracing::{debug, info, warn};

impl Engine {
    /// Re-evaluate the distance band for a new position reading
    ///
    /// Band boundaries: a question activates strictly inside the active
    /// radius (exactly 50.0 m is still NEAR); the distance hint shows up to
    /// and including the info radius.
    pub(crate) fn handle_position(&mut self, position: GeoPoint, now: Instant) -> Vec<RenderIntent> {
        self.last_position = Some(position);

        // Complete is terminal per dataset; nothing to re-evaluate
        if self.state == QuizState::Complete {
            return Vec::new();
        }

        let mut intents = Vec::new();

        let Some(nearest) = scanner::nearest(&self.store, position) else {
            if self.store.is_empty() {
                self.state = QuizState::Away;
                return intents;
            }
            // Non-empty catalog, nothing left unanswered
            self.state = QuizState::Complete;
            self.current_target = None;
            self.session.active_point_id = None;
            intents.push(RenderIntent::HideQuestion);
            intents.push(RenderIntent::HideDistance);
            intents.push(RenderIntent::RotateIndicator { angle: None });
            info!(answered = %self.store.answered_count(), "dataset_complete");
            return intents;
        };

        self.current_target = Some((nearest.point_id.clone(), nearest.position));
        let in_cooldown = self.in_cooldown(now);

        if nearest.distance_m < self.config.active_radius_m() && !in_cooldown {
            // Only render when the nearest id changed; re-rendering on every
            // tick would re-shuffle the options under the user's finger
            if self.session.active_point_id.as_ref() != Some(&nearest.point_id) {
                if let Some(point) = self.store.get(&nearest.point_id) {
                    let mut options = point.options();
                    options.shuffle(&mut self.rng);

                    intents.push(RenderIntent::HideDistance);
                    intents.push(RenderIntent::ShowQuestion {
                        point_id: point.id.clone(),
                        text: point.question.clone(),
                        options,
                    });
                    info!(
                        point_id = %nearest.point_id,
                        distance_m = %format!("{:.1}", nearest.distance_m),
                        "question_shown"
                    );
                    self.session.active_point_id = Some(nearest.point_id.clone());
                }
            }
            self.state = QuizState::ActiveQuestion;
        } else if nearest.distance_m <= self.config.info_radius_m() {
            if self.session.active_point_id.take().is_some() {
                intents.push(RenderIntent::HideQuestion);
            }
            intents.push(RenderIntent::ShowDistance { text: format_distance(nearest.distance_m) });
            if !in_cooldown {
                self.state = QuizState::Near;
            }
        } else {
            if self.session.active_point_id.take().is_some() {
                intents.push(RenderIntent::HideQuestion);
            }
            intents.push(RenderIntent::HideDistance);
            if !in_cooldown {
                self.state = QuizState::Away;
            }
        }

        intents
    }

    /// Recompute the indicator angle for a heading reading
    ///
    /// Independent of the quiz band: only needs the latest position and the
    /// current target.
    pub(crate) fn handle_heading(&mut self, heading: Option<f64>) -> Vec<RenderIntent> {
        self.last_heading = heading;

        let target = self.current_target.as_ref().map(|(_, position)| *position);
        let angle = match self.last_position {
            Some(user) => match compass::display_angle(user, target, heading) {
                Some(angle) => Some(angle),
                None if heading.is_none() && self.config.north_relative_fallback() => {
                    compass::north_relative_angle(user, target)
                }
                None => None,
            },
            None => None,
        };

        vec![RenderIntent::RotateIndicator { angle }]
    }

    /// Judge a submitted answer and open the cooldown window
    ///
    /// Rejections (unknown point, already answered) produce no intents; the
    /// judge surfaces them as results and they are logged here.
    pub(crate) fn handle_answer(&mut self, point_id: &PointId, answer: &str, now: Instant) -> Vec<RenderIntent> {
        let verdict = match self.judge.submit(&mut self.store, &mut self.session, point_id, answer) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(point_id = %point_id, error = %e, "answer_rejected");
                return Vec::new();
            }
        };

        let mut intents = Vec::new();
        let (title, correct_answer) = match self.store.get(point_id) {
            Some(point) => (point.title.clone(), point.correct_answer.clone()),
            None => (String::new(), String::new()),
        };

        intents.push(RenderIntent::ShowFeedback {
            correct: verdict.correct,
            correct_answer: if verdict.correct { None } else { Some(correct_answer) },
        });
        if verdict.correct {
            intents.push(RenderIntent::ShowScore { correct_count: self.session.correct_count });
        }
        intents.push(RenderIntent::AppendHistoryEntry { title, correct: verdict.correct });
        intents.push(RenderIntent::HideQuestion);

        self.session.active_point_id = None;
        self.arm_cooldown(now);

        intents
    }

    /// Cooldown expiry: re-scan from scratch at the last known position
    ///
    /// A stale generation means the timer was invalidated (dataset reload)
    /// after it was armed; ignore it.
    pub(crate) fn handle_cooldown_elapsed(&mut self, generation: u64, now: Instant) -> Vec<RenderIntent> {
        if generation != self.cooldown_generation {
            debug!(
                stale_generation = %generation,
                current_generation = %self.cooldown_generation,
                "cooldown_timer_stale"
            );
            return Vec::new();
        }

        self.cooldown_deadline = None;
        self.session.cooldown_until = None;

        if self.state != QuizState::Cooldown {
            return Vec::new();
        }

        debug!("cooldown_elapsed");
        match self.last_position {
            Some(position) => {
                self.state = QuizState::Away;
                self.handle_position(position, now)
            }
            None => {
                self.state = QuizState::Away;
                Vec::new()
            }
        }
    }

    /// Position stream failure; terminal errors clear everything that
    /// depends on knowing where the user is
    pub(crate) fn handle_position_lost(&mut self, terminal: bool) -> Vec<RenderIntent> {
        if !terminal {
            debug!("position_timeout");
            return Vec::new();
        }

        warn!("position_stream_lost");
        self.last_position = None;
        self.current_target = None;
        let had_question = self.session.active_point_id.take().is_some();
        if self.state != QuizState::Complete {
            self.state = QuizState::Away;
        }

        let mut intents = Vec::new();
        if had_question {
            intents.push(RenderIntent::HideQuestion);
        }
        intents.push(RenderIntent::HideDistance);
        intents.push(RenderIntent::RotateIndicator { angle: None });
        intents
    }
}
