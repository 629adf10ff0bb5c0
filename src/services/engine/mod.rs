//! Quiz state machine and event orchestration
//!
//! The Engine is the central event processor that coordinates:
//! - Distance-band state (away / near / active question / cooldown / complete)
//! - Nearest-unanswered-point scanning per position update
//! - Answer judging and the post-answer cooldown window
//! - Directional indicator angles per heading update
//!
//! All mutation happens inside `process_event`, one event at a time. Every
//! transition is expressed as returned render intents, so the whole machine
//! is testable without a rendering surface.

mod handlers;

use crate::domain::error::CatalogError;
use crate::domain::render::RenderIntent;
use crate::domain::types::{CatalogRecord, EngineEvent, GeoPoint, PointId, QuizSession, QuizState};
use crate::infra::config::Config;
use crate::io::render::RenderSink;
use crate::services::judge::AnswerJudge;
use crate::services::point_store::{LoadReport, PointStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::info;

pub struct Engine {
    /// Catalog and answered status
    pub(crate) store: PointStore,
    /// Per-process session: answered log, score, transient question state
    pub(crate) session: QuizSession,
    /// Validates submissions and owns persistence
    pub(crate) judge: AnswerJudge,
    /// Current display regime
    pub(crate) state: QuizState,
    /// Application configuration
    pub(crate) config: Config,
    /// Latest position reading; no history, no smoothing
    pub(crate) last_position: Option<GeoPoint>,
    /// Latest heading, degrees clockwise from north
    pub(crate) last_heading: Option<f64>,
    /// Nearest unanswered point from the last scan, for the compass
    pub(crate) current_target: Option<(PointId, GeoPoint)>,
    /// Pending cooldown expiry; None when no window is open
    pub(crate) cooldown_deadline: Option<Instant>,
    /// Bumped on every arm and on dataset reload; a timer firing with a
    /// stale generation is ignored instead of corrupting state
    pub(crate) cooldown_generation: u64,
    /// Shuffles question options per display
    pub(crate) rng: StdRng,
}

impl Engine {
    pub fn new(config: Config, judge: AnswerJudge) -> Self {
        Self {
            store: PointStore::new(),
            session: QuizSession::new(),
            judge,
            state: QuizState::Away,
            config,
            last_position: None,
            last_heading: None,
            current_target: None,
            cooldown_deadline: None,
            cooldown_generation: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Load (or switch to) a dataset: validate the catalog, restore saved
    /// answers, and reset all transient quiz state
    ///
    /// Any pending cooldown timer is invalidated by the generation bump.
    pub fn load_dataset(
        &mut self,
        dataset_id: &str,
        records: Vec<CatalogRecord>,
    ) -> Result<LoadReport, CatalogError> {
        let report = self.store.load(records)?;

        self.judge.set_dataset(dataset_id);
        let restored = self.judge.restore(&mut self.store);

        self.cooldown_generation += 1;
        self.cooldown_deadline = None;
        self.session.active_point_id = None;
        self.session.cooldown_until = None;
        self.current_target = None;
        self.state = if self.store.is_complete() { QuizState::Complete } else { QuizState::Away };

        info!(
            dataset = %dataset_id,
            loaded = %report.loaded,
            excluded = %report.excluded.len(),
            restored = %restored,
            state = %self.state.as_str(),
            "dataset_loaded"
        );
        Ok(report)
    }

    /// Process a single event, dispatching to the appropriate handler
    pub fn process_event(&mut self, event: EngineEvent, now: Instant) -> Vec<RenderIntent> {
        match event {
            EngineEvent::Position(position) => self.handle_position(position, now),
            EngineEvent::Heading(heading) => self.handle_heading(heading),
            EngineEvent::Answer { point_id, answer } => self.handle_answer(&point_id, &answer, now),
            EngineEvent::CooldownElapsed { generation } => self.handle_cooldown_elapsed(generation, now),
            EngineEvent::PositionLost { terminal } => self.handle_position_lost(terminal),
        }
    }

    /// Consume events from the channel until it closes, forwarding intents
    /// to the render sink and driving the cooldown timer
    pub async fn run(&mut self, mut event_rx: mpsc::Receiver<EngineEvent>, sink: &mut dyn RenderSink) {
        loop {
            let deadline = self.cooldown_deadline;
            let sleep_until = deadline
                .map(tokio::time::Instant::from_std)
                .unwrap_or_else(|| tokio::time::Instant::now() + Duration::from_secs(3600));

            let intents = tokio::select! {
                event = event_rx.recv() => {
                    match event {
                        Some(e) => self.process_event(e, Instant::now()),
                        None => break, // Channel closed
                    }
                }
                _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                    let generation = self.cooldown_generation;
                    self.process_event(EngineEvent::CooldownElapsed { generation }, Instant::now())
                }
            };

            for intent in &intents {
                sink.emit(intent);
            }
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    /// Current timer generation; a `CooldownElapsed` carrying anything else
    /// is stale and will be ignored
    pub fn cooldown_generation(&self) -> u64 {
        self.cooldown_generation
    }

    pub(crate) fn in_cooldown(&self, now: Instant) -> bool {
        self.cooldown_deadline.is_some_and(|deadline| now < deadline)
    }

    pub(crate) fn arm_cooldown(&mut self, now: Instant) {
        let deadline = now + Duration::from_millis(self.config.answer_cooldown_ms());
        self.cooldown_generation += 1;
        self.cooldown_deadline = Some(deadline);
        self.session.cooldown_until = Some(deadline);
        self.state = QuizState::Cooldown;
    }
}
