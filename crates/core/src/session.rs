//! Interview Session Controller
//!
//! This module implements the state machine behind a mock interview:
//! `Config -> Question -> Feedback`, looping back to `Question` on
//! [`SessionController::next_question`] and to `Config` on
//! [`SessionController::full_reset`].
//!
//! The controller is the only writer of [`SessionState`]. The state sits
//! behind an async mutex that is never held across a call to the evaluation
//! service, so a front-end can take a snapshot at any time, including while a
//! request is outstanding.

use crate::{
    error::{Action, SessionError},
    evaluation::EvaluationService,
    model::{Difficulty, Feedback, Question, Role, SessionConfig},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// The screen the session is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Config,
    Question,
    Feedback,
}

/// Everything a front-end needs to render the session.
///
/// `feedback` is only ever present together with the `question` it grades.
/// In the `Feedback` phase both are present unless a `next_question` request
/// is outstanding or has just failed, in which case both are empty and
/// `last_error` says why.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub config: SessionConfig,
    pub question: Option<Question>,
    pub answer: String,
    pub feedback: Option<Feedback>,
    pub is_request_in_flight: bool,
    pub last_error: Option<SessionError>,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Whether `submit_answer` would issue a request for the current draft.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Question
            && self.question.is_some()
            && !self.is_request_in_flight
            && !self.answer.trim().is_empty()
    }

    fn clear_cycle(&mut self) {
        self.question = None;
        self.answer.clear();
        self.feedback = None;
    }
}

/// What a user action did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The action took effect; the session is now in this phase.
    Applied(Phase),
    /// A guard rejected the action and nothing changed.
    Ignored,
    /// The request failed; `last_error` is set and the pre-call state kept.
    Failed,
    /// The request finished after a reset and its result was dropped.
    Discarded,
}

struct Inner {
    state: SessionState,
    /// Bumped on every reset so late responses for an abandoned cycle can be
    /// recognised.
    epoch: u64,
}

impl Inner {
    fn begin_request(&mut self) -> u64 {
        self.state.is_request_in_flight = true;
        self.state.last_error = None;
        self.epoch
    }

    /// Clears the in-flight flag and reports whether the response still
    /// belongs to the current cycle.
    fn finish_request(&mut self, epoch: u64) -> bool {
        self.state.is_request_in_flight = false;
        self.epoch == epoch
    }
}

/// Drives one interview session against an [`EvaluationService`].
pub struct SessionController {
    service: Arc<dyn EvaluationService>,
    inner: Mutex<Inner>,
}

impl SessionController {
    /// Creates a controller in the `Config` phase.
    pub fn new(service: Arc<dyn EvaluationService>, config: SessionConfig) -> Self {
        Self {
            service,
            inner: Mutex::new(Inner {
                state: SessionState::new(config),
                epoch: 0,
            }),
        }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.state.clone()
    }

    /// Replaces the session config. Only allowed on the config screen while
    /// nothing is in flight.
    pub async fn set_config(&self, config: SessionConfig) -> Transition {
        self.update_config(|current| *current = config).await
    }

    pub async fn set_role(&self, role: Role) -> Transition {
        self.update_config(|config| config.role = role).await
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) -> Transition {
        self.update_config(|config| config.difficulty = difficulty)
            .await
    }

    async fn update_config(&self, apply: impl FnOnce(&mut SessionConfig)) -> Transition {
        let mut inner = self.inner.lock().await;
        let state = &mut inner.state;
        if state.phase != Phase::Config || state.is_request_in_flight {
            warn!(phase = ?state.phase, "Ignoring config change outside the config screen");
            return Transition::Ignored;
        }
        apply(&mut state.config);
        info!(role = %state.config.role, difficulty = %state.config.difficulty, "Session config updated");
        Transition::Applied(Phase::Config)
    }

    /// Records the answer the user is typing.
    pub async fn set_answer_draft(&self, text: impl Into<String>) -> Transition {
        let mut inner = self.inner.lock().await;
        if inner.state.phase != Phase::Question {
            return Transition::Ignored;
        }
        inner.state.answer = text.into();
        Transition::Applied(Phase::Question)
    }

    /// Requests the first question for the current config.
    ///
    /// On failure the session stays on the config screen with `last_error`
    /// set. There is no automatic retry.
    #[instrument(skip(self))]
    pub async fn start_interview(&self) -> Transition {
        let (config, epoch) = {
            let mut inner = self.inner.lock().await;
            if inner.state.phase != Phase::Config || inner.state.is_request_in_flight {
                warn!(phase = ?inner.state.phase, in_flight = inner.state.is_request_in_flight, "Ignoring start_interview");
                return Transition::Ignored;
            }
            let epoch = inner.begin_request();
            (inner.state.config, epoch)
        };

        info!(role = %config.role, difficulty = %config.difficulty, "Starting interview");
        self.fetch_question(config, epoch).await
    }

    /// Submits `text` as the answer to the current question.
    ///
    /// A blank answer, a second submission while one is in flight, or a call
    /// outside the question screen is a no-op. If evaluation fails the typed
    /// answer is kept so the user can resubmit it.
    #[instrument(skip(self, text), fields(answer_len = text.len()))]
    pub async fn submit_answer(&self, text: &str) -> Transition {
        let (question, config, epoch) = {
            let mut inner = self.inner.lock().await;
            let state = &inner.state;
            if state.phase != Phase::Question || state.is_request_in_flight {
                warn!(phase = ?state.phase, in_flight = state.is_request_in_flight, "Ignoring submit_answer");
                return Transition::Ignored;
            }
            if text.trim().is_empty() {
                warn!("Ignoring blank answer");
                return Transition::Ignored;
            }
            let Some(question) = state.question.clone() else {
                return Transition::Ignored;
            };
            let config = state.config;
            inner.state.answer = text.to_string();
            let epoch = inner.begin_request();
            (question, config, epoch)
        };

        let result = self
            .service
            .evaluate_answer(&question, &config, text)
            .await;

        let mut inner = self.inner.lock().await;
        if !inner.finish_request(epoch) {
            info!("Session was reset while evaluating; dropping feedback");
            return Transition::Discarded;
        }
        match result {
            Ok(feedback) => {
                info!(score = feedback.score, "Feedback received");
                inner.state.feedback = Some(feedback);
                inner.state.phase = Phase::Feedback;
                Transition::Applied(Phase::Feedback)
            }
            Err(error) => {
                warn!(%error, "Answer evaluation failed");
                inner.state.last_error = Some(SessionError::new(Action::EvaluateAnswer, error));
                Transition::Failed
            }
        }
    }

    /// Drops the current question and feedback and fetches a new question
    /// with the same config, without going back to the config screen.
    ///
    /// If the request fails the session remains on the feedback screen with
    /// nothing but the error to show; `next_question` or `full_reset` may be
    /// called again from there.
    #[instrument(skip(self))]
    pub async fn next_question(&self) -> Transition {
        let (config, epoch) = {
            let mut inner = self.inner.lock().await;
            if inner.state.phase != Phase::Feedback || inner.state.is_request_in_flight {
                warn!(phase = ?inner.state.phase, in_flight = inner.state.is_request_in_flight, "Ignoring next_question");
                return Transition::Ignored;
            }
            inner.state.clear_cycle();
            let epoch = inner.begin_request();
            (inner.state.config, epoch)
        };

        info!("Requesting next question");
        self.fetch_question(config, epoch).await
    }

    /// Returns to the config screen, dropping the question, answer, feedback
    /// and any error. Never touches the network.
    ///
    /// A request that is still outstanding runs to completion, but its
    /// result is discarded.
    #[instrument(skip(self))]
    pub async fn full_reset(&self) -> Transition {
        let mut inner = self.inner.lock().await;
        inner.epoch += 1;
        let state = &mut inner.state;
        state.clear_cycle();
        state.last_error = None;
        state.phase = Phase::Config;
        info!("Session reset to config");
        Transition::Applied(Phase::Config)
    }

    async fn fetch_question(&self, config: SessionConfig, epoch: u64) -> Transition {
        let result = self.service.generate_question(&config).await;

        let mut inner = self.inner.lock().await;
        if !inner.finish_request(epoch) {
            info!("Session was reset while generating; dropping question");
            return Transition::Discarded;
        }
        match result {
            Ok(question) => {
                let state = &mut inner.state;
                state.question = Some(question);
                state.answer.clear();
                state.feedback = None;
                state.phase = Phase::Question;
                Transition::Applied(Phase::Question)
            }
            Err(error) => {
                warn!(%error, "Question generation failed");
                inner.state.last_error = Some(SessionError::new(Action::GenerateQuestion, error));
                Transition::Failed
            }
        }
    }
}
