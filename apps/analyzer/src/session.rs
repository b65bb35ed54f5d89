#![allow(dead_code)]

//! Submission controller: owns the upload form, the submission state and the
//! last result, and drives one request/response cycle at a time.
//!
//! The state mutex is only held for synchronous transitions, never across the
//! awaited request, so the session stays observable while Loading.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::errors::AnalyzerError;
use crate::intake::UploadForm;
use crate::models::{ResultPayload, SlotName, UploadFile};
use crate::scoring_client::{ScoreApi, ScoreRequest};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Loading,
    Succeeded,
    Failed,
}

/// What a call to [`Session::submit`] ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Submit was disabled because a request is already in flight.
    Ignored,
    /// A slot was empty; no request was made.
    Rejected(String),
    Succeeded,
    Failed(String),
}

/// Point-in-time copy of everything the UI renders.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub form: UploadForm,
    pub state: SubmissionState,
    pub result: Option<ResultPayload>,
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn is_loading(&self) -> bool {
        self.state == SubmissionState::Loading
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit(self.is_loading())
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!("submission state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

enum Begin {
    Disabled,
    Invalid(String),
    Ready(ScoreRequest),
}

#[derive(Debug, Default)]
pub struct Session {
    inner: Mutex<SessionSnapshot>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().clone()
    }

    pub fn can_submit(&self) -> bool {
        self.lock().can_submit()
    }

    // ── intake events ──────────────────────────────────────────────────────

    pub fn select(&self, slot: SlotName, files: Vec<UploadFile>) -> bool {
        self.lock().form.select(slot, files)
    }

    pub fn drop_files(&self, slot: SlotName, files: Vec<UploadFile>) -> bool {
        self.lock().form.drop_files(slot, files)
    }

    pub fn drag_over(&self, slot: SlotName) {
        self.lock().form.drag_over(slot);
    }

    pub fn drag_leave(&self, slot: SlotName) {
        self.lock().form.drag_leave(slot);
    }

    pub fn clear(&self, slot: SlotName) {
        self.lock().form.clear(slot);
    }

    // ── submission ─────────────────────────────────────────────────────────

    /// Validates the form and, if both files are present, sends exactly one
    /// request through `api`.
    ///
    /// A previous result survives a failed submission. Loading is always
    /// cleared once this returns or its future is dropped.
    pub async fn submit(&self, api: &dyn ScoreApi) -> SubmitOutcome {
        let request = match self.begin() {
            Begin::Disabled => return SubmitOutcome::Ignored,
            Begin::Invalid(message) => return SubmitOutcome::Rejected(message),
            Begin::Ready(request) => request,
        };

        let mut in_flight = InFlight {
            session: self,
            settled: false,
        };
        let outcome = api.score(request).await;
        in_flight.settled = true;

        self.finish(outcome)
    }

    fn begin(&self) -> Begin {
        let mut state = self.lock();

        if state.is_loading() {
            debug!("submit ignored: a request is already in flight");
            return Begin::Disabled;
        }

        state.error = None;
        state.transition(SubmissionState::Validating);

        match state.form.files() {
            Some((resume, jd)) => {
                state.transition(SubmissionState::Loading);
                Begin::Ready(ScoreRequest { resume, jd })
            }
            None => {
                let message = AnalyzerError::missing_files().user_message();
                state.error = Some(message.clone());
                state.transition(SubmissionState::Failed);
                Begin::Invalid(message)
            }
        }
    }

    fn finish(&self, outcome: Result<ResultPayload, AnalyzerError>) -> SubmitOutcome {
        let mut state = self.lock();

        match outcome {
            Ok(payload) => {
                info!(score = payload.score, "analysis received");
                state.result = Some(payload);
                state.transition(SubmissionState::Succeeded);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                warn!("analysis failed: {e}");
                let message = e.user_message();
                state.error = Some(message.clone());
                state.transition(SubmissionState::Failed);
                SubmitOutcome::Failed(message)
            }
        }
    }
}

/// Clears Loading if a submission future is dropped before the request settles.
struct InFlight<'a> {
    session: &'a Session,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.session.lock();
        if state.is_loading() {
            debug!("submission abandoned before a response arrived");
            state.transition(SubmissionState::Idle);
        }
    }
}
