use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use practice_core::model::{
    Answer, AnswerKey, AnswerLedger, PracticeSession, QuestionId, SessionPhase, TestId,
};
use practice_core::{Clock, ScoreResult, score};

use crate::content::ContentProvider;
use crate::error::PracticeError;

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Aggregated view of attempt progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PracticeProgress {
    pub total_questions: usize,
    pub answered: usize,
    pub time_remaining_secs: u32,
    pub is_finished: bool,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Builds practice attempts from the content provider's answer keys.
#[derive(Clone)]
pub struct PracticeService {
    clock: Clock,
    content: Arc<dyn ContentProvider + Send + Sync>,
}

impl PracticeService {
    #[must_use]
    pub fn new(content: Arc<dyn ContentProvider + Send + Sync>) -> Self {
        Self {
            clock: Clock::default(),
            content,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Fetches the answer key for the test and returns an attempt in the
    /// Configuring phase with the given duration. The host may still
    /// `configure` a different duration before calling `start`.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Content` when the key cannot be supplied.
    pub async fn begin(
        &self,
        test_id: TestId,
        duration_minutes: f64,
    ) -> Result<PracticeAttempt, PracticeError> {
        let key = self.content.answer_key(&test_id).await?;
        Ok(PracticeAttempt::new(
            test_id,
            key,
            duration_minutes,
            self.clock,
        ))
    }
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// One practice attempt: the countdown session, the answer ledger, and the
/// answer key it will be graded against.
///
/// All mutation funnels through these methods, which keep session and
/// ledger in step: `start` and `restart` clear recorded answers, and
/// answers are only accepted while the countdown runs. The finished
/// timestamp is stamped on whichever path ends the attempt first, manual
/// or timeout, so the two are indistinguishable when scoring.
pub struct PracticeAttempt {
    test_id: TestId,
    key: AnswerKey,
    session: PracticeSession,
    ledger: AnswerLedger,
    clock: Clock,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl PracticeAttempt {
    #[must_use]
    pub fn new(test_id: TestId, key: AnswerKey, duration_minutes: f64, clock: Clock) -> Self {
        Self {
            test_id,
            key,
            session: PracticeSession::new(duration_minutes),
            ledger: AnswerLedger::new(),
            clock,
            started_at: None,
            finished_at: None,
        }
    }

    #[must_use]
    pub fn test_id(&self) -> &TestId {
        &self.test_id
    }

    #[must_use]
    pub fn key(&self) -> &AnswerKey {
        &self.key
    }

    #[must_use]
    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.session.time_remaining_secs()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Adjusts the duration before `start`. Ignored once running.
    pub fn configure(&mut self, duration_minutes: f64) {
        self.session.configure(duration_minutes);
    }

    /// Starts the countdown, clearing any previously recorded answers.
    /// No-op unless Configuring.
    pub fn start(&mut self) {
        if self.session.phase() != SessionPhase::Configuring {
            return;
        }
        self.session.start();
        self.ledger.clear();
        self.started_at = Some(self.clock.now());
        self.finished_at = None;
    }

    /// Records a response, replacing any earlier response for the question.
    /// Ignored unless the countdown is running, so late UI events after a
    /// finish cannot alter what gets scored.
    pub fn record_answer(&mut self, question_id: QuestionId, answer: Answer) {
        if self.session.is_running() {
            self.ledger.set_answer(question_id, answer);
        }
    }

    /// Advances the countdown by one second. Returns the phase after the
    /// tick; the driver must stop delivering ticks on anything other than
    /// `Running`.
    pub fn tick(&mut self) -> SessionPhase {
        let phase = self.session.tick();
        if phase == SessionPhase::Finished {
            self.stamp_finished();
        }
        phase
    }

    /// Ends the attempt early. Idempotent; the timeout path through `tick`
    /// lands in the same place.
    pub fn finish(&mut self) {
        self.session.finish();
        if self.session.is_finished() {
            self.stamp_finished();
        }
    }

    /// Hard reset to Configuring with the original duration, clearing
    /// answers and timestamps.
    pub fn restart(&mut self) {
        self.session.restart();
        self.ledger.clear();
        self.started_at = None;
        self.finished_at = None;
    }

    /// Grades the recorded answers against the attempt's key. Pure; may be
    /// called at any time and repeatedly (e.g. for a live preview).
    #[must_use]
    pub fn score(&self) -> ScoreResult {
        score(&self.ledger, &self.key)
    }

    /// Returns a summary of the current attempt progress.
    #[must_use]
    pub fn progress(&self) -> PracticeProgress {
        PracticeProgress {
            total_questions: self.key.len(),
            answered: self.ledger.len(),
            time_remaining_secs: self.session.time_remaining_secs(),
            is_finished: self.session.is_finished(),
        }
    }

    fn stamp_finished(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(self.clock.now());
        }
    }
}

impl fmt::Debug for PracticeAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeAttempt")
            .field("test_id", &self.test_id)
            .field("key_len", &self.key.len())
            .field("phase", &self.session.phase())
            .field("time_remaining_secs", &self.session.time_remaining_secs())
            .field("answered", &self.ledger.len())
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
