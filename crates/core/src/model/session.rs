/// Inclusive bounds for a configurable attempt duration, in minutes.
pub const MIN_DURATION_MINUTES: f64 = 1.0;
pub const MAX_DURATION_MINUTES: f64 = 180.0;

/// Default attempt duration when the host never configures one.
pub const DEFAULT_DURATION_MINUTES: f64 = 20.0;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Logical state of a practice attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Duration may still be changed; countdown not running.
    Configuring,
    /// Countdown active; one `tick` expected per second.
    Running,
    /// Terminal for this attempt; answers stay readable for scoring.
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Countdown state machine for one practice attempt.
///
/// Drives Configuring → Running → Finished. Every operation called out of
/// phase is a silent no-op so duplicate UI events (double clicks,
/// re-renders) cannot corrupt the attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSession {
    is_started: bool,
    is_finished: bool,
    time_remaining_secs: u32,
    initial_duration_secs: u32,
}

impl PracticeSession {
    /// Creates a session in the Configuring phase with the given duration,
    /// clamped to the allowed range.
    #[must_use]
    pub fn new(duration_minutes: f64) -> Self {
        let secs = clamp_duration_secs(duration_minutes);
        Self {
            is_started: false,
            is_finished: false,
            time_remaining_secs: secs,
            initial_duration_secs: secs,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (self.is_started, self.is_finished) {
            (false, _) => SessionPhase::Configuring,
            (true, false) => SessionPhase::Running,
            (true, true) => SessionPhase::Finished,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase() == SessionPhase::Running
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    #[must_use]
    pub fn initial_duration_secs(&self) -> u32 {
        self.initial_duration_secs
    }

    /// Sets the duration for the next `start`. Only effective while
    /// Configuring; ignored once the countdown has begun.
    ///
    /// Out-of-range input is clamped to the nearest bound; non-finite input
    /// falls back to the minimum. The duration is never left unset.
    pub fn configure(&mut self, duration_minutes: f64) {
        if self.phase() != SessionPhase::Configuring {
            return;
        }
        let secs = clamp_duration_secs(duration_minutes);
        self.initial_duration_secs = secs;
        self.time_remaining_secs = secs;
    }

    /// Begins the countdown. Only valid while Configuring; the caller clears
    /// the answer ledger alongside this transition.
    pub fn start(&mut self) {
        if self.phase() != SessionPhase::Configuring {
            return;
        }
        self.is_started = true;
        self.is_finished = false;
        self.time_remaining_secs = self.initial_duration_secs;
    }

    /// Advances the countdown by one second and returns the phase after the
    /// tick, so the driver can stop delivering ticks on anything other than
    /// `Running`.
    ///
    /// When the remaining time reaches zero the session finishes within this
    /// same call; `time_remaining == 0` with an unfinished session is never
    /// observable after `tick` returns. A tick arriving with the clock
    /// already at zero (a missed transition) finishes the session too.
    pub fn tick(&mut self) -> SessionPhase {
        if self.phase() != SessionPhase::Running {
            return self.phase();
        }
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs == 0 {
            self.finish();
        }
        self.phase()
    }

    /// Ends the attempt, whether by user action or countdown expiry. Both
    /// paths funnel here; a finished session stays finished (idempotent).
    /// Ignored while Configuring.
    pub fn finish(&mut self) {
        if self.is_started {
            self.is_finished = true;
        }
    }

    /// Hard reset to Configuring from any phase, restoring the original
    /// duration. The caller clears the answer ledger alongside this
    /// transition.
    pub fn restart(&mut self) {
        self.is_started = false;
        self.is_finished = false;
        self.time_remaining_secs = self.initial_duration_secs;
    }
}

impl Default for PracticeSession {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MINUTES)
    }
}

fn clamp_duration_secs(duration_minutes: f64) -> u32 {
    let minutes = if duration_minutes.is_finite() {
        duration_minutes.clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES)
    } else {
        MIN_DURATION_MINUTES
    };
    // Clamped range keeps this well inside u32.
    (minutes * 60.0).round() as u32
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
