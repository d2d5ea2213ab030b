use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use practice_core::model::SessionPhase;

use crate::practice::PracticeAttempt;

/// Handle to a running countdown task.
///
/// The task is aborted on `cancel` and on drop, so letting the handle go
/// out of scope (navigation away, attempt teardown) is enough to stop tick
/// delivery. A dangling interval mutating a discarded attempt is a leak;
/// tying the task's lifetime to this handle rules it out.
#[derive(Debug)]
pub struct CountdownHandle {
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Stops the countdown. Ticks already delivered stay applied.
    pub fn cancel(self) {
        self.task.abort();
    }

    /// True once the task has exited, whether by finishing the attempt or
    /// by cancellation.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a task that ticks the attempt once per second while it is
/// running, and exits as soon as a tick reports any other phase — which
/// covers both the timeout finish (the expiring tick itself) and a manual
/// finish made between ticks.
///
/// The attempt is locked only for the duration of each tick, preserving
/// single-writer access without blocking hosts that read state in between.
#[must_use]
pub fn spawn_countdown(attempt: Arc<Mutex<PracticeAttempt>>) -> CountdownHandle {
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a fresh interval resolves immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let mut attempt = attempt.lock().await;
            if attempt.tick() != SessionPhase::Running {
                break;
            }
        }
    });
    CountdownHandle { task }
}
