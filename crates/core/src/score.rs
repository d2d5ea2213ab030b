use serde::{Deserialize, Serialize};

use crate::model::{Answer, AnswerKey, AnswerLedger, AnswerRule, QuestionId};

//
// ─── QUESTION SCORE ────────────────────────────────────────────────────────────
//

/// Per-question line of a score breakdown.
///
/// `response` is `None` when the question was never answered — distinct from
/// an empty string or empty selection, so a results view can render an
/// explicit "no answer" marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question_id: QuestionId,
    pub response: Option<Answer>,
    pub is_correct: bool,
    pub points_earned: u32,
    pub weight: u32,
}

//
// ─── SCORE RESULT ──────────────────────────────────────────────────────────────
//

/// Outcome of scoring one attempt against an answer key.
///
/// Derived, never stored: recomputing from the same ledger and key yields
/// the same result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub points_earned: u32,
    pub points_possible: u32,
    pub breakdown: Vec<QuestionScore>,
}

impl ScoreResult {
    /// Earned points as a percentage of possible points, or `None` when the
    /// key was empty. Callers rendering a percentage must handle `None`
    /// rather than divide by zero themselves.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        if self.points_possible == 0 {
            return None;
        }
        Some(f64::from(self.points_earned) / f64::from(self.points_possible) * 100.0)
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.breakdown.iter().filter(|q| q.is_correct).count()
    }
}

//
// ─── SCORER ────────────────────────────────────────────────────────────────────
//

/// Scores recorded answers against an answer key.
///
/// Walks the key in the content provider's order; questions answered but
/// absent from the key are ignored, and questions in the key but never
/// answered score zero with `response: None`. An empty key produces a 0/0
/// result with an empty breakdown.
///
/// Pure: the ledger is only read, and repeated calls with the same inputs
/// return identical results.
#[must_use]
pub fn score(ledger: &AnswerLedger, key: &AnswerKey) -> ScoreResult {
    let mut points_earned = 0_u32;
    let mut points_possible = 0_u32;
    let mut breakdown = Vec::with_capacity(key.len());

    for entry in key.entries() {
        let response = ledger.answer(entry.question_id());
        let is_correct = match (response, entry.rule()) {
            (Some(answer), AnswerRule::Exact(expected)) => answer.matches_exact(expected),
            (Some(answer), AnswerRule::AllOf(expected)) => answer.matches_set(expected),
            (None, _) => false,
        };
        let earned = if is_correct { entry.weight() } else { 0 };

        points_earned = points_earned.saturating_add(earned);
        points_possible = points_possible.saturating_add(entry.weight());
        breakdown.push(QuestionScore {
            question_id: entry.question_id(),
            response: response.cloned(),
            is_correct,
            points_earned: earned,
            weight: entry.weight(),
        });
    }

    ScoreResult {
        points_earned,
        points_possible,
        breakdown,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
