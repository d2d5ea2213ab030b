use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ids::QuestionId;

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// A recorded response to a single question.
///
/// Free-text and single-choice inputs produce `Single`; multi-select inputs
/// produce `Multi`. The variants are never coerced into one another: a
/// `Single` response to a multi-select question scores as incorrect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multi(Vec<String>),
}

impl Answer {
    /// Builds a single-value answer.
    #[must_use]
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(value.into())
    }

    /// Builds a multi-select answer from selected values.
    #[must_use]
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }

    /// True if this is a `Single` answer equal to `expected` (case-sensitive).
    #[must_use]
    pub fn matches_exact(&self, expected: &str) -> bool {
        matches!(self, Self::Single(value) if value == expected)
    }

    /// True if this is a `Multi` answer whose selections form exactly the
    /// `expected` set: same length, every expected element present, order
    /// ignored. Subsets, supersets, and same-size mismatches all fail.
    #[must_use]
    pub fn matches_set(&self, expected: &[String]) -> bool {
        match self {
            Self::Multi(selected) => {
                selected.len() == expected.len()
                    && expected.iter().all(|e| selected.contains(e))
            }
            Self::Single(_) => false,
        }
    }
}

//
// ─── ANSWER LEDGER ─────────────────────────────────────────────────────────────
//

/// Responses recorded during one practice attempt, keyed by question id.
///
/// One slot per question: a later write replaces the earlier value. The
/// ledger holds whatever the inputs reported and performs no semantic
/// validation; an absent entry is distinct from an empty string or empty
/// selection list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLedger {
    entries: BTreeMap<QuestionId, Answer>,
}

impl AnswerLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a response, overwriting any prior response for the question.
    pub fn set_answer(&mut self, question_id: QuestionId, answer: Answer) {
        self.entries.insert(question_id, answer);
    }

    /// Returns the recorded response, or `None` if never answered.
    #[must_use]
    pub fn answer(&self, question_id: QuestionId) -> Option<&Answer> {
        self.entries.get(&question_id)
    }

    /// Empties the ledger. Called on session start and restart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates recorded responses in question-id order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &Answer)> {
        self.entries.iter().map(|(id, answer)| (*id, answer))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_write_replaces_earlier() {
        let mut ledger = AnswerLedger::new();
        ledger.set_answer(QuestionId::new(5), Answer::single("A"));
        ledger.set_answer(QuestionId::new(5), Answer::single("B"));

        assert_eq!(ledger.answer(QuestionId::new(5)), Some(&Answer::single("B")));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn absent_is_distinct_from_empty() {
        let mut ledger = AnswerLedger::new();
        ledger.set_answer(QuestionId::new(1), Answer::single(""));

        assert_eq!(ledger.answer(QuestionId::new(1)), Some(&Answer::single("")));
        assert_eq!(ledger.answer(QuestionId::new(2)), None);
    }

    #[test]
    fn clear_empties_all_entries() {
        let mut ledger = AnswerLedger::new();
        ledger.set_answer(QuestionId::new(1), Answer::single("A"));
        ledger.set_answer(QuestionId::new(2), Answer::multi(["B", "D"]));

        ledger.clear();

        assert!(ledger.is_empty());
        assert_eq!(ledger.answer(QuestionId::new(1)), None);
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        assert!(Answer::single("TRUE").matches_exact("TRUE"));
        assert!(!Answer::single("true").matches_exact("TRUE"));
        assert!(!Answer::multi(["TRUE"]).matches_exact("TRUE"));
    }

    #[test]
    fn set_match_ignores_order() {
        let expected = vec!["A".to_string(), "C".to_string(), "E".to_string()];

        assert!(Answer::multi(["C", "A", "E"]).matches_set(&expected));
        assert!(!Answer::multi(["A", "C"]).matches_set(&expected));
        assert!(!Answer::multi(["A", "C", "E", "F"]).matches_set(&expected));
        assert!(!Answer::multi(["A", "C", "F"]).matches_set(&expected));
        assert!(!Answer::single("A").matches_set(&expected));
    }
}
