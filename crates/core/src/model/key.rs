use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerKeyError {
    #[error("question {0} has zero weight")]
    ZeroWeight(QuestionId),

    #[error("question {0} requires an empty selection set")]
    EmptyExpectedSet(QuestionId),
}

//
// ─── RULE ──────────────────────────────────────────────────────────────────────
//

/// Correctness rule for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerRule {
    /// Recorded value must equal the expected string, case-sensitive.
    Exact(String),
    /// Recorded selections must equal the expected set exactly
    /// (same size, same members, order ignored).
    AllOf(Vec<String>),
}

//
// ─── KEY ENTRY ─────────────────────────────────────────────────────────────────
//

/// Answer-key line for one question: the rule plus a point weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    question_id: QuestionId,
    rule: AnswerRule,
    #[serde(default = "default_weight")]
    weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl KeyEntry {
    /// Creates an entry worth one point.
    #[must_use]
    pub fn new(question_id: QuestionId, rule: AnswerRule) -> Self {
        Self {
            question_id,
            rule,
            weight: 1,
        }
    }

    /// Sets the point weight for this entry.
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn rule(&self) -> &AnswerRule {
        &self.rule
    }

    #[must_use]
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

//
// ─── ANSWER KEY ────────────────────────────────────────────────────────────────
//

/// Validated answer key for one test, in the content provider's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKey {
    entries: Vec<KeyEntry>,
}

impl AnswerKey {
    /// Builds a key from entries.
    ///
    /// # Errors
    ///
    /// Returns `AnswerKeyError::ZeroWeight` if an entry is worth nothing,
    /// or `AnswerKeyError::EmptyExpectedSet` if a set rule expects no
    /// selections (such an entry could never be answered meaningfully).
    pub fn new(entries: Vec<KeyEntry>) -> Result<Self, AnswerKeyError> {
        for entry in &entries {
            if entry.weight == 0 {
                return Err(AnswerKeyError::ZeroWeight(entry.question_id));
            }
            if matches!(&entry.rule, AnswerRule::AllOf(expected) if expected.is_empty()) {
                return Err(AnswerKeyError::EmptyExpectedSet(entry.question_id));
            }
        }
        Ok(Self { entries })
    }

    /// An answer key with no entries; scoring against it yields 0/0.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total points available across all entries.
    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(KeyEntry::weight).sum()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_defaults_to_one_point() {
        let entry = KeyEntry::new(QuestionId::new(1), AnswerRule::Exact("A".into()));
        assert_eq!(entry.weight(), 1);
    }

    #[test]
    fn zero_weight_is_rejected() {
        let entry =
            KeyEntry::new(QuestionId::new(3), AnswerRule::Exact("A".into())).with_weight(0);
        let err = AnswerKey::new(vec![entry]).unwrap_err();
        assert_eq!(err, AnswerKeyError::ZeroWeight(QuestionId::new(3)));
    }

    #[test]
    fn empty_expected_set_is_rejected() {
        let entry = KeyEntry::new(QuestionId::new(7), AnswerRule::AllOf(Vec::new()));
        let err = AnswerKey::new(vec![entry]).unwrap_err();
        assert_eq!(err, AnswerKeyError::EmptyExpectedSet(QuestionId::new(7)));
    }

    #[test]
    fn total_weight_sums_entries() {
        let key = AnswerKey::new(vec![
            KeyEntry::new(QuestionId::new(1), AnswerRule::Exact("Paris".into())),
            KeyEntry::new(
                QuestionId::new(2),
                AnswerRule::AllOf(vec!["B".into(), "D".into()]),
            )
            .with_weight(2),
        ])
        .unwrap();

        assert_eq!(key.total_weight(), 3);
        assert_eq!(key.len(), 2);
    }
}
