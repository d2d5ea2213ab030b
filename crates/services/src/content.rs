use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use practice_core::model::{AnswerKey, AnswerKeyError, KeyEntry, TestId};

/// Errors surfaced by content providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("no answer key for test {0}")]
    NotFound(TestId),

    #[error("malformed answer key data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Key(#[from] AnswerKeyError),
}

/// Supplies answer keys per test.
///
/// The question and passage content itself lives with the host; the core
/// only ever needs the key to grade an attempt.
#[async_trait]
pub trait ContentProvider {
    /// Fetch the answer key for a test.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` when the test id is unknown.
    async fn answer_key(&self, test_id: &TestId) -> Result<AnswerKey, ContentError>;
}

/// In-memory content provider over a fixed table of answer keys.
///
/// Mirrors the shape the host keeps its question banks in: one key list
/// per string test id.
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    keys: HashMap<TestId, AnswerKey>,
}

impl StaticContent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the key for a test.
    pub fn insert(&mut self, test_id: TestId, key: AnswerKey) {
        self.keys.insert(test_id, key);
    }

    /// Loads a key table from JSON: an object mapping test id to a list of
    /// key entries, where a string rule means exact match and an array rule
    /// means exact set equality. `weight` is optional and defaults to 1.
    ///
    /// ```json
    /// { "r-p1": [ { "question_id": 1, "rule": "Paris" },
    ///             { "question_id": 2, "rule": ["B", "D"], "weight": 2 } ] }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Malformed` for invalid JSON and
    /// `ContentError::Key` when a parsed key fails validation.
    pub fn from_json(data: &str) -> Result<Self, ContentError> {
        let raw: HashMap<String, Vec<KeyEntry>> = serde_json::from_str(data)?;
        let mut keys = HashMap::with_capacity(raw.len());
        for (test_id, entries) in raw {
            keys.insert(TestId::new(test_id), AnswerKey::new(entries)?);
        }
        Ok(Self { keys })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl ContentProvider for StaticContent {
    async fn answer_key(&self, test_id: &TestId) -> Result<AnswerKey, ContentError> {
        self.keys
            .get(test_id)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(test_id.clone()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use practice_core::model::AnswerRule;

    #[tokio::test]
    async fn from_json_parses_both_rule_shapes() {
        let content = StaticContent::from_json(
            r#"{
                "r-p1": [
                    { "question_id": 1, "rule": "Paris" },
                    { "question_id": 2, "rule": ["B", "D"], "weight": 2 }
                ]
            }"#,
        )
        .unwrap();

        let key = content.answer_key(&TestId::new("r-p1")).await.unwrap();
        assert_eq!(key.len(), 2);
        assert_eq!(key.entries()[0].rule(), &AnswerRule::Exact("Paris".into()));
        assert_eq!(key.entries()[0].weight(), 1);
        assert_eq!(
            key.entries()[1].rule(),
            &AnswerRule::AllOf(vec!["B".into(), "D".into()])
        );
        assert_eq!(key.entries()[1].weight(), 2);
    }

    #[tokio::test]
    async fn unknown_test_is_not_found() {
        let content = StaticContent::new();
        let err = content.answer_key(&TestId::new("missing")).await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = StaticContent::from_json("not json").unwrap_err();
        assert!(matches!(err, ContentError::Malformed(_)));
    }

    #[test]
    fn invalid_key_is_rejected_on_load() {
        let err = StaticContent::from_json(
            r#"{ "r-p1": [ { "question_id": 1, "rule": "A", "weight": 0 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::Key(_)));
    }
}
