mod answer;
mod ids;
mod key;
mod session;

pub use answer::{Answer, AnswerLedger};
pub use ids::{ParseIdError, QuestionId, TestId};
pub use key::{AnswerKey, AnswerKeyError, AnswerRule, KeyEntry};
pub use session::{
    DEFAULT_DURATION_MINUTES, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, PracticeSession,
    SessionPhase,
};
