#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod score;
pub mod time;

pub use error::Error;
pub use score::{QuestionScore, ScoreResult, score};
pub use time::Clock;
