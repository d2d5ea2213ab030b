#![forbid(unsafe_code)]

pub mod content;
pub mod countdown;
pub mod error;
pub mod practice;

pub use practice_core::Clock;

pub use content::{ContentError, ContentProvider, StaticContent};
pub use countdown::{CountdownHandle, spawn_countdown};
pub use error::PracticeError;
pub use practice::{PracticeAttempt, PracticeProgress, PracticeService};
