use thiserror::Error;

use crate::model::AnswerKeyError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    AnswerKey(#[from] AnswerKeyError),
}
