//! REST API handlers.

pub mod answer;
pub mod health;
pub mod question;

use stackit_types::answer::AnswerId;
use stackit_types::question::QuestionId;

use crate::http::error::AppError;

pub(crate) fn parse_question_id(raw: &str) -> Result<QuestionId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("invalid question id '{raw}'")))
}

pub(crate) fn parse_answer_id(raw: &str) -> Result<AnswerId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("invalid answer id '{raw}'")))
}
