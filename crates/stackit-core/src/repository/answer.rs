//! Answer repository trait definition.

use stackit_types::answer::{Answer, AnswerId, VoteDirection};
use stackit_types::error::RepositoryError;
use stackit_types::question::QuestionId;

/// Repository trait for answer persistence.
pub trait AnswerRepository: Send + Sync {
    /// Insert a new answer.
    fn create(
        &self,
        answer: &Answer,
    ) -> impl std::future::Future<Output = Result<Answer, RepositoryError>> + Send;

    /// Get an answer by its unique ID.
    fn get_by_id(
        &self,
        id: &AnswerId,
    ) -> impl std::future::Future<Output = Result<Option<Answer>, RepositoryError>> + Send;

    /// All answers attached to a question, in insertion order.
    fn list_for_question(
        &self,
        question_id: &QuestionId,
    ) -> impl std::future::Future<Output = Result<Vec<Answer>, RepositoryError>> + Send;

    /// Atomically add one to the counter for `direction`.
    ///
    /// Returns `RepositoryError::NotFound` when no answer has this ID.
    fn record_vote(
        &self,
        id: &AnswerId,
        direction: VoteDirection,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Mark `id` as the accepted answer of `question_id`.
    ///
    /// Must clear the flag on every other answer of the question in the same
    /// transaction, so that at most one answer per question is accepted.
    fn accept(
        &self,
        id: &AnswerId,
        question_id: &QuestionId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
