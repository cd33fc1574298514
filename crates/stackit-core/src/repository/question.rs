//! Question repository trait definition.

use stackit_types::error::RepositoryError;
use stackit_types::question::{Question, QuestionId};

/// Filter criteria for listing questions.
///
/// Results are always ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Only questions whose tag set contains this exact tag.
    pub tag: Option<String>,
    /// Only questions whose title contains this text, case-insensitively.
    pub search: Option<String>,
    /// Maximum number of results.
    pub limit: i64,
    /// Number of results to skip.
    pub offset: i64,
}

/// Repository trait for question persistence.
///
/// Implementations live in stackit-infra (e.g., SqliteQuestionRepository).
pub trait QuestionRepository: Send + Sync {
    /// Insert a new question. Returns the stored question.
    fn create(
        &self,
        question: &Question,
    ) -> impl std::future::Future<Output = Result<Question, RepositoryError>> + Send;

    /// Get a question by its unique ID.
    fn get_by_id(
        &self,
        id: &QuestionId,
    ) -> impl std::future::Future<Output = Result<Option<Question>, RepositoryError>> + Send;

    /// List questions matching the filter, newest first.
    fn list(
        &self,
        filter: &QuestionFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Question>, RepositoryError>> + Send;
}
