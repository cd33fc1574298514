//! Question service: posting, listing, and reading questions.

use std::time::Duration;

use stackit_types::answer::sort_for_display;
use stackit_types::answer::Answer;
use stackit_types::error::QaError;
use stackit_types::identity::Caller;
use stackit_types::question::{CreateQuestionRequest, Question, QuestionDetail, QuestionId};

use crate::repository::answer::AnswerRepository;
use crate::repository::question::{QuestionFilter, QuestionRepository};
use crate::service::timeout::bounded;

/// Default page size for question listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on the page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A resolved page request. Construction never fails: unusable input falls
/// back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Build from raw query-string values.
    ///
    /// Missing, non-numeric, or zero values fall back to page 1 / size 10;
    /// oversized limits are clamped to [`MAX_PAGE_SIZE`].
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let limit = limit
            .and_then(|l| l.trim().parse::<u32>().ok())
            .filter(|l| *l >= 1)
            .map(|l| l.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

/// Listing parameters after pagination has been resolved.
#[derive(Debug, Clone, Default)]
pub struct ListQuestions {
    pub pagination: Pagination,
    pub tag: Option<String>,
    pub search: Option<String>,
}

/// Service for question operations.
pub struct QuestionService<Q: QuestionRepository, A: AnswerRepository> {
    questions: Q,
    answers: A,
    store_timeout: Duration,
}

impl<Q: QuestionRepository, A: AnswerRepository> QuestionService<Q, A> {
    pub fn new(questions: Q, answers: A, store_timeout: Duration) -> Self {
        Self {
            questions,
            answers,
            store_timeout,
        }
    }

    /// Create a question owned by `caller`.
    pub async fn create_question(
        &self,
        caller: &Caller,
        request: CreateQuestionRequest,
    ) -> Result<Question, QaError> {
        let title = required_text(request.title, "title")?;
        let description = required_text(request.description, "description")?;
        let tags = normalize_tags(
            request
                .tags
                .ok_or_else(|| QaError::Validation("tags is required".to_string()))?,
        );

        let question = Question {
            id: QuestionId::new(),
            title,
            description,
            tags,
            author_id: caller.user_id.clone(),
            created_at: chrono::Utc::now(),
        };

        let question = bounded(self.store_timeout, self.questions.create(&question)).await?;

        tracing::info!(
            question_id = %question.id,
            author = %question.author_id,
            tags = question.tags.len(),
            "question created"
        );

        Ok(question)
    }

    /// List questions newest first, filtered by tag and title search.
    pub async fn list_questions(&self, params: ListQuestions) -> Result<Vec<Question>, QaError> {
        let filter = QuestionFilter {
            tag: params.tag.filter(|t| !t.trim().is_empty()),
            search: params
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            limit: i64::from(params.pagination.limit),
            offset: params.pagination.offset(),
        };

        tracing::debug!(?filter, "listing questions");
        Ok(bounded(self.store_timeout, self.questions.list(&filter)).await?)
    }

    /// Get a question by ID.
    pub async fn get_question(&self, id: &QuestionId) -> Result<Question, QaError> {
        bounded(self.store_timeout, self.questions.get_by_id(id))
            .await?
            .ok_or(QaError::QuestionNotFound)
    }

    /// Get a question along with its answers in display order.
    pub async fn get_question_detail(&self, id: &QuestionId) -> Result<QuestionDetail, QaError> {
        let question = self.get_question(id).await?;
        let answers = self.answers_for(&question.id).await?;
        Ok(QuestionDetail { question, answers })
    }

    /// Answers for an existing question in display order.
    pub async fn list_answers(&self, id: &QuestionId) -> Result<Vec<Answer>, QaError> {
        let question = self.get_question(id).await?;
        self.answers_for(&question.id).await
    }

    async fn answers_for(&self, id: &QuestionId) -> Result<Vec<Answer>, QaError> {
        let mut answers =
            bounded(self.store_timeout, self.answers.list_for_question(id)).await?;
        sort_for_display(&mut answers);
        Ok(answers)
    }
}

/// Trim a required text field, rejecting absent or blank values.
pub(crate) fn required_text(value: Option<String>, field: &str) -> Result<String, QaError> {
    let value = value.ok_or_else(|| QaError::Validation(format!("{field} is required")))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QaError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim tags, drop blanks and duplicates, keep first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
