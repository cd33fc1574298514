//! Answer service: posting, voting, and acceptance.
//!
//! Acceptance is the only operation with an authorization rule beyond
//! "is authenticated": the caller must be the author of the parent question.

use std::time::Duration;

use stackit_types::answer::{Answer, AnswerId, CreateAnswerRequest, VoteDirection, VoteRequest};
use stackit_types::error::{QaError, RepositoryError};
use stackit_types::identity::Caller;
use stackit_types::question::QuestionId;

use crate::repository::answer::AnswerRepository;
use crate::repository::question::QuestionRepository;
use crate::service::question::required_text;
use crate::service::timeout::bounded;

/// Service for answer operations.
pub struct AnswerService<Q: QuestionRepository, A: AnswerRepository> {
    questions: Q,
    answers: A,
    store_timeout: Duration,
}

impl<Q: QuestionRepository, A: AnswerRepository> AnswerService<Q, A> {
    pub fn new(questions: Q, answers: A, store_timeout: Duration) -> Self {
        Self {
            questions,
            answers,
            store_timeout,
        }
    }

    /// Post an answer to an existing question.
    pub async fn post_answer(
        &self,
        caller: &Caller,
        question_id: &QuestionId,
        request: CreateAnswerRequest,
    ) -> Result<Answer, QaError> {
        let content = required_text(request.content, "content")?;

        bounded(self.store_timeout, self.questions.get_by_id(question_id))
            .await?
            .ok_or(QaError::QuestionNotFound)?;

        let answer = Answer {
            id: AnswerId::new(),
            question_id: *question_id,
            author_id: caller.user_id.clone(),
            content,
            upvotes: 0,
            downvotes: 0,
            is_accepted: false,
            created_at: chrono::Utc::now(),
        };

        let answer = bounded(self.store_timeout, self.answers.create(&answer)).await?;

        tracing::info!(
            answer_id = %answer.id,
            question_id = %answer.question_id,
            author = %answer.author_id,
            "answer posted"
        );

        Ok(answer)
    }

    /// Record one vote on an answer.
    ///
    /// `"up"` counts as an upvote; any other value counts as a downvote.
    /// Votes are not deduplicated per caller.
    pub async fn vote(
        &self,
        caller: &Caller,
        answer_id: &AnswerId,
        request: VoteRequest,
    ) -> Result<VoteDirection, QaError> {
        let raw = request
            .vote
            .ok_or_else(|| QaError::Validation("vote is required".to_string()))?;

        let direction = VoteDirection::from_vote(&raw);
        if raw.parse::<VoteDirection>().is_err() {
            tracing::warn!(
                answer_id = %answer_id,
                vote = %raw,
                "unrecognized vote direction, counting as a downvote"
            );
        }

        match bounded(self.store_timeout, self.answers.record_vote(answer_id, direction)).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(QaError::AnswerNotFound),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            answer_id = %answer_id,
            caller = %caller.user_id,
            %direction,
            "vote recorded"
        );

        Ok(direction)
    }

    /// Mark an answer as the accepted answer of its question.
    ///
    /// Only the question's author may accept. Any previously accepted sibling
    /// loses the flag in the same store transaction.
    pub async fn accept(&self, caller: &Caller, answer_id: &AnswerId) -> Result<Answer, QaError> {
        let mut answer = bounded(self.store_timeout, self.answers.get_by_id(answer_id))
            .await?
            .ok_or(QaError::AnswerNotFound)?;

        let question = bounded(
            self.store_timeout,
            self.questions.get_by_id(&answer.question_id),
        )
        .await?
        .ok_or(QaError::QuestionNotFound)?;

        if !caller.is(&question.author_id) {
            tracing::warn!(
                answer_id = %answer_id,
                question_id = %question.id,
                caller = %caller.user_id,
                "accept refused: caller is not the question author"
            );
            return Err(QaError::Forbidden(
                "only the question author can accept answers".to_string(),
            ));
        }

        match bounded(
            self.store_timeout,
            self.answers.accept(&answer.id, &answer.question_id),
        )
        .await
        {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(QaError::AnswerNotFound),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            answer_id = %answer.id,
            question_id = %answer.question_id,
            "answer accepted"
        );

        answer.is_accepted = true;
        Ok(answer)
    }
}
