//! In-memory repositories shared by the service tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use stackit_types::answer::{Answer, AnswerId, VoteDirection};
use stackit_types::error::RepositoryError;
use stackit_types::question::{fold_case, Question, QuestionId};

use crate::repository::answer::AnswerRepository;
use crate::repository::question::{QuestionFilter, QuestionRepository};

/// Both repositories over one shared in-memory store. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub questions: Arc<Mutex<Vec<Question>>>,
    pub answers: Arc<Mutex<Vec<Answer>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Make every subsequent call fail with a query error.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RepositoryError::Query("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    pub fn answer(&self, id: &AnswerId) -> Answer {
        self.answers
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .unwrap()
    }
}

impl QuestionRepository for MemoryStore {
    async fn create(&self, question: &Question) -> Result<Question, RepositoryError> {
        self.check()?;
        self.questions.lock().unwrap().push(question.clone());
        Ok(question.clone())
    }

    async fn get_by_id(&self, id: &QuestionId) -> Result<Option<Question>, RepositoryError> {
        self.check()?;
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| &q.id == id)
            .cloned())
    }

    async fn list(&self, filter: &QuestionFilter) -> Result<Vec<Question>, RepositoryError> {
        self.check()?;
        let mut matched: Vec<Question> = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| filter.tag.as_deref().is_none_or(|t| q.tags.iter().any(|tag| tag == t)))
            .filter(|q| {
                filter
                    .search
                    .as_deref()
                    .is_none_or(|s| fold_case(&q.title).contains(&fold_case(s)))
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(matched
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }
}

impl AnswerRepository for MemoryStore {
    async fn create(&self, answer: &Answer) -> Result<Answer, RepositoryError> {
        self.check()?;
        self.answers.lock().unwrap().push(answer.clone());
        Ok(answer.clone())
    }

    async fn get_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, RepositoryError> {
        self.check()?;
        Ok(self
            .answers
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn list_for_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, RepositoryError> {
        self.check()?;
        Ok(self
            .answers
            .lock()
            .unwrap()
            .iter()
            .filter(|a| &a.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn record_vote(
        &self,
        id: &AnswerId,
        direction: VoteDirection,
    ) -> Result<(), RepositoryError> {
        self.check()?;
        let mut answers = self.answers.lock().unwrap();
        let answer = answers
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or(RepositoryError::NotFound)?;
        match direction {
            VoteDirection::Up => answer.upvotes += 1,
            VoteDirection::Down => answer.downvotes += 1,
        }
        Ok(())
    }

    async fn accept(&self, id: &AnswerId, question_id: &QuestionId) -> Result<(), RepositoryError> {
        self.check()?;
        let mut answers = self.answers.lock().unwrap();
        if !answers.iter().any(|a| &a.id == id) {
            return Err(RepositoryError::NotFound);
        }
        for answer in answers.iter_mut().filter(|a| &a.question_id == question_id) {
            answer.is_accepted = &answer.id == id;
        }
        Ok(())
    }
}
