//! SQLite answer repository implementation.
//!
//! Votes are single `UPDATE ... SET n = n + 1` statements. Acceptance runs in
//! a transaction that clears every sibling before setting the target; a
//! partial unique index backs the one-accepted-per-question rule.

use stackit_core::repository::answer::AnswerRepository;
use stackit_types::answer::{Answer, AnswerId, VoteDirection};
use stackit_types::error::RepositoryError;
use stackit_types::identity::UserId;
use stackit_types::question::QuestionId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `AnswerRepository`.
pub struct SqliteAnswerRepository {
    pool: DatabasePool,
}

impl SqliteAnswerRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct AnswerRow {
    id: String,
    question_id: String,
    author_id: String,
    content: String,
    upvotes: i64,
    downvotes: i64,
    is_accepted: bool,
    created_at: String,
}

impl AnswerRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            question_id: row.try_get("question_id")?,
            author_id: row.try_get("author_id")?,
            content: row.try_get("content")?,
            upvotes: row.try_get("upvotes")?,
            downvotes: row.try_get("downvotes")?,
            is_accepted: row.try_get("is_accepted")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_answer(self) -> Result<Answer, RepositoryError> {
        let id = self
            .id
            .parse::<AnswerId>()
            .map_err(|e| RepositoryError::Query(format!("invalid answer id: {e}")))?;
        let question_id = self
            .question_id
            .parse::<QuestionId>()
            .map_err(|e| RepositoryError::Query(format!("invalid question id: {e}")))?;

        Ok(Answer {
            id,
            question_id,
            author_id: UserId(self.author_id),
            content: self.content,
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            is_accepted: self.is_accepted,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl AnswerRepository for SqliteAnswerRepository {
    async fn create(&self, answer: &Answer) -> Result<Answer, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO answers (id, question_id, author_id, content, upvotes, downvotes, is_accepted, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(answer.id.to_string())
        .bind(answer.question_id.to_string())
        .bind(answer.author_id.as_str())
        .bind(&answer.content)
        .bind(answer.upvotes)
        .bind(answer.downvotes)
        .bind(answer.is_accepted)
        .bind(format_datetime(&answer.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(answer.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("FOREIGN KEY") => {
                Err(RepositoryError::NotFound)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("answer '{}' already exists", answer.id)),
            ),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn get_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM answers WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => Ok(Some(AnswerRow::from_row(&row).map_err(query_error)?.into_answer()?)),
            None => Ok(None),
        }
    }

    async fn list_for_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM answers WHERE question_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(question_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        let mut answers = Vec::with_capacity(rows.len());
        for row in &rows {
            answers.push(AnswerRow::from_row(row).map_err(query_error)?.into_answer()?);
        }
        Ok(answers)
    }

    async fn record_vote(
        &self,
        id: &AnswerId,
        direction: VoteDirection,
    ) -> Result<(), RepositoryError> {
        let sql = match direction {
            VoteDirection::Up => "UPDATE answers SET upvotes = upvotes + 1 WHERE id = ?",
            VoteDirection::Down => "UPDATE answers SET downvotes = downvotes + 1 WHERE id = ?",
        };

        let result = sqlx::query(sql)
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn accept(&self, id: &AnswerId, question_id: &QuestionId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        sqlx::query("UPDATE answers SET is_accepted = 0 WHERE question_id = ? AND id != ?")
            .bind(question_id.to_string())
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        let result =
            sqlx::query("UPDATE answers SET is_accepted = 1 WHERE id = ? AND question_id = ?")
                .bind(id.to_string())
                .bind(question_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(query_error)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the sibling reset.
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::tests::test_pool;
    use crate::sqlite::question::SqliteQuestionRepository;
    use chrono::Utc;
    use stackit_core::repository::question::QuestionRepository;
    use stackit_types::question::Question;

    async fn setup() -> (SqliteAnswerRepository, QuestionId) {
        let pool = test_pool().await;
        let questions = SqliteQuestionRepository::new(pool.clone());
        let q = Question {
            id: QuestionId::new(),
            title: "Why?".to_string(),
            description: "...".to_string(),
            tags: vec![],
            author_id: UserId::from("u1"),
            created_at: Utc::now(),
        };
        questions.create(&q).await.unwrap();
        (SqliteAnswerRepository::new(pool), q.id)
    }

    fn make_answer(question_id: QuestionId, content: &str) -> Answer {
        Answer {
            id: AnswerId::new(),
            question_id,
            author_id: UserId::from("u2"),
            content: content.to_string(),
            upvotes: 0,
            downvotes: 0,
            is_accepted: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (repo, qid) = setup().await;
        let a = make_answer(qid, "Because.");

        repo.create(&a).await.unwrap();
        let found = repo.get_by_id(&a.id).await.unwrap().unwrap();
        assert_eq!(found, a);
    }

    #[tokio::test]
    async fn test_create_for_missing_question_is_not_found() {
        let (repo, _) = setup().await;
        let err = repo
            .create(&make_answer(QuestionId::new(), "orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_for_question_in_insertion_order() {
        let (repo, qid) = setup().await;
        let first = make_answer(qid, "first");
        let second = make_answer(qid, "second");
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        let answers = repo.list_for_question(&qid).await.unwrap();
        let contents: Vec<&str> = answers.iter().map(|a| a.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);

        assert!(repo.list_for_question(&QuestionId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_vote_increments_one_counter() {
        let (repo, qid) = setup().await;
        let a = make_answer(qid, "a");
        repo.create(&a).await.unwrap();

        repo.record_vote(&a.id, VoteDirection::Up).await.unwrap();
        repo.record_vote(&a.id, VoteDirection::Up).await.unwrap();
        repo.record_vote(&a.id, VoteDirection::Down).await.unwrap();

        let found = repo.get_by_id(&a.id).await.unwrap().unwrap();
        assert_eq!(found.upvotes, 2);
        assert_eq!(found.downvotes, 1);
        assert_eq!(found.content, "a");
        assert!(!found.is_accepted);
    }

    #[tokio::test]
    async fn test_record_vote_missing_answer() {
        let (repo, _) = setup().await;
        let err = repo
            .record_vote(&AnswerId::new(), VoteDirection::Up)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_accept_clears_siblings() {
        let (repo, qid) = setup().await;
        let first = make_answer(qid, "first");
        let second = make_answer(qid, "second");
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        repo.accept(&first.id, &qid).await.unwrap();
        repo.accept(&second.id, &qid).await.unwrap();

        let answers = repo.list_for_question(&qid).await.unwrap();
        let accepted: Vec<&str> = answers
            .iter()
            .filter(|a| a.is_accepted)
            .map(|a| a.content.as_str())
            .collect();
        assert_eq!(accepted, vec!["second"]);

        // Idempotent on the already accepted answer.
        repo.accept(&second.id, &qid).await.unwrap();
        assert!(repo.get_by_id(&second.id).await.unwrap().unwrap().is_accepted);
    }

    #[tokio::test]
    async fn test_accept_unknown_answer_rolls_back() {
        let (repo, qid) = setup().await;
        let a = make_answer(qid, "a");
        repo.create(&a).await.unwrap();
        repo.accept(&a.id, &qid).await.unwrap();

        let err = repo.accept(&AnswerId::new(), &qid).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        // The existing accepted answer keeps its flag.
        assert!(repo.get_by_id(&a.id).await.unwrap().unwrap().is_accepted);
    }

    #[tokio::test]
    async fn test_unique_index_rejects_second_accepted() {
        let (repo, qid) = setup().await;
        let mut first = make_answer(qid, "first");
        first.is_accepted = true;
        let mut second = make_answer(qid, "second");
        second.is_accepted = true;

        repo.create(&first).await.unwrap();
        let err = repo.create(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
