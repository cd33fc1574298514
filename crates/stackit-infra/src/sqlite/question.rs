//! SQLite question repository implementation.
//!
//! Tags are stored as a JSON array and matched with `json_each`. Title search
//! runs against `title_lower`, folded in Rust so non-ASCII letters match.

use stackit_core::repository::question::{QuestionFilter, QuestionRepository};
use stackit_types::error::RepositoryError;
use stackit_types::identity::UserId;
use stackit_types::question::{fold_case, Question, QuestionId};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `QuestionRepository`.
pub struct SqliteQuestionRepository {
    pool: DatabasePool,
}

impl SqliteQuestionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Question.
struct QuestionRow {
    id: String,
    title: String,
    description: String,
    tags: String,
    author_id: String,
    created_at: String,
}

impl QuestionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            tags: row.try_get("tags")?,
            author_id: row.try_get("author_id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_question(self) -> Result<Question, RepositoryError> {
        let id = self
            .id
            .parse::<QuestionId>()
            .map_err(|e| RepositoryError::Query(format!("invalid question id: {e}")))?;

        let tags: Vec<String> = serde_json::from_str(&self.tags)
            .map_err(|e| RepositoryError::Query(format!("invalid tags JSON: {e}")))?;

        Ok(Question {
            id,
            title: self.title,
            description: self.description,
            tags,
            author_id: UserId(self.author_id),
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl QuestionRepository for SqliteQuestionRepository {
    async fn create(&self, question: &Question) -> Result<Question, RepositoryError> {
        let tags_json = serde_json::to_string(&question.tags)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO questions (id, title, title_lower, description, tags, author_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(question.id.to_string())
        .bind(&question.title)
        .bind(fold_case(&question.title))
        .bind(&question.description)
        .bind(&tags_json)
        .bind(question.author_id.as_str())
        .bind(format_datetime(&question.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(question.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("question '{}' already exists", question.id)),
            ),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn get_by_id(&self, id: &QuestionId) -> Result<Option<Question>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM questions WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let question_row = QuestionRow::from_row(&row).map_err(query_error)?;
                Ok(Some(question_row.into_question()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &QuestionFilter) -> Result<Vec<Question>, RepositoryError> {
        let mut sql = String::from("SELECT * FROM questions");
        let mut conditions: Vec<&str> = Vec::new();

        if filter.tag.is_some() {
            conditions.push(
                "EXISTS (SELECT 1 FROM json_each(questions.tags) WHERE json_each.value = ?)",
            );
        }
        if filter.search.is_some() {
            conditions.push("instr(title_lower, ?) > 0");
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        // UUID v7 ids are time-ordered, so they break created_at ties stably.
        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query(&sql);
        if let Some(tag) = &filter.tag {
            query = query.bind(tag.as_str());
        }
        if let Some(search) = &filter.search {
            query = query.bind(fold_case(search));
        }
        query = query.bind(filter.limit).bind(filter.offset);

        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in &rows {
            let question_row = QuestionRow::from_row(row).map_err(query_error)?;
            questions.push(question_row.into_question()?);
        }

        Ok(questions)
    }
}
