use thiserror::Error;

/// Errors surfaced by question and answer operations.
#[derive(Debug, Error)]
pub enum QaError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("question not found")]
    QuestionNotFound,

    #[error("answer not found")]
    AnswerNotFound,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("store call timed out after {0} ms")]
    Timeout(u64),
}

impl From<RepositoryError> for QaError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Timeout(ms) => QaError::Timeout(ms),
            other => QaError::StorageError(other.to_string()),
        }
    }
}

/// Errors from bearer credential verification.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingCredential,

    #[error("malformed authorization header: {0}")]
    MalformedCredential(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    Expired,
}

/// Errors from repository operations (used by trait definitions in stackit-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("timed out after {0} ms")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qa_error_display() {
        let err = QaError::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "validation failed: title is required");
        assert_eq!(QaError::Timeout(5000).to_string(), "store call timed out after 5000 ms");
    }

    #[test]
    fn test_repository_error_converts_to_storage() {
        let err: QaError = RepositoryError::Query("syntax error".to_string()).into();
        assert!(matches!(err, QaError::StorageError(ref msg) if msg == "query error: syntax error"));
    }

    #[test]
    fn test_repository_timeout_stays_timeout() {
        let err: QaError = RepositoryError::Timeout(250).into();
        assert!(matches!(err, QaError::Timeout(250)));
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::Expired.to_string(), "token expired");
        assert_eq!(AuthError::MissingCredential.to_string(), "missing bearer token");
    }
}
