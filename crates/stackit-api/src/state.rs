//! Application state wiring all services together.
//!
//! Services are generic over repository traits; AppState pins them to the
//! SQLite implementations and carries the token verifier used by the
//! identity gate.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use secrecy::SecretString;

use stackit_core::auth::DynTokenVerifier;
use stackit_core::service::answer::AnswerService;
use stackit_core::service::question::QuestionService;
use stackit_infra::config::resolve_data_dir;
use stackit_infra::sqlite::answer::SqliteAnswerRepository;
use stackit_infra::sqlite::pool::DatabasePool;
use stackit_infra::sqlite::question::SqliteQuestionRepository;
use stackit_infra::token::Hs256TokenVerifier;
use stackit_types::config::ServerConfig;

pub type ConcreteQuestionService = QuestionService<SqliteQuestionRepository, SqliteAnswerRepository>;

pub type ConcreteAnswerService = AnswerService<SqliteQuestionRepository, SqliteAnswerRepository>;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<ConcreteQuestionService>,
    pub answer_service: Arc<ConcreteAnswerService>,
    pub verifier: DynTokenVerifier,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Open the database, build the verifier and wire services.
    ///
    /// Fails when no token secret is configured.
    pub async fn init(config: &ServerConfig) -> anyhow::Result<Self> {
        let verifier = build_verifier(config)?;

        let db_url = match &config.database_url {
            Some(url) => url.clone(),
            None => {
                let data_dir = resolve_data_dir(config);
                tokio::fs::create_dir_all(&data_dir)
                    .await
                    .with_context(|| format!("creating data directory {}", data_dir.display()))?;
                config.resolved_database_url(&data_dir)
            }
        };

        let db_pool = DatabasePool::new(&db_url)
            .await
            .context("opening the question store")?;

        Ok(Self::from_parts(
            db_pool,
            Arc::new(verifier),
            Duration::from_millis(config.store_timeout_ms),
        ))
    }

    pub fn from_parts(
        db_pool: DatabasePool,
        verifier: DynTokenVerifier,
        store_timeout: Duration,
    ) -> Self {
        let question_service = QuestionService::new(
            SqliteQuestionRepository::new(db_pool.clone()),
            SqliteAnswerRepository::new(db_pool.clone()),
            store_timeout,
        );
        let answer_service = AnswerService::new(
            SqliteQuestionRepository::new(db_pool.clone()),
            SqliteAnswerRepository::new(db_pool.clone()),
            store_timeout,
        );

        Self {
            question_service: Arc::new(question_service),
            answer_service: Arc::new(answer_service),
            verifier,
            db_pool,
        }
    }
}

/// Build the HS256 verifier from the configured secret.
pub fn build_verifier(config: &ServerConfig) -> anyhow::Result<Hs256TokenVerifier> {
    let secret = config
        .jwt_secret
        .clone()
        .filter(|s| !s.trim().is_empty())
        .context("JWT_SECRET is not set; refusing to start without a token secret")?;
    Ok(Hs256TokenVerifier::new(SecretString::from(secret))?)
}
