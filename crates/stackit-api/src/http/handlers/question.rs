//! Question handlers for the REST API.

use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use stackit_types::question::{CreateQuestionRequest, Question, QuestionDetail};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthenticatedCaller;
use crate::http::extractors::json::ValidJson;
use crate::http::extractors::query::QuestionListQuery;
use crate::http::handlers::parse_question_id;
use crate::http::response::{Ack, ApiResponse};
use crate::state::AppState;

/// POST /api/v1/questions - Create a question owned by the caller.
pub async fn create_question(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    ValidJson(body): ValidJson<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Ack>>), AppError> {
    let start = Instant::now();

    let question = state.question_service.create_question(&caller, body).await?;

    let resp = ApiResponse::timed(Ack::with_id("Question created", question.id), start)
        .with_link("self", format!("/api/v1/questions/{}", question.id))
        .with_link("answers", format!("/api/v1/questions/{}/answers", question.id));

    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /api/v1/questions - List questions newest first.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionListQuery>,
) -> Result<Json<ApiResponse<Vec<Question>>>, AppError> {
    let start = Instant::now();

    let questions = state
        .question_service
        .list_questions(query.into_params())
        .await?;

    Ok(Json(
        ApiResponse::timed(questions, start).with_link("self", "/api/v1/questions"),
    ))
}

/// GET /api/v1/questions/{id} - A question with its answers.
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<QuestionDetail>>, AppError> {
    let start = Instant::now();
    let id = parse_question_id(&id)?;

    let detail = state.question_service.get_question_detail(&id).await?;

    Ok(Json(
        ApiResponse::timed(detail, start)
            .with_link("self", format!("/api/v1/questions/{id}"))
            .with_link("answers", format!("/api/v1/questions/{id}/answers")),
    ))
}
