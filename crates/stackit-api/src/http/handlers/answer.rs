//! Answer handlers: post, list, vote, accept.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use stackit_types::answer::{Answer, CreateAnswerRequest, VoteRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthenticatedCaller;
use crate::http::extractors::json::ValidJson;
use crate::http::handlers::{parse_answer_id, parse_question_id};
use crate::http::response::{Ack, ApiResponse};
use crate::state::AppState;

/// POST /api/v1/questions/{id}/answers - Answer an existing question.
pub async fn post_answer(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(question_id): Path<String>,
    ValidJson(body): ValidJson<CreateAnswerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Ack>>), AppError> {
    let start = Instant::now();
    let question_id = parse_question_id(&question_id)?;

    let answer = state
        .answer_service
        .post_answer(&caller, &question_id, body)
        .await?;

    let resp = ApiResponse::timed(Ack::with_id("Answer posted", answer.id), start)
        .with_link("question", format!("/api/v1/questions/{question_id}"))
        .with_link("vote", format!("/api/v1/answers/{}/vote", answer.id));

    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /api/v1/questions/{id}/answers - Answers in display order.
pub async fn list_answers(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Answer>>>, AppError> {
    let start = Instant::now();
    let question_id = parse_question_id(&question_id)?;

    let answers = state.question_service.list_answers(&question_id).await?;

    Ok(Json(ApiResponse::timed(answers, start).with_link(
        "question",
        format!("/api/v1/questions/{question_id}"),
    )))
}

/// POST /api/v1/answers/{id}/vote - Record one up or down vote.
pub async fn vote_answer(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(answer_id): Path<String>,
    ValidJson(body): ValidJson<VoteRequest>,
) -> Result<Json<ApiResponse<Ack>>, AppError> {
    let start = Instant::now();
    let answer_id = parse_answer_id(&answer_id)?;

    state.answer_service.vote(&caller, &answer_id, body).await?;

    Ok(Json(ApiResponse::timed(Ack::new("Vote recorded"), start)))
}

/// PATCH /api/v1/answers/{id}/accept - Accept an answer (question author only).
pub async fn accept_answer(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(answer_id): Path<String>,
) -> Result<Json<ApiResponse<Ack>>, AppError> {
    let start = Instant::now();
    let answer_id = parse_answer_id(&answer_id)?;

    let answer = state.answer_service.accept(&caller, &answer_id).await?;

    Ok(Json(
        ApiResponse::timed(Ack::with_id("Answer accepted", answer.id), start).with_link(
            "question",
            format!("/api/v1/questions/{}", answer.question_id),
        ),
    ))
}
