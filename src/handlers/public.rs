// src/handlers/public.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        quiz::{PublicQuiz, QuizStatus},
        response::{QuizResponse, SubmitResponseRequest},
    },
    services::{
        lifecycle::{self, Action},
        scoring,
    },
    store::{QuizStore, ResponseStore},
    utils::ip::RespondentIp,
};

/// Fetches a quiz by slug for respondents, without answer keys.
/// Drafts are not visible even if they already carry a slug.
pub async fn get_public_quiz(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes
        .get_by_slug(&slug)
        .await?
        .filter(|q| q.status != QuizStatus::Draft)
        .ok_or_else(AppError::quiz_not_found)?;

    Ok(Json(PublicQuiz::from(&quiz)))
}

/// Submits a response to a published quiz.
///
/// * The score is always computed here; any client value is ignored.
/// * Respondent name and email are dropped for anonymous quizzes.
pub async fn submit_response(
    State(quizzes): State<Arc<dyn QuizStore>>,
    State(responses): State<Arc<dyn ResponseStore>>,
    Path(slug): Path<String>,
    RespondentIp(respondent_ip): RespondentIp,
    Json(payload): Json<SubmitResponseRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quiz = quizzes
        .get_by_slug(&slug)
        .await?
        .ok_or_else(AppError::quiz_not_found)?;
    lifecycle::ensure_allowed(quiz.status, Action::Respond)?;

    let score = scoring::score(&quiz, &payload.answers);

    let (respondent_email, respondent_name) = if quiz.anonymous {
        (None, None)
    } else {
        (payload.respondent_email, payload.respondent_name)
    };

    let response = QuizResponse {
        id: String::new(),
        quiz_id: quiz.id.clone(),
        answers: payload.answers,
        submitted_at: Utc::now(),
        respondent_email,
        respondent_name,
        respondent_ip,
        completing_time: payload.completing_time,
        score,
    };

    let saved = responses.put(response).await?;
    tracing::info!(quiz_id = %quiz.id, response_id = %saved.id, score, "Response submitted");

    Ok((StatusCode::CREATED, Json(saved)))
}
