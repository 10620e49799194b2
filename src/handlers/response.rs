// src/handlers/response.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    handlers::load_quiz,
    models::response::ResponseListResponse,
    services::statistics,
    store::{QuizStore, ResponseStore},
};

/// Lists the stored responses of a quiz, newest first.
///
/// Answers straight from the response store, so responses of a deleted quiz
/// remain reachable.
pub async fn list_responses(
    State(responses): State<Arc<dyn ResponseStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let responses = responses.list_by_quiz_id(&id).await?;
    Ok(Json(ResponseListResponse {
        total: responses.len(),
        responses,
    }))
}

/// Per-question answer distributions computed from all responses.
pub async fn get_stats(
    State(quizzes): State<Arc<dyn QuizStore>>,
    State(responses): State<Arc<dyn ResponseStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = load_quiz(quizzes.as_ref(), &id).await?;
    let responses = responses.list_by_quiz_id(&quiz.id).await?;

    Ok(Json(statistics::aggregate(&quiz, &responses)))
}
