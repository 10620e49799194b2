// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    handlers::load_quiz,
    models::quiz::{
        CreateQuizRequest, ListParams, PublishQuizResponse, QuizListResponse, UpdateQuizRequest,
        UpdateQuizResponse,
    },
    services::lifecycle,
    store::QuizStore,
};

/// Lists all quizzes, optionally filtered by creator department.
///
/// Quizzes without a creator department are visible to every department.
pub async fn list_quizzes(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let mut all = quizzes.list_all().await?;

    if let Some(department) = params.department.as_deref().filter(|d| !d.is_empty()) {
        all.retain(|q| q.visible_to_department(department));
    }

    Ok(Json(QuizListResponse {
        total: all.len(),
        quizzes: all,
    }))
}

/// Creates a new quiz in DRAFT status.
pub async fn create_quiz(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quiz = quizzes.put(lifecycle::new_quiz(payload, Utc::now())).await?;
    tracing::info!(quiz_id = %quiz.id, "Quiz created");

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Retrieves a single quiz by ID, including answer keys.
pub async fn get_quiz(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = load_quiz(quizzes.as_ref(), &id).await?;
    Ok(Json(quiz))
}

/// Edits quiz-level fields.
///
/// A proposed slug already owned by another quiz does not fail the request;
/// `slugUpdate` reports it as rejected.
pub async fn update_quiz(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quiz = load_quiz(quizzes.as_ref(), &id).await?;
    let (quiz, slug_update) = lifecycle::edit(quizzes.as_ref(), quiz, &payload).await?;

    Ok(Json(UpdateQuizResponse { quiz, slug_update }))
}

/// Deletes a quiz. Its responses are kept.
pub async fn delete_quiz(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !quizzes.delete(&id).await? {
        return Err(AppError::quiz_not_found());
    }
    tracing::info!(quiz_id = %id, "Quiz deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Publishes a quiz and returns its public link.
pub async fn publish_quiz(
    State(quizzes): State<Arc<dyn QuizStore>>,
    State(config): State<Config>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = load_quiz(quizzes.as_ref(), &id).await?;
    let quiz = lifecycle::publish(quizzes.as_ref(), quiz).await?;

    let public_url = config.public_url(quiz.slug.as_deref().unwrap_or_default());
    Ok(Json(PublishQuizResponse { quiz, public_url }))
}

/// Closes a quiz for further responses.
pub async fn close_quiz(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut quiz = load_quiz(quizzes.as_ref(), &id).await?;
    lifecycle::close(&mut quiz, Utc::now())?;

    let quiz = quizzes.put(quiz).await?;
    tracing::info!(quiz_id = %quiz.id, "Quiz closed");
    Ok(Json(quiz))
}
