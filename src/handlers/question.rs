// src/handlers/question.rs

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
    handlers::load_editable_quiz,
    models::quiz::{QuestionRequest, ReorderQuestionsRequest},
    services::lifecycle,
    store::QuizStore,
};

/// Appends a question to the quiz. The server assigns its id and order.
pub async fn add_question(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
    Json(payload): Json<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut quiz = load_editable_quiz(quizzes.as_ref(), &id).await?;
    let question = lifecycle::add_question(&mut quiz, payload, Utc::now());
    quizzes.put(quiz).await?;

    Ok((StatusCode::CREATED, Json(question)))
}

/// Replaces the content of a question; its id and order are kept.
pub async fn update_question(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Path((id, question_id)): Path<(String, String)>,
    Json(payload): Json<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut quiz = load_editable_quiz(quizzes.as_ref(), &id).await?;
    let question = lifecycle::update_question(&mut quiz, &question_id, payload, Utc::now())
        .ok_or(AppError::NotFound("Question not found".to_string()))?;
    quizzes.put(quiz).await?;

    Ok(Json(question))
}

pub async fn delete_question(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Path((id, question_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let mut quiz = load_editable_quiz(quizzes.as_ref(), &id).await?;
    if !lifecycle::remove_question(&mut quiz, &question_id, Utc::now()) {
        return Err(AppError::NotFound("Question not found".to_string()));
    }
    quizzes.put(quiz).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Rebuilds the question list in the submitted order.
/// Questions whose ids are not listed are removed from the quiz.
pub async fn reorder_questions(
    State(quizzes): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
    Json(payload): Json<ReorderQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut quiz = load_editable_quiz(quizzes.as_ref(), &id).await?;
    lifecycle::reorder(&mut quiz, &payload.question_ids, Utc::now());
    let quiz = quizzes.put(quiz).await?;

    Ok(Json(quiz))
}
