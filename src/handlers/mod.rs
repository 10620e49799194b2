// src/handlers/mod.rs

pub mod public;
pub mod question;
pub mod quiz;
pub mod response;

use crate::{
    error::AppError,
    models::quiz::Quiz,
    services::lifecycle::{self, Action},
    store::QuizStore,
};

pub(crate) async fn load_quiz(store: &dyn QuizStore, id: &str) -> Result<Quiz, AppError> {
    store.get(id).await?.ok_or_else(AppError::quiz_not_found)
}

/// Loads a quiz that still accepts question edits (not CLOSED).
pub(crate) async fn load_editable_quiz(store: &dyn QuizStore, id: &str) -> Result<Quiz, AppError> {
    let quiz = load_quiz(store, id).await?;
    lifecycle::ensure_allowed(quiz.status, Action::Edit)?;
    Ok(quiz)
}
