// src/store/mod.rs

//! Persistence seams for quiz and response documents.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{quiz::Quiz, response::QuizResponse},
};

/// Quiz documents keyed by id, with a unique secondary key on slug.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Quiz>, AppError>;

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Quiz>, AppError>;

    /// Inserts or replaces the quiz, assigning an id when it has none.
    ///
    /// Fails with `AppError::Conflict` if another quiz already owns the slug.
    async fn put(&self, quiz: Quiz) -> Result<Quiz, AppError>;

    /// Returns whether a quiz was removed. Responses are left in place.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// All quizzes, newest first.
    async fn list_all(&self) -> Result<Vec<Quiz>, AppError>;
}

/// Append-only response documents.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Stores a new response, assigning its id.
    async fn put(&self, response: QuizResponse) -> Result<QuizResponse, AppError>;

    /// Responses of one quiz, newest first.
    async fn list_by_quiz_id(&self, quiz_id: &str) -> Result<Vec<QuizResponse>, AppError>;
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn slug_taken() -> AppError {
    AppError::Conflict("Slug is already used by another quiz".to_string())
}
