// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use super::{QuizStore, ResponseStore, new_id};
use crate::{
    error::AppError,
    models::{quiz::Quiz, response::QuizResponse},
};

/// Quizzes stored as JSONB documents in the `quizzes` table.
///
/// `slug` is mirrored into its own column carrying a UNIQUE index, so two
/// concurrent writers can never both own a slug.
#[derive(Debug, Clone)]
pub struct PgQuizStore {
    pool: PgPool,
}

impl PgQuizStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizStore for PgQuizStore {
    async fn get(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        let row: Option<(Json<Quiz>,)> =
            sqlx::query_as("SELECT document FROM quizzes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(Json(quiz),)| quiz))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Quiz>, AppError> {
        let row: Option<(Json<Quiz>,)> =
            sqlx::query_as("SELECT document FROM quizzes WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(Json(quiz),)| quiz))
    }

    async fn put(&self, mut quiz: Quiz) -> Result<Quiz, AppError> {
        if quiz.id.is_empty() {
            quiz.id = new_id();
        }

        sqlx::query(
            r#"
            INSERT INTO quizzes (id, slug, document, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                slug = EXCLUDED.slug,
                document = EXCLUDED.document
            "#,
        )
        .bind(&quiz.id)
        .bind(quiz.slug.as_deref())
        .bind(Json(&quiz))
        .bind(quiz.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save quiz {}: {:?}", quiz.id, e);
            AppError::from(e)
        })?;

        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<Quiz>, AppError> {
        let rows: Vec<(Json<Quiz>,)> =
            sqlx::query_as("SELECT document FROM quizzes ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(Json(quiz),)| quiz).collect())
    }
}

/// Responses stored as JSONB documents in `quiz_responses`, indexed by quiz id.
/// No foreign key: responses outlive their quiz.
#[derive(Debug, Clone)]
pub struct PgResponseStore {
    pool: PgPool,
}

impl PgResponseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseStore for PgResponseStore {
    async fn put(&self, mut response: QuizResponse) -> Result<QuizResponse, AppError> {
        response.id = new_id();

        sqlx::query(
            r#"
            INSERT INTO quiz_responses (id, quiz_id, document, submitted_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&response.id)
        .bind(&response.quiz_id)
        .bind(Json(&response))
        .bind(response.submitted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save response for quiz {}: {:?}", response.quiz_id, e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(response)
    }

    async fn list_by_quiz_id(&self, quiz_id: &str) -> Result<Vec<QuizResponse>, AppError> {
        let rows: Vec<(Json<QuizResponse>,)> = sqlx::query_as(
            "SELECT document FROM quiz_responses WHERE quiz_id = $1 ORDER BY submitted_at DESC",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(Json(response),)| response).collect())
    }
}
