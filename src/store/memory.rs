// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{QuizStore, ResponseStore, new_id, slug_taken};
use crate::{
    error::AppError,
    models::{quiz::Quiz, response::QuizResponse},
};

/// Process-local quiz store. Slug ownership is checked under the write lock.
#[derive(Debug, Default)]
pub struct MemoryQuizStore {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

#[async_trait]
impl QuizStore for MemoryQuizStore {
    async fn get(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Quiz>, AppError> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes
            .values()
            .find(|q| q.slug.as_deref() == Some(slug))
            .cloned())
    }

    async fn put(&self, mut quiz: Quiz) -> Result<Quiz, AppError> {
        let mut quizzes = self.quizzes.write().await;
        if quiz.id.is_empty() {
            quiz.id = new_id();
        }
        if let Some(slug) = quiz.slug.as_deref() {
            let taken = quizzes
                .values()
                .any(|q| q.id != quiz.id && q.slug.as_deref() == Some(slug));
            if taken {
                return Err(slug_taken());
            }
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.quizzes.write().await.remove(id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Quiz>, AppError> {
        let mut all: Vec<Quiz> = self.quizzes.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

#[derive(Debug, Default)]
pub struct MemoryResponseStore {
    responses: RwLock<Vec<QuizResponse>>,
}

#[async_trait]
impl ResponseStore for MemoryResponseStore {
    async fn put(&self, mut response: QuizResponse) -> Result<QuizResponse, AppError> {
        response.id = new_id();
        self.responses.write().await.push(response.clone());
        Ok(response)
    }

    async fn list_by_quiz_id(&self, quiz_id: &str) -> Result<Vec<QuizResponse>, AppError> {
        let responses = self.responses.read().await;
        Ok(responses
            .iter()
            .rev()
            .filter(|r| r.quiz_id == quiz_id)
            .cloned()
            .collect())
    }
}
