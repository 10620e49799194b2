use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{
    config::Config,
    store::{
        QuizStore, ResponseStore,
        memory::{MemoryQuizStore, MemoryResponseStore},
        postgres::{PgQuizStore, PgResponseStore},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quizzes: Arc<dyn QuizStore>,
    pub responses: Arc<dyn ResponseStore>,
    pub config: Config,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        Self {
            quizzes: Arc::new(PgQuizStore::new(pool.clone())),
            responses: Arc::new(PgResponseStore::new(pool)),
            config,
        }
    }

    /// Stores that live and die with the process.
    pub fn in_memory(config: Config) -> Self {
        Self {
            quizzes: Arc::new(MemoryQuizStore::default()),
            responses: Arc::new(MemoryResponseStore::default()),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<dyn QuizStore> {
    fn from_ref(state: &AppState) -> Self {
        state.quizzes.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ResponseStore> {
    fn from_ref(state: &AppState) -> Self {
        state.responses.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
