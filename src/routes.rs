// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{public, question, quiz, response},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Quiz authoring, lifecycle, responses and stats under `/api/quizzes`.
/// * Public respondent routes under `/api/quizzes/public/{slug}`.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let public_routes = Router::new()
        .route("/{slug}", get(public::get_public_quiz))
        .route("/{slug}/responses", post(public::submit_response));

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route(
            "/{id}",
            get(quiz::get_quiz)
                .put(quiz::update_quiz)
                .delete(quiz::delete_quiz),
        )
        .route("/{id}/publish", post(quiz::publish_quiz))
        .route("/{id}/close", post(quiz::close_quiz))
        .route("/{id}/questions", post(question::add_question))
        .route("/{id}/questions/reorder", put(question::reorder_questions))
        .route(
            "/{id}/questions/{question_id}",
            put(question::update_question).delete(question::delete_question),
        )
        .route("/{id}/responses", get(response::list_responses))
        .route("/{id}/stats", get(response::get_stats))
        .nest("/public", public_routes);

    Router::new()
        .nest("/api/quizzes", quiz_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
