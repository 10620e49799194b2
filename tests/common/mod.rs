// tests/common/mod.rs

#![allow(dead_code)]

use quizdesk::{config::Config, routes, state::AppState};
use serde_json::{Value, json};

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

/// Spawns the app on a random port backed by in-memory stores.
pub async fn spawn_app() -> TestApp {
    let config = Config {
        rust_log: "error".to_string(),
        ..Config::default()
    };

    let app = routes::create_router(AppState::in_memory(config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}/api/quizzes", port),
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn create_quiz(&self, body: Value) -> Value {
        let response = self
            .client
            .post(self.url(""))
            .json(&body)
            .send()
            .await
            .expect("Failed to create quiz");
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.unwrap()
    }

    pub async fn add_question(&self, quiz_id: &str, body: Value) -> Value {
        let response = self
            .client
            .post(self.url(&format!("/{}/questions", quiz_id)))
            .json(&body)
            .send()
            .await
            .expect("Failed to add question");
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.unwrap()
    }

    pub async fn publish(&self, quiz_id: &str) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/{}/publish", quiz_id)))
            .send()
            .await
            .expect("Failed to publish")
    }

    pub async fn close(&self, quiz_id: &str) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/{}/close", quiz_id)))
            .send()
            .await
            .expect("Failed to close")
    }

    pub async fn update(&self, quiz_id: &str, body: Value) -> reqwest::Response {
        self.client
            .put(self.url(&format!("/{}", quiz_id)))
            .json(&body)
            .send()
            .await
            .expect("Failed to update quiz")
    }

    pub async fn submit(&self, slug: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/public/{}/responses", slug)))
            .json(&body)
            .send()
            .await
            .expect("Failed to submit response")
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    /// Creates a quiz with one SINGLE_CHOICE (X), one MULTIPLE_CHOICE (Y, Z)
    /// and one TEXT question, publishes it and returns (quiz, slug).
    pub async fn published_quiz(&self, extra: Value) -> (Value, String) {
        let mut body = json!({
            "title": "Security awareness",
            "questions": [
                {
                    "text": "Pick the safe password",
                    "type": "SINGLE_CHOICE",
                    "options": ["X", "W"],
                    "correctOption": "X"
                },
                {
                    "text": "Select the phishing signs",
                    "type": "MULTIPLE_CHOICE",
                    "options": ["Y", "Z", "V"],
                    "correctOptions": ["Y", "Z"]
                },
                {
                    "text": "Anything else?",
                    "type": "TEXT"
                }
            ]
        });
        if let (Some(target), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                target.insert(k.clone(), v.clone());
            }
        }

        let quiz = self.create_quiz(body).await;
        let id = quiz["id"].as_str().unwrap().to_string();
        let published: Value = self.publish(&id).await.json().await.unwrap();
        let slug = published["quiz"]["slug"].as_str().unwrap().to_string();
        (published["quiz"].clone(), slug)
    }
}

pub fn question_id(quiz: &Value, index: usize) -> String {
    quiz["questions"][index]["id"].as_str().unwrap().to_string()
}
