// src/models/response.rs

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Value submitted for a single question.
///
/// Deserialization never fails: shapes that are neither a string nor a list
/// of strings land in `Other` and match nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// SINGLE_CHOICE and TEXT answers.
    Single(String),
    /// MULTIPLE_CHOICE answers, duplicates collapse.
    Multi(BTreeSet<String>),
    Other(serde_json::Value),
}

impl Default for AnswerValue {
    fn default() -> Self {
        AnswerValue::Other(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    #[serde(default)]
    pub value: AnswerValue,
}

/// A stored submission. `score` is computed by the server at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    #[serde(default)]
    pub id: String,
    pub quiz_id: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_ip: Option<String>,
    /// Seconds spent completing the quiz.
    #[serde(default)]
    pub completing_time: Option<u32>,
    /// Percentage in [0, 100].
    #[serde(default)]
    pub score: f64,
}

/// DTO for submitting a quiz response.
/// Any client-sent `score` is ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[validate(email, length(max = 254))]
    pub respondent_email: Option<String>,
    #[validate(length(max = 200))]
    pub respondent_name: Option<String>,
    pub completing_time: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseListResponse {
    pub responses: Vec<QuizResponse>,
    pub total: usize,
}
