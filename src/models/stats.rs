// src/models/stats.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Answer distribution of one choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    pub question_id: String,
    /// Question text at aggregation time.
    pub question_text: String,
    /// Option -> number of selections.
    pub answer_distribution: BTreeMap<String, u64>,
}

/// Aggregate statistics returned by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub quiz_id: String,
    pub total_responses: usize,
    pub question_stats: Vec<QuestionStats>,
}
