// src/models/quiz.rs

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Publication state of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizStatus {
    #[default]
    Draft,
    Published,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Text,
}

impl QuestionType {
    /// Choice questions carry a correct answer and count towards the score.
    pub fn is_correctable(self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultipleChoice)
    }
}

/// Whether the document is graded (QUIZ) or purely informational (SURVEY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizType {
    #[default]
    Quiz,
    Survey,
}

/// A question embedded in a quiz document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Unique within the owning quiz, assigned on creation.
    #[serde(default)]
    pub id: String,

    pub text: String,

    /// Mapped from the JSON field 'type' since `type` is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub options: Vec<String>,

    /// SINGLE_CHOICE only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<String>,

    /// MULTIPLE_CHOICE only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_options: Option<BTreeSet<String>>,

    /// 1-based rank within the quiz.
    #[serde(default)]
    pub order: u32,
}

/// The quiz document as persisted by the quiz store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Empty until the store assigns one.
    #[serde(default)]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: QuizStatus,

    /// Public identifier, unique across quizzes once set.
    #[serde(default)]
    pub slug: Option<String>,

    /// Suppresses collection of respondent name and email.
    #[serde(default)]
    pub anonymous: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub creator_department: Option<String>,

    #[serde(default)]
    pub target_departments: BTreeSet<String>,

    /// Minutes; `None` means unlimited.
    #[serde(default)]
    pub time_limit: Option<u32>,

    #[serde(rename = "type", default)]
    pub quiz_type: QuizType,

    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn question_mut(&mut self, question_id: &str) -> Option<&mut QuizQuestion> {
        self.questions.iter_mut().find(|q| q.id == question_id)
    }

    /// Whether the department filter of the quiz listing keeps this quiz.
    pub fn visible_to_department(&self, department: &str) -> bool {
        self.creator_department
            .as_deref()
            .is_none_or(|d| d == department)
    }
}

/// DTO for creating a new quiz.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
    #[validate(length(max = 100))]
    pub created_by: Option<String>,
    #[validate(length(max = 100))]
    pub creator_department: Option<String>,
    #[serde(default)]
    pub target_departments: BTreeSet<String>,
    #[validate(range(min = 1))]
    pub time_limit: Option<u32>,
    #[serde(rename = "type", default)]
    pub quiz_type: QuizType,
    /// Initial questions; ids and order are assigned by the server.
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuestionRequest>,
}

/// DTO for editing quiz-level fields.
///
/// Absent optional fields keep their stored value, except `timeLimit`:
/// an absent time limit means unlimited.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub anonymous: Option<bool>,
    pub target_departments: Option<BTreeSet<String>>,
    #[validate(range(min = 1))]
    pub time_limit: Option<u32>,
    /// Proposed slug, normalized before the ownership check.
    #[validate(length(max = 100))]
    pub slug: Option<String>,
}

/// DTO for adding or replacing a question.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(length(max = 500))]
    pub correct_option: Option<String>,
    pub correct_options: Option<BTreeSet<String>>,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    for opt in options {
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

/// Body of the reorder endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderQuestionsRequest {
    pub question_ids: Vec<String>,
}

/// Query parameters for listing quizzes.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub department: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizListResponse {
    pub quizzes: Vec<Quiz>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishQuizResponse {
    pub quiz: Quiz,
    pub public_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizResponse {
    pub quiz: Quiz,
    pub slug_update: crate::services::lifecycle::SlugUpdate,
}

/// DTO for sending a question to respondents (excludes correct answers).
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub required: bool,
    pub options: Vec<String>,
    pub order: u32,
}

/// Respondent-facing view of a published quiz.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuiz {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub anonymous: bool,
    pub status: QuizStatus,
    pub time_limit: Option<u32>,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    pub questions: Vec<PublicQuestion>,
}

impl From<&QuizQuestion> for PublicQuestion {
    fn from(q: &QuizQuestion) -> Self {
        Self {
            id: q.id.clone(),
            text: q.text.clone(),
            question_type: q.question_type,
            required: q.required,
            options: q.options.clone(),
            order: q.order,
        }
    }
}

impl From<&Quiz> for PublicQuiz {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            anonymous: quiz.anonymous,
            status: quiz.status,
            time_limit: quiz.time_limit,
            quiz_type: quiz.quiz_type,
            questions: quiz.questions.iter().map(PublicQuestion::from).collect(),
        }
    }
}
