// src/services/test_support.rs

use std::collections::BTreeSet;

use chrono::Utc;

use crate::models::{
    quiz::{QuestionType, Quiz, QuizQuestion, QuizStatus, QuizType},
    response::{Answer, AnswerValue, QuizResponse},
};

pub fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn question(id: &str, question_type: QuestionType) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        text: format!("Question {}", id),
        question_type,
        required: false,
        options: vec!["A".into(), "B".into(), "C".into()],
        correct_option: None,
        correct_options: None,
        order: 0,
    }
}

pub fn single(id: &str, correct: &str) -> QuizQuestion {
    QuizQuestion {
        correct_option: Some(correct.to_string()),
        ..question(id, QuestionType::SingleChoice)
    }
}

pub fn multi(id: &str, correct: &[&str]) -> QuizQuestion {
    QuizQuestion {
        correct_options: Some(set(correct)),
        ..question(id, QuestionType::MultipleChoice)
    }
}

pub fn text(id: &str) -> QuizQuestion {
    QuizQuestion {
        options: Vec::new(),
        ..question(id, QuestionType::Text)
    }
}

pub fn quiz(questions: Vec<QuizQuestion>) -> Quiz {
    let now = Utc::now();
    Quiz {
        id: "quiz-1".into(),
        title: "Fixture".into(),
        description: None,
        status: QuizStatus::Draft,
        slug: None,
        anonymous: false,
        created_at: now,
        updated_at: now,
        published_at: None,
        created_by: None,
        creator_department: None,
        target_departments: BTreeSet::new(),
        time_limit: None,
        quiz_type: QuizType::Quiz,
        questions,
    }
}

pub fn answer(question_id: &str, value: AnswerValue) -> Answer {
    Answer {
        question_id: question_id.to_string(),
        value,
    }
}

pub fn one(s: &str) -> AnswerValue {
    AnswerValue::Single(s.to_string())
}

pub fn many(items: &[&str]) -> AnswerValue {
    AnswerValue::Multi(set(items))
}

pub fn response(quiz_id: &str, answers: Vec<Answer>) -> QuizResponse {
    QuizResponse {
        id: String::new(),
        quiz_id: quiz_id.to_string(),
        answers,
        submitted_at: Utc::now(),
        respondent_email: None,
        respondent_name: None,
        respondent_ip: None,
        completing_time: None,
        score: 0.0,
    }
}
