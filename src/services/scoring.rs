// src/services/scoring.rs

use crate::models::{
    quiz::{QuestionType, Quiz, QuizQuestion},
    response::{Answer, AnswerValue},
};

/// Computes the percentage score of a set of answers against a quiz.
///
/// Only SINGLE_CHOICE and MULTIPLE_CHOICE questions count. An unanswered
/// choice question still counts in the denominator. Returns 0.0 when the quiz
/// has no choice questions.
pub fn score(quiz: &Quiz, answers: &[Answer]) -> f64 {
    let mut correctable = 0usize;
    let mut points = 0usize;

    for question in quiz.questions.iter().filter(|q| q.question_type.is_correctable()) {
        correctable += 1;

        // First answer for a question is authoritative.
        let answer = answers.iter().find(|a| a.question_id == question.id);
        if answer.is_some_and(|a| is_correct(question, &a.value)) {
            points += 1;
        }
    }

    if correctable == 0 {
        return 0.0;
    }

    (points as f64 / correctable as f64) * 100.0
}

/// Strict matching: exact string for single choice, exact set for multiple choice.
pub fn is_correct(question: &QuizQuestion, value: &AnswerValue) -> bool {
    match (question.question_type, value) {
        (QuestionType::SingleChoice, AnswerValue::Single(chosen)) => {
            question.correct_option.as_ref() == Some(chosen)
        }
        (QuestionType::MultipleChoice, AnswerValue::Multi(chosen)) => {
            question.correct_options.as_ref() == Some(chosen)
        }
        _ => false,
    }
}
