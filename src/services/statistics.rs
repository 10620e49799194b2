// src/services/statistics.rs

use std::collections::BTreeMap;

use crate::models::{
    quiz::{QuestionType, Quiz, QuizQuestion},
    response::{AnswerValue, QuizResponse},
    stats::{QuestionStats, QuizStats},
};

/// Builds per-question answer distributions for a quiz.
///
/// Responses belonging to other quizzes are skipped. TEXT questions are left
/// out. Every declared option starts at zero; undeclared values are counted
/// under their own key.
pub fn aggregate(quiz: &Quiz, responses: &[QuizResponse]) -> QuizStats {
    let own: Vec<&QuizResponse> = responses.iter().filter(|r| r.quiz_id == quiz.id).collect();

    let question_stats = quiz
        .questions
        .iter()
        .filter(|q| q.question_type != QuestionType::Text)
        .map(|q| question_stats(q, &own))
        .collect();

    QuizStats {
        quiz_id: quiz.id.clone(),
        total_responses: own.len(),
        question_stats,
    }
}

fn question_stats(question: &QuizQuestion, responses: &[&QuizResponse]) -> QuestionStats {
    let mut distribution: BTreeMap<String, u64> =
        question.options.iter().map(|opt| (opt.clone(), 0)).collect();

    let values = responses
        .iter()
        .flat_map(|r| r.answers.iter())
        .filter(|a| a.question_id == question.id)
        .map(|a| &a.value);

    for value in values {
        match value {
            AnswerValue::Single(chosen) => {
                *distribution.entry(chosen.clone()).or_insert(0) += 1;
            }
            AnswerValue::Multi(chosen) => {
                for option in chosen {
                    *distribution.entry(option.clone()).or_insert(0) += 1;
                }
            }
            AnswerValue::Other(_) => {}
        }
    }

    QuestionStats {
        question_id: question.id.clone(),
        question_text: question.text.clone(),
        answer_distribution: distribution,
    }
}
