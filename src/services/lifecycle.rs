// src/services/lifecycle.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::SLUG_GENERATION_ATTEMPTS,
    error::AppError,
    models::quiz::{
        CreateQuizRequest, QuestionRequest, QuestionType, Quiz, QuizQuestion, QuizStatus,
        UpdateQuizRequest,
    },
    store::{QuizStore, new_id},
    utils::{
        html::clean_html,
        slug::{generate_slug, normalize_slug},
    },
};

/// Operations gated by the quiz status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Publish,
    Close,
    Respond,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::Edit => "edit",
            Action::Publish => "publish",
            Action::Close => "close",
            Action::Respond => "respond to",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: QuizStatus,
    pub action: Action,
}

impl From<InvalidTransition> for AppError {
    fn from(err: InvalidTransition) -> Self {
        AppError::Conflict(format!("Cannot {} a {:?} quiz", err.action, err.from).to_lowercase())
    }
}

/// Outcome of a proposed slug change on edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlugUpdate {
    /// No slug was proposed.
    Unchanged,
    Applied { slug: String },
    /// The rest of the edit still went through.
    Rejected { reason: SlugRejection },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlugRejection {
    SlugTaken,
}

/// DRAFT -> PUBLISHED -> CLOSED. PUBLISHED may be re-published, CLOSED is terminal.
pub fn ensure_allowed(status: QuizStatus, action: Action) -> Result<(), InvalidTransition> {
    let allowed = match (status, action) {
        (
            QuizStatus::Draft | QuizStatus::Published,
            Action::Edit | Action::Publish | Action::Close,
        ) => true,
        (QuizStatus::Published, Action::Respond) => true,
        _ => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(InvalidTransition { from: status, action })
    }
}

/// Builds a DRAFT quiz from a create request. The id is left for the store.
pub fn new_quiz(req: CreateQuizRequest, now: DateTime<Utc>) -> Quiz {
    let mut quiz = Quiz {
        id: String::new(),
        title: clean_html(&req.title),
        description: req.description.as_deref().map(clean_html),
        status: QuizStatus::Draft,
        slug: None,
        anonymous: req.anonymous,
        created_at: now,
        updated_at: now,
        published_at: None,
        created_by: req.created_by,
        creator_department: req.creator_department,
        target_departments: req.target_departments,
        time_limit: req.time_limit,
        quiz_type: req.quiz_type,
        questions: Vec::new(),
    };
    for question in req.questions {
        add_question(&mut quiz, question, now);
    }
    quiz
}

/// Drops answer-key fields that do not apply to the question type.
pub fn sanitize_question(question: &mut QuizQuestion) {
    match question.question_type {
        QuestionType::SingleChoice => question.correct_options = None,
        QuestionType::MultipleChoice => question.correct_option = None,
        QuestionType::Text => {
            question.options.clear();
            question.correct_option = None;
            question.correct_options = None;
        }
    }
}

/// Reassigns `order` densely from 1 following the current sequence.
pub fn renumber(questions: &mut [QuizQuestion]) {
    for (i, question) in questions.iter_mut().enumerate() {
        question.order = i as u32 + 1;
    }
}

/// Appends a question with a fresh id at the end of the quiz.
pub fn add_question(quiz: &mut Quiz, req: QuestionRequest, now: DateTime<Utc>) -> QuizQuestion {
    let mut question = QuizQuestion {
        id: new_id(),
        text: req.text,
        question_type: req.question_type,
        required: req.required,
        options: req.options,
        correct_option: req.correct_option,
        correct_options: req.correct_options,
        order: quiz.questions.len() as u32 + 1,
    };
    sanitize_question(&mut question);
    quiz.questions.push(question.clone());
    quiz.updated_at = now;
    question
}

/// Replaces the content of an existing question, keeping its id and order.
pub fn update_question(
    quiz: &mut Quiz,
    question_id: &str,
    req: QuestionRequest,
    now: DateTime<Utc>,
) -> Option<QuizQuestion> {
    let question = quiz.question_mut(question_id)?;
    question.text = req.text;
    question.question_type = req.question_type;
    question.required = req.required;
    question.options = req.options;
    question.correct_option = req.correct_option;
    question.correct_options = req.correct_options;
    sanitize_question(question);
    let updated = question.clone();
    quiz.updated_at = now;
    Some(updated)
}

/// Removes a question and closes the gap in the ordering.
pub fn remove_question(quiz: &mut Quiz, question_id: &str, now: DateTime<Utc>) -> bool {
    let before = quiz.questions.len();
    quiz.questions.retain(|q| q.id != question_id);
    if quiz.questions.len() == before {
        return false;
    }
    renumber(&mut quiz.questions);
    quiz.updated_at = now;
    true
}

/// Rebuilds the question list in the given order.
///
/// Questions missing from `question_ids` are dropped. Unknown and repeated ids
/// are skipped.
pub fn reorder(quiz: &mut Quiz, question_ids: &[String], now: DateTime<Utc>) {
    let mut remaining = std::mem::take(&mut quiz.questions);
    let mut reordered = Vec::with_capacity(question_ids.len());

    for id in question_ids {
        if let Some(pos) = remaining.iter().position(|q| &q.id == id) {
            reordered.push(remaining.swap_remove(pos));
        }
    }
    if !remaining.is_empty() {
        tracing::debug!(quiz_id = %quiz.id, dropped = remaining.len(), "Reorder dropped unlisted questions");
    }

    renumber(&mut reordered);
    quiz.questions = reordered;
    quiz.updated_at = now;
}

/// Applies the quiz-level fields of an edit, leaving the slug alone.
pub fn apply_fields(quiz: &mut Quiz, req: &UpdateQuizRequest, now: DateTime<Utc>) {
    if let Some(title) = &req.title {
        quiz.title = clean_html(title);
    }
    if let Some(description) = &req.description {
        quiz.description = Some(clean_html(description));
    }
    if let Some(anonymous) = req.anonymous {
        quiz.anonymous = anonymous;
    }
    if let Some(departments) = &req.target_departments {
        quiz.target_departments = departments.clone();
    }
    quiz.time_limit = req.time_limit;
    quiz.updated_at = now;
}

/// Decides a slug proposal given the current owner of the normalized slug.
pub fn resolve_slug(quiz: &mut Quiz, normalized: String, owner_id: Option<&str>) -> SlugUpdate {
    match owner_id {
        Some(owner) if owner != quiz.id => SlugUpdate::Rejected {
            reason: SlugRejection::SlugTaken,
        },
        _ => {
            quiz.slug = Some(normalized.clone());
            SlugUpdate::Applied { slug: normalized }
        }
    }
}

pub fn has_slug(quiz: &Quiz) -> bool {
    quiz.slug.as_deref().is_some_and(|s| !s.is_empty())
}

/// Marks the quiz published. The slug must already be assigned.
pub fn mark_published(quiz: &mut Quiz, now: DateTime<Utc>) {
    quiz.status = QuizStatus::Published;
    quiz.published_at = Some(now);
    quiz.updated_at = now;
}

pub fn close(quiz: &mut Quiz, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
    ensure_allowed(quiz.status, Action::Close)?;
    quiz.status = QuizStatus::Closed;
    quiz.updated_at = now;
    Ok(())
}

/// Publishes a quiz, assigning a random slug when it has none.
///
/// An existing slug is kept; `publishedAt` is refreshed on every call.
pub async fn publish(store: &dyn QuizStore, mut quiz: Quiz) -> Result<Quiz, AppError> {
    ensure_allowed(quiz.status, Action::Publish)?;

    if !has_slug(&quiz) {
        quiz.slug = Some(free_slug(store).await?);
    }
    mark_published(&mut quiz, Utc::now());

    let quiz = store.put(quiz).await?;
    tracing::info!(quiz_id = %quiz.id, slug = ?quiz.slug, "Quiz published");
    Ok(quiz)
}

/// Applies an edit. A proposed slug owned by another quiz is reported as
/// rejected while the remaining fields are still saved.
pub async fn edit(
    store: &dyn QuizStore,
    mut quiz: Quiz,
    req: &UpdateQuizRequest,
) -> Result<(Quiz, SlugUpdate), AppError> {
    ensure_allowed(quiz.status, Action::Edit)?;

    apply_fields(&mut quiz, req, Utc::now());

    let proposed = req.slug.as_deref().filter(|s| !s.trim().is_empty());
    let slug_update = match proposed {
        None => SlugUpdate::Unchanged,
        Some(raw) => {
            let normalized = normalize_slug(raw);
            let owner = store.get_by_slug(&normalized).await?;
            resolve_slug(&mut quiz, normalized, owner.as_ref().map(|q| q.id.as_str()))
        }
    };
    if let SlugUpdate::Rejected { .. } = slug_update {
        tracing::info!(quiz_id = %quiz.id, "Proposed slug is taken, keeping current slug");
    }

    let quiz = store.put(quiz).await?;
    Ok((quiz, slug_update))
}

// The store's uniqueness check on put still guards the window between this
// lookup and the write.
async fn free_slug(store: &dyn QuizStore) -> Result<String, AppError> {
    for attempt in 1..=SLUG_GENERATION_ATTEMPTS {
        let candidate = generate_slug();
        if store.get_by_slug(&candidate).await?.is_none() {
            return Ok(candidate);
        }
        tracing::warn!("Generated slug collided, retrying (attempt {})", attempt);
    }
    Err(AppError::InternalServerError(
        "Could not generate a unique slug".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::services::test_support::*;
    use crate::store::memory::MemoryQuizStore;

    fn ids(quiz: &Quiz) -> Vec<(&str, u32)> {
        quiz.questions.iter().map(|q| (q.id.as_str(), q.order)).collect()
    }

    fn question_req(question_type: QuestionType) -> QuestionRequest {
        QuestionRequest {
            text: "How was onboarding?".into(),
            question_type,
            required: true,
            options: vec!["Good".into(), "Bad".into()],
            correct_option: Some("Good".into()),
            correct_options: Some(set(&["Good"])),
        }
    }

    fn ordered_quiz() -> Quiz {
        let mut q = quiz(vec![single("q1", "A"), single("q2", "A"), single("q3", "A")]);
        renumber(&mut q.questions);
        q
    }

    #[test]
    fn state_machine() {
        use Action::*;
        use QuizStatus::*;

        assert!(ensure_allowed(Draft, Publish).is_ok());
        assert!(ensure_allowed(Published, Publish).is_ok());
        assert!(ensure_allowed(Closed, Publish).is_err());
        assert!(ensure_allowed(Published, Close).is_ok());
        assert!(ensure_allowed(Closed, Close).is_err());
        assert!(ensure_allowed(Closed, Edit).is_err());
        assert!(ensure_allowed(Draft, Respond).is_err());
        assert!(ensure_allowed(Published, Respond).is_ok());
        assert!(ensure_allowed(Closed, Respond).is_err());
    }

    #[test]
    fn invalid_transition_maps_to_conflict() {
        let err: AppError = InvalidTransition {
            from: QuizStatus::Closed,
            action: Action::Publish,
        }
        .into();
        match err {
            AppError::Conflict(msg) => assert_eq!(msg, "cannot publish a closed quiz"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn reorder_drops_unlisted_and_renumbers() {
        let mut q = ordered_quiz();
        reorder(&mut q, &["q2".into(), "q1".into()], Utc::now());
        assert_eq!(ids(&q), vec![("q2", 1), ("q1", 2)]);
    }

    #[test]
    fn reorder_skips_unknown_and_repeated_ids() {
        let mut q = ordered_quiz();
        reorder(
            &mut q,
            &["q3".into(), "nope".into(), "q3".into(), "q1".into()],
            Utc::now(),
        );
        assert_eq!(ids(&q), vec![("q3", 1), ("q1", 2)]);
    }

    #[test]
    fn remove_question_closes_gap() {
        let mut q = ordered_quiz();
        assert!(remove_question(&mut q, "q2", Utc::now()));
        assert_eq!(ids(&q), vec![("q1", 1), ("q3", 2)]);
        assert!(!remove_question(&mut q, "q2", Utc::now()));
    }

    #[test]
    fn add_question_appends_with_next_order() {
        let mut q = ordered_quiz();
        let added = add_question(&mut q, question_req(QuestionType::SingleChoice), Utc::now());
        assert_eq!(added.order, 4);
        assert!(!added.id.is_empty());
        assert_eq!(q.questions.last(), Some(&added));
        assert_eq!(added.correct_option.as_deref(), Some("Good"));
        assert!(added.correct_options.is_none());
    }

    #[test]
    fn text_questions_never_carry_answer_keys() {
        let mut q = quiz(Vec::new());
        let added = add_question(&mut q, question_req(QuestionType::Text), Utc::now());
        assert!(added.correct_option.is_none());
        assert!(added.correct_options.is_none());
        assert!(added.options.is_empty());
    }

    #[test]
    fn update_question_keeps_id_and_order() {
        let mut q = ordered_quiz();
        let updated = update_question(
            &mut q,
            "q2",
            question_req(QuestionType::MultipleChoice),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(updated.id, "q2");
        assert_eq!(updated.order, 2);
        assert_eq!(updated.question_type, QuestionType::MultipleChoice);
        assert!(updated.correct_option.is_none());
        assert!(update_question(&mut q, "missing", question_req(QuestionType::Text), Utc::now()).is_none());
    }

    #[test]
    fn new_quiz_starts_as_draft_with_ordered_questions() {
        let req: CreateQuizRequest = serde_json::from_value(serde_json::json!({
            "title": "Safety <script>x</script>training",
            "type": "SURVEY",
            "targetDepartments": ["ops", "hr"],
            "questions": [
                { "text": "First", "type": "TEXT", "correctOption": "x" },
                { "text": "Second", "type": "SINGLE_CHOICE", "options": ["Y", "N"], "correctOption": "Y" }
            ]
        }))
        .unwrap();
        let q = new_quiz(req, Utc::now());
        assert_eq!(q.status, QuizStatus::Draft);
        assert_eq!(q.title, "Safety training");
        assert!(q.slug.is_none());
        assert_eq!(q.target_departments, set(&["hr", "ops"]));
        assert_eq!(q.questions.iter().map(|x| x.order).collect::<Vec<_>>(), vec![1, 2]);
        assert!(q.questions[0].correct_option.is_none());
        assert_ne!(q.questions[0].id, q.questions[1].id);
    }

    #[test]
    fn slug_owned_by_other_quiz_is_rejected() {
        let mut q = quiz(Vec::new());
        q.slug = Some("mine".into());
        let outcome = resolve_slug(&mut q, "theirs".into(), Some("other-quiz"));
        assert_eq!(
            outcome,
            SlugUpdate::Rejected {
                reason: SlugRejection::SlugTaken
            }
        );
        assert_eq!(q.slug.as_deref(), Some("mine"));

        let outcome = resolve_slug(&mut q, "mine".into(), Some("quiz-1"));
        assert_eq!(outcome, SlugUpdate::Applied { slug: "mine".into() });
    }

    #[test]
    fn slug_update_wire_format() {
        let rejected = serde_json::to_value(SlugUpdate::Rejected {
            reason: SlugRejection::SlugTaken,
        })
        .unwrap();
        assert_eq!(rejected, serde_json::json!({"status": "REJECTED", "reason": "SLUG_TAKEN"}));
        let unchanged = serde_json::to_value(SlugUpdate::Unchanged).unwrap();
        assert_eq!(unchanged, serde_json::json!({"status": "UNCHANGED"}));
    }

    #[test]
    fn time_limit_absent_means_unlimited() {
        let mut q = quiz(Vec::new());
        q.time_limit = Some(30);
        q.anonymous = true;
        apply_fields(&mut q, &UpdateQuizRequest::default(), Utc::now());
        assert_eq!(q.time_limit, None);
        assert!(q.anonymous);
        assert_eq!(q.title, "Fixture");
    }

    #[tokio::test]
    async fn publish_twice_keeps_slug_and_refreshes_timestamp() {
        let store = MemoryQuizStore::default();
        let saved = store.put(quiz(Vec::new())).await.unwrap();

        let first = publish(&store, saved).await.unwrap();
        let slug = first.slug.clone().unwrap();
        assert_eq!(first.status, QuizStatus::Published);
        assert_eq!(slug.len(), crate::config::GENERATED_SLUG_LENGTH);

        let first_published = first.published_at.unwrap();
        let second = publish(&store, first).await.unwrap();
        assert_eq!(second.slug.as_deref(), Some(slug.as_str()));
        assert!(second.published_at.unwrap() >= first_published);
    }

    #[tokio::test]
    async fn publish_keeps_custom_slug_and_rejects_closed() {
        let store = MemoryQuizStore::default();
        let mut draft = quiz(Vec::new());
        draft.slug = Some("all-hands".into());
        let saved = store.put(draft).await.unwrap();

        let mut published = publish(&store, saved).await.unwrap();
        assert_eq!(published.slug.as_deref(), Some("all-hands"));

        close(&mut published, Utc::now()).unwrap();
        let closed = store.put(published).await.unwrap();
        assert!(matches!(publish(&store, closed).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn edit_reports_taken_slug_but_saves_other_fields() {
        let store = MemoryQuizStore::default();
        let mut owner = quiz(Vec::new());
        owner.id = String::new();
        owner.slug = Some("hello-world-".into());
        store.put(owner).await.unwrap();

        let mut mine = quiz(Vec::new());
        mine.id = String::new();
        let mine = store.put(mine).await.unwrap();

        let req = UpdateQuizRequest {
            title: Some("Renamed".into()),
            slug: Some("Hello World!".into()),
            ..UpdateQuizRequest::default()
        };
        let (saved, outcome) = edit(&store, mine, &req).await.unwrap();
        assert_eq!(
            outcome,
            SlugUpdate::Rejected {
                reason: SlugRejection::SlugTaken
            }
        );
        assert_eq!(saved.title, "Renamed");
        assert!(saved.slug.is_none());

        let req = UpdateQuizRequest {
            slug: Some("Hello Team!".into()),
            ..UpdateQuizRequest::default()
        };
        let (saved, outcome) = edit(&store, saved, &req).await.unwrap();
        assert_eq!(outcome, SlugUpdate::Applied { slug: "hello-team-".into() });
        assert_eq!(saved.slug.as_deref(), Some("hello-team-"));
    }

    #[tokio::test]
    async fn blank_slug_proposal_is_unchanged() {
        let store = MemoryQuizStore::default();
        let mut q = quiz(Vec::new());
        q.slug = Some("keep".into());
        let q = store.put(q).await.unwrap();

        let req = UpdateQuizRequest {
            slug: Some("   ".into()),
            target_departments: Some(BTreeSet::from(["finance".to_string()])),
            ..UpdateQuizRequest::default()
        };
        let (saved, outcome) = edit(&store, q, &req).await.unwrap();
        assert_eq!(outcome, SlugUpdate::Unchanged);
        assert_eq!(saved.slug.as_deref(), Some("keep"));
        assert_eq!(saved.target_departments, set(&["finance"]));
    }
}
