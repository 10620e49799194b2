// src/utils/slug.rs

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::config::GENERATED_SLUG_LENGTH;

static NON_SLUG_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("slug pattern is valid"));

/// Lowercases the input and replaces every character outside `[a-z0-9-]`
/// with a hyphen, one for one.
pub fn normalize_slug(raw: &str) -> String {
    NON_SLUG_CHAR
        .replace_all(&raw.to_lowercase(), "-")
        .into_owned()
}

/// Random lowercase hex token used as the slug of a newly published quiz.
pub fn generate_slug() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(GENERATED_SLUG_LENGTH);
    token
}
