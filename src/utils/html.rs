// src/utils/html.rs

/// Clean creator-supplied quiz text (titles, descriptions) with ammonia.
///
/// Safe formatting tags survive, `<script>` and event-handler attributes are
/// stripped. The output is HTML: a bare `&` or `<` in plain text comes back
/// entity-escaped (`Q&A` is stored as `Q&amp;A`). Option strings are never
/// passed through here since answers are matched against them byte for byte.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
