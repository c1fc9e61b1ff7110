//! Special-case programme title rewriting
//!
//! A small set of generic sports titles get the programme's sub-title
//! appended so consumers can tell fixtures apart.

/// Titles that get the sub-title appended
const REWRITE_TITLES: [&str; 2] = ["NHL Hockey", "Live: NFL Football"];

/// Placeholder used when the programme has no `sub-title` node at all
const MISSING_SUBTITLE: &str = "No subtitle";

/// Apply the title rewrite rule to a single programme title
///
/// `subtitle` is `Some` whenever a `sub-title` node exists, even when its
/// text is empty; the placeholder is only substituted for a wholly absent
/// node. All other titles are returned unchanged.
pub fn normalize_title(title: &str, subtitle: Option<&str>) -> String {
    if REWRITE_TITLES.contains(&title) {
        format!("{} {}", title, subtitle.unwrap_or(MISSING_SUBTITLE))
    } else {
        title.to_string()
    }
}
