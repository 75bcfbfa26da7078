//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// First strong isolate (U+2068).
const FSI: char = '\u{2068}';
/// Pop directional isolate (U+2069).
const PDI: char = '\u{2069}';

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Wraps user-supplied text in a directional isolate.
///
/// A Latin name followed by punctuation otherwise reorders inside an
/// Arabic page. The marks are plain characters, so the value is still
/// escaped as usual.
///
/// Usage in templates: `{{ review.author|isolate }}`
#[askama::filter_fn]
pub fn isolate(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{FSI}{value}{PDI}"))
}

