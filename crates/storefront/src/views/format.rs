//! Display formatting shared by cards and pages.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;

use smarthome_core::{Locale, Price};

use crate::i18n::month_name;

/// Product descriptions on cards.
pub const PRODUCT_DESCRIPTION_CHARS: usize = 100;
/// Article excerpts on cards.
pub const ARTICLE_EXCERPT_CHARS: usize = 150;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

/// `$1,234.50`
#[must_use]
pub fn format_price(price: &Price) -> String {
    price.display()
}

/// `January 5, 2024` / `5 janvier 2024` / `5 يناير 2024`
#[must_use]
pub fn format_date(locale: Locale, date: &DateTime<Utc>) -> String {
    let month = month_name(locale, date.month());
    match locale {
        Locale::En => format!("{month} {}, {}", date.day(), date.year()),
        Locale::Fr | Locale::Ar => format!("{} {month} {}", date.day(), date.year()),
    }
}

/// Remove HTML tags.
#[must_use]
pub fn strip_html(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// First `max_chars` characters followed by `...`, or `text` unchanged when
/// it is short enough.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_owned(),
        Some((cut, _)) => {
            let mut truncated = text.get(..cut).unwrap_or(text).trim_end().to_owned();
            truncated.push_str("...");
            truncated
        }
    }
}

/// Five stars, the first `round(rating)` filled.
#[must_use]
pub fn stars(rating: f64) -> Vec<bool> {
    let filled = if rating.is_finite() {
        rating.round().clamp(0.0, 5.0)
    } else {
        0.0
    };
    (1..=5).map(|star| f64::from(star) <= filled).collect()
}

/// [`stars`] as text, e.g. `★★★★☆`.
#[must_use]
pub fn star_glyphs(rating: f64) -> String {
    stars(rating)
        .into_iter()
        .map(|filled| if filled { '★' } else { '☆' })
        .collect()
}
