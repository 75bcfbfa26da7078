//! Reviews and comments on detail pages.

use smarthome_core::Locale;

use super::format::{format_date, star_glyphs};
use crate::backend::{Comment, Review, User};
use crate::i18n::t;

#[derive(Debug, Clone)]
pub struct ReviewView {
    pub author: String,
    pub stars: String,
    pub content: String,
    pub date: String,
}

impl ReviewView {
    #[must_use]
    pub fn new(review: &Review, locale: Locale) -> Self {
        Self {
            author: author_name(review.user.as_ref(), locale),
            stars: star_glyphs(f64::from(review.rating)),
            content: review.content.clone(),
            date: format_date(locale, &review.created_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentView {
    pub author: String,
    pub content: String,
    pub date: String,
}

impl CommentView {
    #[must_use]
    pub fn new(comment: &Comment, locale: Locale) -> Self {
        Self {
            author: author_name(comment.user.as_ref(), locale),
            content: comment.content.clone(),
            date: format_date(locale, &comment.created_at),
        }
    }
}

fn author_name(user: Option<&User>, locale: Locale) -> String {
    user.map(|u| u.name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| t(locale, "detail.anonymous"))
        .to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_review_without_user_is_anonymous() {
        let review: Review = serde_json::from_value(json!({
            "id": 1,
            "content": "Bright and easy to pair.",
            "rating": 4,
            "createdAt": "2024-01-05T10:00:00Z",
            "updatedAt": "2024-01-05T10:00:00Z"
        }))
        .unwrap();

        let view = ReviewView::new(&review, Locale::En);
        assert_eq!(view.author, "Anonymous");
        assert_eq!(view.stars, "★★★★☆");
        assert_eq!(view.date, "January 5, 2024");
    }

    #[test]
    fn test_comment_author() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 3,
            "content": "Merci !",
            "user": {
                "id": 5, "email": "ada@example.com", "name": "Ada",
                "createdAt": "2024-01-05T10:00:00Z", "updatedAt": "2024-01-05T10:00:00Z"
            },
            "createdAt": "2024-02-10T10:00:00Z"
        }))
        .unwrap();

        let view = CommentView::new(&comment, Locale::Fr);
        assert_eq!(view.author, "Ada");
        assert_eq!(view.date, "10 février 2024");
    }
}
