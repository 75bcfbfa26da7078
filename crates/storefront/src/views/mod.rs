//! View models rendered by the page templates.
//!
//! Templates only read precomputed strings and flags from these types;
//! all formatting and localization happens here.

pub mod cards;
pub mod chrome;
pub mod detail;
pub mod format;
pub mod pagination;

pub use cards::{ArticleCard, Membership, ProductCard, WishlistButton, article_cards, product_cards};
pub use chrome::{Chrome, FlashView, LanguageOption, NavLink};
pub use detail::{CommentView, ReviewView};
pub use pagination::{PageLink, PaginationView, page_href};
