//! Core types for SmartHome Hub.

pub mod email;
pub mod id;
pub mod locale;
pub mod pagination;
pub mod price;
pub mod wishlist;

pub use email::{Email, EmailError};
pub use id::*;
pub use locale::{Direction, Locale, UnsupportedLocale};
pub use pagination::{PageError, PageWindow, Paginated};
pub use price::Price;
pub use wishlist::{WishlistItemKind, WishlistKey, WishlistKeyError};
