//! Wishlist membership keys.
//!
//! Local wishlist state is a set of `"{type}-{id}"` strings such as
//! `product-42` or `article-7`.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What kind of item a wishlist entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistItemKind {
    Product,
    Article,
}

impl WishlistItemKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Article => "article",
        }
    }
}

impl FromStr for WishlistItemKind {
    type Err = WishlistKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(Self::Product),
            "article" => Ok(Self::Article),
            other => Err(WishlistKeyError::UnknownKind(other.to_owned())),
        }
    }
}

impl fmt::Display for WishlistItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WishlistKeyError {
    #[error("wishlist key must look like `product-42`")]
    Malformed,
    #[error("unknown wishlist item kind: {0}")]
    UnknownKind(String),
    #[error("invalid wishlist item id: {0}")]
    InvalidId(#[from] core::num::ParseIntError),
}

/// One `(kind, id)` wishlist entry, serialized as `"{kind}-{id}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct WishlistKey {
    kind: WishlistItemKind,
    id: i32,
}

impl WishlistKey {
    #[must_use]
    pub const fn new(kind: WishlistItemKind, id: i32) -> Self {
        Self { kind, id }
    }

    #[must_use]
    pub const fn product(id: i32) -> Self {
        Self::new(WishlistItemKind::Product, id)
    }

    #[must_use]
    pub const fn article(id: i32) -> Self {
        Self::new(WishlistItemKind::Article, id)
    }

    #[must_use]
    pub const fn kind(&self) -> WishlistItemKind {
        self.kind
    }

    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }
}

impl fmt::Display for WishlistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

impl FromStr for WishlistKey {
    type Err = WishlistKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s.split_once('-').ok_or(WishlistKeyError::Malformed)?;
        Ok(Self {
            kind: kind.parse()?,
            id: id.parse()?,
        })
    }
}

impl From<WishlistKey> for String {
    fn from(key: WishlistKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for WishlistKey {
    type Error = WishlistKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(WishlistKey::product(42).to_string(), "product-42");
        assert_eq!(WishlistKey::article(7).to_string(), "article-7");
    }

    #[test]
    fn test_parse_key() {
        assert_eq!("article-7".parse::<WishlistKey>().unwrap(), WishlistKey::article(7));
        assert_eq!(
            "video-1".parse::<WishlistKey>(),
            Err(WishlistKeyError::UnknownKind("video".to_owned()))
        );
        assert_eq!("product".parse::<WishlistKey>(), Err(WishlistKeyError::Malformed));
        assert!(matches!(
            "product-x".parse::<WishlistKey>(),
            Err(WishlistKeyError::InvalidId(_))
        ));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&vec![WishlistKey::product(1)]).unwrap();
        assert_eq!(json, r#"["product-1"]"#);
        let keys: Vec<WishlistKey> = serde_json::from_str(r#"["article-3"]"#).unwrap();
        assert_eq!(keys, vec![WishlistKey::article(3)]);
    }
}
