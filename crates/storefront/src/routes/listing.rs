//! Search, category filter and pagination shared by the list pages.

use serde::Deserialize;

use smarthome_core::{Locale, Paginated};

use super::non_blank;
use crate::backend::{Category, ListParams};
use crate::views::{PaginationView, page_href};

/// Items per list page.
pub const PAGE_SIZE: u32 = 12;

/// Query string of a list page.
///
/// The search and category forms never carry `page`, so changing either
/// starts again at page 1.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default, deserialize_with = "non_blank")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub category: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

impl ListQuery {
    #[must_use]
    pub fn params(&self) -> ListParams {
        ListParams {
            page: Some(self.page.unwrap_or(1).max(1)),
            limit: Some(PAGE_SIZE),
            category: self.category.clone(),
            search: self.search.clone(),
        }
    }

    const fn filters_active(&self) -> bool {
        self.search.is_some() || self.category.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub slug: String,
    pub name: String,
    pub selected: bool,
}

/// Filter form and pagination of a list page.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Form target, the list page without query.
    pub action: String,
    pub search: String,
    pub categories: Vec<CategoryOption>,
    pub filters_active: bool,
    pub pagination: PaginationView,
}

impl Listing {
    pub fn new<T>(
        action: String,
        query: &ListQuery,
        categories: &[Category],
        page: &Paginated<T>,
        locale: Locale,
    ) -> Self {
        let categories = categories
            .iter()
            .map(|c| CategoryOption {
                slug: c.slug.clone(),
                name: c.name.clone(),
                selected: query.category.as_deref() == Some(c.slug.as_str()),
            })
            .collect();

        let pagination = PaginationView::new(page, locale, |n| {
            page_href(
                &action,
                n,
                &[
                    ("search", query.search.as_deref()),
                    ("category", query.category.as_deref()),
                ],
            )
        });

        Self {
            search: query.search.clone().unwrap_or_default(),
            categories,
            filters_active: query.filters_active(),
            pagination,
            action,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_blank_filters_are_ignored() {
        let query: ListQuery =
            serde_json::from_value(json!({"search": "  ", "category": "lighting"})).unwrap();
        let params = query.params();
        assert_eq!(params.search, None);
        assert_eq!(params.category.as_deref(), Some("lighting"));
        assert_eq!(params.page, Some(1));
        assert_eq!(params.limit, Some(PAGE_SIZE));
    }

    #[test]
    fn test_listing_links_keep_filters() {
        let query = ListQuery {
            search: Some("bulb".to_owned()),
            category: Some("lighting".to_owned()),
            page: Some(2),
        };
        let categories: Vec<Category> = serde_json::from_value(json!([
            {"id": 1, "name": "Lighting", "slug": "lighting"},
            {"id": 2, "name": "Audio", "slug": "audio"}
        ]))
        .unwrap();
        let page = Paginated::new(vec![0; 12], 30, 3, 2, 12).unwrap();

        let listing = Listing::new("/en/products".to_owned(), &query, &categories, &page, Locale::En);
        assert!(listing.filters_active);
        assert_eq!(
            listing.pagination.next.as_deref(),
            Some("/en/products?search=bulb&category=lighting&page=3")
        );
        assert_eq!(
            listing.pagination.previous.as_deref(),
            Some("/en/products?search=bulb&category=lighting")
        );
        assert!(listing.categories.iter().any(|c| c.slug == "lighting" && c.selected));
        assert!(listing.categories.iter().any(|c| c.slug == "audio" && !c.selected));
    }
}
