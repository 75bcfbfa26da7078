//! Pagination controls for list pages.

use smarthome_core::{Locale, Paginated};

use crate::i18n::{t, tf};

/// Number of direct page links shown around the current page.
pub const PAGE_LINKS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Rendered pagination. Hidden when everything fits on one page.
#[derive(Debug, Clone)]
pub struct PaginationView {
    pub visible: bool,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub pages: Vec<PageLink>,
    /// "Showing X to Y of Z results", empty when there are no results.
    pub summary: String,
    pub previous_label: String,
    pub next_label: String,
}

impl PaginationView {
    /// Build the controls for `page`, linking each page number through
    /// `href_for`.
    pub fn new<T>(page: &Paginated<T>, locale: Locale, href_for: impl Fn(u32) -> String) -> Self {
        let current = page.current_page();
        let pages = page
            .window(PAGE_LINKS)
            .pages()
            .map(|number| PageLink {
                number,
                href: href_for(number),
                current: number == current,
            })
            .collect();

        let summary = if page.total_items() == 0 {
            String::new()
        } else {
            tf(
                locale,
                "filters.showing",
                &[
                    ("from", &page.range_start().to_string()),
                    ("to", &page.range_end().to_string()),
                    ("total", &page.total_items().to_string()),
                ],
            )
        };

        Self {
            visible: page.total_pages() > 1,
            previous: page.has_previous().then(|| href_for(current - 1)),
            next: page.has_next().then(|| href_for(current + 1)),
            pages,
            summary,
            previous_label: t(locale, "pagination.previous").to_owned(),
            next_label: t(locale, "pagination.next").to_owned(),
        }
    }
}

/// `base` with the given query parameters; empty values are dropped and
/// page 1 is left implicit.
#[must_use]
pub fn page_href(base: &str, page: u32, params: &[(&str, Option<&str>)]) -> String {
    let mut query: Vec<String> = params
        .iter()
        .filter_map(|(name, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{name}={}", urlencoding::encode(v)))
        })
        .collect();
    if page > 1 {
        query.push(format!("page={page}"));
    }

    if query.is_empty() {
        base.to_owned()
    } else {
        format!("{base}?{}", query.join("&"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let page = Paginated::new(vec![0; 12], 100, 9, 5, 12).unwrap();
        let view = PaginationView::new(&page, Locale::En, |n| format!("/en/products?page={n}"));

        assert!(view.visible);
        assert_eq!(view.previous.as_deref(), Some("/en/products?page=4"));
        assert_eq!(view.next.as_deref(), Some("/en/products?page=6"));
        let numbers: Vec<u32> = view.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, [3, 4, 5, 6, 7]);
        assert!(view.pages.iter().filter(|p| p.current).all(|p| p.number == 5));
        assert_eq!(view.summary, "Showing 49 to 60 of 100 results");
    }

    #[test]
    fn test_single_page_is_hidden() {
        let page = Paginated::new(vec![1, 2, 3], 3, 1, 1, 12).unwrap();
        let view = PaginationView::new(&page, Locale::Fr, |n| n.to_string());
        assert!(!view.visible);
        assert!(view.previous.is_none());
        assert!(view.next.is_none());
        assert_eq!(view.summary, "Affichage de 1 à 3 sur 3 résultats");
    }

    #[test]
    fn test_empty_results_have_no_summary() {
        let page = Paginated::<u8>::empty(12);
        let view = PaginationView::new(&page, Locale::En, |n| n.to_string());
        assert!(!view.visible);
        assert!(view.summary.is_empty());
        assert!(view.pages.is_empty());
    }

    #[test]
    fn test_page_href_keeps_filters() {
        assert_eq!(
            page_href("/en/products", 2, &[("search", Some("smart plug")), ("category", None)]),
            "/en/products?search=smart%20plug&page=2"
        );
        assert_eq!(page_href("/en/products", 1, &[("search", Some("  "))]), "/en/products");
    }
}
