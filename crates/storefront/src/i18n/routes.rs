//! Logical routes and their per-locale paths.
//!
//! | Route | en | fr | ar |
//! |-------|----|----|----|
//! | Home | `/` | `/` | `/` |
//! | Products | `/products` | `/produits` | `/منتجات` |
//! | Articles | `/articles` | `/articles` | `/مقالات` |
//! | Category | `/categories/{slug}` | `/categories/{slug}` | `/فئات/{slug}` |
//! | Login | `/auth/login` | `/auth/connexion` | `/auth/تسجيل-الدخول` |
//! | Register | `/auth/register` | `/auth/inscription` | `/auth/التسجيل` |
//! | Profile | `/profile` | `/profil` | `/الملف-الشخصي` |
//! | Wishlist | `/wishlist` | `/liste-souhaits` | `/قائمة-الرغبات` |
//!
//! Detail routes append one segment to the list path. Non-ASCII segments
//! appear percent-encoded in generated links and router patterns.

use std::borrow::Cow;

use smarthome_core::Locale;

/// A page, independent of locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Products,
    ProductDetail,
    Articles,
    ArticleDetail,
    Category,
    Login,
    Register,
    Profile,
    Wishlist,
    NewsletterUnsubscribe,
}

impl Route {
    pub const ALL: [Self; 11] = [
        Self::Home,
        Self::Products,
        Self::ProductDetail,
        Self::Articles,
        Self::ArticleDetail,
        Self::Category,
        Self::Login,
        Self::Register,
        Self::Profile,
        Self::Wishlist,
        Self::NewsletterUnsubscribe,
    ];

    /// Localized path without the locale prefix or parameter.
    #[must_use]
    pub const fn base(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Home, _) => "",
            (Self::Products | Self::ProductDetail, Locale::En) => "/products",
            (Self::Products | Self::ProductDetail, Locale::Fr) => "/produits",
            (Self::Products | Self::ProductDetail, Locale::Ar) => "/منتجات",
            (Self::Articles | Self::ArticleDetail, Locale::En | Locale::Fr) => "/articles",
            (Self::Articles | Self::ArticleDetail, Locale::Ar) => "/مقالات",
            (Self::Category, Locale::En | Locale::Fr) => "/categories",
            (Self::Category, Locale::Ar) => "/فئات",
            (Self::Login, Locale::En) => "/auth/login",
            (Self::Login, Locale::Fr) => "/auth/connexion",
            (Self::Login, Locale::Ar) => "/auth/تسجيل-الدخول",
            (Self::Register, Locale::En) => "/auth/register",
            (Self::Register, Locale::Fr) => "/auth/inscription",
            (Self::Register, Locale::Ar) => "/auth/التسجيل",
            (Self::Profile, Locale::En) => "/profile",
            (Self::Profile, Locale::Fr) => "/profil",
            (Self::Profile, Locale::Ar) => "/الملف-الشخصي",
            (Self::Wishlist, Locale::En) => "/wishlist",
            (Self::Wishlist, Locale::Fr) => "/liste-souhaits",
            (Self::Wishlist, Locale::Ar) => "/قائمة-الرغبات",
            (Self::NewsletterUnsubscribe, _) => "/newsletter/unsubscribe",
        }
    }

    /// Whether the route takes one trailing parameter segment.
    #[must_use]
    pub const fn has_param(self) -> bool {
        matches!(
            self,
            Self::ProductDetail | Self::ArticleDetail | Self::Category
        )
    }

    /// Link to this route in `locale`.
    ///
    /// `param` fills the trailing segment of detail routes and is ignored
    /// otherwise.
    #[must_use]
    pub fn href(self, locale: Locale, param: Option<&str>) -> String {
        let mut path = format!("/{}{}", locale.code(), encode_path(self.base(locale)));
        if self.has_param()
            && let Some(param) = param
        {
            path.push('/');
            path.push_str(&urlencoding::encode(param));
        }
        path
    }

    /// Router patterns for this route in `locale`.
    #[must_use]
    pub fn patterns(self, locale: Locale) -> Vec<String> {
        let base = format!("/{}{}", locale.code(), encode_path(self.base(locale)));
        match self {
            Self::Home => vec![base.clone(), format!("{base}/")],
            _ if self.has_param() => vec![format!("{base}/{{param}}")],
            _ => vec![base],
        }
    }
}

/// Percent-encode each segment of a `/`-separated path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// A request path mapped back to its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub locale: Locale,
    pub route: Route,
    pub param: Option<String>,
}

/// Map a request path (percent-encoded or not, without query) to its locale
/// and route.
#[must_use]
pub fn resolve(path: &str) -> Option<Resolved> {
    let decoded: Vec<Cow<'_, str>> = path
        .trim_end_matches('/')
        .split('/')
        .skip(1)
        .map(urlencoding::decode)
        .collect::<Result<_, _>>()
        .ok()?;

    let (first, rest) = decoded.split_first()?;
    let locale: Locale = first.parse().ok()?;
    let rest: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();

    Route::ALL.into_iter().find_map(|route| {
        let base: Vec<&str> = route
            .base(locale)
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let tail = rest.strip_prefix(base.as_slice())?;

        match (route.has_param(), tail) {
            (false, []) => Some(Resolved {
                locale,
                route,
                param: None,
            }),
            (true, [param]) if !param.is_empty() => Some(Resolved {
                locale,
                route,
                param: Some((*param).to_owned()),
            }),
            _ => None,
        }
    })
}

/// Path of the same page in `target`, keeping the query string.
///
/// Paths that do not resolve lead to the target locale's home.
#[must_use]
pub fn switch_locale(path_and_query: &str, target: Locale) -> String {
    let (path, query) = match path_and_query.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_and_query, None),
    };

    let Some(resolved) = resolve(path) else {
        return Route::Home.href(target, None);
    };

    let mut href = resolved.route.href(target, resolved.param.as_deref());
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        href.push('?');
        href.push_str(query);
    }
    href
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_href_encodes_non_ascii() {
        assert_eq!(Route::Products.href(Locale::En, None), "/en/products");
        assert_eq!(Route::Products.href(Locale::Fr, None), "/fr/produits");
        assert_eq!(
            Route::Products.href(Locale::Ar, None),
            "/ar/%D9%85%D9%86%D8%AA%D8%AC%D8%A7%D8%AA"
        );
        assert_eq!(Route::Home.href(Locale::Fr, None), "/fr");
        assert_eq!(
            Route::ProductDetail.href(Locale::En, Some("42")),
            "/en/products/42"
        );
        assert_eq!(Route::Profile.href(Locale::En, Some("ignored")), "/en/profile");
    }

    #[test]
    fn test_resolve_encoded_and_raw_paths() {
        let raw = resolve("/ar/منتجات").unwrap();
        assert_eq!(raw.route, Route::Products);
        assert_eq!(raw.locale, Locale::Ar);

        let encoded = resolve(&Route::Wishlist.href(Locale::Ar, None)).unwrap();
        assert_eq!(encoded.route, Route::Wishlist);

        let detail = resolve("/fr/articles/mesh-wifi").unwrap();
        assert_eq!(detail.route, Route::ArticleDetail);
        assert_eq!(detail.param.as_deref(), Some("mesh-wifi"));

        assert_eq!(resolve("/en/").unwrap().route, Route::Home);
        assert_eq!(resolve("/en").unwrap().route, Route::Home);
    }

    #[test]
    fn test_resolve_rejects_unknown_paths() {
        assert!(resolve("/de/products").is_none());
        assert!(resolve("/en/produits").is_none());
        assert!(resolve("/en/products/1/extra").is_none());
        assert!(resolve("/en/categories").is_none());
        assert!(resolve("/").is_none());
    }

    #[test]
    fn test_every_route_switches_to_its_localized_path() {
        for route in Route::ALL {
            for from in Locale::ALL {
                for to in Locale::ALL {
                    let param = route.has_param().then_some("smart-lock");
                    let switched = switch_locale(&route.href(from, param), to);
                    assert_eq!(switched, route.href(to, param), "{route:?} {from} -> {to}");

                    let back = resolve(&switched).unwrap();
                    assert_eq!(back.route, route);
                    assert_eq!(back.locale, to);
                }
            }
        }
    }

    #[test]
    fn test_switch_keeps_query_and_falls_back_home() {
        assert_eq!(
            switch_locale("/en/products?page=2&search=bulb", Locale::Fr),
            "/fr/produits?page=2&search=bulb"
        );
        assert_eq!(switch_locale("/en/nowhere?x=1", Locale::Ar), "/ar");
    }

    #[test]
    fn test_patterns_are_unique() {
        let mut patterns: Vec<String> = Locale::ALL
            .into_iter()
            .flat_map(|locale| Route::ALL.into_iter().flat_map(move |r| r.patterns(locale)))
            .collect();
        let total = patterns.len();
        patterns.sort();
        patterns.dedup();
        assert_eq!(patterns.len(), total);
        assert!(patterns.contains(&"/en/categories/{param}".to_owned()));
    }
}
