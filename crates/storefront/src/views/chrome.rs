//! Layout shared by every page: header, navigation, language switcher,
//! flash message and footer.

use smarthome_core::Locale;

use crate::i18n::{Route, message_key, resolve, switch_locale, t};
use crate::middleware::{Flash, FlashKind, PageContext};
use crate::stores::{Theme, UiState};

#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub href: String,
    pub current: bool,
}

#[derive(Debug, Clone)]
pub struct FlashView {
    /// CSS modifier, `success` or `error`.
    pub class: &'static str,
    pub message: &'static str,
}

impl FlashView {
    fn new(flash: &Flash, locale: Locale) -> Self {
        let class = match flash.kind {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        };
        let key = message_key(&flash.key).unwrap_or("flash.action_failed");
        Self {
            class,
            message: t(locale, key),
        }
    }
}

/// Layout data for `base.html`.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub locale: Locale,
    pub lang: &'static str,
    pub dir: &'static str,
    pub theme: &'static str,
    /// Theme the toggle switches to.
    pub next_theme: &'static str,
    pub theme_label: &'static str,
    pub sidebar_open: bool,
    pub nav: Vec<NavLink>,
    pub languages: Vec<LanguageOption>,
    pub user_name: Option<String>,
    pub wishlist_count: usize,
    pub flash: Option<FlashView>,
    /// Current path and query, posted by forms to come back here.
    pub return_to: String,
    pub home_href: String,
    pub products_href: String,
    pub login_href: String,
    pub register_href: String,
    pub profile_href: String,
    pub wishlist_href: String,
}

impl Chrome {
    #[must_use]
    pub fn new(ctx: &PageContext) -> Self {
        Self::build(
            ctx.locale,
            &ctx.path_and_query,
            ctx.ui.state(),
            ctx.auth.user().map(|u| u.name.as_str()),
            ctx.wishlist.items().len(),
            ctx.flash.as_ref(),
        )
    }

    #[must_use]
    pub fn build(
        locale: Locale,
        path_and_query: &str,
        ui: &UiState,
        user_name: Option<&str>,
        wishlist_count: usize,
        flash: Option<&Flash>,
    ) -> Self {
        let path = path_and_query.split('?').next().unwrap_or_default();
        let current = resolve(path).map(|r| r.route);

        let nav = [
            (Route::Home, "nav.home"),
            (Route::Products, "nav.products"),
            (Route::Articles, "nav.articles"),
        ]
        .into_iter()
        .map(|(route, key)| NavLink {
            href: route.href(locale, None),
            label: t(locale, key),
            active: current.is_some_and(|c| is_section(c, route)),
        })
        .collect();

        let languages = Locale::ALL
            .into_iter()
            .map(|target| LanguageOption {
                code: target.code(),
                name: target.native_name(),
                flag: target.flag(),
                href: switch_locale(path_and_query, target),
                current: target == locale,
            })
            .collect();

        let next_theme = ui.theme.toggled();
        let theme_label = match next_theme {
            Theme::Dark => t(locale, "nav.theme_dark"),
            Theme::Light => t(locale, "nav.theme_light"),
        };

        Self {
            locale,
            lang: locale.code(),
            dir: locale.direction().as_html_dir(),
            theme: ui.theme.as_str(),
            next_theme: next_theme.as_str(),
            theme_label,
            sidebar_open: ui.sidebar_open,
            nav,
            languages,
            user_name: user_name.map(str::to_owned),
            wishlist_count,
            flash: flash.map(|f| FlashView::new(f, locale)),
            return_to: path_and_query.to_owned(),
            home_href: Route::Home.href(locale, None),
            products_href: Route::Products.href(locale, None),
            login_href: Route::Login.href(locale, None),
            register_href: Route::Register.href(locale, None),
            profile_href: Route::Profile.href(locale, None),
            wishlist_href: Route::Wishlist.href(locale, None),
        }
    }

    /// Message for `key` in the page locale.
    #[must_use]
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        t(self.locale, key)
    }
}

/// Whether `current` belongs to the navigation section `section`.
const fn is_section(current: Route, section: Route) -> bool {
    matches!(
        (current, section),
        (Route::Home, Route::Home)
            | (Route::Products | Route::ProductDetail | Route::Category, Route::Products)
            | (Route::Articles | Route::ArticleDetail, Route::Articles)
    )
}
