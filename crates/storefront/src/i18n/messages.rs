//! Built-in message table.
//!
//! Keys are dotted names. A key without an entry renders as itself.

use std::collections::HashMap;
use std::sync::LazyLock;

use smarthome_core::Locale;

/// `key => [en, fr, ar]`
const MESSAGES: &[(&str, [&str; 3])] = &[
    ("site.name", ["SmartHome Hub", "SmartHome Hub", "سمارت هوم هب"]),
    (
        "site.tagline",
        [
            "Reviews and guides for the connected home",
            "Tests et guides pour la maison connectée",
            "مراجعات وأدلة للمنزل الذكي",
        ],
    ),
    // Navigation
    ("nav.home", ["Home", "Accueil", "الرئيسية"]),
    ("nav.products", ["Products", "Produits", "المنتجات"]),
    ("nav.articles", ["Articles", "Articles", "المقالات"]),
    ("nav.categories", ["Categories", "Catégories", "الفئات"]),
    ("nav.wishlist", ["Wishlist", "Liste de souhaits", "قائمة الرغبات"]),
    ("nav.profile", ["Profile", "Profil", "الملف الشخصي"]),
    ("nav.login", ["Sign in", "Connexion", "تسجيل الدخول"]),
    ("nav.register", ["Sign up", "Inscription", "إنشاء حساب"]),
    ("nav.logout", ["Sign out", "Déconnexion", "تسجيل الخروج"]),
    ("nav.language", ["Language", "Langue", "اللغة"]),
    ("nav.theme_light", ["Light mode", "Mode clair", "الوضع الفاتح"]),
    ("nav.theme_dark", ["Dark mode", "Mode sombre", "الوضع الداكن"]),
    ("nav.menu", ["Menu", "Menu", "القائمة"]),
    // Home
    (
        "home.hero_title",
        [
            "Make your home smarter",
            "Rendez votre maison plus intelligente",
            "اجعل منزلك أكثر ذكاءً",
        ],
    ),
    (
        "home.hero_subtitle",
        [
            "Honest reviews of the best smart home devices",
            "Des avis honnêtes sur les meilleurs appareils connectés",
            "مراجعات صادقة لأفضل أجهزة المنزل الذكي",
        ],
    ),
    ("home.featured_products", ["Featured products", "Produits en vedette", "منتجات مميزة"]),
    ("home.featured_articles", ["Latest articles", "Derniers articles", "أحدث المقالات"]),
    ("home.view_all", ["View all", "Voir tout", "عرض الكل"]),
    ("home.nothing_featured", ["Nothing to show yet.", "Rien à afficher pour le moment.", "لا يوجد شيء لعرضه بعد."]),
    // Product and article lists
    ("products.title", ["Products", "Produits", "المنتجات"]),
    ("products.search_placeholder", ["Search products...", "Rechercher des produits...", "ابحث عن المنتجات..."]),
    ("products.empty", ["No products found.", "Aucun produit trouvé.", "لم يتم العثور على منتجات."]),
    ("products.buy_now", ["Buy now", "Acheter", "اشتر الآن"]),
    ("products.out_of_stock", ["Out of stock", "Rupture de stock", "غير متوفر"]),
    ("products.reviews_count", ["({count} reviews)", "({count} avis)", "({count} مراجعات)"]),
    ("articles.title", ["Articles", "Articles", "المقالات"]),
    ("articles.search_placeholder", ["Search articles...", "Rechercher des articles...", "ابحث عن المقالات..."]),
    ("articles.empty", ["No articles found.", "Aucun article trouvé.", "لم يتم العثور على مقالات."]),
    ("articles.read_more", ["Read more", "Lire la suite", "اقرأ المزيد"]),
    ("articles.by", ["By {author}", "Par {author}", "بقلم {author}"]),
    ("filters.search", ["Search", "Rechercher", "بحث"]),
    ("filters.all_categories", ["All categories", "Toutes les catégories", "جميع الفئات"]),
    ("filters.clear", ["Clear filters", "Effacer les filtres", "مسح عوامل التصفية"]),
    (
        "filters.showing",
        [
            "Showing {from} to {to} of {total} results",
            "Affichage de {from} à {to} sur {total} résultats",
            "عرض {from} إلى {to} من أصل {total} نتيجة",
        ],
    ),
    ("category.title", ["Category: {name}", "Catégorie : {name}", "الفئة: {name}"]),
    // Pagination
    ("pagination.previous", ["Previous", "Précédent", "السابق"]),
    ("pagination.next", ["Next", "Suivant", "التالي"]),
    // Detail pages
    ("detail.reviews", ["Reviews", "Avis", "المراجعات"]),
    ("detail.no_reviews", ["No reviews yet.", "Aucun avis pour le moment.", "لا توجد مراجعات بعد."]),
    ("detail.comments", ["Comments", "Commentaires", "التعليقات"]),
    ("detail.no_comments", ["No comments yet.", "Aucun commentaire pour le moment.", "لا توجد تعليقات بعد."]),
    ("detail.write_review", ["Write a review", "Écrire un avis", "اكتب مراجعة"]),
    ("detail.rating", ["Rating", "Note", "التقييم"]),
    ("detail.content", ["Your message", "Votre message", "رسالتك"]),
    ("detail.submit_review", ["Post review", "Publier l'avis", "نشر المراجعة"]),
    ("detail.add_comment", ["Add a comment", "Ajouter un commentaire", "أضف تعليقًا"]),
    ("detail.submit_comment", ["Post comment", "Publier le commentaire", "نشر التعليق"]),
    (
        "detail.sign_in_to_participate",
        [
            "Sign in to leave a review or comment.",
            "Connectez-vous pour laisser un avis ou un commentaire.",
            "سجّل الدخول لترك مراجعة أو تعليق.",
        ],
    ),
    ("detail.anonymous", ["Anonymous", "Anonyme", "مجهول"]),
    // Wishlist
    ("wishlist.title", ["My wishlist", "Ma liste de souhaits", "قائمة رغباتي"]),
    ("wishlist.empty", ["Your wishlist is empty.", "Votre liste de souhaits est vide.", "قائمة رغباتك فارغة."]),
    ("wishlist.add", ["Add to wishlist", "Ajouter à la liste de souhaits", "أضف إلى قائمة الرغبات"]),
    ("wishlist.remove", ["Remove from wishlist", "Retirer de la liste de souhaits", "إزالة من قائمة الرغبات"]),
    // Auth
    ("auth.login_title", ["Sign in", "Connexion", "تسجيل الدخول"]),
    ("auth.register_title", ["Create an account", "Créer un compte", "إنشاء حساب"]),
    ("auth.email", ["Email", "E-mail", "البريد الإلكتروني"]),
    ("auth.password", ["Password", "Mot de passe", "كلمة المرور"]),
    ("auth.name", ["Name", "Nom", "الاسم"]),
    ("auth.newsletter_opt_in", ["Subscribe to the newsletter", "S'abonner à la newsletter", "الاشتراك في النشرة البريدية"]),
    ("auth.no_account", ["No account yet?", "Pas encore de compte ?", "ليس لديك حساب؟"]),
    ("auth.have_account", ["Already have an account?", "Vous avez déjà un compte ?", "لديك حساب بالفعل؟"]),
    ("auth.login_failed", ["Invalid email or password.", "E-mail ou mot de passe invalide.", "البريد الإلكتروني أو كلمة المرور غير صحيحة."]),
    ("auth.register_failed", ["Could not create the account.", "Impossible de créer le compte.", "تعذر إنشاء الحساب."]),
    ("auth.invalid_email", ["Please enter a valid email address.", "Veuillez saisir une adresse e-mail valide.", "يرجى إدخال بريد إلكتروني صالح."]),
    ("auth.fields_required", ["Please fill in every field.", "Veuillez remplir tous les champs.", "يرجى ملء جميع الحقول."]),
    // Profile
    ("profile.title", ["My profile", "Mon profil", "ملفي الشخصي"]),
    ("profile.member_since", ["Member since", "Membre depuis", "عضو منذ"]),
    ("profile.newsletter", ["Newsletter", "Newsletter", "النشرة البريدية"]),
    ("profile.subscribed", ["Subscribed", "Abonné", "مشترك"]),
    ("profile.not_subscribed", ["Not subscribed", "Non abonné", "غير مشترك"]),
    // Newsletter
    ("newsletter.title", ["Stay in the loop", "Restez informé", "ابقَ على اطلاع"]),
    (
        "newsletter.text",
        [
            "Get the latest reviews in your inbox.",
            "Recevez les derniers tests dans votre boîte mail.",
            "احصل على أحدث المراجعات في بريدك.",
        ],
    ),
    ("newsletter.placeholder", ["your@email.com", "votre@email.com", "بريدك@الإلكتروني.com"]),
    ("newsletter.subscribe", ["Subscribe", "S'abonner", "اشترك"]),
    ("newsletter.subscribed", ["Thanks for subscribing!", "Merci pour votre inscription !", "شكرًا لاشتراكك!"]),
    ("newsletter.invalid_email", ["Please enter a valid email address.", "Veuillez saisir une adresse e-mail valide.", "يرجى إدخال بريد إلكتروني صالح."]),
    ("newsletter.failed", ["Subscription failed, please try again.", "L'inscription a échoué, veuillez réessayer.", "فشل الاشتراك، يرجى المحاولة مرة أخرى."]),
    ("newsletter.unsubscribe_title", ["Unsubscribe", "Désabonnement", "إلغاء الاشتراك"]),
    ("newsletter.confirm_unsubscribe", ["Stop receiving the SmartHome Hub newsletter?", "Ne plus recevoir la newsletter SmartHome Hub ?", "هل تريد إيقاف تلقي نشرة SmartHome Hub الإخبارية؟"]),
    ("newsletter.unsubscribe_button", ["Unsubscribe", "Se désabonner", "إلغاء الاشتراك"]),
    ("newsletter.unsubscribed", ["You have been unsubscribed.", "Vous avez été désabonné.", "تم إلغاء اشتراكك."]),
    ("newsletter.unsubscribe_failed", ["This unsubscribe link is invalid or has expired.", "Ce lien de désabonnement est invalide ou a expiré.", "رابط إلغاء الاشتراك غير صالح أو منتهي الصلاحية."]),
    // Flash messages
    ("flash.review_created", ["Thanks for your review!", "Merci pour votre avis !", "شكرًا على مراجعتك!"]),
    ("flash.comment_created", ["Comment posted.", "Commentaire publié.", "تم نشر التعليق."]),
    ("flash.wishlist_added", ["Added to your wishlist.", "Ajouté à votre liste de souhaits.", "تمت الإضافة إلى قائمة رغباتك."]),
    ("flash.wishlist_removed", ["Removed from your wishlist.", "Retiré de votre liste de souhaits.", "تمت الإزالة من قائمة رغباتك."]),
    ("flash.signed_out", ["You have been signed out.", "Vous êtes déconnecté.", "تم تسجيل خروجك."]),
    ("flash.sign_in_required", ["Please sign in first.", "Veuillez d'abord vous connecter.", "يرجى تسجيل الدخول أولاً."]),
    ("flash.session_expired", ["Your session has expired, please sign in again.", "Votre session a expiré, veuillez vous reconnecter.", "انتهت جلستك، يرجى تسجيل الدخول مرة أخرى."]),
    ("flash.invalid_input", ["Please check the form and try again.", "Veuillez vérifier le formulaire et réessayer.", "يرجى التحقق من النموذج والمحاولة مرة أخرى."]),
    ("flash.action_failed", ["Something went wrong, please try again.", "Une erreur est survenue, veuillez réessayer.", "حدث خطأ ما، يرجى المحاولة مرة أخرى."]),
    ("flash.too_many_requests", ["Too many attempts, please wait a moment.", "Trop de tentatives, veuillez patienter.", "محاولات كثيرة جدًا، يرجى الانتظار قليلاً."]),
    // Errors and footer
    ("errors.not_found_title", ["Page not found", "Page introuvable", "الصفحة غير موجودة"]),
    ("errors.not_found_text", ["The page you are looking for does not exist.", "La page que vous recherchez n'existe pas.", "الصفحة التي تبحث عنها غير موجودة."]),
    ("errors.load_failed", ["Could not load this content right now.", "Impossible de charger ce contenu pour le moment.", "تعذر تحميل هذا المحتوى الآن."]),
    ("errors.back_home", ["Back to home", "Retour à l'accueil", "العودة إلى الرئيسية"]),
    ("footer.rights", ["All rights reserved.", "Tous droits réservés.", "جميع الحقوق محفوظة."]),
    (
        "footer.affiliate",
        [
            "We may earn a commission from purchases made through our links.",
            "Nous pouvons percevoir une commission sur les achats effectués via nos liens.",
            "قد نحصل على عمولة من المشتريات التي تتم عبر روابطنا.",
        ],
    ),
];

const MONTHS: [[&str; 12]; 3] = [
    [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    [
        "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر", "أكتوبر",
        "نوفمبر", "ديسمبر",
    ],
];

static TABLE: LazyLock<HashMap<&'static str, [&'static str; 3]>> =
    LazyLock::new(|| MESSAGES.iter().copied().collect());

const fn index(locale: Locale) -> usize {
    match locale {
        Locale::En => 0,
        Locale::Fr => 1,
        Locale::Ar => 2,
    }
}

/// Message for `key` in `locale`, or `key` itself when unknown.
#[must_use]
pub fn t<'a>(locale: Locale, key: &'a str) -> &'a str {
    TABLE.get(key).map_or(key, |entry| entry[index(locale)])
}

/// The catalog's own copy of `key`, if the key is known.
#[must_use]
pub fn message_key(key: &str) -> Option<&'static str> {
    TABLE.get_key_value(key).map(|(known, _)| *known)
}

/// [`t`] with `{name}` placeholders replaced from `args`.
#[must_use]
pub fn tf(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    args.iter()
        .fold(t(locale, key).to_owned(), |message, (name, value)| {
            message.replace(&format!("{{{name}}}"), value)
        })
}

/// Month name for `month` in `1..=12`.
#[must_use]
pub fn month_name(locale: Locale, month: u32) -> &'static str {
    let months = &MONTHS[index(locale)];
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|m| months.get(m))
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_lookup_per_locale() {
        assert_eq!(t(Locale::En, "nav.products"), "Products");
        assert_eq!(t(Locale::Fr, "nav.products"), "Produits");
        assert_eq!(t(Locale::Ar, "nav.products"), "المنتجات");
    }

    #[test]
    fn test_missing_key_renders_itself() {
        assert_eq!(t(Locale::Fr, "nav.does_not_exist"), "nav.does_not_exist");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            tf(
                Locale::En,
                "filters.showing",
                &[("from", "13"), ("to", "24"), ("total", "30")]
            ),
            "Showing 13 to 24 of 30 results"
        );
    }

    #[test]
    fn test_keys_are_unique_and_translated() {
        let mut seen = HashSet::new();
        for (key, translations) in MESSAGES {
            assert!(seen.insert(key), "duplicate key {key}");
            assert!(translations.iter().all(|s| !s.is_empty()), "empty message for {key}");
        }
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(Locale::En, 1), "January");
        assert_eq!(month_name(Locale::Fr, 8), "août");
        assert_eq!(month_name(Locale::Ar, 12), "ديسمبر");
        assert_eq!(month_name(Locale::En, 0), "");
        assert_eq!(month_name(Locale::En, 13), "");
    }
}
