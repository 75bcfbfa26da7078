use std::sync::Arc;

use smarthome_core::Paginated;

use crate::backend::{Article, Category, Comment, Product, Review, User, Wishlist};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    ProductPage(Arc<Paginated<Product>>),
    Product(Arc<Product>),
    Products(Arc<Vec<Product>>),
    ArticlePage(Arc<Paginated<Article>>),
    Article(Arc<Article>),
    Articles(Arc<Vec<Article>>),
    Categories(Arc<Vec<Category>>),
    Category(Arc<Category>),
    Comments(Arc<Vec<Comment>>),
    Reviews(Arc<Vec<Review>>),
    Wishlist(Arc<Wishlist>),
    User(Arc<User>),
}

/// A type that can live in the query cache.
pub trait Cached: Sized {
    fn wrap(value: Arc<Self>) -> CacheValue;
    fn unwrap(value: CacheValue) -> Option<Arc<Self>>;
}

macro_rules! cached {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Cached for $ty {
                fn wrap(value: Arc<Self>) -> CacheValue {
                    CacheValue::$variant(value)
                }

                fn unwrap(value: CacheValue) -> Option<Arc<Self>> {
                    match value {
                        CacheValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

cached! {
    Paginated<Product> => ProductPage,
    Product => Product,
    Vec<Product> => Products,
    Paginated<Article> => ArticlePage,
    Article => Article,
    Vec<Article> => Articles,
    Vec<Category> => Categories,
    Category => Category,
    Vec<Comment> => Comments,
    Vec<Review> => Reviews,
    Wishlist => Wishlist,
    User => User,
}
