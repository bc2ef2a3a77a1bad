//! Catalog, query and cart domain logic for the Atelier storefront.
//!
//! - **Catalog**: products loaded from the feed, the current view, categories
//! - **Search**: text search, category filtering, sorting
//! - **Cart**: title-keyed demo cart persisted through a key-value store
//!
//! # Example
//!
//! ```rust
//! use atelier_commerce::prelude::*;
//!
//! let feed = r#"[
//!     {"id": 1, "title": "Oud Rose", "notes": "Smoky rose", "price": 100,
//!      "old_price": 140, "category": "Oud", "images": ["oud.jpg"]},
//!     {"id": 2, "title": "Rose Musk", "notes": "Soft musk", "price": 80,
//!      "old_price": 95, "category": "Musk", "images": []}
//! ]"#;
//!
//! let mut catalog = CatalogStore::new();
//! catalog.load_json(feed, Currency::AED).unwrap();
//!
//! let hits = search(catalog.all(), &SearchQuery::parse("rose"));
//! assert_eq!(hits.len(), 2);
//!
//! let sorted = sort(catalog.view(), SortOption::PriceDesc);
//! assert_eq!(sorted[0].id, ProductId::new(1));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{distinct_categories, CatalogStore, Product, ProductRecord};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartLineRecord, CartStore, DEFAULT_CART_KEY};

    // Search
    pub use crate::search::{
        compare_titles, filter_category, search, sort, CategoryChoice, Heading, SearchQuery,
        SortOption,
    };
}
