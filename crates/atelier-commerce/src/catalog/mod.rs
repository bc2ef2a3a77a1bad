//! Product catalog module.
//!
//! Contains the product type, category listing and the catalog store.

mod category;
mod product;
mod store;

pub use category::distinct_categories;
pub use product::{Product, ProductRecord};
pub use store::CatalogStore;
