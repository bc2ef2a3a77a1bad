//! Search module.
//!
//! Pure query functions over product slices: text search, category
//! filtering and sorting. Each returns a new vector and leaves its input
//! untouched.

mod collate;
mod filter;
mod query;
mod sort;

pub use collate::compare_titles;
pub use filter::{filter_category, CategoryChoice};
pub use query::{search, Heading, SearchQuery};
pub use sort::{sort, SortOption};
