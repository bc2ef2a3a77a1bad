//! Type-safe key-value storage for the Atelier storefront.
//!
//! Wraps any [`KvStore`] backend with automatic JSON serialization. The
//! browser backend ([`LocalStore`], feature `web`) persists to the origin's
//! `localStorage`; [`MemoryStore`] keeps values in process and is what the
//! native builds and tests use.
//!
//! # Example
//!
//! ```rust
//! use atelier_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Line {
//!     title: String,
//!     qty: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &vec![Line { title: "Oud Rose".into(), qty: 1 }]).unwrap();
//!
//! let lines: Option<Vec<Line>> = cache.get("cart").unwrap();
//! assert_eq!(lines.unwrap()[0].qty, 1);
//! ```

mod error;
mod kv;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod local;
mod memory;

pub use error::CacheError;
pub use kv::{Cache, KvStore};
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use local::LocalStore;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvStore, MemoryStore};
}
