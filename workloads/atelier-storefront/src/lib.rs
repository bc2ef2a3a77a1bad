//! Atelier Storefront - a single catalog page with search, category filters,
//! sorting and a demo cart.
//!
//! This workload demonstrates:
//! - One feed fetch at startup, then purely in-memory queries
//! - View models rendered to escaped markup, mounted through a [`Surface`]
//! - A cart persisted to `localStorage` on every change
//!
//! The [`Storefront`] controller is platform-neutral; with the `web`
//! feature on `wasm32` the page binding mounts it on the document and wires
//! the page's controls through event delegation.
//!
//! ```rust
//! use atelier_cache::MemoryStore;
//! use atelier_observability::{SessionTag, StructuredLogger};
//! use atelier_storefront::{MemorySurface, Storefront, StorefrontConfig};
//!
//! let logger = StructuredLogger::new(SessionTag::new("doc"));
//! let mut shop = Storefront::new(
//!     StorefrontConfig::default(),
//!     MemoryStore::new(),
//!     MemorySurface::new(),
//!     logger,
//! );
//! shop.on_feed_loaded(Ok(r#"[{"id": 1, "title": "Oud Rose", "price": 100, "category": "Oud"}]"#.into()));
//! shop.on_search_input("rose");
//! assert_eq!(shop.surface().heading, "Search: \"rose\"");
//! ```

pub mod config;
pub mod controller;
pub mod feed;
pub mod sections;
pub mod surface;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

pub use config::StorefrontConfig;
pub use controller::{Overlay, Storefront};
#[cfg(not(target_arch = "wasm32"))]
pub use feed::FileFeed;
pub use feed::{fetch_feed, FeedLoadError, FeedSource, HttpFeed, StaticFeed};
pub use surface::{MemorySurface, Surface};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::{start, DomSurface};
