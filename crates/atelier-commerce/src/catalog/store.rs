//! In-memory catalog: the full product list and the current view.

use std::collections::HashSet;
use std::sync::Arc;

use crate::catalog::{distinct_categories, Product, ProductRecord};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Holds every loaded product plus the currently filtered view.
///
/// The view only ever contains products from the full list (same `Arc`s)
/// and is replaced wholesale, never edited in place.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    all: Vec<Arc<Product>>,
    view: Vec<Arc<Product>>,
    loaded: bool,
}

impl CatalogStore {
    /// Create an empty, unloaded catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the feed's products and reset the view to all of them.
    ///
    /// Fails without touching the store if two records share an id.
    pub fn load(
        &mut self,
        records: Vec<ProductRecord>,
        currency: Currency,
    ) -> Result<(), CommerceError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CommerceError::DuplicateProduct(record.id));
            }
        }

        self.all = records
            .into_iter()
            .map(|record| Arc::new(Product::from_record(record, currency)))
            .collect();
        self.view = self.all.clone();
        self.loaded = true;
        Ok(())
    }

    /// Parse a feed document and load it.
    pub fn load_json(&mut self, feed: &str, currency: Currency) -> Result<(), CommerceError> {
        let records: Vec<ProductRecord> = serde_json::from_str(feed)?;
        self.load(records, currency)
    }

    /// Whether a feed has been installed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Every product, in feed order.
    pub fn all(&self) -> &[Arc<Product>] {
        &self.all
    }

    /// The current view.
    pub fn view(&self) -> &[Arc<Product>] {
        &self.view
    }

    /// Replace the current view.
    ///
    /// Products that are not part of the catalog are dropped so the view
    /// stays a subset of [`CatalogStore::all`].
    pub fn set_view(&mut self, view: Vec<Arc<Product>>) {
        self.view = view
            .into_iter()
            .filter(|p| self.all.iter().any(|q| Arc::ptr_eq(p, q)))
            .collect();
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        distinct_categories(self.all.iter().map(|p| p.as_ref()))
    }

    /// Look up a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.all.iter().find(|p| p.id == id)
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Whether the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
