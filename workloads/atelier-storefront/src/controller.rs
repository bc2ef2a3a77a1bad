//! The storefront controller.
//!
//! Owns the catalog, the cart store and the surface, and turns user events
//! into query, cart and render operations. Every handler is synchronous;
//! only the feed fetch awaits, and [`Storefront::on_feed_loaded`] takes its
//! result so callers never hold the controller across an `.await`.

use std::sync::Arc;

use atelier_cache::KvStore;
use atelier_commerce::prelude::*;
use atelier_observability::StructuredLogger;

use crate::config::{Messages, StorefrontConfig};
use crate::feed::{fetch_feed, FeedLoadError, FeedSource};
use crate::sections::{cart_summary, CategoryPill, DetailView, GridView};
use crate::surface::Surface;

/// State of the detail overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Overlay {
    #[default]
    Hidden,
    /// Shown, with "add to cart" bound to this product.
    Showing {
        id: ProductId,
        title: String,
        price: Money,
    },
}

/// Application state for one storefront page.
pub struct Storefront<S, U> {
    config: StorefrontConfig,
    catalog: CatalogStore,
    cart: CartStore<S>,
    surface: U,
    overlay: Overlay,
    heading: Heading,
    load_error: Option<FeedLoadError>,
    logger: StructuredLogger,
    cart_log: StructuredLogger,
}

impl<S: KvStore, U: Surface> Storefront<S, U> {
    pub fn new(config: StorefrontConfig, store: S, surface: U, logger: StructuredLogger) -> Self {
        let cart = CartStore::new(
            store,
            config.cart.storage_key.clone(),
            config.display.currency,
        );
        Self {
            config,
            catalog: CatalogStore::new(),
            cart,
            surface,
            overlay: Overlay::Hidden,
            heading: Heading::AllProducts,
            load_error: None,
            cart_log: logger.for_component("cart"),
            logger,
        }
    }

    /// Fetch the feed from `source` and install it.
    ///
    /// Failures are shown on the surface and kept in
    /// [`Storefront::load_error`]; nothing propagates.
    pub async fn load(&mut self, source: &dyn FeedSource) {
        let fetched = fetch_feed(&self.logger, source).await;
        self.on_feed_loaded(fetched);
    }

    /// Install a fetched feed document, or show the fallback.
    pub fn on_feed_loaded(&mut self, fetched: Result<String, FeedLoadError>) {
        match fetched.and_then(|document| self.install(&document)) {
            Ok(()) => {
                self.load_error = None;
                let categories = self.catalog.categories();
                self.logger
                    .info_builder("product feed loaded")
                    .field_u64("products", self.catalog.len() as u64)
                    .field_u64("categories", categories.len() as u64)
                    .emit();

                self.surface
                    .render_categories(&CategoryPill::for_categories(&categories));
                self.heading = Heading::AllProducts;
                self.show_heading();
                self.render(self.catalog.view().to_vec());
                self.refresh_cart_count();
            }
            Err(err) => {
                self.logger
                    .warn_builder("product feed failed")
                    .field("error", err.to_string())
                    .emit();
                self.surface
                    .render_grid(&GridView::Unavailable(self.config.messages.feed_failed.clone()));
                self.load_error = Some(err);
            }
        }
    }

    fn install(&mut self, document: &str) -> Result<(), FeedLoadError> {
        let records: Vec<ProductRecord> = serde_json::from_str(document)?;
        self.catalog.load(records, self.config.display.currency)?;
        Ok(())
    }

    /// Search input changed.
    pub fn on_search_input(&mut self, raw: &str) {
        let query = SearchQuery::parse(raw);
        let results = search(self.catalog.all(), &query);
        self.logger
            .debug_builder("search")
            .field("query", query.text())
            .field_u64("results", results.len() as u64)
            .emit();

        self.catalog.set_view(results);
        self.heading = query.heading();
        self.show_heading();
        self.render(self.catalog.view().to_vec());
    }

    /// A category pill or navigation link was chosen.
    pub fn on_category_selected(&mut self, filter: Option<&str>) {
        let choice = CategoryChoice::from_filter(filter);
        let results = filter_category(self.catalog.all(), &choice);
        self.logger
            .debug_builder("filter")
            .field("category", choice.as_filter())
            .field_u64("results", results.len() as u64)
            .emit();

        self.catalog.set_view(results);
        self.heading = choice.heading();
        self.show_heading();
        self.render(self.catalog.view().to_vec());
        self.surface.scroll_to(self.config.display.scroll_top);
    }

    /// Sort selector changed.
    ///
    /// Renders the sorted view without replacing it, so a later "default"
    /// shows the filtered order again.
    pub fn on_sort_changed(&mut self, mode: &str) {
        let option = SortOption::parse(mode);
        let sorted = sort(self.catalog.view(), option);
        self.logger
            .debug_builder("sort")
            .field("mode", option.as_str())
            .field_u64("results", sorted.len() as u64)
            .emit();
        self.render(sorted);
    }

    /// Details requested for a product.
    pub fn on_details(&mut self, id: ProductId) {
        let Some(product) = self.catalog.find(id) else {
            self.logger
                .debug_builder("details for unknown product")
                .field("id", id.to_string())
                .emit();
            return;
        };

        let detail = DetailView::from_product(product);
        self.overlay = Overlay::Showing {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
        };
        self.surface.show_detail(&detail);
    }

    /// Details requested through a `data-product-id` attribute.
    pub fn on_details_attr(&mut self, raw: &str) {
        match raw.parse::<ProductId>() {
            Ok(id) => self.on_details(id),
            Err(_) => self
                .logger
                .debug_builder("details for unparseable product id")
                .field("id", raw)
                .emit(),
        }
    }

    /// "Add to cart" in the overlay.
    pub fn on_add_to_cart(&mut self) {
        let Overlay::Showing { title, price, .. } = self.overlay.clone() else {
            self.cart_log.debug("add to cart with no product shown");
            return;
        };

        match self.cart.add_to_cart(&title, price) {
            Ok(cart) => {
                let count = cart.item_count();
                self.cart_log
                    .info_builder("added to cart")
                    .field("title", title.as_str())
                    .field_u64("count", count)
                    .emit();
                self.surface.set_cart_count(count);
                self.surface
                    .notify(&Messages::with_title(&self.config.messages.added_to_cart, &title));
            }
            Err(err) => {
                self.cart_log
                    .warn_builder("cart write failed")
                    .field("title", title.as_str())
                    .field("error", err.to_string())
                    .emit();
                self.surface.notify(&Messages::with_title(
                    &self.config.messages.cart_save_failed,
                    &title,
                ));
            }
        }
        self.close_detail();
    }

    /// A click on the overlay; only the backdrop closes it.
    pub fn on_overlay_click(&mut self, on_backdrop: bool) {
        if on_backdrop {
            self.close_detail();
        }
    }

    /// Hide the overlay.
    pub fn close_detail(&mut self) {
        self.overlay = Overlay::Hidden;
        self.surface.hide_detail();
    }

    /// Cart button pressed.
    pub fn on_cart_clicked(&mut self) {
        let summary = cart_summary(&self.read_cart(), &self.config.messages);
        self.surface.notify(&summary);
    }

    /// Sum of quantities in the persisted cart.
    pub fn cart_item_count(&self) -> u64 {
        self.read_cart().item_count()
    }

    /// Push the persisted cart count to the surface.
    pub fn refresh_cart_count(&mut self) {
        let count = self.cart_item_count();
        self.surface.set_cart_count(count);
    }

    fn read_cart(&self) -> Cart {
        self.cart.read().unwrap_or_else(|err| {
            self.cart_log
                .debug_builder("unreadable cart, starting empty")
                .field("error", err.to_string())
                .emit();
            Cart::new()
        })
    }

    fn show_heading(&mut self) {
        let text = self.heading.text(&self.config.display.default_heading);
        self.surface.set_heading(&text);
    }

    fn render(&mut self, products: Vec<Arc<Product>>) {
        let grid = GridView::from_products(&products, &self.config.messages.no_products);
        self.surface.render_grid(&grid);
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn heading(&self) -> &Heading {
        &self.heading
    }

    /// Why the last feed load failed, if it did.
    pub fn load_error(&self) -> Option<&FeedLoadError> {
        self.load_error.as_ref()
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn cart_store(&self) -> &CartStore<S> {
        &self.cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::StaticFeed;
    use crate::surface::MemorySurface;
    use atelier_cache::{CacheError, MemoryStore};
    use atelier_observability::{LogLevel, SessionTag};

    const FEED: &str = r#"[
        {"id": 1, "title": "Oud Rose", "notes": "Smoky rose", "price": 100, "old_price": 130,
         "category": "Oud", "images": ["oud-rose-1.jpg", "oud-rose-2.jpg"]},
        {"id": 2, "title": "Rose Musk", "notes": "Soft musk", "price": 80, "old_price": 95,
         "category": "Musk", "images": ["rose-musk.jpg"]},
        {"id": 3, "title": "amber Night", "notes": "Warm amber", "price": 120,
         "category": "Amber", "images": []}
    ]"#;

    fn storefront_with(store: MemoryStore) -> Storefront<MemoryStore, MemorySurface> {
        let logger = StructuredLogger::new(SessionTag::new("test"));
        Storefront::new(StorefrontConfig::default(), store, MemorySurface::new(), logger)
    }

    fn loaded() -> Storefront<MemoryStore, MemorySurface> {
        let mut shop = storefront_with(MemoryStore::new());
        shop.on_feed_loaded(Ok(FEED.to_string()));
        shop
    }

    fn ids(shop: &Storefront<MemoryStore, MemorySurface>) -> Vec<i64> {
        shop.surface()
            .grid
            .as_ref()
            .map(|g| g.product_ids().iter().map(|id| id.get()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_load_renders_everything() {
        let mut shop = storefront_with(MemoryStore::new());
        shop.load(&StaticFeed::new(FEED)).await;

        assert!(shop.load_error().is_none());
        assert_eq!(ids(&shop), vec![1, 2, 3]);
        assert_eq!(shop.surface().heading, "All Products");
        let labels: Vec<&str> = shop
            .surface()
            .categories
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["All", "Oud", "Musk", "Amber"]);
        assert_eq!(shop.surface().cart_count, 0);
    }

    #[test]
    fn test_load_failure_shows_fallback() {
        let mut shop = storefront_with(MemoryStore::new());
        shop.on_feed_loaded(Ok("<html>404</html>".to_string()));

        assert!(matches!(shop.load_error(), Some(FeedLoadError::Malformed(_))));
        assert!(shop.catalog().is_empty());
        assert_eq!(
            shop.surface().grid,
            Some(GridView::Unavailable(
                "Failed to load products. Check that products.json exists in the same folder."
                    .to_string()
            ))
        );
    }

    #[test]
    fn test_duplicate_ids_are_invalid_feed() {
        let mut shop = storefront_with(MemoryStore::new());
        shop.on_feed_loaded(Ok(
            r#"[{"id":1,"title":"A","price":1,"category":"X"},{"id":1,"title":"B","price":2,"category":"X"}]"#
                .to_string(),
        ));
        assert!(matches!(shop.load_error(), Some(FeedLoadError::Invalid(_))));
        assert!(shop.catalog().is_empty());
    }

    #[test]
    fn test_negative_id_feed_renders() {
        let mut shop = storefront_with(MemoryStore::new());
        shop.on_feed_loaded(Ok(
            r#"[{"id":-1,"title":"Tester","price":0,"category":"Samples"},{"id":2,"title":"Rose Musk","price":80,"category":"Musk"}]"#
                .to_string(),
        ));
        assert!(shop.load_error().is_none());
        assert_eq!(ids(&shop), vec![-1, 2]);

        shop.on_details_attr("-1");
        assert!(matches!(shop.overlay(), Overlay::Showing { id, .. } if id.get() == -1));
    }

    #[test]
    fn test_fetch_error_shows_fallback() {
        let mut shop = storefront_with(MemoryStore::new());
        shop.on_feed_loaded(Err(FeedLoadError::Http {
            status: 404,
            url: "products.json".to_string(),
        }));
        assert!(matches!(
            shop.surface().grid,
            Some(GridView::Unavailable(_))
        ));
    }

    #[test]
    fn test_search_heading_and_results() {
        let mut shop = loaded();

        shop.on_search_input("  ROSE ");
        assert_eq!(ids(&shop), vec![1, 2]);
        assert_eq!(shop.surface().heading, "Search: \"ROSE\"");

        shop.on_search_input("amber");
        assert_eq!(ids(&shop), vec![3]);

        shop.on_search_input("   ");
        assert_eq!(ids(&shop), vec![1, 2, 3]);
        assert_eq!(shop.surface().heading, "All Products");
    }

    #[test]
    fn test_search_without_matches() {
        let mut shop = loaded();
        shop.on_search_input("vetiver");
        assert_eq!(
            shop.surface().grid,
            Some(GridView::Empty("No products found.".to_string()))
        );
        assert!(shop.catalog().view().is_empty());
    }

    #[test]
    fn test_search_clears_category() {
        let mut shop = loaded();
        shop.on_category_selected(Some("Musk"));
        shop.on_search_input("oud");
        assert_eq!(ids(&shop), vec![1]);
    }

    #[test]
    fn test_category_filter() {
        let mut shop = loaded();

        shop.on_category_selected(Some("Musk"));
        assert_eq!(ids(&shop), vec![2]);
        assert_eq!(shop.surface().heading, "Musk");
        assert_eq!(shop.surface().scrolls, vec![200]);

        shop.on_category_selected(Some("all"));
        assert_eq!(ids(&shop), vec![1, 2, 3]);
        assert_eq!(shop.surface().heading, "All Products");

        shop.on_category_selected(None);
        assert_eq!(shop.catalog().view().len(), 3);
    }

    #[test]
    fn test_sort_does_not_replace_view() {
        let mut shop = loaded();

        shop.on_sort_changed("price-desc");
        assert_eq!(ids(&shop), vec![3, 1, 2]);
        let view: Vec<i64> = shop.catalog().view().iter().map(|p| p.id.get()).collect();
        assert_eq!(view, vec![1, 2, 3]);

        shop.on_sort_changed("title-asc");
        assert_eq!(ids(&shop), vec![3, 1, 2]);

        shop.on_sort_changed("default");
        assert_eq!(ids(&shop), vec![1, 2, 3]);

        shop.on_sort_changed("bogus");
        assert_eq!(ids(&shop), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_applies_to_filtered_view() {
        let mut shop = loaded();
        shop.on_category_selected(Some("Oud"));
        shop.on_sort_changed("price-asc");
        assert_eq!(ids(&shop), vec![1]);
    }

    #[test]
    fn test_details_and_overlay() {
        let mut shop = loaded();

        shop.on_details(ProductId::new(1));
        let detail = shop.surface().detail.clone().unwrap();
        assert_eq!(detail.title, "Oud Rose");
        assert_eq!(detail.images.len(), 2);
        assert!(matches!(shop.overlay(), Overlay::Showing { id, .. } if id.get() == 1));

        shop.on_overlay_click(false);
        assert!(shop.surface().detail_open());

        shop.on_overlay_click(true);
        assert!(!shop.surface().detail_open());
        assert_eq!(shop.overlay(), &Overlay::Hidden);
    }

    #[test]
    fn test_unknown_product_is_ignored() {
        let mut shop = loaded();
        shop.on_details(ProductId::new(99));
        shop.on_details_attr("not-a-number");
        assert!(!shop.surface().detail_open());
        assert_eq!(shop.overlay(), &Overlay::Hidden);
        assert!(shop.surface().notices.is_empty());
    }

    #[test]
    fn test_add_to_cart_from_overlay() {
        let mut shop = loaded();

        shop.on_details_attr("1");
        shop.on_add_to_cart();
        assert_eq!(shop.surface().cart_count, 1);
        assert_eq!(
            shop.surface().last_notice(),
            Some("Oud Rose added to cart (demo).")
        );
        assert!(!shop.surface().detail_open());

        shop.on_details(ProductId::new(1));
        shop.on_add_to_cart();
        shop.on_details(ProductId::new(2));
        shop.on_add_to_cart();
        assert_eq!(shop.surface().cart_count, 3);
        assert_eq!(shop.cart_item_count(), 3);

        let cart = shop.cart_store().read().unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get("Oud Rose").unwrap().qty, 2);
    }

    #[test]
    fn test_add_without_overlay_does_nothing() {
        let mut shop = loaded();
        shop.on_add_to_cart();
        assert_eq!(shop.cart_item_count(), 0);
        assert!(shop.surface().notices.is_empty());
    }

    #[test]
    fn test_view_cart() {
        let mut shop = loaded();
        shop.on_cart_clicked();
        assert_eq!(shop.surface().last_notice(), Some("Cart is empty (demo)."));

        shop.on_details(ProductId::new(2));
        shop.on_add_to_cart();
        shop.on_cart_clicked();
        let summary = shop.surface().last_notice().unwrap();
        assert!(summary.starts_with("Cart contents:\n1× Rose Musk — AED 80"));
    }

    #[test]
    fn test_cart_count_restored_on_load() {
        let store = MemoryStore::new();
        store
            .set_raw("aurum_cart", r#"[{"title":"t1","price":100,"qty":2},{"title":"t2","price":80,"qty":1}]"#)
            .unwrap();

        let mut shop = storefront_with(store);
        shop.on_feed_loaded(Ok(FEED.to_string()));
        assert_eq!(shop.surface().cart_count, 3);
    }

    #[test]
    fn test_corrupt_cart_is_empty_and_logged() {
        let store = MemoryStore::new();
        store.set_raw("aurum_cart", "{broken").unwrap();

        let (logger, entries) = StructuredLogger::new(SessionTag::new("test"))
            .with_min_level(LogLevel::Debug)
            .capturing();
        let mut shop = Storefront::new(
            StorefrontConfig::default(),
            store,
            MemorySurface::new(),
            logger,
        );
        shop.on_feed_loaded(Ok(FEED.to_string()));

        assert_eq!(shop.surface().cart_count, 0);
        assert!(entries
            .borrow()
            .iter()
            .any(|e| e.level == LogLevel::Debug && e.message.contains("unreadable cart")));
    }

    #[test]
    fn test_cart_write_failure() {
        struct Full;

        impl KvStore for Full {
            fn get_raw(&self, _key: &str) -> Result<Option<String>, CacheError> {
                Ok(None)
            }

            fn set_raw(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
                Err(CacheError::Store("QuotaExceededError".to_string()))
            }

            fn delete(&self, _key: &str) -> Result<(), CacheError> {
                Ok(())
            }
        }

        let (logger, entries) = StructuredLogger::new(SessionTag::new("test")).capturing();
        let mut shop = Storefront::new(StorefrontConfig::default(), Full, MemorySurface::new(), logger);
        shop.on_feed_loaded(Ok(FEED.to_string()));
        shop.on_details(ProductId::new(1));
        shop.on_add_to_cart();

        assert_eq!(
            shop.surface().last_notice(),
            Some("Could not save Oud Rose to the cart.")
        );
        assert_eq!(shop.surface().cart_count, 0);
        assert!(!shop.surface().detail_open());
        assert!(entries
            .borrow()
            .iter()
            .any(|e| e.level == LogLevel::Warn
                && e.message == "cart write failed"
                && e.component.as_deref() == Some("cart")));
    }

    #[test]
    fn test_actions_before_load_see_empty_catalog() {
        let mut shop = storefront_with(MemoryStore::new());
        shop.on_search_input("rose");
        assert!(shop.catalog().view().is_empty());
        shop.on_sort_changed("price-asc");
        assert_eq!(
            shop.surface().grid,
            Some(GridView::Empty("No products found.".to_string()))
        );
    }
}
