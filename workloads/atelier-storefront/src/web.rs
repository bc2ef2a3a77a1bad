//! Browser binding: mounts the storefront on the page and wires its events.

use std::cell::RefCell;
use std::rc::Rc;

use atelier_cache::{KvStore, LocalStore, MemoryStore};
use atelier_observability::SessionTag;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlInputElement, HtmlSelectElement, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::config::StorefrontConfig;
use crate::controller::Storefront;
use crate::feed::{fetch_feed, HttpFeed};
use crate::sections::{render_categories, CategoryPill, DetailView, GridView};
use crate::surface::Surface;

const CONFIG_SCRIPT: &str = "storefrontConfig";
const OVERLAY: &str = "productModal";

type Page = Rc<RefCell<Storefront<Box<dyn KvStore>, DomSurface>>>;

/// [`Surface`] over the page's named elements.
pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self { window, document })
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_html(&self, id: &str, html: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_inner_html(html);
        }
    }

    fn set_overlay_open(&self, open: bool) {
        let Some(overlay) = self.document.get_element_by_id(OVERLAY) else {
            return;
        };
        let classes = overlay.class_list();
        let _ = if open {
            classes.add_1("open")
        } else {
            classes.remove_1("open")
        };
        let _ = overlay.set_attribute("aria-hidden", if open { "false" } else { "true" });
    }
}

impl Surface for DomSurface {
    fn set_heading(&mut self, text: &str) {
        self.set_text("catalogTitle", text);
    }

    fn render_grid(&mut self, grid: &GridView) {
        self.set_html("productsGrid", &grid.to_html());
    }

    fn render_categories(&mut self, pills: &[CategoryPill]) {
        self.set_html("categoriesList", &render_categories(pills));
    }

    fn show_detail(&mut self, detail: &DetailView) {
        self.set_text("modalTitle", &detail.title);
        self.set_text("modalNotes", &detail.notes);
        self.set_text("modalPrice", &detail.price);
        self.set_html("modalImages", &detail.images_html());
        self.set_overlay_open(true);
    }

    fn hide_detail(&mut self) {
        self.set_overlay_open(false);
    }

    fn set_cart_count(&mut self, count: u64) {
        self.set_text("cartCount", &count.to_string());
    }

    fn notify(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn scroll_to(&mut self, top: i32) {
        let options = ScrollToOptions::new();
        options.set_top(f64::from(top));
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Page entry point.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let surface = DomSurface::new()?;
    let document = surface.document.clone();

    let (config, config_error) = match read_config(&document) {
        Ok(config) => (config, None),
        Err(err) => (StorefrontConfig::default(), Some(err)),
    };
    let logger = config.logger(SessionTag::generate());
    if let Some(err) = config_error {
        logger
            .warn_builder("ignoring page config")
            .field("error", err.to_string())
            .emit();
    }

    let store: Box<dyn KvStore> = match LocalStore::open() {
        Ok(local) => Box::new(local),
        Err(err) => {
            logger
                .warn_builder("localStorage unavailable, cart will not persist")
                .field("error", err.to_string())
                .emit();
            Box::new(MemoryStore::new())
        }
    };

    let feed = HttpFeed::from_config(&config.feed);
    let page: Page = Rc::new(RefCell::new(Storefront::new(config, store, surface, logger)));

    wire(&document, &page)?;

    wasm_bindgen_futures::spawn_local(async move {
        let logger = page.borrow().logger().clone();
        let fetched = fetch_feed(&logger, &feed).await;
        page.borrow_mut().on_feed_loaded(fetched);
    });

    Ok(())
}

fn read_config(document: &Document) -> anyhow::Result<StorefrontConfig> {
    match document
        .get_element_by_id(CONFIG_SCRIPT)
        .and_then(|el| el.text_content())
    {
        Some(text) if !text.trim().is_empty() => StorefrontConfig::from_json_str(&text),
        _ => Ok(StorefrontConfig::default()),
    }
}

fn wire(document: &Document, page: &Page) -> Result<(), JsValue> {
    if let Some(grid) = document.get_element_by_id("productsGrid") {
        let page = Rc::clone(page);
        listen(&grid, "click", move |event| {
            if let Some(id) = closest(&event, r#"[data-action="details"]"#)
                .and_then(|el| el.get_attribute("data-product-id"))
            {
                page.borrow_mut().on_details_attr(&id);
            }
        })?;
    }

    if let Some(list) = document.get_element_by_id("categoriesList") {
        let page = Rc::clone(page);
        listen(&list, "click", move |event| {
            if let Some(pill) = closest(&event, "[data-category]") {
                page.borrow_mut()
                    .on_category_selected(pill.get_attribute("data-category").as_deref());
            }
        })?;
    }

    {
        let page = Rc::clone(page);
        listen(document, "click", move |event| {
            if let Some(link) = closest(&event, ".main-nav a[data-filter]") {
                event.prevent_default();
                page.borrow_mut()
                    .on_category_selected(link.get_attribute("data-filter").as_deref());
            }
        })?;
    }

    if let Some(input) = document.get_element_by_id("search") {
        let page = Rc::clone(page);
        listen(&input, "input", move |event| {
            if let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            {
                page.borrow_mut().on_search_input(&input.value());
            }
        })?;
    }

    if let Some(select) = document.get_element_by_id("sortSelect") {
        let page = Rc::clone(page);
        listen(&select, "change", move |event| {
            if let Some(select) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            {
                page.borrow_mut().on_sort_changed(&select.value());
            }
        })?;
    }

    if let Some(button) = document.get_element_by_id("cartBtn") {
        let page = Rc::clone(page);
        listen(&button, "click", move |_| page.borrow_mut().on_cart_clicked())?;
    }

    if let Some(overlay) = document.get_element_by_id(OVERLAY) {
        let page = Rc::clone(page);
        listen(&overlay, "click", move |event| {
            let on_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el.id() == OVERLAY);
            page.borrow_mut().on_overlay_click(on_backdrop);
        })?;
    }

    if let Some(button) = document.get_element_by_id("addToCartModal") {
        let page = Rc::clone(page);
        listen(&button, "click", move |_| page.borrow_mut().on_add_to_cart())?;
    }

    Ok(())
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}
