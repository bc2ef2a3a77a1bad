//! Presentation surface: the page's fixed mounting points.

use crate::sections::{CategoryPill, DetailView, GridView};

/// Where the storefront puts what it renders.
///
/// The browser implementation writes into the page's named elements;
/// [`MemorySurface`] keeps the latest state for tests and headless use.
pub trait Surface {
    /// Catalog heading.
    fn set_heading(&mut self, text: &str);

    /// Product grid.
    fn render_grid(&mut self, grid: &GridView);

    /// Category list.
    fn render_categories(&mut self, pills: &[CategoryPill]);

    /// Fill and show the detail overlay.
    fn show_detail(&mut self, detail: &DetailView);

    /// Hide the detail overlay.
    fn hide_detail(&mut self);

    /// Cart item counter.
    fn set_cart_count(&mut self, count: u64);

    /// Tell the user something.
    fn notify(&mut self, message: &str);

    /// Scroll the page to `top` pixels.
    fn scroll_to(&mut self, top: i32);
}

/// Headless surface recording the latest state of every mounting point.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub heading: String,
    pub grid: Option<GridView>,
    pub categories: Vec<CategoryPill>,
    pub detail: Option<DetailView>,
    pub cart_count: u64,
    pub notices: Vec<String>,
    pub scrolls: Vec<i32>,
    pub grid_renders: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the detail overlay is shown.
    pub fn detail_open(&self) -> bool {
        self.detail.is_some()
    }

    /// Most recent notice.
    pub fn last_notice(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }
}

impl Surface for MemorySurface {
    fn set_heading(&mut self, text: &str) {
        self.heading = text.to_string();
    }

    fn render_grid(&mut self, grid: &GridView) {
        self.grid = Some(grid.clone());
        self.grid_renders += 1;
    }

    fn render_categories(&mut self, pills: &[CategoryPill]) {
        self.categories = pills.to_vec();
    }

    fn show_detail(&mut self, detail: &DetailView) {
        self.detail = Some(detail.clone());
    }

    fn hide_detail(&mut self) {
        self.detail = None;
    }

    fn set_cart_count(&mut self, count: u64) {
        self.cart_count = count;
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn scroll_to(&mut self, top: i32) {
        self.scrolls.push(top);
    }
}
