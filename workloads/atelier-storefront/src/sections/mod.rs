//! Page sections.
//!
//! Each section is built as plain data first (cards, pills, detail view),
//! which the [`Surface`](crate::Surface) then mounts. Markup carries
//! `data-action` attributes instead of inline handlers.

mod cart;
mod categories;
mod detail;
mod grid;

pub use cart::cart_summary;
pub use categories::{render_categories, CategoryPill};
pub use detail::DetailView;
pub use grid::{GridView, ProductCard};

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
