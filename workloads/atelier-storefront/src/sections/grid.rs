//! Product grid section.

use std::sync::Arc;

use atelier_commerce::catalog::Product;
use atelier_commerce::ProductId;

use super::html_escape;

/// One catalog card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub notes: String,
    pub price: String,
    pub old_price: Option<String>,
    pub image: Option<String>,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            notes: product.notes.clone(),
            price: product.price.display(),
            old_price: product.old_price.map(|p| p.display()),
            image: product.first_image().map(str::to_string),
        }
    }

    /// Card markup.
    pub fn to_html(&self) -> String {
        let media = match &self.image {
            Some(src) => format!(
                r#"<div class="card-media">
            <img src="{}" alt="{}" loading="lazy">
        </div>"#,
                html_escape(src),
                html_escape(&self.title)
            ),
            None => r#"<div class="card-media card-media-empty"></div>"#.to_string(),
        };

        let old_price = self
            .old_price
            .as_deref()
            .map(|p| format!(r#"<span class="old-price">{}</span>"#, html_escape(p)))
            .unwrap_or_default();

        format!(
            r#"<article class="card" data-product-id="{}">
    {}
    <div class="card-body">
        <h3 class="card-title">{}</h3>
        <p class="card-notes">{}</p>
        <div class="price-row">
            <span class="price">{}</span>
            {}
        </div>
        <button class="btn btn-details" data-action="details" data-product-id="{}">View details</button>
    </div>
</article>"#,
            self.id,
            media,
            html_escape(&self.title),
            html_escape(&self.notes),
            html_escape(&self.price),
            old_price,
            self.id,
        )
    }
}

/// What the product grid currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum GridView {
    /// One card per product, in order.
    Cards(Vec<ProductCard>),
    /// The list was empty.
    Empty(String),
    /// The feed could not be loaded.
    Unavailable(String),
}

impl GridView {
    /// Project a product list, falling back to `empty_message` when empty.
    pub fn from_products(products: &[Arc<Product>], empty_message: &str) -> Self {
        if products.is_empty() {
            return GridView::Empty(empty_message.to_string());
        }
        GridView::Cards(
            products
                .iter()
                .map(|p| ProductCard::from_product(p))
                .collect(),
        )
    }

    /// Ids of the rendered cards, in order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        match self {
            GridView::Cards(cards) => cards.iter().map(|c| c.id).collect(),
            GridView::Empty(_) | GridView::Unavailable(_) => Vec::new(),
        }
    }

    /// Markup for the grid container.
    pub fn to_html(&self) -> String {
        match self {
            GridView::Cards(cards) => cards.iter().map(ProductCard::to_html).collect(),
            GridView::Empty(message) => {
                format!(r#"<p class="grid-empty">{}</p>"#, html_escape(message))
            }
            GridView::Unavailable(message) => {
                format!(r#"<p class="grid-error">{}</p>"#, html_escape(message))
            }
        }
    }
}
