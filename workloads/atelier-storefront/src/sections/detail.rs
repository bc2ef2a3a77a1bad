//! Product detail overlay.

use atelier_commerce::catalog::Product;
use atelier_commerce::ProductId;

use super::html_escape;

/// Contents of the detail overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: ProductId,
    pub title: String,
    pub notes: String,
    pub price: String,
    pub images: Vec<String>,
}

impl DetailView {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            notes: product.notes.clone(),
            price: product.price.display(),
            images: product.images.clone(),
        }
    }

    /// Markup for the image strip: every image, in feed order.
    pub fn images_html(&self) -> String {
        self.images
            .iter()
            .map(|src| {
                format!(
                    r#"<img src="{}" alt="{}" loading="lazy">"#,
                    html_escape(src),
                    html_escape(&self.title)
                )
            })
            .collect()
    }
}
