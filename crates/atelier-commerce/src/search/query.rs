//! Text search.

use std::sync::Arc;

use crate::catalog::Product;

/// A trimmed, case-folded text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// The query as typed, trimmed.
    text: String,
    /// Lower-cased form used for matching.
    folded: String,
}

impl SearchQuery {
    /// Parse raw input from the search box.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim().to_string();
        let folded = text.to_lowercase();
        Self { text, folded }
    }

    /// Whether the query filters nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The trimmed query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Case-insensitive substring match on title or notes.
    pub fn matches(&self, product: &Product) -> bool {
        self.is_empty()
            || product.title.to_lowercase().contains(&self.folded)
            || product.notes.to_lowercase().contains(&self.folded)
    }

    /// Heading to show above the results.
    pub fn heading(&self) -> Heading {
        if self.is_empty() {
            Heading::AllProducts
        } else {
            Heading::Search(self.text.clone())
        }
    }
}

/// What the catalog heading describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    /// Unfiltered catalog.
    AllProducts,
    /// Results of a text search.
    Search(String),
    /// One category.
    Category(String),
}

impl Heading {
    /// Render the heading, using `default` for the unfiltered catalog.
    pub fn text(&self, default: &str) -> String {
        match self {
            Heading::AllProducts => default.to_string(),
            Heading::Search(query) => format!("Search: \"{}\"", query),
            Heading::Category(name) => name.clone(),
        }
    }
}

/// Products from `all` matching `query`, in catalog order.
pub fn search(all: &[Arc<Product>], query: &SearchQuery) -> Vec<Arc<Product>> {
    all.iter()
        .filter(|p| query.matches(p))
        .cloned()
        .collect()
}
