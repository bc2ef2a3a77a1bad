//! Product types.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product record exactly as it appears in the feed document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub price: f64,
    #[serde(default)]
    pub old_price: Option<f64>,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// A product in the catalog.
///
/// Immutable once loaded; the catalog shares it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Feed-assigned identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Scent notes / description.
    pub notes: String,
    /// Current price.
    pub price: Money,
    /// Original price, shown struck through.
    pub old_price: Option<Money>,
    /// Category name.
    pub category: String,
    /// Image URLs, first one is the card image.
    pub images: Vec<String>,
}

impl Product {
    /// Convert a feed record, pricing it in `currency`.
    pub fn from_record(record: ProductRecord, currency: Currency) -> Self {
        Self {
            id: record.id,
            title: record.title,
            notes: record.notes,
            price: Money::from_major(record.price, currency),
            old_price: record.old_price.map(|p| Money::from_major(p, currency)),
            category: record.category,
            images: record.images,
        }
    }

    /// Image used on the catalog card.
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
