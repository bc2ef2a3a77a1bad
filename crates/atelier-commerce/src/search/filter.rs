//! Category filtering.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::Heading;

/// Which categories the view should show.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryChoice {
    /// No restriction.
    #[default]
    All,
    /// Exactly this category name.
    Specific(String),
}

impl CategoryChoice {
    /// Value of the "all" reset control.
    pub const ALL: &'static str = "all";

    /// Parse a `data-filter` / `data-category` attribute.
    ///
    /// A missing or empty value and `"all"` mean no restriction.
    pub fn from_filter(value: Option<&str>) -> Self {
        match value {
            None => CategoryChoice::All,
            Some(v) if v.is_empty() || v == Self::ALL => CategoryChoice::All,
            Some(v) => CategoryChoice::Specific(v.to_string()),
        }
    }

    /// Attribute value for this choice.
    pub fn as_filter(&self) -> &str {
        match self {
            CategoryChoice::All => Self::ALL,
            CategoryChoice::Specific(name) => name,
        }
    }

    /// Whether `product` belongs to this choice.
    pub fn admits(&self, product: &Product) -> bool {
        match self {
            CategoryChoice::All => true,
            CategoryChoice::Specific(name) => &product.category == name,
        }
    }

    /// Heading to show above the results.
    pub fn heading(&self) -> Heading {
        match self {
            CategoryChoice::All => Heading::AllProducts,
            CategoryChoice::Specific(name) => Heading::Category(name.clone()),
        }
    }
}

/// Products from `all` admitted by `choice`, in catalog order.
pub fn filter_category(all: &[Arc<Product>], choice: &CategoryChoice) -> Vec<Arc<Product>> {
    all.iter().filter(|p| choice.admits(p)).cloned().collect()
}
