//! Sorting of the current view.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::compare_titles;

/// Sort options offered by the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Keep the view's own order.
    #[default]
    Default,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by title A-Z.
    TitleAsc,
}

impl SortOption {
    /// Every option, in selector order.
    pub const ALL: [SortOption; 4] = [
        SortOption::Default,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::TitleAsc,
    ];

    /// Parse a selector value. Unknown values keep the view's order.
    pub fn parse(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Selector value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::TitleAsc => "title-asc",
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s.trim())
            .ok_or_else(|| format!("unknown sort mode: {}", s))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sorted copy of `view`.
///
/// The sort is stable, so products with equal keys keep their view order.
pub fn sort(view: &[Arc<Product>], option: SortOption) -> Vec<Arc<Product>> {
    let mut sorted = view.to_vec();
    match option {
        SortOption::Default => {}
        SortOption::PriceAsc => sorted.sort_by(|a, b| a.price.cmp_amount(&b.price)),
        SortOption::PriceDesc => sorted.sort_by(|a, b| b.price.cmp_amount(&a.price)),
        SortOption::TitleAsc => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};
    use std::cmp::Ordering;

    fn product(id: i64, title: &str, price: f64) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::new(id),
            title: title.to_string(),
            notes: String::new(),
            price: Money::from_major(price, Currency::AED),
            old_price: None,
            category: "Oud".to_string(),
            images: Vec::new(),
        })
    }

    fn view() -> Vec<Arc<Product>> {
        vec![
            product(1, "Oud Rose", 100.0),
            product(2, "amber Night", 80.0),
            product(3, "Rose Musk", 80.0),
            product(4, "Cedar", 120.0),
        ]
    }

    fn ids(products: &[Arc<Product>]) -> Vec<i64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_parse() {
        assert_eq!(SortOption::parse("price-asc"), SortOption::PriceAsc);
        assert_eq!(SortOption::parse("title-asc"), SortOption::TitleAsc);
        assert_eq!(SortOption::parse("rating"), SortOption::Default);
        assert!("rating".parse::<SortOption>().is_err());
    }

    #[test]
    fn test_default_keeps_order() {
        let view = view();
        let sorted = sort(&view, SortOption::Default);
        assert!(sorted.iter().zip(&view).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn test_price_asc_is_stable() {
        let sorted = sort(&view(), SortOption::PriceAsc);
        assert_eq!(ids(&sorted), vec![2, 3, 1, 4]);
        assert!(sorted
            .windows(2)
            .all(|w| w[0].price.to_major() <= w[1].price.to_major()));
    }

    #[test]
    fn test_price_desc_is_stable() {
        let sorted = sort(&view(), SortOption::PriceDesc);
        assert_eq!(ids(&sorted), vec![4, 1, 2, 3]);
        assert!(sorted
            .windows(2)
            .all(|w| w[0].price.to_major() >= w[1].price.to_major()));
    }

    #[test]
    fn test_price_sorts_on_exact_amount() {
        let view = vec![product(1, "Oud Rose", 10.004), product(2, "Rose Musk", 10.001)];
        assert_eq!(ids(&sort(&view, SortOption::PriceAsc)), vec![2, 1]);
        assert_eq!(ids(&sort(&view, SortOption::PriceDesc)), vec![1, 2]);
    }

    #[test]
    fn test_title_asc() {
        let sorted = sort(&view(), SortOption::TitleAsc);
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3]);
        assert!(sorted
            .windows(2)
            .all(|w| compare_titles(&w[0].title, &w[1].title) != Ordering::Greater));
    }

    #[test]
    fn test_input_untouched() {
        let view = view();
        let _ = sort(&view, SortOption::PriceDesc);
        assert_eq!(ids(&view), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_view() {
        assert!(sort(&[], SortOption::TitleAsc).is_empty());
    }
}
