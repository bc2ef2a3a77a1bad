//! Category listing.

use crate::catalog::Product;

/// Distinct category names in order of first appearance.
pub fn distinct_categories<'a, I>(products: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !categories.iter().any(|c| c == &product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};

    fn product(id: i64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            notes: String::new(),
            price: Money::from_major(10.0, Currency::AED),
            old_price: None,
            category: category.to_string(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_first_appearance_order() {
        let products = vec![
            product(1, "Oud"),
            product(2, "Musk"),
            product(3, "Oud"),
            product(4, "Amber"),
            product(5, "Musk"),
        ];
        assert_eq!(distinct_categories(&products), vec!["Oud", "Musk", "Amber"]);
    }

    #[test]
    fn test_empty() {
        assert!(distinct_categories(&Vec::<Product>::new()).is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        let products = vec![product(1, "Oud"), product(2, "oud")];
        assert_eq!(distinct_categories(&products).len(), 2);
    }
}
