//! Cart and cart line types.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A cart line as persisted: `{"title": ..., "price": ..., "qty": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineRecord {
    pub title: String,
    pub price: f64,
    pub qty: u32,
}

/// One aggregated entry in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product title; the line's key.
    pub title: String,
    /// Unit price captured when the line was created.
    pub price: Money,
    /// Quantity, always at least 1.
    pub qty: u32,
}

impl CartLine {
    fn to_record(&self) -> CartLineRecord {
        CartLineRecord {
            title: self.title.clone(),
            price: self.price.to_major(),
            qty: self.qty,
        }
    }
}

/// A demo cart: lines keyed by title, in insertion order.
///
/// Invariants: no two lines share a title and every quantity is >= 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted records.
    ///
    /// Lines with a zero quantity are dropped and repeated titles are
    /// folded into the first line with that title.
    pub fn from_records(records: Vec<CartLineRecord>, currency: Currency) -> Self {
        let mut cart = Cart::new();
        for record in records {
            if record.qty == 0 {
                continue;
            }
            match cart.lines.iter_mut().find(|l| l.title == record.title) {
                Some(existing) => existing.qty = existing.qty.saturating_add(record.qty),
                None => cart.lines.push(CartLine {
                    title: record.title,
                    price: Money::from_major(record.price, currency),
                    qty: record.qty,
                }),
            }
        }
        cart
    }

    /// Persistable form of the cart.
    pub fn to_records(&self) -> Vec<CartLineRecord> {
        self.lines.iter().map(CartLine::to_record).collect()
    }

    /// Add one unit of `title`.
    ///
    /// An existing line gains one unit and keeps its original price;
    /// otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, title: &str, price: Money) -> Result<&CartLine, CommerceError> {
        if let Some(index) = self.lines.iter().position(|l| l.title == title) {
            let line = &mut self.lines[index];
            line.qty = line.qty.checked_add(1).ok_or(CommerceError::Overflow)?;
            return Ok(&self.lines[index]);
        }

        self.lines.push(CartLine {
            title: title.to_string(),
            price,
            qty: 1,
        });
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a title.
    pub fn get(&self, title: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.title == title)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.qty)).sum()
    }

    /// Get number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
