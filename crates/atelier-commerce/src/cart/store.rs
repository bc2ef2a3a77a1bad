//! Cart persistence through a key-value store.

use atelier_cache::{Cache, KvStore};

use crate::cart::{Cart, CartLineRecord};
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Storage key the page has always kept its cart under.
pub const DEFAULT_CART_KEY: &str = "aurum_cart";

/// Reads and rewrites the whole cart under one key on every mutation.
///
/// There is no compare-and-swap: two tabs adding at the same time can
/// lose one of the updates.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    currency: Currency,
}

impl<S: KvStore> CartStore<S> {
    /// Create a cart store over `store`, keyed by `key`.
    pub fn new(store: S, key: impl Into<String>, currency: Currency) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
            currency,
        }
    }

    /// Read the persisted cart.
    ///
    /// An absent key is an empty cart; an unreadable value is an error.
    pub fn read(&self) -> Result<Cart, CommerceError> {
        let records: Option<Vec<CartLineRecord>> = self.cache.get(&self.key)?;
        Ok(records
            .map(|records| Cart::from_records(records, self.currency))
            .unwrap_or_default())
    }

    /// Read the persisted cart, substituting an empty one for corrupt data.
    pub fn read_or_empty(&self) -> Cart {
        self.read().unwrap_or_default()
    }

    /// Persist the whole cart.
    pub fn write(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.cache.set(&self.key, &cart.to_records())?;
        Ok(())
    }

    /// Add one unit of `title` and write the cart back.
    ///
    /// Returns the cart as written.
    pub fn add_to_cart(&self, title: &str, price: Money) -> Result<Cart, CommerceError> {
        let mut cart = self.read_or_empty();
        cart.add(title, price)?;
        self.write(&cart)?;
        Ok(cart)
    }

    /// Sum of quantities in the persisted cart, 0 when absent or corrupt.
    pub fn item_count(&self) -> u64 {
        self.read_or_empty().item_count()
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_cache::{CacheError, MemoryStore};

    fn store() -> CartStore<MemoryStore> {
        CartStore::new(MemoryStore::new(), DEFAULT_CART_KEY, Currency::AED)
    }

    fn aed(amount: f64) -> Money {
        Money::from_major(amount, Currency::AED)
    }

    #[test]
    fn test_add_twice_same_title() {
        let carts = store();
        carts.add_to_cart("Oud Rose", aed(100.0)).unwrap();
        let cart = carts.add_to_cart("Oud Rose", aed(100.0)).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("Oud Rose").unwrap().qty, 2);
        assert_eq!(carts.item_count(), 2);
    }

    #[test]
    fn test_add_distinct_titles() {
        let carts = store();
        carts.add_to_cart("Oud Rose", aed(100.0)).unwrap();
        carts.add_to_cart("Rose Musk", aed(80.0)).unwrap();
        assert_eq!(carts.read().unwrap().len(), 2);
    }

    #[test]
    fn test_survives_reload() {
        let backing = MemoryStore::new();
        let first = CartStore::new(backing.clone(), DEFAULT_CART_KEY, Currency::AED);
        first.add_to_cart("Oud Rose", aed(100.0)).unwrap();

        let reloaded = CartStore::new(backing, DEFAULT_CART_KEY, Currency::AED);
        assert_eq!(reloaded.item_count(), 1);
    }

    #[test]
    fn test_reads_plain_json_lines() {
        let carts = store();
        carts
            .store()
            .set_raw(
                DEFAULT_CART_KEY,
                r#"[{"title":"t1","price":100,"qty":2},{"title":"t2","price":80,"qty":1}]"#,
            )
            .unwrap();
        assert_eq!(carts.item_count(), 3);
        assert_eq!(carts.read().unwrap().lines()[0].price, aed(100.0));
    }

    #[test]
    fn test_absent_storage_is_empty() {
        let carts = store();
        assert_eq!(carts.item_count(), 0);
        assert!(carts.read().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_storage_is_empty() {
        let carts = store();
        carts.store().set_raw(DEFAULT_CART_KEY, "not json").unwrap();
        assert!(carts.read().is_err());
        assert_eq!(carts.item_count(), 0);

        // The next add starts from an empty cart and overwrites the value.
        let cart = carts.add_to_cart("Oud Rose", aed(100.0)).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(carts.item_count(), 1);
    }

    #[test]
    fn test_write_failure_surfaces() {
        struct ReadOnly;

        impl KvStore for ReadOnly {
            fn get_raw(&self, _key: &str) -> Result<Option<String>, CacheError> {
                Ok(None)
            }

            fn set_raw(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
                Err(CacheError::Store("QuotaExceededError".to_string()))
            }

            fn delete(&self, _key: &str) -> Result<(), CacheError> {
                Ok(())
            }
        }

        let carts = CartStore::new(ReadOnly, DEFAULT_CART_KEY, Currency::AED);
        let err = carts.add_to_cart("Oud Rose", aed(100.0)).unwrap_err();
        assert!(matches!(err, CommerceError::Cache(_)));
    }
}
