//! Demo shopping cart module.
//!
//! Contains the title-keyed cart and its persistence through a key-value
//! store.

mod cart;
mod store;

pub use cart::{Cart, CartLine, CartLineRecord};
pub use store::{CartStore, DEFAULT_CART_KEY};
