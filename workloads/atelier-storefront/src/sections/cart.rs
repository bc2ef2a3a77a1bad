//! Cart summary shown when the cart button is pressed.

use atelier_commerce::cart::Cart;

use crate::config::Messages;

/// Plain-text listing of the cart, one line per entry.
pub fn cart_summary(cart: &Cart, messages: &Messages) -> String {
    if cart.is_empty() {
        return messages.cart_empty.clone();
    }

    let lines: Vec<String> = cart
        .lines()
        .iter()
        .map(|line| format!("{}× {} — {}", line.qty, line.title, line.price))
        .collect();

    format!(
        "{}\n{}\n\n{}",
        messages.cart_header,
        lines.join("\n"),
        messages.cart_footer
    )
}
