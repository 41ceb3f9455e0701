//! Derived view state handed to presenters after every mutation.

use havana_core::{Cart, LineItem};

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub name: String,
    pub quantity: u32,
    /// Unit price as stored, e.g. `$52.5`.
    pub price: String,
    /// Line total rounded to whole pesos, e.g. `$105`.
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "$0".to_string(),
            item_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checkout is only offered for a non-empty cart.
    #[must_use]
    pub fn checkout_enabled(&self) -> bool {
        !self.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price.exact(),
            line_price: item.line_total().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_view_from_cart() {
        let mut cart = Cart::new();
        cart.add("Latte", Decimal::new(45, 0));
        cart.add("Latte", Decimal::new(45, 0));
        cart.add("Conchita", Decimal::new(225, 1));

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "$113");
        assert!(view.checkout_enabled());

        let latte = view.items.first().unwrap();
        assert_eq!(latte.name, "Latte");
        assert_eq!(latte.price, "$45");
        assert_eq!(latte.line_price, "$90");

        let conchita = view.items.get(1).unwrap();
        assert_eq!(conchita.price, "$22.5");
        assert_eq!(conchita.line_price, "$23");
    }

    #[test]
    fn test_empty_view_matches_empty_cart() {
        assert_eq!(CartView::from(&Cart::new()), CartView::empty());
        assert!(!CartView::empty().checkout_enabled());
    }
}
