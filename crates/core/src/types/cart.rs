//! Cart line items and the cart state machine.
//!
//! [`Cart`] holds the ordered line items of a pending order and implements the
//! pure transitions (add, increase, decrease, remove, clear). Every transition
//! reports whether it changed anything so that callers can decide whether to
//! run side effects. Derived values ([`Cart::item_count`], [`Cart::total`]) are
//! always recomputed from the items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::price::Price;

/// Errors raised when a list of records does not form a valid cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("line item name cannot be empty")]
    EmptyName,
    #[error("duplicate line item: {0}")]
    DuplicateName(String),
    #[error("line item {0} has zero quantity")]
    ZeroQuantity(String),
    #[error("price out of range: {0}")]
    InvalidPrice(Decimal),
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name, unique within the cart.
    pub name: String,
    /// Unit price in effect when the item was first added.
    pub price: Price,
    /// Always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Price of the whole line (`price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The ordered collection of line items representing a pending order.
///
/// Serializes as a bare array of `{name, price, quantity}` records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from existing records, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if a name is empty or repeated, or a quantity is zero.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        for (index, item) in items.iter().enumerate() {
            if is_blank(&item.name) {
                return Err(CartError::EmptyName);
            }
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity(item.name.clone()));
            }
            if items
                .iter()
                .take(index)
                .any(|earlier| earlier.name == item.name)
            {
                return Err(CartError::DuplicateName(item.name.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of `price × quantity` across all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Add one unit of `name`.
    ///
    /// An existing entry gets its quantity bumped and keeps its original
    /// price. A new entry is appended with quantity 1. A blank name, or a
    /// price [`Price::positive`] rejects, leaves the cart untouched.
    ///
    /// Returns `true` if the cart changed.
    pub fn add(&mut self, name: &str, price: Decimal) -> bool {
        if is_blank(name) {
            return false;
        }
        let Some(price) = Price::positive(price) else {
            return false;
        };

        if let Some(item) = self.get_mut(name) {
            return bump(item);
        }

        self.items.push(LineItem {
            name: name.to_string(),
            price,
            quantity: 1,
        });
        true
    }

    /// Increase the quantity of `name` by one. Returns `true` if the cart changed.
    pub fn increase(&mut self, name: &str) -> bool {
        self.get_mut(name).is_some_and(bump)
    }

    /// Decrease the quantity of `name` by one.
    ///
    /// Never goes below 1; removing a line is a separate action.
    /// Returns `true` if the cart changed.
    pub fn decrease(&mut self, name: &str) -> bool {
        match self.get_mut(name) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Remove the line for `name`. Returns `true` if a line was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        self.items.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.name == name)
    }
}

fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

fn bump(item: &mut LineItem) -> bool {
    match item.quantity.checked_add(1) {
        Some(quantity) => {
            item.quantity = quantity;
            true
        }
        None => false,
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pesos(amount: i64) -> Decimal {
        Decimal::new(amount, 0)
    }

    fn item(name: &str, price: u32, quantity: u32) -> LineItem {
        LineItem {
            name: name.to_string(),
            price: Price::from(price),
            quantity,
        }
    }

    fn latte_and_muffin() -> Cart {
        let mut cart = Cart::new();
        cart.add("Latte", pesos(45));
        cart.add("Latte", pesos(45));
        cart.add("Muffin", pesos(30));
        cart
    }

    #[test]
    fn test_add_merges_by_name_and_keeps_order() {
        let cart = latte_and_muffin();
        assert_eq!(cart.items(), &[item("Latte", 45, 2), item("Muffin", 30, 1)]);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from(120));
    }

    #[test]
    fn test_first_price_wins() {
        let mut cart = Cart::new();
        assert!(cart.add("Latte", pesos(45)));
        assert!(cart.add("Latte", pesos(60)));
        assert_eq!(cart.items(), &[item("Latte", 45, 2)]);
    }

    #[test]
    fn test_add_ignores_invalid_input() {
        let mut cart = Cart::new();
        assert!(!cart.add("", pesos(45)));
        assert!(!cart.add("   ", pesos(45)));
        assert!(!cart.add("Latte", Decimal::ZERO));
        assert!(!cart.add("Latte", pesos(-10)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrease_stops_at_one() {
        let mut cart = latte_and_muffin();
        assert!(cart.decrease("Latte"));
        assert_eq!(cart.get("Latte"), Some(&item("Latte", 45, 1)));

        assert!(!cart.decrease("Latte"));
        assert_eq!(cart.get("Latte"), Some(&item("Latte", 45, 1)));
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_increase_and_decrease_absent_are_noops() {
        let mut cart = latte_and_muffin();
        let before = cart.clone();
        assert!(!cart.increase("Espresso"));
        assert!(!cart.decrease("Espresso"));
        assert!(!cart.remove("Espresso"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_increase_bumps_quantity() {
        let mut cart = latte_and_muffin();
        assert!(cart.increase("Muffin"));
        assert_eq!(cart.get("Muffin").unwrap().quantity, 2);
        assert_eq!(cart.total(), Price::from(150));
    }

    #[test]
    fn test_increase_at_max_quantity_is_noop() {
        let mut cart = Cart::from_items(vec![item("Latte", 45, u32::MAX)]).unwrap();
        assert!(!cart.increase("Latte"));
        assert!(!cart.add("Latte", pesos(45)));
        assert_eq!(cart.get("Latte").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_remove_deletes_line() {
        let mut cart = latte_and_muffin();
        assert!(cart.remove("Latte"));
        assert_eq!(cart.items(), &[item("Muffin", 30, 1)]);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Price::from(30));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = latte_and_muffin();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_from_items_rejects_broken_records() {
        assert_eq!(
            Cart::from_items(vec![item("Latte", 45, 1), item("Latte", 45, 2)]),
            Err(CartError::DuplicateName("Latte".to_string()))
        );
        assert_eq!(
            Cart::from_items(vec![item("Latte", 45, 0)]),
            Err(CartError::ZeroQuantity("Latte".to_string()))
        );
        assert_eq!(
            Cart::from_items(vec![item("", 45, 1)]),
            Err(CartError::EmptyName)
        );
    }

    #[test]
    fn test_serde_uses_bare_record_array() {
        let cart = latte_and_muffin();
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Latte");
        assert_eq!(json[0]["quantity"], 2);
        assert_eq!(json[1]["price"].as_f64(), Some(30.0));

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_deserialize_browser_record_format() {
        let raw = r#"[{"name":"Latte","price":45,"quantity":2},{"name":"Muffin","price":30,"quantity":1}]"#;
        let cart: Cart = serde_json::from_str(raw).unwrap();
        assert_eq!(cart, latte_and_muffin());
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let raw = r#"[{"name":"Latte","price":45,"quantity":1},{"name":"Latte","price":45,"quantity":1}]"#;
        assert!(serde_json::from_str::<Cart>(raw).is_err());
    }

    // =========================================================================
    // Property tests
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Op {
        Add(String, Decimal),
        Increase(String),
        Decrease(String),
        Remove(String),
        Clear,
    }

    fn name() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec!["Latte", "Muffin", "Concha", "Café Cubano"])
                .prop_map(String::from),
            "[A-Za-zñé ]{0,10}",
        ]
    }

    /// Mostly valid prices, plus zero, negatives, sub-cent and huge amounts.
    fn price() -> impl Strategy<Value = Decimal> {
        prop_oneof![
            4 => (1i64..1_000_000, 0u32..=2).prop_map(|(n, scale)| Decimal::new(n, scale)),
            1 => (-1_000_000i64..=0, 0u32..=2).prop_map(|(n, scale)| Decimal::new(n, scale)),
            1 => (1i64..i64::MAX, 0u32..=8).prop_map(|(n, scale)| Decimal::new(n, scale)),
            1 => Just(Decimal::MAX),
        ]
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (name(), price()).prop_map(|(name, price)| Op::Add(name, price)),
            2 => name().prop_map(Op::Increase),
            2 => name().prop_map(Op::Decrease),
            1 => name().prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    fn apply(cart: &mut Cart, op: &Op) {
        match op {
            Op::Add(name, price) => {
                cart.add(name, *price);
            }
            Op::Increase(name) => {
                cart.increase(name);
            }
            Op::Decrease(name) => {
                cart.decrease(name);
            }
            Op::Remove(name) => {
                cart.remove(name);
            }
            Op::Clear => cart.clear(),
        }
    }

    proptest! {
        #[test]
        fn test_invariants_hold_for_any_sequence(ops in prop::collection::vec(op(), 0..60)) {
            let mut cart = Cart::new();
            for op in &ops {
                apply(&mut cart, op);

                let items = cart.items();
                for (index, item) in items.iter().enumerate() {
                    prop_assert!(item.quantity >= 1);
                    prop_assert!(!item.name.trim().is_empty());
                    prop_assert!(items.iter().skip(index + 1).all(|other| other.name != item.name));
                }

                let expected_count: u32 = items.iter().map(|i| i.quantity).sum();
                let expected_total: Decimal = items
                    .iter()
                    .map(|i| i.price.amount() * Decimal::from(i.quantity))
                    .sum();
                prop_assert_eq!(cart.item_count(), expected_count);
                prop_assert_eq!(cart.total().amount(), expected_total);
            }
        }

        #[test]
        fn test_json_round_trip_is_identity(ops in prop::collection::vec(op(), 0..60)) {
            let mut cart = Cart::new();
            for op in &ops {
                apply(&mut cart, op);
            }
            let json = serde_json::to_string(&cart).unwrap();
            let back: Cart = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, cart);
        }

        #[test]
        fn test_repeated_adds_keep_first_price(
            first in 1i64..100_000,
            second in 1i64..100_000,
            times in 1u32..10,
        ) {
            let mut cart = Cart::new();
            cart.add("Latte", Decimal::new(first, 2));
            for _ in 0..times {
                cart.add("Latte", Decimal::new(second, 2));
            }
            let latte = cart.get("Latte").unwrap();
            prop_assert_eq!(latte.price.amount(), Decimal::new(first, 2));
            prop_assert_eq!(latte.quantity, times + 1);
        }
    }
}
