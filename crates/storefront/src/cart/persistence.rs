//! Cart persistence to a durable key-value slot.
//!
//! The cart is stored as a JSON array of `{name, price, quantity}` records
//! under a single key. Failures never reach the customer: [`CartPersistence::save`]
//! logs and keeps going, and [`CartPersistence::load`] falls back to an empty
//! cart. The fallible `try_*` variants exist for callers that want the error.

use havana_core::Cart;
use thiserror::Error;
use tracing::{debug, error};

use crate::storage::{KeyValueStore, StorageError};

/// Key of the cart slot, shared with the browser storefront.
pub const CART_STORAGE_KEY: &str = "coffeHavanaCart";

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The slot holds something that is not a valid cart.
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Reads and writes the cart slot.
#[derive(Debug)]
pub struct CartPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartPersistence<S> {
    /// Persist under the default [`CART_STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    /// Persist under a custom key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage backend.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Write the cart to the slot, logging any failure.
    ///
    /// The in-memory cart stays authoritative when the write fails.
    pub fn save(&mut self, cart: &Cart) {
        match self.try_save(cart) {
            Ok(()) => debug!(key = %self.key, items = cart.items().len(), "Cart saved"),
            Err(e) => error!(key = %self.key, error = %e, "Failed to save cart"),
        }
    }

    /// Write the cart to the slot.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if encoding or the storage write fails.
    pub fn try_save(&mut self, cart: &Cart) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(cart).map_err(PersistenceError::Encode)?;
        self.storage.set(&self.key, &encoded)?;
        Ok(())
    }

    /// Read the cart from the slot.
    ///
    /// An absent slot and an unreadable slot both yield an empty cart; the
    /// latter is logged.
    #[must_use]
    pub fn load(&self) -> Cart {
        match self.try_load() {
            Ok(Some(cart)) => {
                debug!(key = %self.key, items = cart.items().len(), "Cart loaded");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to load cart");
                Cart::new()
            }
        }
    }

    /// Read the cart from the slot, or `None` if the slot is absent.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the storage read fails or the content is
    /// not a valid cart.
    pub fn try_load(&self) -> Result<Option<Cart>, PersistenceError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        let cart = serde_json::from_str(&raw).map_err(PersistenceError::Decode)?;
        Ok(Some(cart))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use havana_core::Price;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add("Latte", Decimal::new(45, 0));
        cart.add("Latte", Decimal::new(45, 0));
        cart.add("Muffin", Decimal::new(30, 0));
        cart.add("Concha", Decimal::new(225, 1));
        cart
    }

    #[test]
    fn test_round_trip_preserves_order_and_values() {
        let mut persistence = CartPersistence::new(MemoryStorage::new());
        let cart = sample_cart();
        persistence.try_save(&cart).unwrap();
        assert_eq!(persistence.load(), cart);
    }

    #[test]
    fn test_round_trip_empty_cart() {
        let mut persistence = CartPersistence::new(MemoryStorage::new());
        persistence.save(&Cart::new());
        assert_eq!(persistence.storage().raw(CART_STORAGE_KEY), Some("[]"));
        assert_eq!(persistence.try_load().unwrap(), Some(Cart::new()));
    }

    #[test]
    fn test_absent_slot_loads_empty() {
        let persistence = CartPersistence::new(MemoryStorage::new());
        assert_eq!(persistence.try_load().unwrap(), None);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_malformed_slot_loads_empty() {
        for raw in ["not json", "{\"name\":\"Latte\"}", "[{\"name\":\"Latte\"}]", "[{\"name\":\"Latte\",\"price\":45,\"quantity\":0}]"] {
            let mut storage = MemoryStorage::new();
            storage.set(CART_STORAGE_KEY, raw).unwrap();
            let persistence = CartPersistence::new(storage);

            assert!(matches!(
                persistence.try_load(),
                Err(PersistenceError::Decode(_))
            ));
            assert!(persistence.load().is_empty());
        }
    }

    #[test]
    fn test_load_does_not_write_back() {
        let mut storage = MemoryStorage::new();
        let raw = r#"[{"name":"Latte","price":45,"quantity":2}]"#;
        storage.set(CART_STORAGE_KEY, raw).unwrap();
        let persistence = CartPersistence::new(storage);

        let cart = persistence.load();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(persistence.storage().raw(CART_STORAGE_KEY), Some(raw));
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let mut persistence = CartPersistence::new(MemoryStorage::with_quota(2));
        let cart = sample_cart();

        assert!(matches!(
            persistence.try_save(&cart),
            Err(PersistenceError::Storage(StorageError::QuotaExceeded { .. }))
        ));
        persistence.save(&cart);
        assert!(persistence.storage().is_empty());
    }

    #[test]
    fn test_unavailable_storage_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(CART_STORAGE_KEY, "[]").unwrap();
        storage.set_available(false);
        let persistence = CartPersistence::new(storage);

        assert!(matches!(
            persistence.try_load(),
            Err(PersistenceError::Storage(StorageError::Unavailable(_)))
        ));
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_custom_key() {
        let mut persistence = CartPersistence::with_key(MemoryStorage::new(), "otherCart");
        persistence.save(&sample_cart());
        assert_eq!(persistence.key(), "otherCart");
        assert!(persistence.storage().raw("otherCart").is_some());
        assert!(persistence.storage().raw(CART_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_amounts_that_do_not_survive_json_are_never_saved() {
        let mut persistence = CartPersistence::new(MemoryStorage::new());
        let mut cart = Cart::new();

        assert!(!cart.add("Latte", Decimal::from_str("45.123456789012345678").unwrap()));
        assert!(!cart.add("Muffin", Decimal::MAX));
        assert!(cart.is_empty());

        persistence.try_save(&cart).unwrap();
        assert_eq!(persistence.storage().raw(CART_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_largest_price_round_trips() {
        let mut persistence = CartPersistence::new(MemoryStorage::new());
        let mut cart = Cart::new();
        assert!(cart.add("Mesa de eventos", Price::max().amount()));
        assert!(cart.add("Café Cubano", Decimal::new(4_599, 2)));
        cart.increase("Mesa de eventos");

        persistence.try_save(&cart).unwrap();
        let loaded = persistence.try_load().unwrap().unwrap();

        assert_eq!(loaded, cart);
        assert_eq!(loaded.get("Mesa de eventos").unwrap().price, Price::max());
        assert_eq!(loaded.total(), cart.total());
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        prop_oneof![
            (1i64..100_000, 0u32..=2).prop_map(|(n, scale)| Decimal::new(n, scale)),
            (1i64..=999_999_999_999, 0u32..=2).prop_map(|(n, scale)| Decimal::new(n, scale)),
        ]
    }

    proptest! {
        #[test]
        fn test_save_then_load_is_identity(
            lines in prop::collection::vec(("[A-Za-zñé ]{1,12}", cents(), 0u32..5), 0..20),
        ) {
            let mut cart = Cart::new();
            for (name, price, extra) in &lines {
                cart.add(name, *price);
                for _ in 0..*extra {
                    cart.increase(name);
                }
            }

            let mut persistence = CartPersistence::new(MemoryStorage::new());
            persistence.try_save(&cart).unwrap();
            prop_assert_eq!(persistence.try_load().unwrap(), Some(cart));
        }
    }
}
