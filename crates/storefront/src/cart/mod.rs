//! The cart: state owner, persistence and derived view.
//!
//! - [`CartStore`] - owns the [`havana_core::Cart`] and runs every mutation's side effects
//! - [`CartPersistence`] - reads and writes the durable cart slot
//! - [`CartView`] - item count, total and formatted lines handed to presenters

mod persistence;
mod store;
mod view;

pub use persistence::{CART_STORAGE_KEY, CartPersistence, PersistenceError};
pub use store::CartStore;
pub use view::{CartItemView, CartView};
