//! Core types for the Coffe Havana cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod cart;
pub mod price;
pub mod severity;

pub use cart::{Cart, CartError, LineItem};
pub use price::Price;
pub use severity::Severity;
