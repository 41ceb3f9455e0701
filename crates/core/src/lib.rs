//! Coffe Havana Core - Shared cart types.
//!
//! This crate provides the types used across the Coffe Havana components:
//! - `storefront` - Cart store, persistence, presenters and checkout hand-off
//! - `cli` - Headless driver for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage access, no rendering. Side effects (persisting, rendering,
//! notifying) belong to the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Prices, line items, the cart state machine and notification severities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
