//! Coffe Havana Storefront library.
//!
//! The cart core of the storefront: the [`cart::CartStore`] state owner, its
//! durable [`cart::CartPersistence`], the presenters that render it, the menu
//! [`catalog`], and the [`checkout`] hand-off to WhatsApp and Mercado Pago.
//!
//! # Control flow
//!
//! ```text
//! UI event -> CartStore mutation -> Presenter::render -> CartPersistence::save -> Presenter::notify
//! ```
//!
//! Everything runs synchronously on the caller's thread. There is no server
//! and no async runtime.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod display;
pub mod error;
pub mod storage;
