//! The cart store.
//!
//! [`CartStore`] is the single source of truth for the cart. It is built once
//! at startup from the persisted slot and then mutated by UI events. Every
//! mutation that changes the cart runs, in order:
//!
//! 1. `Presenter::render` with the recomputed [`CartView`]
//! 2. `CartPersistence::save`
//! 3. `Presenter::notify`, if the operation has a notification
//!
//! so the slot always reflects the latest state before the customer sees any
//! message about it.

use havana_core::{Cart, Price};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::{CartPersistence, CartView};
use crate::catalog::Catalog;
use crate::display::{Notification, Presenter};
use crate::error::add_breadcrumb;
use crate::storage::KeyValueStore;

/// Owns the cart and wires it to persistence and presentation.
#[derive(Debug)]
pub struct CartStore<S, P> {
    cart: Cart,
    persistence: CartPersistence<S>,
    presenter: P,
}

impl<S: KeyValueStore, P: Presenter> CartStore<S, P> {
    /// Load the persisted cart and render it once.
    ///
    /// Loading never writes back to the slot.
    pub fn open(persistence: CartPersistence<S>, mut presenter: P) -> Self {
        let cart = persistence.load();
        presenter.render(&CartView::from(&cart));
        Self {
            cart,
            persistence,
            presenter,
        }
    }

    /// Add one unit of `name` at `price`.
    ///
    /// A blank name or a price that is not strictly positive is ignored
    /// without any side effect. An item already in the cart keeps the price
    /// it was first added at.
    #[instrument(skip(self))]
    pub fn add(&mut self, name: &str, price: Decimal) {
        if !self.cart.add(name, price) {
            debug!("Add ignored");
            return;
        }
        add_breadcrumb("cart", "Added item", Some(&[("name", name)]));
        self.commit(Some(Notification::success(format!(
            "{name} agregado al carrito"
        ))));
    }

    /// Add one unit of a menu item at its catalog price.
    ///
    /// The lookup ignores case and the cart line uses the menu's spelling.
    /// Unknown names are ignored like any other invalid input.
    pub fn add_from_catalog(&mut self, catalog: &Catalog, name: &str) {
        match catalog.find(name) {
            Some(item) => self.add(&item.name, item.price),
            None => debug!(name, "Item not on the menu"),
        }
    }

    /// Increase the quantity of `name` by one.
    #[instrument(skip(self))]
    pub fn increase(&mut self, name: &str) {
        if self.cart.increase(name) {
            self.commit(None);
        }
    }

    /// Decrease the quantity of `name` by one, stopping at 1.
    #[instrument(skip(self))]
    pub fn decrease(&mut self, name: &str) {
        if self.cart.decrease(name) {
            self.commit(None);
        }
    }

    /// Remove the line for `name`.
    #[instrument(skip(self))]
    pub fn remove(&mut self, name: &str) {
        if !self.cart.remove(name) {
            return;
        }
        add_breadcrumb("cart", "Removed item", Some(&[("name", name)]));
        self.commit(Some(Notification::info(format!(
            "{name} eliminado del carrito"
        ))));
    }

    /// Empty the cart. Always persists, even when already empty.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cart.clear();
        add_breadcrumb("cart", "Cleared cart", None);
        self.commit(None);
    }

    /// Show a notification that is not tied to a cart mutation.
    pub fn notify(&mut self, notification: &Notification) {
        self.presenter.notify(notification);
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Current derived view.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from(&self.cart)
    }

    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    pub const fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub const fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    fn commit(&mut self, notification: Option<Notification>) {
        debug!(
            items = self.cart.items().len(),
            item_count = self.cart.item_count(),
            total = %self.cart.total(),
            "Cart changed"
        );
        self.presenter.render(&CartView::from(&self.cart));
        self.persistence.save(&self.cart);
        if let Some(notification) = notification {
            self.presenter.notify(&notification);
        }
    }
}
