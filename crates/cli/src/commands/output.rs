//! One render per invocation.

use havana_storefront::cart::CartView;
use havana_storefront::display::{Notification, Presenter};

/// Presenter that holds back output until [`Coalescing::flush`].
///
/// Each CLI invocation opens the store (one render) and then mutates it
/// (another render). Only the last view is kept, and notifications queue up
/// behind it, so the terminal shows the cart once.
#[derive(Debug)]
pub struct Coalescing<P> {
    inner: P,
    view: Option<CartView>,
    notifications: Vec<Notification>,
}

impl<P: Presenter> Coalescing<P> {
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            view: None,
            notifications: Vec::new(),
        }
    }

    /// Render the latest view, then every queued notification.
    pub fn flush(&mut self) {
        if let Some(view) = self.view.take() {
            self.inner.render(&view);
        }
        for notification in self.notifications.drain(..) {
            self.inner.notify(&notification);
        }
    }

    #[cfg(test)]
    pub const fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: Presenter> Presenter for Coalescing<P> {
    fn render(&mut self, view: &CartView) {
        self.view = Some(view.clone());
    }

    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use havana_storefront::cart::{CartPersistence, CartStore};
    use havana_storefront::display::{PresenterEvent, RecordingPresenter};
    use havana_storefront::storage::MemoryStorage;
    use rust_decimal::Decimal;

    fn store() -> CartStore<MemoryStorage, Coalescing<RecordingPresenter>> {
        CartStore::open(
            CartPersistence::new(MemoryStorage::new()),
            Coalescing::new(RecordingPresenter::new()),
        )
    }

    #[test]
    fn test_open_then_add_renders_once() {
        let mut store = store();
        store.add("Latte", Decimal::new(45, 0));
        assert!(store.presenter().inner().events.is_empty());

        store.presenter_mut().flush();

        assert_eq!(
            store.presenter().inner().events,
            vec![
                PresenterEvent::Render(CartView::from(store.cart())),
                PresenterEvent::Notify(Notification::success("Latte agregado al carrito")),
            ]
        );
    }

    #[test]
    fn test_show_renders_the_opened_cart() {
        let mut store = store();
        store.presenter_mut().flush();
        assert_eq!(
            store.presenter().inner().events,
            vec![PresenterEvent::Render(CartView::empty())]
        );
    }

    #[test]
    fn test_flush_drains() {
        let mut store = store();
        store.add("Latte", Decimal::new(45, 0));
        store.presenter_mut().flush();
        store.presenter_mut().flush();
        assert_eq!(store.presenter().inner().events.len(), 2);
    }

    #[test]
    fn test_unchanged_mutation_keeps_single_render() {
        let mut store = store();
        store.increase("Muffin");
        store.presenter_mut().flush();
        assert_eq!(
            store.presenter().inner().events,
            vec![PresenterEvent::Render(CartView::empty())]
        );
    }
}
