//! HTML partial presenter.
//!
//! Produces the same fragments the storefront page swaps in: the cart drawer
//! contents, the header count badge and notification toasts. Item names are
//! escaped by askama, and quantity buttons carry `data-action`/`data-name`
//! attributes instead of inline handlers.

use std::io::Write;

use askama::Template;

use super::{Notification, Presenter, RenderError};
use crate::cart::CartView;

/// Cart drawer contents.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Cart count badge; hidden when the cart is empty.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Notification toast.
#[derive(Template)]
#[template(path = "partials/notification.html")]
pub struct NotificationToastTemplate<'a> {
    pub severity: &'a str,
    pub icon: &'a str,
    pub color: &'a str,
    pub message: &'a str,
    pub dismiss_ms: u128,
}

impl<'a> From<&'a Notification> for NotificationToastTemplate<'a> {
    fn from(notification: &'a Notification) -> Self {
        Self {
            severity: notification.severity.label(),
            icon: notification.severity.icon(),
            color: notification.severity.color(),
            message: &notification.message,
            dismiss_ms: Notification::DISMISS_AFTER.as_millis(),
        }
    }
}

/// Writes HTML fragments for every render and notification.
#[derive(Debug)]
pub struct HtmlPresenter<W> {
    out: W,
}

impl<W: Write> HtmlPresenter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_cart(&mut self, view: &CartView) -> Result<(), RenderError> {
        let badge = CartCountTemplate {
            count: view.item_count,
        }
        .render()?;
        let items = CartItemsTemplate { cart: view }.render()?;
        writeln!(self.out, "{}", badge.trim())?;
        writeln!(self.out, "{}", items.trim())?;
        Ok(())
    }

    fn write_toast(&mut self, notification: &Notification) -> Result<(), RenderError> {
        let toast = NotificationToastTemplate::from(notification).render()?;
        writeln!(self.out, "{}", toast.trim())?;
        Ok(())
    }
}

impl<W: Write> Presenter for HtmlPresenter<W> {
    fn render(&mut self, view: &CartView) {
        if let Err(e) = self.write_cart(view) {
            tracing::warn!(error = %e, "Failed to render cart partials");
        }
    }

    fn notify(&mut self, notification: &Notification) {
        if let Err(e) = self.write_toast(notification) {
            tracing::warn!(error = %e, "Failed to render notification toast");
        }
    }
}
