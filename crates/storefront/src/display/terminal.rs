//! Plain-text presenter.

use std::io::Write;

use askama::Template;

use super::{Notification, Presenter, RenderError};
use crate::cart::CartView;

/// Cart listing template.
#[derive(Template)]
#[template(path = "cart/show.txt")]
pub struct CartShowTemplate<'a> {
    pub cart: &'a CartView,
}

/// Single notification line template.
#[derive(Template)]
#[template(path = "notification.txt")]
pub struct NotificationTemplate<'a> {
    pub severity: &'a str,
    pub message: &'a str,
}

/// Renders the cart and notifications as plain text into a writer.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the presenter and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_cart(&mut self, view: &CartView) -> Result<(), RenderError> {
        let body = CartShowTemplate { cart: view }.render()?;
        writeln!(self.out, "{}", body.trim())?;
        Ok(())
    }

    fn write_notification(&mut self, notification: &Notification) -> Result<(), RenderError> {
        let line = NotificationTemplate {
            severity: notification.severity.label(),
            message: &notification.message,
        }
        .render()?;
        writeln!(self.out, "{}", line.trim_end())?;
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, view: &CartView) {
        if let Err(e) = self.write_cart(view) {
            tracing::warn!(error = %e, "Failed to render cart");
        }
    }

    fn notify(&mut self, notification: &Notification) {
        if let Err(e) = self.write_notification(notification) {
            tracing::warn!(error = %e, "Failed to render notification");
        }
    }
}
