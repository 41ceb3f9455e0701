//! Presentation sinks.
//!
//! A [`Presenter`] receives the [`CartView`] after every cart mutation and any
//! transient [`Notification`] that follows it. Rendering is done with askama
//! templates under `crates/storefront/templates/`:
//!
//! - [`TerminalPresenter`] - plain-text cart and notification lines
//! - [`HtmlPresenter`] - HTML partials for the cart drawer, count badge and toasts
//! - [`RecordingPresenter`] - keeps every event in order, for tests and embedding

mod html;
mod recording;
mod terminal;

pub use html::HtmlPresenter;
pub use recording::{PresenterEvent, RecordingPresenter};
pub use terminal::TerminalPresenter;

use std::time::Duration;

use havana_core::Severity;
use thiserror::Error;

use crate::cart::CartView;

/// Rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Writing the rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A transient message for the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// How long a notification stays on screen before dismissing itself.
    pub const DISMISS_AFTER: Duration = Duration::from_secs(4);

    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }
}

/// The presentation sink for cart state.
pub trait Presenter {
    /// Show the current cart. Called after every mutation.
    fn render(&mut self, view: &CartView);

    /// Show a transient notification.
    fn notify(&mut self, notification: &Notification);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn render(&mut self, view: &CartView) {
        (**self).render(view);
    }

    fn notify(&mut self, notification: &Notification) {
        (**self).notify(notification);
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn render(&mut self, view: &CartView) {
        (**self).render(view);
    }

    fn notify(&mut self, notification: &Notification) {
        (**self).notify(notification);
    }
}
