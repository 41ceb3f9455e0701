use super::{Notification, Presenter};
use crate::cart::CartView;

/// One call received by a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Render(CartView),
    Notify(Notification),
}

/// Presenter that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered view.
    #[must_use]
    pub fn last_view(&self) -> Option<&CartView> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::Render(view) => Some(view),
            PresenterEvent::Notify(_) => None,
        })
    }

    /// Every notification received, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<&Notification> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Notify(notification) => Some(notification),
                PresenterEvent::Render(_) => None,
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, view: &CartView) {
        self.events.push(PresenterEvent::Render(view.clone()));
    }

    fn notify(&mut self, notification: &Notification) {
        self.events.push(PresenterEvent::Notify(notification.clone()));
    }
}
