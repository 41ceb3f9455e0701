//! Notification severity levels.

use serde::{Deserialize, Serialize};

/// Severity of a transient notification shown to the customer.
///
/// Each level maps to a fixed icon and color at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    /// Font Awesome icon class.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Error => "fas fa-exclamation-circle",
            Self::Warning => "fas fa-exclamation-triangle",
            Self::Info => "fas fa-info-circle",
        }
    }

    /// CSS background for the notification toast.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Success => "linear-gradient(135deg, #28a745, #20c997)",
            Self::Error => "linear-gradient(135deg, #dc3545, #c82333)",
            Self::Warning => "linear-gradient(135deg, #ffc107, #e0a800)",
            Self::Info => "linear-gradient(135deg, #17a2b8, #138496)",
        }
    }

    /// Short label for plain-text output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}
