//! Failure notifications and where each kind is surfaced
//!
//! Every failure the console observes goes through [`Notification`]; the
//! per-kind policy lives in [`FailureKind::surface`] and nowhere else.

use tracing::{error, warn};

/// Category of failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The service answered with an `errorMessage`
    QueryRejected,
    /// The query call failed to complete or decode
    QueryTransport,
    /// Listing databases failed
    DatabaseList,
    /// Loading a schema failed
    SchemaLoad,
}

/// Where a failure becomes visible to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    /// The query error view, replacing results
    QueryErrorView,
    /// The schema panel placeholder
    SchemaPanel,
    /// Diagnostics log only
    LogOnly,
}

impl FailureKind {
    pub fn surface(self) -> Surface {
        match self {
            FailureKind::QueryRejected | FailureKind::QueryTransport => Surface::QueryErrorView,
            FailureKind::SchemaLoad => Surface::SchemaPanel,
            FailureKind::DatabaseList => Surface::LogOnly,
        }
    }
}

/// A failure on its way to the log (and possibly the screen)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: FailureKind,
    /// User-facing text
    pub message: String,
    /// Underlying cause, never shown on screen
    pub detail: Option<String>,
}

impl Notification {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn surface(&self) -> Surface {
        self.kind.surface()
    }

    /// Write the notification to the diagnostics log
    pub fn log(&self) {
        let detail = self.detail.as_deref().unwrap_or("-");
        match self.kind {
            FailureKind::QueryRejected => {
                warn!(kind = ?self.kind, message = %self.message, "query rejected by server")
            }
            _ => error!(kind = ?self.kind, message = %self.message, detail, "backend call failed"),
        }
    }
}
