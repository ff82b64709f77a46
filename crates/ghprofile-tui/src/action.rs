//! All possible UI actions. Actions are the sole mechanism for state mutation.

use tui_input::InputRequest;

use ghprofile_core::UiState;

/// Severity of a status-line notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// One-line message shown in the status bar until the next lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Search box ───────────────────────────────────────────
    Edit(InputRequest),
    /// Look up whatever is currently in the search box.
    Submit,

    // ── Lookup state ─────────────────────────────────────────
    /// A new state was published by the lookup client.
    StateChanged(Box<UiState>),

    // ── Presentation ─────────────────────────────────────────
    ToggleTheme,
    ScrollUp,
    ScrollDown,

    // ── Outputs ──────────────────────────────────────────────
    /// Write the current view as an HTML page.
    ExportHtml,
    /// Open the loaded profile in the browser.
    OpenProfile,
    Notify(Notification),
}
