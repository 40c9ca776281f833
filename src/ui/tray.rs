//! System tray model.
//!
//! The tray itself is platform chrome; what the application owns is the
//! content shown there: the tooltip text composed from the current
//! track's tags, the minimized flag, and the set of menu actions. That
//! content lives here as plain data so it can be tested without an OS
//! tray. [`TrayHandle`] is the integration seam; the default
//! implementation only logs, and window hiding/restoring is handled by
//! the window controller.

use std::path::Path;

use crate::metadata::TagRecord;

use super::messages::Message;

/// Actions the tray can trigger: the context menu entries plus
/// `Restore`, which fires on icon activation rather than from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    Restore,
    PlayPause,
    Next,
    Previous,
    ToggleLoop,
    Exit,
}

/// Context menu entries, in display order.
pub const TRAY_MENU: &[(&str, TrayAction)] = &[
    ("Play/Pause", TrayAction::PlayPause),
    ("Next", TrayAction::Next),
    ("Previous", TrayAction::Previous),
    ("Loop", TrayAction::ToggleLoop),
    ("Exit", TrayAction::Exit),
];

/// What a tray backend should feed into the update loop for each menu
/// action.
pub fn action_message(action: TrayAction) -> Message {
    match action {
        TrayAction::Restore => Message::RestoreFromTray,
        TrayAction::PlayPause => Message::PlayPause,
        TrayAction::Next => Message::NextTrack,
        TrayAction::Previous => Message::PreviousTrack,
        TrayAction::ToggleLoop => Message::ToggleLoop,
        TrayAction::Exit => Message::Exit,
    }
}

/// Platform tray integration point.
pub trait TrayHandle {
    /// Whether an icon actually appears somewhere the user can click.
    /// Hiding the window behind an unavailable tray would strand it.
    fn is_available(&self) -> bool;
    fn show(&mut self, tooltip: &str);
    fn set_tooltip(&mut self, tooltip: &str);
    fn hide(&mut self);
}

/// Stand-in used where no platform tray backend is wired up.
#[derive(Debug, Default)]
pub struct NoTray;

impl TrayHandle for NoTray {
    fn is_available(&self) -> bool {
        false
    }

    fn show(&mut self, tooltip: &str) {
        tracing::debug!("tray show: {}", tooltip);
    }

    fn set_tooltip(&mut self, tooltip: &str) {
        tracing::debug!("tray tooltip: {}", tooltip);
    }

    fn hide(&mut self) {
        tracing::debug!("tray hide");
    }
}

/// What the application knows about its tray presence.
pub struct TrayState {
    handle: Box<dyn TrayHandle>,
    /// True while the window is hidden behind the tray icon.
    pub minimized: bool,
    pub tooltip: String,
}

impl Default for TrayState {
    fn default() -> Self {
        Self {
            handle: Box::new(NoTray),
            minimized: false,
            tooltip: String::new(),
        }
    }
}

impl std::fmt::Debug for TrayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrayState")
            .field("minimized", &self.minimized)
            .field("tooltip", &self.tooltip)
            .finish()
    }
}

impl TrayState {
    /// Tray state over a backend that reports itself available, for
    /// exercising the hide-to-tray paths.
    #[cfg(test)]
    pub(crate) fn with_backend() -> Self {
        struct AlwaysOn;
        impl TrayHandle for AlwaysOn {
            fn is_available(&self) -> bool {
                true
            }
            fn show(&mut self, _tooltip: &str) {}
            fn set_tooltip(&mut self, _tooltip: &str) {}
            fn hide(&mut self) {}
        }
        Self {
            handle: Box::new(AlwaysOn),
            minimized: false,
            tooltip: String::new(),
        }
    }

    /// Whether a clickable tray icon backs this state.
    pub fn available(&self) -> bool {
        self.handle.is_available()
    }

    /// Hide the window behind the tray with the given tooltip.
    pub fn minimize(&mut self, tooltip: String) {
        self.tooltip = tooltip;
        self.handle.show(&self.tooltip);
        self.minimized = true;
    }

    /// Bring the window back.
    pub fn restore(&mut self) {
        self.handle.hide();
        self.minimized = false;
    }

    /// Refresh the tooltip if the tray is showing.
    pub fn update_tooltip(&mut self, tooltip: String) {
        if self.tooltip != tooltip {
            self.tooltip = tooltip;
            if self.minimized {
                self.handle.set_tooltip(&self.tooltip);
            }
        }
    }
}

/// Tooltip text for the tray icon: "Artist - Title" with an album line,
/// skipping the parts that are unknown; the bare application name when
/// idle.
pub fn tooltip(record: Option<&TagRecord>, path: Option<&Path>) -> String {
    match (record, path) {
        (Some(record), Some(path)) => {
            let mut text = String::new();
            if let Some(artist) = &record.artist {
                text.push_str(artist);
                text.push_str(" - ");
            }
            text.push_str(&record.display_title(path));
            if let Some(album) = &record.album {
                text.push_str(&format!("\nAlbum: {}", album));
            }
            text
        }
        _ => "Satsuma".to_string(),
    }
}
