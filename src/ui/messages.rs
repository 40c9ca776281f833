//! Message types for the Satsuma UI.

use iced::keyboard;
use iced::window;
use std::path::PathBuf;

/// All possible messages that can be sent in the application
#[derive(Debug, Clone)]
pub enum Message {
    // Bootstrap
    WindowReady(Option<window::Id>),
    /// Native handle of the window, for binding the video surface
    SurfaceBound(Option<i64>),

    // File opening
    OpenFilePressed,
    FilePicked(Option<PathBuf>),
    OpenFolderPressed,
    FolderPicked(Option<PathBuf>),

    // File browser panel
    BrowserNavigate(PathBuf),
    BrowserUp,
    /// A media file was activated in the browser (append-if-absent)
    BrowserActivate(PathBuf),

    // Playlist panel
    PlaylistActivate(usize),

    // Transport
    PlayPause,
    NextTrack,
    PreviousTrack,
    ToggleLoop,
    /// Slider drag in progress - display only, engine untouched
    SeekPreview(f64),
    /// Drag released - perform the one actual seek
    SeekRelease,
    VolumeChanged(i64),
    /// Volume slider released - persist the setting
    VolumeReleased,

    // Timers
    /// 500ms controller poll; also refreshes the status line
    EngineTick,

    // Chrome
    ToggleBrowser,
    TogglePlaylist,
    ToggleFullscreen,
    ToggleAbout,
    MinimizeToTray,
    RestoreFromTray,
    CloseToTrayToggled(bool),
    CloseRequested(window::Id),
    ConfigSaved(Result<(), String>),
    Exit,

    // Keyboard shortcuts
    KeyPressed(keyboard::Key, keyboard::Modifiers),
}
