//! Application state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use iced::window;

use crate::config::Config;
use crate::library;
use crate::metadata::{self, TagRecord};
use crate::player::{format_ms, MpvEngine, PlaybackController};
use crate::playlist::{Playlist, PlayStatus};

use super::tray::TrayState;

/// Panel visibility saved across a fullscreen transition.
#[derive(Debug, Clone, Copy)]
pub struct PanelSnapshot {
    pub browser: bool,
    pub playlist: bool,
}

/// Everything the window knows.
pub struct WindowState {
    pub window: Option<window::Id>,
    pub config: Config,
    /// `None` when the engine failed to initialize; every transport
    /// action degrades to a no-op with a status message.
    pub controller: Option<PlaybackController<MpvEngine>>,
    pub playlist: Playlist,
    /// Session tag cache, keyed by path so playlist edits don't
    /// invalidate it.
    tags: HashMap<PathBuf, TagRecord>,

    // Poll-driven display values
    pub position_ms: i64,
    pub duration_ms: i64,
    /// Position shown while the seek slider is being dragged. While this
    /// is `Some`, poll ticks leave the displayed position alone and the
    /// engine is untouched; releasing the slider performs the one seek.
    pub seek_preview: Option<f64>,
    pub status_line: String,

    // Chrome
    pub show_browser: bool,
    pub show_playlist: bool,
    pub browser_dir: PathBuf,
    pub browser_dirs: Vec<PathBuf>,
    pub browser_files: Vec<PathBuf>,
    pub fullscreen: bool,
    pub saved_panels: Option<PanelSnapshot>,
    pub tray: TrayState,
    pub about_open: bool,

    /// File passed on the command line, opened once the surface is bound.
    pub pending_open: Option<PathBuf>,
}

impl WindowState {
    pub fn new(config: Config, pending_open: Option<PathBuf>) -> Self {
        let controller = match PlaybackController::new() {
            Ok(mut controller) => {
                controller.set_volume(config.audio.volume);
                Some(controller)
            }
            Err(e) => {
                tracing::error!("Media engine unavailable: {}", e);
                None
            }
        };
        Self::with_controller(config, pending_open, controller)
    }

    /// State with no engine behind it; every transport action is a no-op.
    #[cfg(test)]
    pub(crate) fn without_engine(config: Config) -> Self {
        Self::with_controller(config, None, None)
    }

    fn with_controller(
        config: Config,
        pending_open: Option<PathBuf>,
        controller: Option<PlaybackController<MpvEngine>>,
    ) -> Self {
        let browser_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let mut state = Self {
            window: None,
            config,
            controller,
            playlist: Playlist::new(),
            tags: HashMap::new(),
            position_ms: 0,
            duration_ms: 0,
            seek_preview: None,
            status_line: "Select Media File to play".to_string(),
            show_browser: false,
            show_playlist: true,
            browser_dir,
            browser_dirs: Vec::new(),
            browser_files: Vec::new(),
            fullscreen: false,
            saved_panels: None,
            tray: TrayState::default(),
            about_open: false,
            pending_open,
        };
        state.refresh_browser();
        state
    }

    /// Tag record for `path`, extracting and caching on first use.
    pub fn tag_for(&mut self, path: &Path) -> &TagRecord {
        if !self.tags.contains_key(path) {
            let record = metadata::extract(path);
            self.tags.insert(path.to_path_buf(), record);
        }
        &self.tags[path]
    }

    /// Cache-only lookup for views, which cannot extract.
    pub fn cached_tag(&self, path: &Path) -> Option<&TagRecord> {
        self.tags.get(path)
    }

    /// Tag record for the current playlist entry.
    pub fn current_tag(&mut self) -> Option<(PathBuf, TagRecord)> {
        let path = self.playlist.current()?.to_path_buf();
        let record = self.tag_for(&path).clone();
        Some((path, record))
    }

    /// Whether the current entry is a video container.
    pub fn current_is_video(&self) -> bool {
        self.playlist
            .current()
            .is_some_and(library::is_video_file)
    }

    /// Re-list the browser's current directory.
    pub fn refresh_browser(&mut self) {
        let (dirs, files) = library::list_browser_entries(&self.browser_dir);
        self.browser_dirs = dirs;
        self.browser_files = files;
    }

    /// Position value the seek slider should show right now.
    pub fn displayed_position(&self) -> f64 {
        self.seek_preview.unwrap_or(self.position_ms as f64)
    }

    /// Rebuild the status line from the playlist and the last polled
    /// position/duration.
    pub fn rebuild_status(&mut self) {
        if self.playlist.status() == PlayStatus::Stopped || self.playlist.is_empty() {
            self.status_line = "Select Media File to play".to_string();
            return;
        }
        let Some((path, record)) = self.current_tag() else {
            self.status_line = "Select Media File to play".to_string();
            return;
        };

        self.status_line = format!(
            "Now Playing: {} - {} | Album: {} | Duration: {} | Position: {} | Loop: {}",
            record.display_title(&path),
            record.display_artist(),
            record.display_album(),
            format_ms(self.duration_ms),
            format_ms(self.position_ms),
            self.playlist.loop_mode().label(),
        );
    }
}
