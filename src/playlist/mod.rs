//! Playlist state and transitions.
//!
//! The playlist is the single owner of ordered track state: the file
//! paths, the current index, the loop mode, and the (unused) shuffle
//! flag. Transitions are pure: [`Playlist::apply`] mutates the record
//! and returns the engine commands the caller must issue, in order.
//! Nothing in this module touches the engine, the file system, or the
//! UI, which keeps every transition unit-testable.
//!
//! Invariant: `index < tracks.len()` whenever the playlist is
//! non-empty; `index` is meaningless when it is empty.

use std::path::{Path, PathBuf};

/// Playback repeat policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    #[default]
    Off,
    /// Restart the playlist after the last track
    All,
    /// Repeat the current track
    One,
}

impl LoopMode {
    /// Cycle Off -> All -> One -> Off.
    pub fn toggled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    /// Short label for the loop button and status line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::All => "All",
            Self::One => "One",
        }
    }
}

/// What the window believes the transport is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// An engine operation the caller must perform after a transition.
///
/// Commands are ordered; `Load` resets the engine position to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Load(PathBuf),
    Play,
    Pause,
    Stop,
}

/// Events that drive playlist transitions.
#[derive(Debug, Clone)]
pub enum PlaylistEvent {
    /// Replace the whole playlist (open file = one entry, open folder =
    /// the folder's media files). An empty list is a no-op.
    Replace(Vec<PathBuf>),
    /// Jump to an entry in the playlist panel.
    Activate(usize),
    /// File browser pick: append if absent, then play it.
    AddOrActivate(PathBuf),
    /// Play/pause button. Carries the engine's view of the world so the
    /// transition itself stays pure.
    PlayPause {
        engine_playing: bool,
        engine_media: Option<PathBuf>,
    },
    Next,
    Previous,
    /// End-of-stream notification from the engine.
    MediaEnded,
    ToggleLoop,
}

/// Ordered playlist with current-index and loop state.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
    index: usize,
    loop_mode: LoopMode,
    /// Declared but never consulted by any transition. Kept so the flag
    /// round-trips through the UI; shuffle ordering is an open product
    /// question.
    pub shuffle: bool,
    status: PlayStatus,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[PathBuf] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn status(&self) -> PlayStatus {
        self.status
    }

    /// Path of the current track, if any.
    pub fn current(&self) -> Option<&Path> {
        self.tracks.get(self.index).map(|p| p.as_path())
    }

    /// Force the status back to stopped. For callers that could not
    /// issue a transition's engine commands; the displayed status must
    /// not claim playback that never started.
    pub fn mark_stopped(&mut self) {
        self.status = PlayStatus::Stopped;
    }

    /// Apply one event and return the engine commands to issue.
    pub fn apply(&mut self, event: PlaylistEvent) -> Vec<EngineCommand> {
        match event {
            PlaylistEvent::Replace(files) => {
                if files.is_empty() {
                    return Vec::new();
                }
                self.tracks = files;
                self.index = 0;
                self.load_and_play()
            }

            PlaylistEvent::Activate(i) => {
                if i >= self.tracks.len() {
                    return Vec::new();
                }
                self.index = i;
                self.load_and_play()
            }

            PlaylistEvent::AddOrActivate(path) => {
                match self.tracks.iter().position(|p| *p == path) {
                    Some(i) => self.index = i,
                    None => {
                        self.tracks.push(path);
                        self.index = self.tracks.len() - 1;
                    }
                }
                self.load_and_play()
            }

            PlaylistEvent::PlayPause {
                engine_playing,
                engine_media,
            } => {
                if self.tracks.is_empty() {
                    return Vec::new();
                }
                if engine_playing {
                    self.status = PlayStatus::Paused;
                    return vec![EngineCommand::Pause];
                }
                let current = self.tracks[self.index].clone();
                let mut commands = Vec::new();
                // Resume only if the engine still holds our track;
                // otherwise (re)load it first.
                if engine_media.as_deref() != Some(current.as_path()) {
                    commands.push(EngineCommand::Load(current));
                }
                commands.push(EngineCommand::Play);
                self.status = PlayStatus::Playing;
                commands
            }

            PlaylistEvent::Next => {
                if self.tracks.is_empty() {
                    return Vec::new();
                }
                self.index = (self.index + 1) % self.tracks.len();
                self.load_and_play()
            }

            PlaylistEvent::Previous => {
                if self.tracks.is_empty() {
                    return Vec::new();
                }
                let len = self.tracks.len();
                self.index = (self.index + len - 1) % len;
                self.load_and_play()
            }

            PlaylistEvent::MediaEnded => self.on_media_ended(),

            PlaylistEvent::ToggleLoop => {
                self.loop_mode = self.loop_mode.toggled();
                Vec::new()
            }
        }
    }

    fn on_media_ended(&mut self) -> Vec<EngineCommand> {
        if self.tracks.is_empty() {
            return Vec::new();
        }
        match self.loop_mode {
            // Reload the same index; the reload resets position to zero.
            LoopMode::One => self.load_and_play(),
            LoopMode::All | LoopMode::Off => {
                if self.index + 1 >= self.tracks.len() {
                    if self.loop_mode == LoopMode::All {
                        self.index = 0;
                        self.load_and_play()
                    } else {
                        // Last track with loop off: stay on it, stop.
                        self.status = PlayStatus::Stopped;
                        vec![EngineCommand::Stop]
                    }
                } else {
                    self.index += 1;
                    self.load_and_play()
                }
            }
        }
    }

    fn load_and_play(&mut self) -> Vec<EngineCommand> {
        self.status = PlayStatus::Playing;
        vec![
            EngineCommand::Load(self.tracks[self.index].clone()),
            EngineCommand::Play,
        ]
    }
}
