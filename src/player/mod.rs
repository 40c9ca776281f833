//! Playback controller.
//!
//! Owns the one engine instance and the "current media" record. The
//! window never talks to the engine directly: transport operations,
//! surface binding, and the 500 ms poll all go through here.
//!
//! The engine does not reliably push continuous position updates, so the
//! controller reads position and duration on every poll tick. Position
//! is emitted unconditionally each tick; duration is a step function
//! (some containers report it only after buffering) and is emitted only
//! when it changes. End-of-media comes from the engine's own event
//! queue, not from the poll.

mod engine;

pub use engine::{EngineEvent, MediaEngine, MpvEngine};

use std::path::{Path, PathBuf};
use std::time::Duration;

/// How often the controller poll should run.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Notifications produced by [`PlaybackController::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Emitted every poll tick.
    PositionChanged(i64),
    /// Emitted only when the engine's reported duration changes.
    DurationChanged(i64),
    /// The current media played to its end.
    MediaEnded,
}

/// Wraps the native engine and tracks the loaded media.
pub struct PlaybackController<E: MediaEngine> {
    engine: E,
    current_media: Option<PathBuf>,
    surface: Option<i64>,
    last_duration: i64,
    volume: i64,
}

impl PlaybackController<MpvEngine> {
    /// Controller over a fresh libmpv instance.
    pub fn new() -> Result<Self, crate::error::Error> {
        Ok(Self::with_engine(MpvEngine::new()?))
    }
}

impl<E: MediaEngine> PlaybackController<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            current_media: None,
            surface: None,
            last_duration: 0,
            volume: 100,
        }
    }

    /// Path of the media currently loaded in the engine, if any.
    pub fn current_media(&self) -> Option<&Path> {
        self.current_media.as_deref()
    }

    /// Load `path` into the engine. Silently ignores unreadable paths.
    /// Re-applies the bound video surface, which the engine forgets on
    /// reload.
    pub fn load(&mut self, path: &Path) {
        if std::fs::metadata(path).is_err() {
            tracing::warn!("Skipping unreadable media: {:?}", path);
            return;
        }
        if let Err(e) = self.engine.load(path) {
            tracing::warn!("Engine refused {:?}: {}", path, e);
            return;
        }
        self.current_media = Some(path.to_path_buf());
        if let Some(handle) = self.surface {
            self.engine.bind_surface(handle);
        }
    }

    pub fn play(&mut self) {
        if self.current_media.is_some() {
            self.engine.play();
        }
    }

    pub fn pause(&mut self) {
        if self.current_media.is_some() {
            self.engine.pause();
        }
    }

    /// Stop playback. The engine unloads the media on stop, so the
    /// current-media record is cleared too; resuming goes through a
    /// fresh load.
    pub fn stop(&mut self) {
        if self.current_media.take().is_some() {
            self.engine.stop();
        }
    }

    /// Seek to an absolute position. No-op while the duration is
    /// unknown.
    pub fn seek_ms(&mut self, position_ms: i64) {
        let duration = self.engine.duration_ms();
        if duration > 0 {
            self.engine
                .seek_fraction(position_ms as f64 / duration as f64);
        }
    }

    /// Set and remember the volume (0 - 100). The stored value is what
    /// callers re-apply after each load.
    pub fn set_volume(&mut self, volume: i64) {
        self.volume = volume.clamp(0, 100);
        self.engine.set_volume(self.volume);
    }

    pub fn volume(&self) -> i64 {
        self.volume
    }

    pub fn is_playing(&mut self) -> bool {
        self.engine.is_playing()
    }

    pub fn position_ms(&mut self) -> i64 {
        self.engine.position_ms()
    }

    pub fn duration_ms(&mut self) -> i64 {
        self.engine.duration_ms()
    }

    /// Bind (or re-bind) the native window surface. Must be called again
    /// whenever the surface is re-created, e.g. across a fullscreen
    /// transition.
    pub fn bind_surface(&mut self, handle: i64) {
        self.surface = Some(handle);
        self.engine.bind_surface(handle);
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// One poll tick: drain engine events, then read duration and
    /// position. Safe to call with no media loaded (reports position 0).
    pub fn poll(&mut self) -> Vec<PlayerEvent> {
        let mut events: Vec<PlayerEvent> = self
            .engine
            .drain_events()
            .into_iter()
            .map(|e| match e {
                EngineEvent::EndOfStream => PlayerEvent::MediaEnded,
            })
            .collect();

        let duration = self.engine.duration_ms();
        if duration != self.last_duration {
            self.last_duration = duration;
            events.push(PlayerEvent::DurationChanged(duration));
        }
        events.push(PlayerEvent::PositionChanged(self.engine.position_ms()));
        events
    }
}

/// Format milliseconds as M:SS (H:MM:SS past an hour).
pub fn format_ms(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Recording engine for tests elsewhere in the crate.
#[cfg(test)]
pub(crate) mod testing {
    use super::{EngineEvent, MediaEngine};
    use std::path::Path;

    /// Records every engine call so tests can assert exact sequences.
    #[derive(Default)]
    pub struct MockEngine {
        pub calls: Vec<String>,
        pub duration: i64,
        pub position: i64,
        pub playing: bool,
        pub pending: Vec<EngineEvent>,
    }

    impl MediaEngine for MockEngine {
        fn load(&mut self, path: &Path) -> Result<(), crate::error::Error> {
            self.calls.push(format!("load {}", path.display()));
            Ok(())
        }
        fn play(&mut self) {
            self.playing = true;
            self.calls.push("play".into());
        }
        fn pause(&mut self) {
            self.playing = false;
            self.calls.push("pause".into());
        }
        fn stop(&mut self) {
            self.playing = false;
            self.calls.push("stop".into());
        }
        fn seek_fraction(&mut self, fraction: f64) {
            self.calls.push(format!("seek {:.3}", fraction));
        }
        fn set_volume(&mut self, volume: i64) {
            self.calls.push(format!("volume {}", volume));
        }
        fn is_playing(&mut self) -> bool {
            self.playing
        }
        fn position_ms(&mut self) -> i64 {
            self.position
        }
        fn duration_ms(&mut self) -> i64 {
            self.duration
        }
        fn bind_surface(&mut self, handle: i64) {
            self.calls.push(format!("bind {}", handle));
        }
        fn drain_events(&mut self) -> Vec<EngineEvent> {
            std::mem::take(&mut self.pending)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockEngine;
    use super::*;
    use std::io::Write;

    fn temp_media() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "data").unwrap();
        f
    }

    #[test]
    fn test_load_unreadable_path_is_silent_noop() {
        let mut c = PlaybackController::with_engine(MockEngine::default());
        c.load(Path::new("/no/such/file.mp3"));
        assert!(c.engine.calls.is_empty());
        assert!(c.current_media().is_none());
    }

    #[test]
    fn test_load_rebinds_surface() {
        let file = temp_media();
        let mut c = PlaybackController::with_engine(MockEngine::default());
        c.bind_surface(42);
        c.load(file.path());

        assert_eq!(c.engine.calls[0], "bind 42");
        assert!(c.engine.calls[1].starts_with("load "));
        // The surface handle is re-applied after every load
        assert_eq!(c.engine.calls[2], "bind 42");
        assert_eq!(c.current_media(), Some(file.path()));
    }

    #[test]
    fn test_stop_clears_current_media() {
        let file = temp_media();
        let mut c = PlaybackController::with_engine(MockEngine::default());
        c.load(file.path());
        c.stop();

        assert!(c.current_media().is_none());
        // With nothing loaded, play is a no-op again
        c.play();
        assert!(!c.engine.calls.contains(&"play".to_string()));
    }

    #[test]
    fn test_transport_noop_without_media() {
        let mut c = PlaybackController::with_engine(MockEngine::default());
        c.play();
        c.pause();
        c.stop();
        assert!(c.engine.calls.is_empty());
    }

    #[test]
    fn test_seek_noop_with_zero_duration() {
        let mut c = PlaybackController::with_engine(MockEngine::default());
        c.seek_ms(5000);
        assert!(c.engine.calls.is_empty());
    }

    #[test]
    fn test_seek_converts_to_fraction() {
        let mut c = PlaybackController::with_engine(MockEngine::default());
        c.engine.duration = 10_000;
        c.seek_ms(5000);
        assert_eq!(c.engine.calls, vec!["seek 0.500"]);
    }

    #[test]
    fn test_volume_is_clamped_and_remembered() {
        let mut c = PlaybackController::with_engine(MockEngine::default());
        c.set_volume(250);
        assert_eq!(c.volume(), 100);
        c.set_volume(-5);
        assert_eq!(c.volume(), 0);
        assert_eq!(c.engine.calls, vec!["volume 100", "volume 0"]);
    }

    #[test]
    fn test_poll_emits_position_every_tick_duration_on_change() {
        let mut c = PlaybackController::with_engine(MockEngine::default());
        c.engine.duration = 9000;
        c.engine.position = 100;

        let first = c.poll();
        assert_eq!(
            first,
            vec![
                PlayerEvent::DurationChanged(9000),
                PlayerEvent::PositionChanged(100)
            ]
        );

        // Same duration: only position on the next tick
        c.engine.position = 600;
        let second = c.poll();
        assert_eq!(second, vec![PlayerEvent::PositionChanged(600)]);
    }

    #[test]
    fn test_poll_with_no_media_reports_defaults() {
        let mut c = PlaybackController::with_engine(MockEngine::default());
        let events = c.poll();
        assert_eq!(events, vec![PlayerEvent::PositionChanged(0)]);
    }

    #[test]
    fn test_poll_maps_end_of_stream() {
        let mut c = PlaybackController::with_engine(MockEngine::default());
        c.engine.pending.push(EngineEvent::EndOfStream);
        let events = c.poll();
        assert_eq!(
            events,
            vec![PlayerEvent::MediaEnded, PlayerEvent::PositionChanged(0)]
        );
    }

    #[test]
    fn test_format_ms() {
        assert_eq!(format_ms(0), "0:00");
        assert_eq!(format_ms(65_000), "1:05");
        assert_eq!(format_ms(3_661_000), "1:01:01");
        assert_eq!(format_ms(-500), "0:00");
    }
}
