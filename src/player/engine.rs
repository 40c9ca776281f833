//! The native media engine seam.
//!
//! [`MediaEngine`] is the only surface the rest of the crate sees; the
//! production implementation wraps a `libmpv` handle via the `mpv`
//! crate. Engine calls are non-blocking property reads/writes, and every
//! failure is logged and swallowed: an invalid transport operation is a
//! no-op, never an error the UI has to handle.

use std::path::Path;

use crate::error::Error;

/// Events the engine pushes (as opposed to the polled position/duration).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The loaded media played to its end.
    EndOfStream,
}

/// Transport and query operations of the native engine.
///
/// Implementations must tolerate every call while no media is loaded by
/// doing nothing and reporting zero/false.
pub trait MediaEngine {
    /// Load `path` as the engine's current media, replacing any previous
    /// one. Playback does not start until [`MediaEngine::play`].
    fn load(&mut self, path: &Path) -> Result<(), Error>;

    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);

    /// Seek to a fraction (0.0 - 1.0) of the total duration.
    fn seek_fraction(&mut self, fraction: f64);

    /// Volume 0 - 100.
    fn set_volume(&mut self, volume: i64);

    fn is_playing(&mut self) -> bool;

    /// Position in milliseconds; 0 when unknown.
    fn position_ms(&mut self) -> i64;

    /// Duration in milliseconds; 0 when unknown. Some containers report
    /// a duration only after a short buffering delay, so callers must
    /// treat this as a step function.
    fn duration_ms(&mut self) -> i64;

    /// Attach video output to a native window, identified by its
    /// platform handle (HWND / XID / NSView pointer).
    fn bind_surface(&mut self, handle: i64);

    /// Drain pending engine events.
    fn drain_events(&mut self) -> Vec<EngineEvent>;
}

/// `libmpv`-backed engine.
pub struct MpvEngine {
    handler: mpv::MpvHandler,
}

impl MpvEngine {
    /// Create the engine. Video output stays detached until a surface is
    /// bound.
    pub fn new() -> Result<Self, Error> {
        let mut builder = mpv::MpvHandlerBuilder::new()
            .map_err(|e| Error::engine(format!("mpv builder: {:?}", e)))?;
        // Plain embedded surface: no on-screen controller, no default key
        // bindings stealing input from the toolkit.
        builder
            .set_option("osc", false)
            .map_err(|e| Error::engine(format!("mpv option osc: {:?}", e)))?;
        builder
            .set_option("input-default-bindings", false)
            .map_err(|e| Error::engine(format!("mpv option input: {:?}", e)))?;
        let handler = builder
            .build()
            .map_err(|e| Error::engine(format!("mpv init: {:?}", e)))?;
        Ok(Self { handler })
    }
}

impl MediaEngine for MpvEngine {
    fn load(&mut self, path: &Path) -> Result<(), Error> {
        let path = path.to_string_lossy();
        self.handler
            .command(&["loadfile", &path, "replace"])
            .map_err(|e| Error::engine(format!("loadfile {}: {:?}", path, e)))?;
        // loadfile starts out paused; playback is an explicit play()
        if let Err(e) = self.handler.set_property("pause", true) {
            tracing::warn!("mpv pause-on-load failed: {:?}", e);
        }
        Ok(())
    }

    fn play(&mut self) {
        if let Err(e) = self.handler.set_property("pause", false) {
            tracing::warn!("mpv play failed: {:?}", e);
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.handler.set_property("pause", true) {
            tracing::warn!("mpv pause failed: {:?}", e);
        }
    }

    fn stop(&mut self) {
        if let Err(e) = self.handler.command(&["stop"]) {
            tracing::warn!("mpv stop failed: {:?}", e);
        }
    }

    fn seek_fraction(&mut self, fraction: f64) {
        let percent = (fraction * 100.0).clamp(0.0, 100.0);
        if let Err(e) = self.handler.set_property("percent-pos", percent) {
            tracing::debug!("mpv seek ignored: {:?}", e);
        }
    }

    fn set_volume(&mut self, volume: i64) {
        let volume = volume.clamp(0, 100) as f64;
        if let Err(e) = self.handler.set_property("volume", volume) {
            tracing::warn!("mpv volume failed: {:?}", e);
        }
    }

    fn is_playing(&mut self) -> bool {
        let paused = self.handler.get_property::<bool>("pause").unwrap_or(true);
        let idle = self
            .handler
            .get_property::<bool>("idle-active")
            .unwrap_or(true);
        !paused && !idle
    }

    fn position_ms(&mut self) -> i64 {
        self.handler
            .get_property::<f64>("time-pos")
            .map(|secs| (secs * 1000.0) as i64)
            .unwrap_or(0)
            .max(0)
    }

    fn duration_ms(&mut self) -> i64 {
        self.handler
            .get_property::<f64>("duration")
            .map(|secs| (secs * 1000.0) as i64)
            .unwrap_or(0)
            .max(0)
    }

    fn bind_surface(&mut self, handle: i64) {
        if let Err(e) = self.handler.set_property("wid", handle) {
            // Missing resource / unsupported platform: degrade, never fail
            tracing::warn!("mpv surface binding failed: {:?}", e);
        }
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.handler.wait_event(0.0) {
            if let mpv::Event::EndFile(Ok(reason)) = event {
                match reason {
                    mpv::EndFileReason::MPV_END_FILE_REASON_EOF => {
                        events.push(EngineEvent::EndOfStream);
                    }
                    _ => {}
                }
            }
        }
        events
    }
}
