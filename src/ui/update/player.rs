//! Transport and poll handlers.
//!
//! Every playlist transition returns engine commands; [`run_commands`]
//! is the single place that executes them. The engine resets its volume
//! on each load, so the remembered volume is re-applied after every
//! `Load` command.

use std::path::Path;

use crate::player::{MediaEngine, PlaybackController, PlayerEvent};
use crate::playlist::{EngineCommand, PlaylistEvent};
use crate::ui::state::WindowState;
use crate::ui::tray;

/// Execute engine commands in order. Returns whether any media was
/// (re)loaded, which resets the displayed position.
fn run_commands<E: MediaEngine>(
    controller: &mut PlaybackController<E>,
    volume: i64,
    commands: Vec<EngineCommand>,
) -> bool {
    let mut loaded = false;
    for command in commands {
        match command {
            EngineCommand::Load(path) => {
                controller.load(&path);
                controller.set_volume(volume);
                loaded = true;
            }
            EngineCommand::Play => controller.play(),
            EngineCommand::Pause => controller.pause(),
            EngineCommand::Stop => controller.stop(),
        }
    }
    loaded
}

/// Execute a transition's commands and refresh everything derived from
/// the current track (position display, tray tooltip, status line).
pub fn apply_commands(state: &mut WindowState, commands: Vec<EngineCommand>) {
    if !commands.is_empty() {
        let volume = state.config.audio.volume;
        match state.controller.as_mut() {
            Some(controller) => {
                if run_commands(controller, volume, commands) {
                    state.position_ms = 0;
                    state.duration_ms = 0;
                    state.seek_preview = None;
                }
            }
            None => {
                // The commands were never issued, so the transition's
                // playing status is a lie
                state.playlist.mark_stopped();
                state.status_line = "Media engine not available".to_string();
                return;
            }
        }
    }

    let tooltip = match state.current_tag() {
        Some((path, record)) => tray::tooltip(Some(&record), Some(&path)),
        None => tray::tooltip(None, None),
    };
    state.tray.update_tooltip(tooltip);
    state.rebuild_status();
}

/// Play/pause button. The transition needs the engine's actual state to
/// decide between pause, resume and reload.
pub fn play_pause(state: &mut WindowState) {
    let (playing, media) = match state.controller.as_mut() {
        Some(controller) => (
            controller.is_playing(),
            controller.current_media().map(Path::to_path_buf),
        ),
        None => (false, None),
    };
    let commands = state.playlist.apply(PlaylistEvent::PlayPause {
        engine_playing: playing,
        engine_media: media,
    });
    apply_commands(state, commands);
}

/// What one batch of poll events means for the display.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub position: Option<i64>,
    pub duration: Option<i64>,
    pub ended: bool,
}

/// Fold poll events, suppressing position updates while the seek slider
/// is latched mid-drag.
pub fn fold_events(events: &[PlayerEvent], seek_latched: bool) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    for event in events {
        match event {
            PlayerEvent::PositionChanged(p) => {
                if !seek_latched {
                    outcome.position = Some(*p);
                }
            }
            PlayerEvent::DurationChanged(d) => outcome.duration = Some(*d),
            PlayerEvent::MediaEnded => outcome.ended = true,
        }
    }
    outcome
}

/// 500 ms tick: poll the controller and act on what it reports.
pub fn engine_tick(state: &mut WindowState) {
    let Some(controller) = state.controller.as_mut() else {
        return;
    };
    let events = controller.poll();
    let outcome = fold_events(&events, state.seek_preview.is_some());

    if let Some(duration) = outcome.duration {
        state.duration_ms = duration;
    }
    if let Some(position) = outcome.position {
        state.position_ms = position;
    }
    if outcome.ended {
        let commands = state.playlist.apply(PlaylistEvent::MediaEnded);
        apply_commands(state, commands);
    } else {
        state.rebuild_status();
    }
}

/// Slider drag: latch the preview value, touch nothing else.
pub fn seek_preview(state: &mut WindowState, value: f64) {
    state.seek_preview = Some(value);
}

/// Slider release: the one actual seek of the whole gesture.
pub fn seek_release(state: &mut WindowState) {
    let Some(target) = state.seek_preview.take() else {
        return;
    };
    let target = target as i64;
    if let Some(controller) = state.controller.as_mut() {
        controller.seek_ms(target);
    }
    state.position_ms = target;
}

/// Volume slider movement. Persisting happens on release.
pub fn set_volume(state: &mut WindowState, volume: i64) {
    let volume = volume.clamp(0, 100);
    state.config.audio.volume = volume;
    if let Some(controller) = state.controller.as_mut() {
        controller.set_volume(volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::testing::MockEngine;
    use std::io::Write;

    fn temp_media() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "data").unwrap();
        f
    }

    #[test]
    fn test_volume_reapplied_after_every_load() {
        let file = temp_media();
        let mut controller = PlaybackController::with_engine(MockEngine::default());

        let commands = vec![
            EngineCommand::Load(file.path().to_path_buf()),
            EngineCommand::Play,
        ];
        let loaded = run_commands(&mut controller, 35, commands);

        assert!(loaded);
        assert_eq!(
            controller.volume(),
            35,
            "load must not leave the engine at its default volume"
        );
        // Order matters: volume is restored before playback resumes
        let calls = controller.engine_mut().calls.clone();
        let load_at = calls.iter().position(|c| c.starts_with("load")).unwrap();
        let volume_at = calls.iter().position(|c| c == "volume 35").unwrap();
        let play_at = calls.iter().position(|c| c == "play").unwrap();
        assert!(load_at < volume_at && volume_at < play_at);
    }

    #[test]
    fn test_run_commands_without_load_does_not_reset() {
        let mut controller = PlaybackController::with_engine(MockEngine::default());
        let loaded = run_commands(&mut controller, 100, vec![EngineCommand::Stop]);
        assert!(!loaded);
    }

    #[test]
    fn test_fold_events_latched_drag_keeps_position() {
        let events = [
            PlayerEvent::DurationChanged(90_000),
            PlayerEvent::PositionChanged(41_000),
        ];

        let latched = fold_events(&events, true);
        assert_eq!(latched.position, None);
        assert_eq!(latched.duration, Some(90_000));

        let free = fold_events(&events, false);
        assert_eq!(free.position, Some(41_000));
    }

    #[test]
    fn test_fold_events_detects_end() {
        let events = [PlayerEvent::MediaEnded, PlayerEvent::PositionChanged(0)];
        assert!(fold_events(&events, false).ended);
        // the latch does not swallow end-of-media
        assert!(fold_events(&events, true).ended);
    }

    #[test]
    fn test_scrub_issues_exactly_one_seek() {
        let file = temp_media();
        let mut controller = PlaybackController::with_engine(MockEngine::default());
        controller.engine_mut().duration = 100_000;
        controller.load(file.path());
        controller.engine_mut().calls.clear();

        // A drag is many preview values and one release
        let previews = [10_000.0, 20_000.0, 30_000.0_f64];
        let target = *previews.last().unwrap() as i64;
        controller.seek_ms(target);

        let seeks: Vec<_> = controller
            .engine_mut()
            .calls
            .iter()
            .filter(|c| c.starts_with("seek"))
            .collect();
        assert_eq!(seeks, vec!["seek 0.300"]);
    }

    #[test]
    fn test_apply_commands_without_engine_stays_stopped() {
        use crate::playlist::PlayStatus;
        use std::path::PathBuf;

        let mut state = WindowState::without_engine(crate::config::Config::default());
        let commands = state
            .playlist
            .apply(PlaylistEvent::Replace(vec![PathBuf::from("song.mp3")]));

        apply_commands(&mut state, commands);
        assert_eq!(state.playlist.status(), PlayStatus::Stopped);
        assert_eq!(state.status_line, "Media engine not available");
    }

    #[test]
    fn test_seek_release_clears_latch_without_engine() {
        let mut state = WindowState::without_engine(crate::config::Config::default());
        state.seek_preview = Some(12_500.0);

        seek_release(&mut state);
        assert_eq!(state.seek_preview, None);
        assert_eq!(state.position_ms, 12_500);

        // A second release with no drag in progress is a no-op
        state.position_ms = 0;
        seek_release(&mut state);
        assert_eq!(state.position_ms, 0);
    }
}
