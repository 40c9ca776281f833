//! Keyboard shortcuts.
//!
//! Space toggles play/pause, the arrow keys step through the playlist,
//! `F`/`F11` toggle fullscreen and Escape leaves it.

use iced::keyboard::key::Named;
use iced::keyboard::Key;

use crate::ui::messages::Message;

/// Map a key press to a message, if it is bound.
pub fn handle(key: &Key, fullscreen: bool) -> Option<Message> {
    match key {
        Key::Named(Named::Space) => Some(Message::PlayPause),
        Key::Named(Named::ArrowRight) => Some(Message::NextTrack),
        Key::Named(Named::ArrowLeft) => Some(Message::PreviousTrack),
        Key::Named(Named::F11) => Some(Message::ToggleFullscreen),
        Key::Named(Named::Escape) if fullscreen => Some(Message::ToggleFullscreen),
        Key::Character(c) if c.as_str().eq_ignore_ascii_case("f") => {
            Some(Message::ToggleFullscreen)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_bindings() {
        assert!(matches!(
            handle(&Key::Named(Named::Space), false),
            Some(Message::PlayPause)
        ));
        assert!(matches!(
            handle(&Key::Named(Named::ArrowRight), false),
            Some(Message::NextTrack)
        ));
        assert!(matches!(
            handle(&Key::Named(Named::ArrowLeft), false),
            Some(Message::PreviousTrack)
        ));
    }

    #[test]
    fn test_fullscreen_bindings() {
        assert!(matches!(
            handle(&Key::Character("f".into()), false),
            Some(Message::ToggleFullscreen)
        ));
        assert!(matches!(
            handle(&Key::Character("F".into()), false),
            Some(Message::ToggleFullscreen)
        ));
        assert!(matches!(
            handle(&Key::Named(Named::F11), true),
            Some(Message::ToggleFullscreen)
        ));
    }

    #[test]
    fn test_escape_only_leaves_fullscreen() {
        assert!(handle(&Key::Named(Named::Escape), false).is_none());
        assert!(matches!(
            handle(&Key::Named(Named::Escape), true),
            Some(Message::ToggleFullscreen)
        ));
    }

    #[test]
    fn test_unbound_keys_ignored() {
        assert!(handle(&Key::Character("q".into()), false).is_none());
        assert!(handle(&Key::Named(Named::Enter), false).is_none());
    }
}
