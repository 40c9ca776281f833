//! UI module for Satsuma.

mod messages;
mod platform;
mod state;
mod tray;
mod update;
mod views;

use iced::{keyboard, time, window, Element, Subscription, Task};
use std::path::PathBuf;

pub use messages::Message;
use state::WindowState;

use crate::config::Config;
use crate::player::POLL_INTERVAL;

pub struct Satsuma {
    state: WindowState,
}

impl Satsuma {
    pub fn new(config: Config, startup_file: Option<PathBuf>) -> (Self, Task<Message>) {
        let state = WindowState::new(config, startup_file);
        // Resolve the window id first; the surface handle follows from it
        let bootstrap = window::get_latest().map(Message::WindowReady);
        (Self { state }, bootstrap)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        update::update(&mut self.state, message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        views::root(&self.state)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            // One timer drives position, duration and the status line;
            // everything display-side derives from the same engine read
            time::every(POLL_INTERVAL).map(|_| Message::EngineTick),
            keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers))),
            // Close requests are intercepted for close-to-tray
            window::close_requests().map(Message::CloseRequested),
        ])
    }
}
