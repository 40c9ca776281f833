//! Satsuma - a small desktop media player.
//!
//! Wraps a native media engine (libmpv) in an iced window: playlist
//! with loop modes, per-container tag display, video with fullscreen,
//! and a close-to-tray option.

// Hide console window on Windows when running as GUI
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod metadata;
pub mod player;
pub mod playlist;
pub mod ui;

use clap::Parser;
use iced::application;
use iced::window;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ui::Satsuma;

/// Embedded app icon (32x32 RGBA PNG)
const APP_ICON: &[u8] = include_bytes!("../assets/icon-32.png");

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("satsuma=info".parse()?))
        .init();

    let startup_file = cli::startup_file(&args);
    let config = config::load();

    // Load window icon from embedded PNG
    let icon = load_icon(APP_ICON);

    application("Satsuma", Satsuma::update, Satsuma::view)
        .subscription(Satsuma::subscription)
        .window(window::Settings {
            icon,
            // The window decides whether close means exit or tray
            exit_on_close_request: false,
            ..Default::default()
        })
        .run_with(move || Satsuma::new(config, startup_file))
        .map_err(|e| anyhow::anyhow!("GUI Error: {}", e))
}

/// Load a PNG icon from bytes into an iced window icon
fn load_icon(png_bytes: &[u8]) -> Option<window::Icon> {
    let image = image::load_from_memory(png_bytes).ok()?.into_rgba8();
    let (width, height) = image.dimensions();
    window::icon::from_rgba(image.into_raw(), width, height).ok()
}
