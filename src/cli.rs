//! Command line interface.

use clap::Parser;
use std::path::PathBuf;

use crate::library;

#[derive(Parser, Debug)]
#[command(name = "satsuma", version, about = "A small desktop media player")]
pub struct Cli {
    /// Audio file to start playing immediately
    pub file: Option<PathBuf>,
}

/// Validate the startup argument: it must be an existing file with a
/// supported audio extension, anything else is logged and ignored.
pub fn startup_file(args: &Cli) -> Option<PathBuf> {
    let path = args.file.as_ref()?;
    if !path.is_file() {
        tracing::warn!("Ignoring startup file that does not exist: {:?}", path);
        return None;
    }
    if !library::is_audio_file(path) {
        tracing::warn!("Ignoring startup file without an audio extension: {:?}", path);
        return None;
    }
    Some(path.clone())
}
