//! Media file discovery.
//!
//! A playlist is populated wholesale from either a single opened file or
//! from every media file directly inside a chosen folder. There is no
//! recursive library scan and no persistent index; the file system is the
//! source of truth every time.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every container the player will load.
///
/// Extensions are matched case-insensitively.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "ogg", "flac", "m4a", "mp4", "avi", "mkv", "webm", "mov",
];

/// The subset of [`MEDIA_EXTENSIONS`] that gets a video surface instead of
/// the metadata/art panel.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "webm", "mov"];

/// The subset accepted from the command line (audio only).
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a"];

fn has_extension_in(path: &Path, list: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            list.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Whether the path has a supported media extension.
pub fn is_media_file(path: &Path) -> bool {
    has_extension_in(path, MEDIA_EXTENSIONS)
}

/// Whether the path has a video extension.
pub fn is_video_file(path: &Path) -> bool {
    has_extension_in(path, VIDEO_EXTENSIONS)
}

/// Whether the path has a supported audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    has_extension_in(path, AUDIO_EXTENSIONS)
}

/// List every media file directly inside `dir`, sorted lexicographically
/// by path.
///
/// Subdirectories are not descended into. Unreadable entries are skipped.
pub fn list_folder_media(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_media_file(p))
        .collect();
    files.sort();
    files
}

/// List entries of `dir` for the file browser panel: subdirectories first,
/// then media files, each group sorted by path.
pub fn list_browser_entries(dir: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        } else if entry.file_type().is_file() {
            let path = entry.into_path();
            if is_media_file(&path) {
                files.push(path);
            }
        }
    }
    dirs.sort();
    files.sort();
    (dirs, files)
}
