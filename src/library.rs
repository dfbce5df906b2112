//! Track list construction.
//!
//! The list is built either by scanning a directory for audio files or by
//! reading a TOML playlist. Either way every entry gets its own `TrackId`.

mod display;
mod model;
mod playlist;
mod scan;

use std::path::Path;

use crate::config::LibrarySettings;

pub use model::{TrackId, TrackItem, number_tracks};
pub use playlist::{PlaylistError, load_playlist};
pub use scan::scan;

/// Build the track list for `target`: a playlist file or a music directory.
pub fn load(target: &Path, settings: &LibrarySettings) -> Result<Vec<TrackItem>, PlaylistError> {
    if target.is_file() && playlist::is_playlist_path(target) {
        load_playlist(target)
    } else {
        Ok(scan(target, settings))
    }
}

#[cfg(test)]
mod tests;
