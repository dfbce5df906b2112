//! Hand-written playlists.
//!
//! A playlist is a TOML file with one `[[track]]` table per entry:
//!
//! ```toml
//! [[track]]
//! src = "intro.mp3"
//! title = "Intro"
//! ```
//!
//! Relative `src` paths resolve against the playlist's own directory. The
//! same `src` may appear more than once; each entry is its own track.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::{TrackItem, number_tracks};

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to read playlist {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid playlist {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("playlist entry {index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },
}

#[derive(Debug, Default, Deserialize)]
struct PlaylistFile {
    #[serde(default, rename = "track")]
    tracks: Vec<PlaylistEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    src: String,
    title: String,
}

pub fn is_playlist_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

/// Parse playlist text. `base` anchors relative sources.
pub fn parse_playlist(text: &str, base: &Path, path: &Path) -> Result<Vec<TrackItem>, PlaylistError> {
    let file: PlaylistFile = toml::from_str(text).map_err(|source| PlaylistError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::with_capacity(file.tracks.len());
    for (index, entry) in file.tracks.into_iter().enumerate() {
        let src = entry.src.trim();
        if src.is_empty() {
            return Err(PlaylistError::EmptyField { index, field: "src" });
        }
        let title = entry.title.trim();
        if title.is_empty() {
            return Err(PlaylistError::EmptyField {
                index,
                field: "title",
            });
        }

        let src = PathBuf::from(src);
        let source = if src.is_absolute() { src } else { base.join(src) };
        entries.push((source, title.to_string()));
    }

    Ok(number_tracks(entries))
}

pub fn load_playlist(path: &Path) -> Result<Vec<TrackItem>, PlaylistError> {
    let text = std::fs::read_to_string(path).map_err(|source| PlaylistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    parse_playlist(&text, base, path)
}
