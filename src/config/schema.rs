use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/floatplay/config.toml` or `~/.config/floatplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `FLOATPLAY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Decode straight from the file instead of reading it into memory first.
    pub streaming: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { streaming: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Whether the header carries the main play button.
    pub main_button: bool,

    /// Time label shown in the floating player while a track loads.
    pub loading_label: String,

    /// Hide the floating player (and clear the track markers) once the last
    /// track in the list finishes.
    pub hide_player_on_end: bool,

    /// Frame interval of the event loop (milliseconds). This is also the
    /// refresh rate of the time display while playing.
    pub frame_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ floatplay ~ ".to_string(),
            main_button: true,
            loading_label: "Loading...".to_string(),
            hide_player_on_end: false,
            frame_ms: 33,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackTitleField {
    Title,
    Artist,
    Album,
    Filename,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Which fields to use to build a scanned track's title, in order.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub title_fields: Vec<TrackTitleField>,
    /// Separator used to join `title_fields`.
    pub title_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
            title_fields: vec![TrackTitleField::Artist, TrackTitleField::Title],
            title_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file path. Falls back to the XDG state directory when unset.
    pub file: Option<PathBuf>,
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
