use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::title_from_fields;
use super::{TrackItem, number_tracks};

pub(super) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read a display title for `path`, preferring tags over the file name.
fn read_title(path: &Path, settings: &LibrarySettings) -> String {
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut title = default_title;
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.title() {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            artist = tag
                .artist()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            album = tag
                .album()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
    }

    title_from_fields(
        path,
        &title,
        artist.as_deref(),
        album.as_deref(),
        &settings.title_fields,
        &settings.title_separator,
    )
}

/// Walk `dir` and build the track list in title order.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<TrackItem> {
    let mut entries: Vec<(PathBuf, String)> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            entries.push((path.to_path_buf(), read_title(path, settings)));
        }
    }

    entries.sort_by(|a, b| a.1.to_lowercase().cmp(&b.1.to_lowercase()));
    log::debug!("scanned {} tracks under {}", entries.len(), dir.display());
    number_tracks(entries)
}
