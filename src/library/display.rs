use std::path::Path;

use crate::config::TrackTitleField;

/// Build a track title according to the provided `fields` and separator.
///
/// Falls back to `title` when no parts were produced.
pub fn title_from_fields(
    path: &Path,
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
    fields: &[TrackTitleField],
    sep: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackTitleField::Title => {
                if !title.trim().is_empty() {
                    parts.push(title.trim().to_string());
                }
            }
            TrackTitleField::Artist => {
                if let Some(a) = artist.map(str::trim).filter(|s| !s.is_empty()) {
                    parts.push(a.to_string());
                }
            }
            TrackTitleField::Album => {
                if let Some(a) = album.map(str::trim).filter(|s| !s.is_empty()) {
                    parts.push(a.to_string());
                }
            }
            TrackTitleField::Filename => {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
        }
    }

    if parts.is_empty() {
        title.to_string()
    } else {
        parts.join(sep)
    }
}
