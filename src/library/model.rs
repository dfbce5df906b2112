use std::fmt;
use std::path::PathBuf;

/// Identity of one entry in the track list.
///
/// Ids are handed out per entry when the list is built, so two entries that
/// point at the same file are still different tracks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub(crate) usize);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A playable entry: where the media lives and what to call it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackItem {
    pub id: TrackId,
    pub source: PathBuf,
    pub title: String,
}

/// Assign ids in list order.
pub fn number_tracks(entries: Vec<(PathBuf, String)>) -> Vec<TrackItem> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (source, title))| TrackItem {
            id: TrackId(i),
            source,
            title,
        })
        .collect()
}
