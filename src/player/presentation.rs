use crate::library::{TrackId, TrackItem};

/// State classes a track item can carry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The item owns the playback session.
    Current,
    Playing,
    Loading,
}

impl Marker {
    pub const ALL: [Marker; 3] = [Marker::Current, Marker::Playing, Marker::Loading];
}

/// What the controller needs from whatever shows the track list and the
/// floating player.
///
/// Lookups that find nothing return `None`; the controller treats a missing
/// element as "nothing to do", never as an error.
pub trait Presentation {
    /// First track in presentation order.
    fn first_track(&self) -> Option<TrackItem>;

    /// Track immediately after `after` in presentation order.
    fn next_track(&self, after: TrackId) -> Option<TrackItem>;

    fn add_markers(&mut self, track: TrackId, markers: &[Marker]);
    fn remove_markers(&mut self, track: TrackId, markers: &[Marker]);

    /// Strip every marker from the item currently marked `Current`.
    fn clear_active_track(&mut self);

    fn set_player_title(&mut self, title: &str);
    fn set_time_label(&mut self, label: &str);

    /// Progress bar width, in percent.
    fn set_progress(&mut self, percent: f64);

    fn show_player(&mut self);

    /// Hide the floating player, reset its progress and give the reserved
    /// space back to the main content.
    fn hide_player(&mut self);
}
