//! The page model: track items with their markers, the floating player and
//! the selection cursor.

use crate::library::{TrackId, TrackItem};
use crate::player::{Marker, Presentation};

/// Rows the main content gives up while the floating player is shown.
pub const PLAYER_PADDING: u16 = 4;

/// Marker set of one track item.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Markers {
    current: bool,
    playing: bool,
    loading: bool,
}

impl Markers {
    fn slot(&mut self, marker: Marker) -> &mut bool {
        match marker {
            Marker::Current => &mut self.current,
            Marker::Playing => &mut self.playing,
            Marker::Loading => &mut self.loading,
        }
    }

    pub fn contains(&self, marker: Marker) -> bool {
        match marker {
            Marker::Current => self.current,
            Marker::Playing => self.playing,
            Marker::Loading => self.loading,
        }
    }

    pub fn insert(&mut self, marker: Marker) {
        *self.slot(marker) = true;
    }

    pub fn remove(&mut self, marker: Marker) {
        *self.slot(marker) = false;
    }

    pub fn is_empty(&self) -> bool {
        !(self.current || self.playing || self.loading)
    }
}

/// The mini-player pinned under the track list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatingPlayer {
    pub visible: bool,
    pub title: String,
    pub time_label: String,
    /// 0..=100
    pub progress_percent: f64,
}

pub struct Page {
    items: Vec<TrackItem>,
    markers: Vec<Markers>,
    selected: usize,
    player: FloatingPlayer,
    content_padding: u16,
    main_button: bool,
}

impl Page {
    /// Create a page listing `items` in order. `main_button` gates the
    /// header's play button.
    pub fn new(items: Vec<TrackItem>, main_button: bool) -> Self {
        let markers = vec![Markers::default(); items.len()];
        Self {
            items,
            markers,
            selected: 0,
            player: FloatingPlayer::default(),
            content_padding: 0,
            main_button,
        }
    }

    pub fn items(&self) -> &[TrackItem] {
        &self.items
    }

    pub fn index_of(&self, id: TrackId) -> Option<usize> {
        self.items.iter().position(|t| t.id == id)
    }

    pub fn markers_at(&self, index: usize) -> Markers {
        self.markers.get(index).copied().unwrap_or_default()
    }

    #[cfg(test)]
    pub fn markers_of(&self, id: TrackId) -> Markers {
        self.index_of(id)
            .map(|i| self.markers_at(i))
            .unwrap_or_default()
    }

    pub fn player(&self) -> &FloatingPlayer {
        &self.player
    }

    /// Bottom rows reserved for the floating player.
    pub fn content_padding(&self) -> u16 {
        self.content_padding
    }

    pub fn has_main_button(&self) -> bool {
        self.main_button
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_track(&self) -> Option<TrackItem> {
        self.items.get(self.selected).cloned()
    }

    pub fn select(&mut self, index: usize) {
        if !self.items.is_empty() {
            self.selected = index.min(self.items.len() - 1);
        }
    }

    pub fn select_next(&mut self) {
        self.select(self.selected.saturating_add(1));
    }

    pub fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.select(0);
    }

    pub fn select_last(&mut self) {
        self.select(self.items.len().saturating_sub(1));
    }

    fn markers_mut(&mut self, id: TrackId) -> Option<&mut Markers> {
        let index = self.index_of(id)?;
        self.markers.get_mut(index)
    }
}

impl Presentation for Page {
    fn first_track(&self) -> Option<TrackItem> {
        self.items.first().cloned()
    }

    fn next_track(&self, after: TrackId) -> Option<TrackItem> {
        let index = self.index_of(after)?;
        self.items.get(index + 1).cloned()
    }

    fn add_markers(&mut self, track: TrackId, markers: &[Marker]) {
        if let Some(set) = self.markers_mut(track) {
            for &m in markers {
                set.insert(m);
            }
        }
    }

    fn remove_markers(&mut self, track: TrackId, markers: &[Marker]) {
        if let Some(set) = self.markers_mut(track) {
            for &m in markers {
                set.remove(m);
            }
        }
    }

    fn clear_active_track(&mut self) {
        if let Some(set) = self.markers.iter_mut().find(|m| m.contains(Marker::Current)) {
            for m in Marker::ALL {
                set.remove(m);
            }
        }
    }

    fn set_player_title(&mut self, title: &str) {
        self.player.title = title.to_string();
    }

    fn set_time_label(&mut self, label: &str) {
        self.player.time_label = label.to_string();
    }

    fn set_progress(&mut self, percent: f64) {
        self.player.progress_percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }

    fn show_player(&mut self) {
        self.player.visible = true;
        self.content_padding = PLAYER_PADDING;
    }

    fn hide_player(&mut self) {
        self.player.visible = false;
        self.player.progress_percent = 0.0;
        self.content_padding = 0;
    }
}
