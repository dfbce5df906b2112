use crate::audio::Generation;
use crate::library::{TrackId, TrackItem};

use super::refresh::RefreshTask;

/// Lifecycle phase of the playback session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// No track.
    #[default]
    Idle,
    /// A load was requested and playback has not started yet.
    Loading,
    Playing,
    Paused,
    /// Stopped with the handle kept; playing again restarts the track.
    Stopped,
}

/// The single playback session: engine handle, current track and the
/// playing flag, plus the generation of the load in flight.
///
/// A session without a track never holds a handle and is never playing.
#[derive(Debug)]
pub struct Session<S> {
    pub(super) handle: Option<S>,
    pub(super) track: Option<TrackItem>,
    pub(super) playing: bool,
    pub(super) generation: Generation,
    pub(super) state: PlaybackState,
    pub(super) refresh: RefreshTask,
}

impl<S> Default for Session<S> {
    fn default() -> Self {
        Self {
            handle: None,
            track: None,
            playing: false,
            generation: Generation::default(),
            state: PlaybackState::Idle,
            refresh: RefreshTask::default(),
        }
    }
}

impl<S> Session<S> {
    /// Point the session at `track` and hand out a fresh generation for its load.
    pub(super) fn begin(&mut self, track: TrackItem) -> Generation {
        self.generation = self.generation.next();
        self.track = Some(track);
        self.playing = false;
        self.state = PlaybackState::Loading;
        self.generation
    }

    /// Back to idle. Drops the handle.
    pub(super) fn reset(&mut self) {
        self.handle = None;
        self.track = None;
        self.playing = false;
        self.state = PlaybackState::Idle;
        self.refresh.cancel();
    }

    /// Whether a notification tagged `generation` belongs to this session's load.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.track.is_some() && self.generation == generation
    }

    pub fn is_current_track(&self, id: TrackId) -> bool {
        self.track.as_ref().is_some_and(|t| t.id == id)
    }

    pub fn track(&self) -> Option<&TrackItem> {
        self.track.as_ref()
    }

    #[cfg(test)]
    pub fn handle(&self) -> Option<&S> {
        self.handle.as_ref()
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[cfg(test)]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[cfg(test)]
    pub fn refresh(&self) -> &RefreshTask {
        &self.refresh
    }
}
