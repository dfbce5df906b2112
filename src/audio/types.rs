//! Audio-related small types and handles.
//!
//! This module defines the load request, the notifications an engine sends
//! back, the per-load generation token and the shared playback clock.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::error::LoadError;

/// Monotonically increasing token attached to every load request.
///
/// Notifications carry the generation of the load they belong to, so a
/// listener can drop anything that belongs to a superseded load.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    /// Media to open.
    pub source: PathBuf,
    /// Decode while reading instead of buffering the whole file.
    pub streaming: bool,
    pub generation: Generation,
}

#[derive(Debug)]
pub enum EngineEventKind {
    /// The source was opened and decoded; playback can start.
    Loaded,
    /// The source could not be opened or decoded.
    LoadFailed { source: PathBuf, error: LoadError },
    Played,
    Paused,
    Stopped,
    /// The source played to its end.
    Ended,
}

/// A notification from the engine about one load.
#[derive(Debug)]
pub struct EngineEvent {
    pub generation: Generation,
    pub kind: EngineEventKind,
}

impl EngineEvent {
    pub fn new(generation: Generation, kind: EngineEventKind) -> Self {
        Self { generation, kind }
    }
}

/// Playback position bookkeeping for one sound.
///
/// Position is the time accumulated across earlier play spans plus the
/// running span, if any.
#[derive(Debug, Clone, Default)]
pub struct SoundClock {
    started_at: Option<Instant>,
    accumulated: Duration,
    duration: Option<Duration>,
}

impl SoundClock {
    pub fn position(&self) -> Duration {
        let pos = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        match self.duration {
            Some(total) => pos.min(total),
            None => pos,
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Option<Duration>) {
        self.duration = duration.filter(|d| !d.is_zero());
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    /// Move to `position`, keeping the running/paused state.
    pub fn jump_to(&mut self, position: Duration) {
        self.accumulated = position;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}

pub type ClockHandle = Arc<Mutex<SoundClock>>;
