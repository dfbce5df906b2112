//! The audio engine capability consumed by the playback controller.
//!
//! `load` never blocks: it hands back a handle right away and reports the
//! outcome later as an `EngineEvent` tagged with the request's generation.

use std::time::Duration;

use super::types::LoadRequest;

pub trait AudioEngine {
    type Sound: Sound;

    /// Start loading `request.source` and return its handle.
    fn load(&mut self, request: LoadRequest) -> Self::Sound;
}

/// One loaded (or loading) piece of media.
///
/// Dropping a handle releases whatever the engine holds for it.
pub trait Sound {
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    fn seek(&self, position: Duration);
    fn position(&self) -> Duration;
    /// Total length, `None` while unknown.
    fn duration(&self) -> Option<Duration>;
}
