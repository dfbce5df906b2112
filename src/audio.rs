//! Audio engine: the capability the playback controller drives, and its
//! rodio implementation.
//!
//! The rodio engine owns the output stream on its own thread. Handles send
//! commands over a channel; the thread answers with `EngineEvent`s on a
//! second channel that the runtime drains once per frame.

mod engine;
mod error;
mod player;
mod sink;
mod thread;
mod types;

pub use engine::{AudioEngine, Sound};
pub use error::LoadError;
pub use player::RodioEngine;
pub use types::{EngineEvent, EngineEventKind, Generation, LoadRequest};
