//! Track playback controller.
//!
//! One session at a time: starting a track stops the previous one, and
//! every engine notification is checked against the session's current
//! load generation before it may touch presentation state.

mod controller;
mod presentation;
mod refresh;
mod session;
mod time;

pub use controller::{Controller, ControllerOptions};
pub use presentation::{Marker, Presentation};
pub use session::PlaybackState;
