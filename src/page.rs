//! Presentation state rendered by the UI and mutated by the playback
//! controller through the `Presentation` trait.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
